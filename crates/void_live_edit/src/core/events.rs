//! Editor notifications.
//!
//! UI panels subscribe to an `EventDispatcher` to refresh undo/redo buttons,
//! inspector fields and selection highlights. Delivery is synchronous: every
//! listener has seen an event before the call that caused it returns.

use crossbeam_channel::{Receiver, Sender};
use void_scene::{EntityId, Transform};

/// Change notifications emitted by the editing core.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// Whether the undo stack has entries
    UndoAvailabilityChanged(bool),
    /// Whether the redo stack has entries
    RedoAvailabilityChanged(bool),
    /// The entity's local transform was written
    TransformChanged { entity: EntityId, transform: Transform },
    /// Selection target changed (`None` = nothing selected)
    EntitySelected(Option<EntityId>),
}

/// Receiver of editor notifications.
pub trait EditorListener: Send {
    fn on_event(&mut self, event: &EditorEvent);
}

impl<F> EditorListener for F
where
    F: FnMut(&EditorEvent) + Send,
{
    fn on_event(&mut self, event: &EditorEvent) {
        self(event)
    }
}

/// Listener that forwards every event into a channel.
///
/// Sending never blocks, so a UI thread can drain the receiver at its own pace.
pub struct ChannelListener {
    sender: Sender<EditorEvent>,
}

impl ChannelListener {
    pub fn new(sender: Sender<EditorEvent>) -> Self {
        Self { sender }
    }
}

impl EditorListener for ChannelListener {
    fn on_event(&mut self, event: &EditorEvent) {
        // A dropped receiver just means nobody is listening any more.
        let _ = self.sender.send(event.clone());
    }
}

/// Subscriber ID
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Fan-out of editor events to registered listeners.
#[derive(Default)]
pub struct EventDispatcher {
    listeners: Vec<(ListenerId, Box<dyn EditorListener>)>,
    next_id: u64,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl EditorListener + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Subscribe a fresh unbounded channel and return its receiving end.
    pub fn subscribe_channel(&mut self) -> Receiver<EditorEvent> {
        let (sender, receiver) = crossbeam_channel::unbounded();
        self.subscribe(ChannelListener::new(sender));
        receiver
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn emit(&mut self, event: EditorEvent) {
        log::trace!(target: "void_live_edit::events", "{:?}", event);
        for (_, listener) in &mut self.listeners {
            listener.on_event(&event);
        }
    }
}
