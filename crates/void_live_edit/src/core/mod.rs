//! Core editing state: history, selection, configuration, notifications and
//! the per-tick session tying them together.

mod config;
mod events;
mod history;
mod selection;
pub mod session;

pub use config::EditConfig;
pub use events::{ChannelListener, EditorEvent, EditorListener, EventDispatcher, ListenerId};
pub use history::UndoHistory;
pub use selection::Selection;
pub use session::{FrameInput, LiveEditSession, TickOutcome};

use void_scene::SceneGraph;

/// Everything a history operation needs to reach outside itself: the live
/// scene it writes to and the listeners it notifies.
pub struct EditContext<'a> {
    pub scene: &'a mut SceneGraph,
    pub events: &'a mut EventDispatcher,
}

impl<'a> EditContext<'a> {
    pub fn new(scene: &'a mut SceneGraph, events: &'a mut EventDispatcher) -> Self {
        Self { scene, events }
    }

    pub fn scene(&self) -> &SceneGraph {
        self.scene
    }
}
