//! Coalescing of rapid keyboard edits into single undo steps.
//!
//! Holding a key applies a small delta every tick. Each delta is written to
//! the scene immediately, but history only sees one command per burst: the
//! transform before the first edit and the transform when the burst ended.

use void_scene::EntityId;

use crate::commands::{TransformCommand, TransformSnapshot};
use crate::core::{EditContext, UndoHistory};

/// Label of commands produced from keyboard bursts.
pub const BATCH_DESCRIPTION: &str = "Keyboard Edit";

#[derive(Debug, Clone)]
struct OpenBatch {
    entity: EntityId,
    start_snapshot: TransformSnapshot,
    started_at: f64,
    last_edit_time: f64,
    edits: usize,
}

/// Batch state machine: idle, or one open burst on one entity.
#[derive(Debug, Default)]
pub struct EditBatcher {
    open: Option<OpenBatch>,
}

impl EditBatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Entity the open burst is editing.
    pub fn target(&self) -> Option<EntityId> {
        self.open.as_ref().map(|batch| batch.entity)
    }

    /// Number of deltas folded into the open burst (0 when idle).
    pub fn pending_edits(&self) -> usize {
        self.open.as_ref().map_or(0, |batch| batch.edits)
    }

    /// Record a delta that has already been written to `entity`.
    ///
    /// `pre_delta` is the entity's transform before this delta; it becomes the
    /// burst's start state when this edit opens a new burst. An open burst on a
    /// different entity is finalized first. Returns `true` if that commit
    /// produced a history entry.
    pub fn record_edit(
        &mut self,
        cx: &mut EditContext<'_>,
        history: &mut UndoHistory,
        entity: EntityId,
        pre_delta: TransformSnapshot,
        now: f64,
    ) -> bool {
        let mut committed = false;

        if let Some(batch) = self.open.as_mut() {
            if batch.entity == entity {
                batch.last_edit_time = now;
                batch.edits += 1;
                log::trace!(
                    target: "void_live_edit::batching",
                    "Extended batch on {} ({} edits)",
                    entity,
                    batch.edits
                );
                return false;
            }
            committed = self.flush(cx, history);
        }

        log::debug!(target: "void_live_edit::batching", "Opened batch on {} at {:.3}s", entity, now);
        self.open = Some(OpenBatch {
            entity,
            start_snapshot: pre_delta,
            started_at: now,
            last_edit_time: now,
            edits: 1,
        });
        committed
    }

    /// Finalize the open burst once more than `timeout` seconds passed since its last edit.
    pub fn update(
        &mut self,
        cx: &mut EditContext<'_>,
        history: &mut UndoHistory,
        now: f64,
        timeout: f64,
    ) -> bool {
        let expired = self
            .open
            .as_ref()
            .is_some_and(|batch| now - batch.last_edit_time > timeout);
        expired && self.flush(cx, history)
    }

    /// Finalize the open burst now, whatever its age.
    ///
    /// Returns `true` if a command reached the history. Bursts whose entity is
    /// gone, or whose net change is zero, are dropped.
    pub fn flush(&mut self, cx: &mut EditContext<'_>, history: &mut UndoHistory) -> bool {
        let Some(batch) = self.open.take() else {
            return false;
        };

        let Some(current) = TransformSnapshot::capture(cx.scene(), batch.entity) else {
            log::warn!(
                target: "void_live_edit::batching",
                "Dropped batch of {} edits: {} was destroyed",
                batch.edits,
                batch.entity
            );
            return false;
        };

        if current == batch.start_snapshot {
            log::debug!(
                target: "void_live_edit::batching",
                "Dropped batch on {}: no net change",
                batch.entity
            );
            return false;
        }

        let cmd = TransformCommand::new(
            batch.entity,
            batch.start_snapshot,
            current,
            BATCH_DESCRIPTION,
        );
        let cmd = match cmd {
            Ok(cmd) => cmd,
            Err(err) => {
                log::warn!(target: "void_live_edit::batching", "Dropped batch: {}", err);
                return false;
            }
        };

        log::info!(
            target: "void_live_edit::batching",
            "Committed {} edits on {} ({:.2}s burst)",
            batch.edits,
            batch.entity,
            batch.last_edit_time - batch.started_at
        );
        history.store_change(cx, Box::new(cmd));
        true
    }

    /// Forget the open burst without touching history.
    pub fn discard(&mut self) -> bool {
        match self.open.take() {
            Some(batch) => {
                log::debug!(
                    target: "void_live_edit::batching",
                    "Discarded batch on {} ({} edits)",
                    batch.entity,
                    batch.edits
                );
                true
            }
            None => false,
        }
    }
}
