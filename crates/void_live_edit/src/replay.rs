//! Scripted input replay.
//!
//! Drives a [`LiveEditSession`] headlessly from a JSON script, one simulated
//! frame at a time. Used by the `live_edit_replay` binary and by tests that
//! want realistic tick streams without a window.
//!
//! ```json
//! {
//!   "frame_dt": 0.1,
//!   "camera": { "position": [0.0, 2.0, 5.0], "yaw": 30.0, "pitch": -15.0 },
//!   "steps": [
//!     { "action": "select", "name": "Lamp" },
//!     { "action": "hold", "keys": { "right": true }, "frames": 5 },
//!     { "action": "idle", "frames": 10 },
//!     { "action": "undo" }
//!   ]
//! }
//! ```

use std::fmt;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use void_scene::{EntityId, SceneGraph};

use crate::core::{FrameInput, LiveEditSession};
use crate::edit::{EditMode, InputFlags, Modifiers};
use crate::error::EditError;
use crate::viewport::{AlignMode, CameraView};

/// Replay failures
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Invalid replay script: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No entity named '{0}' in the scene")]
    UnknownEntity(String),

    #[error("Step {step} failed: {source}")]
    Step { step: usize, source: EditError },
}

fn default_frame_dt() -> f64 {
    1.0 / 60.0
}

fn default_camera_position() -> Vec3 {
    Vec3::new(0.0, 2.0, 5.0)
}

/// Fixed editor camera for the whole script.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraSpec {
    #[serde(default = "default_camera_position")]
    pub position: Vec3,
    /// Degrees about world Y
    #[serde(default)]
    pub yaw: f32,
    /// Degrees about the camera's X
    #[serde(default)]
    pub pitch: f32,
    /// Keyboard edits follow the camera's axes
    #[serde(default)]
    pub relative: bool,
}

impl Default for CameraSpec {
    fn default() -> Self {
        Self {
            position: default_camera_position(),
            yaw: 0.0,
            pitch: 0.0,
            relative: false,
        }
    }
}

impl CameraSpec {
    pub fn to_view(&self) -> CameraView {
        CameraView::from_yaw_pitch(self.position, self.yaw, self.pitch)
            .with_relative_movement(self.relative)
    }
}

/// One scripted action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ReplayStep {
    Select {
        name: String,
    },
    Deselect,
    /// Hold keys for a number of frames
    Hold {
        #[serde(default)]
        keys: InputFlags,
        #[serde(default)]
        modifiers: Modifiers,
        #[serde(default)]
        mode: EditMode,
        frames: u32,
    },
    /// Let frames pass with no input
    Idle {
        frames: u32,
    },
    Undo,
    Redo,
    SetPosition {
        name: String,
        value: Vec3,
    },
    AlignWithView {
        name: String,
        #[serde(default)]
        reversed: bool,
    },
    /// Remove an entity (and its children) from the scene
    Destroy {
        name: String,
    },
}

/// A full replay script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayScript {
    /// Simulated seconds per frame
    #[serde(default = "default_frame_dt")]
    pub frame_dt: f64,
    #[serde(default)]
    pub camera: CameraSpec,
    pub steps: Vec<ReplayStep>,
}

impl ReplayScript {
    pub fn from_json_str(content: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let script = Self::from_json_str(&content)?;
        log::info!(
            target: "void_live_edit::replay",
            "Loaded replay script {:?} ({} steps)",
            path,
            script.steps.len()
        );
        Ok(script)
    }
}

/// Totals gathered while replaying.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplaySummary {
    pub frames: u64,
    /// Simulated seconds elapsed
    pub elapsed: f64,
    /// Ticks that wrote a delta
    pub edits_applied: u64,
    /// Keyboard bursts committed to history (including the final flush)
    pub bursts_committed: u64,
    pub undo_count: usize,
    pub redo_count: usize,
}

impl fmt::Display for ReplaySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Frames:           {}", self.frames)?;
        writeln!(f, "Elapsed:          {:.3}s", self.elapsed)?;
        writeln!(f, "Edits applied:    {}", self.edits_applied)?;
        writeln!(f, "Bursts committed: {}", self.bursts_committed)?;
        write!(f, "History:          {} undo / {} redo", self.undo_count, self.redo_count)
    }
}

struct Replayer<'a> {
    session: &'a mut LiveEditSession,
    scene: &'a mut SceneGraph,
    camera: CameraView,
    frame_dt: f64,
    time: f64,
    summary: ReplaySummary,
}

impl Replayer<'_> {
    fn lookup(&self, name: &str) -> Result<EntityId, ReplayError> {
        self.scene
            .find_by_name(name)
            .ok_or_else(|| ReplayError::UnknownEntity(name.to_string()))
    }

    fn run_frames(&mut self, frames: u32, input: InputFlags, modifiers: Modifiers, mode: EditMode) {
        for _ in 0..frames {
            let frame = FrameInput {
                time: self.time,
                input,
                modifiers,
                mode,
                camera: self.camera,
            };
            let outcome = self.session.tick(self.scene, &frame);
            if outcome.applied {
                self.summary.edits_applied += 1;
            }
            if outcome.committed {
                self.summary.bursts_committed += 1;
            }
            self.summary.frames += 1;
            self.time += self.frame_dt;
        }
    }

    fn step(&mut self, index: usize, step: &ReplayStep) -> Result<(), ReplayError> {
        let failed = |source| ReplayError::Step { step: index, source };

        match step {
            ReplayStep::Select { name } => {
                let id = self.lookup(name)?;
                self.select(Some(id));
            }
            ReplayStep::Deselect => self.select(None),
            ReplayStep::Hold {
                keys,
                modifiers,
                mode,
                frames,
            } => self.run_frames(*frames, *keys, *modifiers, *mode),
            ReplayStep::Idle { frames } => {
                self.run_frames(*frames, InputFlags::default(), Modifiers::default(), EditMode::default())
            }
            ReplayStep::Undo => {
                self.count_flush();
                self.session.undo(self.scene);
            }
            ReplayStep::Redo => {
                self.count_flush();
                self.session.redo(self.scene);
            }
            ReplayStep::SetPosition { name, value } => {
                let id = self.lookup(name)?;
                self.count_flush();
                self.session.set_position(self.scene, id, *value).map_err(failed)?;
            }
            ReplayStep::AlignWithView { name, reversed } => {
                let id = self.lookup(name)?;
                let mode = if *reversed {
                    AlignMode::ReversedForward
                } else {
                    AlignMode::Standard
                };
                self.count_flush();
                self.session
                    .align_with_view(self.scene, id, &self.camera, mode)
                    .map_err(failed)?;
            }
            ReplayStep::Destroy { name } => {
                let id = self.lookup(name)?;
                let removed = self.scene.despawn(id);
                log::debug!(target: "void_live_edit::replay", "Destroyed '{}' ({} entities)", name, removed);
            }
        }
        Ok(())
    }

    fn select(&mut self, entity: Option<EntityId>) {
        self.count_flush();
        self.session.select(self.scene, entity);
    }

    /// Commit the open burst up front so it shows up in the totals.
    fn count_flush(&mut self) {
        if self.session.flush(self.scene) {
            self.summary.bursts_committed += 1;
        }
    }
}

/// Play `script` against `session` and `scene`, then commit any open burst.
pub fn run_script(
    session: &mut LiveEditSession,
    scene: &mut SceneGraph,
    script: &ReplayScript,
) -> Result<ReplaySummary, ReplayError> {
    let mut replayer = Replayer {
        session,
        scene,
        camera: script.camera.to_view(),
        frame_dt: script.frame_dt,
        time: 0.0,
        summary: ReplaySummary::default(),
    };

    for (index, step) in script.steps.iter().enumerate() {
        log::trace!(target: "void_live_edit::replay", "Step {}: {:?}", index, step);
        replayer.step(index, step)?;
    }
    replayer.count_flush();

    let mut summary = replayer.summary;
    summary.elapsed = replayer.time;
    summary.undo_count = replayer.session.history().undo_count();
    summary.redo_count = replayer.session.history().redo_count();
    Ok(summary)
}
