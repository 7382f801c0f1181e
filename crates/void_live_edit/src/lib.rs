//! Void Engine Live Editing
//!
//! Transform editing for scenes that keep running while they are edited.
//!
//! ## Features
//!
//! - **Undo/Redo**: Bounded linear history of reversible commands
//! - **Keyboard Batching**: Held-key bursts collapse into a single undo step
//! - **Delta Resolution**: World or camera-relative movement, rotation and scale
//! - **Space Conversion**: World poses land correctly on parented entities
//! - **Notifications**: Synchronous listeners plus a channel sink for UI threads
//! - **Export**: Plain-text report of every edited transform
//!
//! ## Architecture
//!
//! ```text
//! FrameInput → resolve_delta → apply_delta → SceneGraph (live)
//!                                   │
//!                                   ▼
//!                             EditBatcher ──(timeout)──→ TransformCommand → UndoHistory
//! ```
//!
//! Every tick writes to the scene immediately; history only sees the net
//! change of each burst.

pub mod commands;
pub mod core;
pub mod edit;
pub mod error;
pub mod export;
pub mod replay;
pub mod viewport;

// Re-export commonly used types
pub use crate::core::{
    ChannelListener, EditConfig, EditContext, EditorEvent, EditorListener, EventDispatcher,
    FrameInput, ListenerId, LiveEditSession, Selection, TickOutcome, UndoHistory,
};

pub use crate::commands::{Command, CommandError, CommandResult, TransformCommand, TransformSnapshot};

pub use crate::edit::{EditBatcher, EditMode, InputFlags, Modifiers, MovementFrame};

pub use crate::viewport::{AlignMode, CameraView};

pub use crate::error::{EditError, Result};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tool name
pub const NAME: &str = "Void Live Edit";
