//! Markdown editing core: local normalization, rich text → Markdown
//! synchronization, preview rendering and the collaborators around them.

pub mod config;
pub mod constants;
pub mod convert;
pub mod editing;
pub mod error;
pub mod format;
pub mod import;
pub mod models;
pub mod preview;
pub mod reformat;
pub mod sync;
pub mod workspace;

pub use error::{ConvertError, Result};
pub use format::normalize;
pub use sync::{EditOrigin, SyncBridge, SyncOutcome, SyncState};
pub use workspace::Workspace;
