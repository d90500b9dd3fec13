//! Stackfall (workspace facade crate).
//!
//! Re-exports the member crates under stable paths
//! (`stackfall::{core, input, types}`) and adds the host-side collaborators:
//! high score persistence ([`highscore`]) and a headless frame driver
//! ([`session`]).

pub mod highscore;
pub mod session;

pub use stackfall_core as core;
pub use stackfall_input as input;
pub use stackfall_types as types;

pub use highscore::{HighScoreStore, HighScoreTracker, JsonFileStore, MemoryStore, STORAGE_KEY};
pub use session::Session;
