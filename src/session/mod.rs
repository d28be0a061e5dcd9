// Interactive session: call → validate → accept / follow-up / quit → persist

pub mod artifacts;
pub mod controller;
pub mod types;
pub mod validator;

pub use artifacts::ArtifactStore;
pub use controller::{Session, INVALID_JSON_NOTE};
pub use types::{CallResult, PersistedArtifacts, QuitReason, SessionHistory, SessionOutcome};
pub use validator::try_parse;
