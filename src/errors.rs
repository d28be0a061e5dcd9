// Error types surfaced to the user
//
// Everything here is fatal for the current run. Recoverable conditions
// (model call failures, malformed model output) are handled inside the
// session loop and never become a CrewError.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrewError {
    #[error("No API key found. Set it with: export {env_var}=...")]
    MissingCredential { env_var: String },

    #[error("Status file {} not found. Make sure you're in the right folder.", .path.display())]
    StatusNotFound { path: PathBuf },

    #[error("Status file {} is invalid: {reason}", .path.display())]
    InvalidStatus { path: PathBuf, reason: String },

    #[error("Ticket file {} not found.", .path.display())]
    TicketNotFound { path: PathBuf },

    #[error("Unknown role '{0}'. Expected one of: highplanner, featureplanner, architect, implementer, reviewer")]
    UnknownRole(String),

    #[error("Unsupported AI provider '{0}'. Supported: google")]
    UnsupportedProvider(String),

    #[error("Failed to parse {}: {reason}", .path.display())]
    ConfigParse { path: PathBuf, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Input closed before a choice was made")]
    InputClosed,
}
