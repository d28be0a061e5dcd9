// Project-wide constants
//
// Default values for the settings file and on-disk layout. Import via
// `use crate::config::constants::*;`.

/// Settings file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Status record naming the active ticket.
pub const DEFAULT_STATUS_FILE: &str = "status.yaml";

pub const DEFAULT_PROVIDER: &str = "google";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Seconds to wait between automatic retry attempts.
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 2;

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 2048;

/// Environment variable holding the Google API key.
pub const DEFAULT_API_KEY_ENV: &str = "GOOGLE_API_KEY";

pub const DEFAULT_TICKETS_DIR: &str = "tickets";
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// Number of ticket characters copied into each call record.
pub const TICKET_PREVIEW_CHARS: usize = 200;
