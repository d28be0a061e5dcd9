// Configuration module
// Public interface for configuration loading

pub mod constants;
mod loader;
mod settings;

pub use loader::{load_config, parse_document, ConfigSource, LoadedConfig};
pub use settings::Config;
