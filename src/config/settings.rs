// Configuration structs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::constants::*;
use crate::errors::CrewError;

/// Settings for one run of the assistant.
///
/// Every field has a default, so a partial settings file only overrides the
/// keys it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// AI provider name ("google" is the only one supported)
    #[serde(alias = "ai_provider")]
    pub provider: String,

    /// Model name passed to the provider
    pub model: String,

    /// Automatic attempts per call round before asking the user
    pub max_retries: u32,

    /// Seconds to wait between automatic attempts
    pub retry_delay: u64,

    pub temperature: f32,

    pub max_output_tokens: u32,

    /// Name of the environment variable holding the API key
    pub api_key_env: String,

    /// Directory containing `<ticket>.md` documents
    pub tickets_dir: PathBuf,

    /// Directory receiving accepted final/history documents
    pub artifacts_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: DEFAULT_PROVIDER.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY_SECS,
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            tickets_dir: PathBuf::from(DEFAULT_TICKETS_DIR),
            artifacts_dir: PathBuf::from(DEFAULT_ARTIFACTS_DIR),
        }
    }
}

impl Config {
    /// Validate configuration and return helpful errors
    pub fn validate(&self) -> Result<(), CrewError> {
        if self.max_retries == 0 {
            return Err(CrewError::InvalidConfig(
                "max_retries must be at least 1".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(CrewError::InvalidConfig(format!(
                "temperature must be between 0.0 and 2.0 (got {})",
                self.temperature
            )));
        }
        if self.max_output_tokens == 0 {
            return Err(CrewError::InvalidConfig(
                "max_output_tokens must be at least 1".to_string(),
            ));
        }
        if self.api_key_env.trim().is_empty() {
            return Err(CrewError::InvalidConfig(
                "api_key_env must name an environment variable".to_string(),
            ));
        }
        if self.model.trim().is_empty() {
            return Err(CrewError::InvalidConfig("model must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay)
    }

    /// Resolve the API key from the configured environment variable.
    ///
    /// An empty value counts as unset.
    pub fn api_key(&self) -> Result<String, CrewError> {
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(CrewError::MissingCredential {
                env_var: self.api_key_env.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_record() {
        let config = Config::default();
        assert_eq!(config.provider, "google");
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_delay, 2);
        assert!((config.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(config.max_output_tokens, 2048);
        assert_eq!(config.api_key_env, "GOOGLE_API_KEY");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_retries_rejected() {
        let config = Config {
            max_retries: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(CrewError::InvalidConfig(_))));
    }

    #[test]
    fn test_out_of_range_temperature_rejected() {
        let config = Config {
            temperature: 3.5,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_api_key_missing() {
        let config = Config {
            api_key_env: "CREW_HELPER_TEST_UNSET_KEY_7F3A".to_string(),
            ..Config::default()
        };
        let err = config.api_key().unwrap_err();
        assert!(matches!(err, CrewError::MissingCredential { ref env_var } if env_var == "CREW_HELPER_TEST_UNSET_KEY_7F3A"));
    }

    #[test]
    fn test_api_key_empty_counts_as_unset() {
        std::env::set_var("CREW_HELPER_TEST_EMPTY_KEY_91C2", "  ");
        let config = Config {
            api_key_env: "CREW_HELPER_TEST_EMPTY_KEY_91C2".to_string(),
            ..Config::default()
        };
        assert!(config.api_key().is_err());
    }

    #[test]
    fn test_api_key_present() {
        std::env::set_var("CREW_HELPER_TEST_SET_KEY_55D0", "secret-value");
        let config = Config {
            api_key_env: "CREW_HELPER_TEST_SET_KEY_55D0".to_string(),
            ..Config::default()
        };
        assert_eq!(config.api_key().unwrap(), "secret-value");
    }
}
