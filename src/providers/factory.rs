// Provider factory
//
// Creates the LLM provider named by the configuration

use anyhow::Result;
use std::sync::Arc;

use super::gemini::GeminiProvider;
use super::LlmProvider;
use crate::config::Config;
use crate::errors::CrewError;

/// Create the configured provider.
///
/// "google" and "gemini" both select the Gemini API.
pub fn create_provider(config: &Config, api_key: String) -> Result<Arc<dyn LlmProvider>> {
    match config.provider.trim().to_lowercase().as_str() {
        "google" | "gemini" => {
            let provider = GeminiProvider::new(api_key)?.with_model(config.model.clone());
            Ok(Arc::new(provider))
        }
        other => Err(CrewError::UnsupportedProvider(other.to_string()).into()),
    }
}
