// LLM provider abstraction
//
// The session talks to the model through `LlmProvider`; the provider is
// built once at startup by `create_provider` and shared for the process
// lifetime. `RoleClient` layers role prompts and call records on top.

use anyhow::Result;
use async_trait::async_trait;

pub mod factory;
pub mod gemini;
pub mod role_client;
pub mod types;

pub use factory::create_provider;
pub use gemini::GeminiProvider;
pub use role_client::{compose_prompt, RoleClient};
pub use types::GenerationRequest;

/// Trait for LLM providers
///
/// A provider turns one prompt into one block of generated text. It must not
/// retry internally: retry policy belongs to the session.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send the prompt and return the raw generated text
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;

    /// Get the provider name (e.g., "gemini")
    fn name(&self) -> &str;

    /// Get the model requests are sent to
    fn default_model(&self) -> &str;
}
