// Role-aware model client
//
// Composes role template + ticket + extra notes into one prompt, sends it
// through the shared provider, and wraps the reply in a CallResult.

use anyhow::Result;
use chrono::Local;
use std::sync::Arc;

use super::types::GenerationRequest;
use super::LlmProvider;
use crate::config::constants::TICKET_PREVIEW_CHARS;
use crate::config::Config;
use crate::roles::Role;
use crate::session::CallResult;

/// Build the prompt sent for one call
pub fn compose_prompt(role: Role, ticket_text: &str, extra_context: &str) -> String {
    format!(
        "{role_prompt}\n\n\
         Ticket context:\n\
         {ticket_text}\n\n\
         Extra notes / follow-ups:\n\
         {extra_context}\n",
        role_prompt = role.prompt().trim(),
    )
}

fn preview(text: &str) -> String {
    text.chars().take(TICKET_PREVIEW_CHARS).collect()
}

/// Issues role prompts against one provider with fixed generation settings
#[derive(Clone)]
pub struct RoleClient {
    provider: Arc<dyn LlmProvider>,
    temperature: f32,
    max_output_tokens: u32,
}

impl RoleClient {
    pub fn new(provider: Arc<dyn LlmProvider>, config: &Config) -> Self {
        Self {
            provider,
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        }
    }

    pub fn model(&self) -> &str {
        self.provider.default_model()
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// One model call. Errors are returned unchanged; no retry happens here.
    pub async fn invoke(
        &self,
        role: Role,
        ticket_text: &str,
        extra_context: &str,
    ) -> Result<CallResult> {
        let request = GenerationRequest::new(compose_prompt(role, ticket_text, extra_context))
            .with_temperature(self.temperature)
            .with_max_output_tokens(self.max_output_tokens);

        let text = self.provider.generate(&request).await?;

        Ok(CallResult {
            role,
            model: self.model().to_string(),
            timestamp: Local::now(),
            ticket_context_preview: preview(ticket_text),
            extra_context: extra_context.to_string(),
            output_raw: text.trim().to_string(),
            output_json: None,
        })
    }
}
