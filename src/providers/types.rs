// Provider-agnostic request type

use serde::Serialize;

/// A single-turn generation request
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    /// Fully composed prompt text
    pub prompt: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Upper bound on generated tokens
    pub max_output_tokens: u32,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            temperature: crate::config::constants::DEFAULT_TEMPERATURE,
            max_output_tokens: crate::config::constants::DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_defaults() {
        let request = GenerationRequest::new("hi")
            .with_temperature(0.1)
            .with_max_output_tokens(64);
        assert_eq!(request.prompt, "hi");
        assert!((request.temperature - 0.1).abs() < f32::EPSILON);
        assert_eq!(request.max_output_tokens, 64);
    }
}
