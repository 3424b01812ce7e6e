//! High-level API for rendering prompts and running prompt chains.

mod chain;
mod error;
mod llm_bridge;
mod renderer;

pub use chain::{
    run_chain, validate_chain, validate_params, ChainRun, ChainRunner, ChainStep, ChainStepResult,
    INPUT_TOKEN,
};
pub use error::{ModelCallError, RenderError, StoreError, TemplateError, ValidationError};
pub use llm_bridge::{LlmClient, ModelClient};
pub(crate) use llm_bridge::default_api_key_env;
pub use renderer::{check_structure, render, FewShotExample, PromptFields, RenderedPrompt, Template};

/// Sampling parameters forwarded to the model on every call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    /// Sampling temperature, within [0.0, 1.0].
    pub temperature: f32,
    /// Upper bound on generated tokens, strictly positive.
    pub max_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 300,
        }
    }
}
