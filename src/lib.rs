pub mod api;
pub mod cli;
pub mod commands;
pub mod core;

pub use api::{
    render, run_chain, validate_chain, ChainRun, ChainRunner, ChainStep, ChainStepResult,
    FewShotExample, GenerationParams, LlmClient, ModelCallError, ModelClient, PromptFields,
    RenderError, RenderedPrompt, StoreError, Template, TemplateError, ValidationError,
};
