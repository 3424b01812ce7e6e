//! Runs a two-step chain against a real provider.
//!
//! Requires OPENAI_API_KEY to be set. Each step consumes the previous
//! step's response; a failing call surfaces as an `Error: ...` response
//! and the chain still completes.

use autoprompt::{run_chain, validate_chain, ChainStep, GenerationParams, LlmClient};

#[tokio::main]
async fn main() -> Result<(), String> {
    let client = LlmClient::from_spec("openai:gpt-4o-mini").map_err(|e| e.to_string())?;

    let steps = vec![
        ChainStep::new("Summarize the following in one sentence: {input}"),
        ChainStep::new("Translate to French: {input}"),
    ];
    let input = "The quick brown fox jumps over the lazy dog, a sentence \
                 famous for containing every letter of the alphabet.";
    let params = GenerationParams::default();

    validate_chain(&steps, input, &params).map_err(|e| e.to_string())?;
    let run = run_chain(&client, &steps, input, &params).await;

    for step in &run.steps {
        println!("--- {} ---", step.label);
        println!("Prompt:   {}", step.prompt);
        println!("Response: {}\n", step.response);
    }
    Ok(())
}
