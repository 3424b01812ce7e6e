use console::style;
use spinners::{Spinner, Spinners};

use super::prompt_logic::build_prompt;
use crate::api::{validate_params, GenerationParams, ModelClient};
use crate::cli::{GenArgs, PromptArgs};
use crate::core::config::{build_model_client, load_config, resolve_user};
use crate::core::history::{self, LogEntry};
use crate::core::storage::AppCtx;

/// Render a prompt, execute it with the model, print and log the exchange.
pub async fn run(
    ctx: &AppCtx,
    prompt_args: &PromptArgs,
    gen: &GenArgs,
    user: Option<&str>,
    provider: Option<&str>,
) -> Result<(), String> {
    let config = load_config(ctx)?;
    let email = resolve_user(user, &config)?;

    let params = GenerationParams {
        temperature: gen.temperature,
        max_tokens: gen.max_tokens,
    };
    validate_params(&params).map_err(|e| e.to_string())?;

    let (rendered, meta) = build_prompt(ctx, prompt_args)?;
    let client = build_model_client(&config, provider)?;

    let mut sp = Spinner::new(Spinners::Dots9, "Waiting for model response...".into());
    let result = client.generate(rendered.as_str(), &params).await;
    sp.stop_with_message("✔ Response received.".into());

    // The model boundary never aborts the flow: a failure surfaces as
    // error text in the response, exactly as it would inside a chain.
    let response = result.unwrap_or_else(|e| format!("Error: {}", e));

    println!("\n{}", style("Prompt sent:").green().bold());
    println!("{}\n", rendered);
    println!("{}", style("Response:").green().bold());
    println!("{}\n", response);

    let entry = LogEntry::single(&email, &rendered, &response, meta, &params);
    match history::append(ctx, &history::user_id(&email), &entry) {
        Ok(key) => println!(
            "{} Logged as {} (rate it later with `autoprompt history rate {}`)",
            style("•").green().bold(),
            style(&key).yellow(),
            key
        ),
        Err(e) => println!(
            "{}",
            style(format!(
                "Warning: exchange not logged ({}). The response above is still valid.",
                e
            ))
            .yellow()
        ),
    }
    Ok(())
}
