use console::style;
use spinners::{Spinner, Spinners};
use std::fs;

use super::ChainFile;
use crate::api::{run_chain, validate_chain, ChainStep, GenerationParams};
use crate::cli::GenArgs;
use crate::core::config::{build_model_client, load_config, resolve_user};
use crate::core::history::{self, LogEntry};
use crate::core::storage::AppCtx;

/// Run a prompt chain from ad-hoc steps, a YAML file, or a stored
/// definition, then log the completed trace.
#[allow(clippy::too_many_arguments)]
pub async fn run(
    ctx: &AppCtx,
    id: Option<&str>,
    file: Option<&str>,
    adhoc_steps: &[String],
    input: &str,
    gen: &GenArgs,
    user: Option<&str>,
    provider: Option<&str>,
) -> Result<(), String> {
    let templates = resolve_steps(ctx, id, file, adhoc_steps)?;
    let steps: Vec<ChainStep> = templates.iter().map(|t| ChainStep::new(t.as_str())).collect();
    let params = GenerationParams {
        temperature: gen.temperature,
        max_tokens: gen.max_tokens,
    };

    // The executor does not re-validate; the precondition check happens
    // here, before any model call.
    validate_chain(&steps, input, &params).map_err(|e| e.to_string())?;

    let config = load_config(ctx)?;
    let email = resolve_user(user, &config)?;
    let client = build_model_client(&config, provider)?;

    let mut sp = Spinner::new(
        Spinners::Dots9,
        format!("Executing chain ({} steps)...", steps.len()),
    );
    let chain_run = run_chain(&client, &steps, input, &params).await;
    sp.stop_with_message("✔ Chain execution complete.".into());

    println!();
    for step in &chain_run.steps {
        println!("{} {}", style("•").blue(), style(&step.label).yellow().bold());
        println!("{}", style("Prompt:").green());
        println!("{}", step.prompt);
        println!("{}", style("Response:").green());
        println!("{}\n", step.response);
    }

    let entry = LogEntry::chained(&email, &chain_run, &params);
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
                "Warning: run not logged ({}). The trace above is still valid.",
                e
            ))
            .yellow()
        ),
    }
    Ok(())
}

/// Picks the step source: ad-hoc `--step` flags win, then `--file`, then a
/// stored chain ID.
fn resolve_steps(
    ctx: &AppCtx,
    id: Option<&str>,
    file: Option<&str>,
    adhoc_steps: &[String],
) -> Result<Vec<String>, String> {
    if !adhoc_steps.is_empty() {
        return Ok(adhoc_steps.to_vec());
    }
    if let Some(path) = file {
        return read_chain_file(path);
    }
    if let Some(id) = id {
        let path = ctx.chain_path(id);
        if !path.exists() {
            return Err(format!("Chain with ID '{}' not found.", id));
        }
        return read_chain_file(path.to_string_lossy().as_ref());
    }
    Err("Provide chain steps via --step, --file, or a stored chain ID.".to_string())
}

fn read_chain_file(path: &str) -> Result<Vec<String>, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read chain definition '{}': {}", path, e))?;
    let chain: ChainFile =
        serde_yaml::from_str(&raw).map_err(|e| format!("Failed to parse chain file: {}", e))?;
    Ok(chain.steps)
}
