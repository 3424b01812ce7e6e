use console::style;

use super::prompt_logic::build_prompt;
use crate::cli::PromptArgs;
use crate::core::storage::AppCtx;

/// Render a prompt locally and print it. No model call, no logging.
pub fn run(ctx: &AppCtx, args: &PromptArgs) -> Result<(), String> {
    let (rendered, _meta) = build_prompt(ctx, args)?;
    println!("{}", style("Rendered prompt:").green().bold());
    println!("{}", rendered);
    Ok(())
}
