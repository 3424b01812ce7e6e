use console::style;

use crate::core::storage::{delete_template, AppCtx};

/// Delete a template by name.
pub fn run(ctx: &AppCtx, name: &str) -> Result<(), String> {
    delete_template(ctx, name)?;
    println!(
        "{} Template '{}' deleted.",
        style("•").green().bold(),
        style(name).yellow()
    );
    Ok(())
}
