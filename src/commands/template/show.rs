use console::style;

use crate::core::storage::{load_template, AppCtx};

/// Display a template.
pub fn run(ctx: &AppCtx, name: &str) -> Result<(), String> {
    let td = load_template(ctx, name)?;
    println!("{} {}", style("Name:").green().bold(), td.name);
    println!("{}", style("Structure:").green().bold());
    println!("{}", td.structure);
    Ok(())
}
