use console::style;

use crate::core::storage::{list_templates, AppCtx};

/// List every stored template with a one-line preview.
pub fn run(ctx: &AppCtx) -> Result<(), String> {
    let templates = list_templates(ctx)?;
    if templates.is_empty() {
        println!("{}", style("No saved templates").yellow());
        return Ok(());
    }

    println!("{}", style("Saved Templates:").green().bold());
    for td in templates {
        let preview: String = td.structure.lines().next().unwrap_or("").chars().take(60).collect();
        println!(
            "  {} {} - {}",
            style("•").green(),
            style(td.name).yellow(),
            preview
        );
    }
    Ok(())
}
