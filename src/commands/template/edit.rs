use console::style;
use dialoguer::Editor;

use crate::core::storage::{load_template, save_template, AppCtx};

/// Edit a template's structure in the user's editor.
pub fn run(ctx: &AppCtx, name: &str) -> Result<(), String> {
    let mut td = load_template(ctx, name)?;

    let edited = Editor::new()
        .edit(&td.structure)
        .map_err(|e| format!("Editor error: {}", e))?
        .unwrap_or_default();
    if edited.trim().is_empty() {
        return Err("Template structure cannot be empty".to_string());
    }
    if edited == td.structure {
        println!("{}", style("No changes detected. Nothing to save.").yellow());
        return Ok(());
    }

    td.structure = edited;
    save_template(ctx, &td)?;
    println!(
        "{} Template '{}' updated successfully.",
        style("✔").green().bold(),
        name
    );
    Ok(())
}
