use console::style;
use dialoguer::{theme::ColorfulTheme, Editor, Input};

use crate::core::storage::{save_template, AppCtx, TemplateData};

/// Create a new template in the store.
pub fn run(ctx: &AppCtx) -> Result<(), String> {
    let theme = ColorfulTheme::default();

    let name: String = Input::with_theme(&theme)
        .with_prompt("Template name")
        .interact_text()
        .map_err(|e| format!("Input error: {}", e))?;
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err("Template name cannot be empty".to_string());
    }
    if ctx.template_path(&name).exists() {
        return Err(format!("A template named '{}' already exists.", name));
    }

    let structure = Editor::new()
        .edit("You are a {role} addressing a {audience}. Use a {tone} tone.\nTask: {intent}")
        .map_err(|e| format!("Editor error: {}", e))?
        .unwrap_or_default();
    if structure.trim().is_empty() {
        return Err("Template structure cannot be empty".to_string());
    }

    save_template(
        ctx,
        &TemplateData {
            name: name.clone(),
            structure,
        },
    )?;
    println!(
        "{} Template saved as '{}'",
        style("•").green().bold(),
        style(&name).yellow()
    );
    Ok(())
}
