use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use std::fs;

use super::ChainFile;
use crate::core::storage::AppCtx;

/// Create a new chain definition interactively.
pub fn run(ctx: &AppCtx) -> Result<(), String> {
    let theme = ColorfulTheme::default();

    let id: String = Input::with_theme(&theme)
        .with_prompt("Chain ID")
        .interact_text()
        .map_err(|e| format!("Input error: {}", e))?;
    let id = id.trim().to_string();
    if id.is_empty() {
        return Err("Chain ID cannot be empty".to_string());
    }
    let path = ctx.chain_path(&id);
    if path.exists() {
        return Err(format!("A chain with ID '{}' already exists.", id));
    }

    let title: String = Input::with_theme(&theme)
        .with_prompt("Title (optional)")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| format!("Input error: {}", e))?;

    let mut steps = Vec::new();
    loop {
        let step: String = Input::with_theme(&theme)
            .with_prompt(format!(
                "Step {} template (use {{input}} for the running input)",
                steps.len() + 1
            ))
            .interact_text()
            .map_err(|e| format!("Input error: {}", e))?;
        if step.trim().is_empty() {
            println!("{}", style("Empty step skipped.").yellow());
        } else {
            steps.push(step);
        }

        let more = Confirm::with_theme(&theme)
            .with_prompt("Add another step?")
            .default(steps.is_empty())
            .interact()
            .unwrap_or(false);
        if !more {
            break;
        }
    }
    if steps.is_empty() {
        return Err("A chain needs at least one step.".to_string());
    }

    let chain = ChainFile {
        title: if title.trim().is_empty() {
            None
        } else {
            Some(title.trim().to_string())
        },
        steps,
    };
    let yaml = serde_yaml::to_string(&chain).map_err(|e| format!("Serialize error: {}", e))?;
    fs::write(&path, yaml).map_err(|e| format!("Write error: {}", e))?;

    println!(
        "{} Chain saved with ID {} ({} steps)",
        style("•").green().bold(),
        style(&id).yellow(),
        chain.steps.len()
    );
    Ok(())
}
