use console::style;
use std::fs;

use super::ChainFile;
use crate::core::storage::AppCtx;

/// List stored chain definitions.
pub fn run(ctx: &AppCtx) -> Result<(), String> {
    let mut chains = Vec::new();
    if ctx.chains_dir.exists() {
        for entry in fs::read_dir(&ctx.chains_dir).map_err(|e| format!("Read dir error: {}", e))? {
            let path = entry.map_err(|e| format!("Dir read error: {}", e))?.path();
            if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("yaml") {
                let id = match path.file_stem().and_then(|s| s.to_str()) {
                    Some(stem) => stem.to_string(),
                    None => continue,
                };
                let raw = fs::read_to_string(&path).map_err(|e| format!("Read error: {}", e))?;
                if let Ok(chain) = serde_yaml::from_str::<ChainFile>(&raw) {
                    chains.push((id, chain));
                }
            }
        }
    }

    if chains.is_empty() {
        println!("{}", style("No saved chains").yellow());
        return Ok(());
    }

    chains.sort_by(|a, b| a.0.cmp(&b.0));
    println!("{}", style("Saved Chains:").green().bold());
    for (id, chain) in chains {
        let title = chain.title.unwrap_or_default();
        println!(
            "  {} {} ({} steps) {}",
            style("•").blue(),
            style(id).yellow(),
            chain.steps.len(),
            title
        );
    }
    Ok(())
}
