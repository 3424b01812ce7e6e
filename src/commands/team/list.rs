use console::style;

use crate::commands::history::{preview, readable_date};
use crate::core::config::{load_config, resolve_user};
use crate::core::storage::AppCtx;
use crate::core::team;

/// List exchanges shared with the user's team.
pub fn run(ctx: &AppCtx, user: Option<&str>) -> Result<(), String> {
    let config = load_config(ctx)?;
    let email = resolve_user(user, &config)?;

    let mut entries = team::list_shared(ctx, &email).map_err(|e| e.to_string())?;
    if entries.is_empty() {
        println!("{}", style("No shared prompts for your team.").yellow());
        return Ok(());
    }
    entries.sort_by(|a, b| b.1.timestamp.cmp(&a.1.timestamp));

    println!(
        "{} {}",
        style("Shared with team").green().bold(),
        style(team::team_id_from_email(&email)).yellow()
    );
    for (key, entry) in entries {
        println!(
            "  {} {} {} by {} — {}",
            style("•").green(),
            style(key).yellow(),
            readable_date(&entry.timestamp),
            entry.email,
            preview(&entry.prompt)
        );
    }
    Ok(())
}
