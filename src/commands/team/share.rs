use console::style;

use crate::core::config::{load_config, resolve_user};
use crate::core::storage::AppCtx;
use crate::core::{history, team};

/// Copy one of the user's logged exchanges into the team's shared space.
pub fn run(ctx: &AppCtx, key: &str, user: Option<&str>) -> Result<(), String> {
    let config = load_config(ctx)?;
    let email = resolve_user(user, &config)?;

    let entry =
        history::get(ctx, &history::user_id(&email), key).map_err(|e| e.to_string())?;
    let shared_key = team::share(ctx, &email, &entry).map_err(|e| e.to_string())?;

    println!(
        "{} Shared with team '{}' as {}",
        style("•").green().bold(),
        style(team::team_id_from_email(&email)).yellow(),
        style(shared_key).yellow()
    );
    Ok(())
}
