use console::style;

use crate::core::config::{load_config, resolve_user};
use crate::core::history;
use crate::core::storage::AppCtx;

/// Delete a logged exchange by key.
pub fn run(ctx: &AppCtx, key: &str, user: Option<&str>) -> Result<(), String> {
    let config = load_config(ctx)?;
    let email = resolve_user(user, &config)?;
    history::remove(ctx, &history::user_id(&email), key).map_err(|e| e.to_string())?;
    println!(
        "{} Entry {} deleted.",
        style("•").green().bold(),
        style(key).yellow()
    );
    Ok(())
}
