use console::style;

use crate::core::config::{load_config, resolve_user};
use crate::core::history::{self, LogPatch};
use crate::core::storage::AppCtx;

/// Attach a rating and optional feedback to a logged exchange.
///
/// Entries are matched by the store key printed when the exchange was
/// logged, never by timestamp.
pub fn run(
    ctx: &AppCtx,
    key: &str,
    rating: u8,
    feedback: Option<&str>,
    user: Option<&str>,
) -> Result<(), String> {
    if !(1..=5).contains(&rating) {
        return Err(format!("Rating must be between 1 and 5 (got {})", rating));
    }

    let config = load_config(ctx)?;
    let email = resolve_user(user, &config)?;
    let patch = LogPatch {
        rating: Some(rating),
        feedback: feedback.map(str::to_string),
    };
    history::update(ctx, &history::user_id(&email), key, &patch).map_err(|e| e.to_string())?;

    println!(
        "{} Rated {} with {} star(s).",
        style("•").green().bold(),
        style(key).yellow(),
        rating
    );
    Ok(())
}
