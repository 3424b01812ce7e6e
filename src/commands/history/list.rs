use console::style;

use super::{preview, readable_date};
use crate::core::config::{load_config, resolve_user};
use crate::core::history::{self, LogEntry};
use crate::core::storage::AppCtx;

/// List a user's past exchanges, newest first, chains and single prompts
/// in separate sections.
pub fn run(ctx: &AppCtx, user: Option<&str>) -> Result<(), String> {
    let config = load_config(ctx)?;
    let email = resolve_user(user, &config)?;

    let mut entries =
        history::list(ctx, &history::user_id(&email)).map_err(|e| e.to_string())?;
    if entries.is_empty() {
        println!("{}", style("No history found.").yellow());
        return Ok(());
    }

    // The store does not guarantee order; sort newest first here.
    entries.sort_by(|a, b| b.1.timestamp.cmp(&a.1.timestamp));

    let (chains, singles): (Vec<_>, Vec<_>) =
        entries.into_iter().partition(|(_, e)| e.is_chain());

    if !chains.is_empty() {
        println!("{}", style("Chaining History:").green().bold());
        for (key, entry) in &chains {
            print_line(key, entry);
        }
    }
    if !singles.is_empty() {
        println!("{}", style("Single Prompt History:").green().bold());
        for (key, entry) in &singles {
            print_line(key, entry);
        }
    }
    Ok(())
}

fn print_line(key: &str, entry: &LogEntry) {
    let mut annotations = Vec::new();
    if let Some(steps) = &entry.chain {
        annotations.push(format!("{} steps", steps.len()));
    }
    if let Some(rating) = entry.rating {
        annotations.push(format!("rated {}/5", rating));
    }
    let suffix = if annotations.is_empty() {
        String::new()
    } else {
        format!(" ({})", annotations.join(", "))
    };

    println!(
        "  {} {} {} — {}{}",
        style("•").green(),
        style(key).yellow(),
        readable_date(&entry.timestamp),
        preview(&entry.prompt),
        suffix
    );
}
