use console::style;

use super::readable_date;
use crate::core::config::{load_config, resolve_user};
use crate::core::history;
use crate::core::storage::AppCtx;

/// Show one logged exchange in full.
pub fn run(ctx: &AppCtx, key: &str, user: Option<&str>) -> Result<(), String> {
    let config = load_config(ctx)?;
    let email = resolve_user(user, &config)?;
    let entry =
        history::get(ctx, &history::user_id(&email), key).map_err(|e| e.to_string())?;

    println!(
        "{} {} ({})",
        style("Logged:").green().bold(),
        readable_date(&entry.timestamp),
        entry.timestamp
    );
    println!("{} {}", style("User:").green().bold(), entry.email);
    for (label, value) in [
        ("Role:", &entry.role),
        ("Audience:", &entry.audience),
        ("Tone:", &entry.tone),
        ("Intent:", &entry.intent),
    ] {
        if let Some(value) = value {
            println!("{} {}", style(label).green().bold(), value);
        }
    }
    println!(
        "{} temperature={}, max_tokens={}",
        style("Parameters:").green().bold(),
        entry.temperature,
        entry.max_tokens
    );

    match &entry.chain {
        Some(steps) => {
            println!("{} {}", style("Initial input:").green().bold(), entry.prompt);
            for record in steps {
                println!(
                    "\n{} {}",
                    style("•").blue(),
                    style(&record.step).yellow().bold()
                );
                println!("{}", style("Prompt:").green());
                println!("{}", record.prompt);
                println!("{}", style("Response:").green());
                println!("{}", record.response);
            }
        }
        None => {
            println!("\n{}", style("Prompt:").green().bold());
            println!("{}", entry.prompt);
            println!("\n{}", style("Response:").green().bold());
            println!("{}", entry.response);
        }
    }

    if let Some(rating) = entry.rating {
        println!("\n{} {}/5", style("Rating:").green().bold(), rating);
    }
    if let Some(feedback) = &entry.feedback {
        println!("{} {}", style("Feedback:").green().bold(), feedback);
    }
    Ok(())
}
