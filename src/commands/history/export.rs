use console::style;
use serde_json::json;
use std::fs;

use crate::cli::ExportFormat;
use crate::core::config::{load_config, resolve_user};
use crate::core::history::{self, LogEntry};
use crate::core::storage::AppCtx;

/// Export a logged exchange to a TXT or JSON file.
pub fn run(
    ctx: &AppCtx,
    key: &str,
    format: ExportFormat,
    out_path: &str,
    user: Option<&str>,
) -> Result<(), String> {
    let config = load_config(ctx)?;
    let email = resolve_user(user, &config)?;
    let entry =
        history::get(ctx, &history::user_id(&email), key).map_err(|e| e.to_string())?;

    let content = match format {
        ExportFormat::Txt => as_txt(&entry),
        ExportFormat::Json => as_json(&entry)?,
    };
    fs::write(out_path, content).map_err(|e| format!("Write error: {}", e))?;

    println!(
        "{} exported to {}",
        style("•").green().bold(),
        out_path
    );
    Ok(())
}

fn as_txt(entry: &LogEntry) -> String {
    match &entry.chain {
        Some(steps) => {
            let mut txt = format!("Initial Input:\n{}\n\n", entry.prompt);
            for record in steps {
                txt.push_str(&format!(
                    "{}\nPrompt:\n{}\nResponse:\n{}\n\n",
                    record.step, record.prompt, record.response
                ));
            }
            txt
        }
        None => format!(
            "Role: {}\nAudience: {}\nTone: {}\nIntent: {}\n\n--- Prompt Sent to AI ---\n{}\n\n--- AI Response ---\n{}\n",
            entry.role.as_deref().unwrap_or(""),
            entry.audience.as_deref().unwrap_or(""),
            entry.tone.as_deref().unwrap_or(""),
            entry.intent.as_deref().unwrap_or(""),
            entry.prompt,
            entry.response
        ),
    }
}

fn as_json(entry: &LogEntry) -> Result<String, String> {
    let value = match &entry.chain {
        Some(steps) => json!({
            "initial_input": entry.prompt,
            "steps": steps,
        }),
        None => json!({
            "role": entry.role,
            "audience": entry.audience,
            "tone": entry.tone,
            "intent": entry.intent,
            "prompt": entry.prompt,
            "response": entry.response,
        }),
    };
    serde_json::to_string_pretty(&value).map_err(|e| format!("Serialize error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::history::ChainStepRecord;

    fn chain_entry() -> LogEntry {
        LogEntry {
            email: "a@b.com".to_string(),
            prompt: "seed".to_string(),
            response: "final".to_string(),
            timestamp: "2025-06-01T12:00:00+00:00".to_string(),
            role: None,
            audience: None,
            tone: None,
            intent: None,
            temperature: 0.7,
            max_tokens: 300,
            rating: None,
            feedback: None,
            chain: Some(vec![ChainStepRecord {
                step: "Step 1".to_string(),
                prompt: "Summarize: seed".to_string(),
                response: "final".to_string(),
            }]),
        }
    }

    #[test]
    fn chain_txt_layout() {
        let txt = as_txt(&chain_entry());
        assert!(txt.starts_with("Initial Input:\nseed\n\n"));
        assert!(txt.contains("Step 1\nPrompt:\nSummarize: seed\nResponse:\nfinal\n"));
    }

    #[test]
    fn chain_json_shape() {
        let parsed: serde_json::Value =
            serde_json::from_str(&as_json(&chain_entry()).unwrap()).unwrap();
        assert_eq!(parsed["initial_input"], "seed");
        assert_eq!(parsed["steps"][0]["step"], "Step 1");
    }

    #[test]
    fn single_txt_layout() {
        let mut entry = chain_entry();
        entry.chain = None;
        entry.role = Some("HR".to_string());
        let txt = as_txt(&entry);
        assert!(txt.starts_with("Role: HR\n"));
        assert!(txt.contains("--- Prompt Sent to AI ---\nseed\n"));
        assert!(txt.contains("--- AI Response ---\nfinal\n"));
    }
}
