//! Team-shared prompt space, scoped by the user's email domain.

use std::fs;
use std::path::PathBuf;
use tempfile::NamedTempFile;

use super::history::LogEntry;
use super::storage::AppCtx;
use super::utils::{ensure_dir, new_key};
use crate::api::StoreError;

/// Team id derived from the email domain, with `.` flattened to `_`.
pub fn team_id_from_email(email: &str) -> String {
    let domain = email.rsplit('@').next().unwrap_or(email);
    domain.replace('.', "_")
}

fn shared_dir(ctx: &AppCtx, team_id: &str) -> PathBuf {
    ctx.teams_dir.join(team_id).join("shared")
}

/// Copies a log entry into the team's shared space and returns its key
/// there. The user's private entry is untouched.
pub fn share(ctx: &AppCtx, email: &str, entry: &LogEntry) -> Result<String, StoreError> {
    let dir = shared_dir(ctx, &team_id_from_email(email));
    ensure_dir(&dir).map_err(StoreError::Init)?;

    let key = new_key();
    let json = serde_json::to_vec_pretty(entry)?;
    let tmp = NamedTempFile::new_in(&dir)?;
    fs::write(tmp.path(), &json)?;
    tmp.persist(dir.join(format!("{}.json", key)))
        .map_err(|e| StoreError::Io(e.error))?;
    Ok(key)
}

/// Every (key, entry) pair shared with the user's team.
pub fn list_shared(ctx: &AppCtx, email: &str) -> Result<Vec<(String, LogEntry)>, StoreError> {
    let dir = shared_dir(ctx, &team_id_from_email(email));
    let mut entries = Vec::new();
    if !dir.exists() {
        return Ok(entries);
    }
    for dirent in fs::read_dir(&dir)? {
        let path = dirent?.path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json") {
            let key = match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) => stem.to_string(),
                None => continue,
            };
            let raw = fs::read_to_string(&path)?;
            if let Ok(entry) = serde_json::from_str::<LogEntry>(&raw) {
                entries.push((key, entry));
            }
        }
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::GenerationParams;
    use crate::core::history::PromptMeta;
    use crate::core::storage::AppCtx;
    use tempfile::tempdir;

    #[test]
    fn team_id_is_the_flattened_domain() {
        assert_eq!(team_id_from_email("jane@corp.example.com"), "corp_example_com");
        assert_eq!(team_id_from_email("no-at-sign"), "no-at-sign");
    }

    #[test]
    fn colleagues_see_shared_entries_strangers_do_not() {
        let dir = tempdir().unwrap();
        let ctx = AppCtx::with_base_dir(dir.path().join("store")).unwrap();

        let template = crate::api::Template::new("t", "Do {intent}");
        let fields = crate::api::PromptFields {
            role: "r".into(),
            audience: "a".into(),
            tone: String::new(),
            intent: "i".into(),
        };
        let rendered = crate::api::render(&template, &fields, &[]).unwrap();
        let entry = LogEntry::single(
            "jane@corp.example.com",
            &rendered,
            "ok",
            PromptMeta::default(),
            &GenerationParams::default(),
        );

        share(&ctx, "jane@corp.example.com", &entry).unwrap();

        let colleague = list_shared(&ctx, "john@corp.example.com").unwrap();
        assert_eq!(colleague.len(), 1);
        assert_eq!(colleague[0].1.response, "ok");

        assert!(list_shared(&ctx, "eve@other.org").unwrap().is_empty());
    }
}
