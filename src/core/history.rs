//! Per-user, append-only history of prompt/response exchanges.
//!
//! One JSON file per entry under `logs/<user_id>/<key>.json`. Keys are
//! store-assigned and opaque; a rating/feedback patch is the only mutation
//! an entry supports after it is written, and it is keyed by that id only.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tempfile::NamedTempFile;

use super::storage::AppCtx;
use super::utils::{ensure_dir, new_key};
use crate::api::{ChainRun, GenerationParams, RenderedPrompt, StoreError};

/// One executed chain step as persisted inside a log entry.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ChainStepRecord {
    pub step: String,
    pub prompt: String,
    pub response: String,
}

/// A persisted prompt/response exchange. `chain` present means a chained
/// run; absent means a single-shot prompt.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LogEntry {
    pub email: String,
    pub prompt: String,
    pub response: String,
    /// RFC 3339 creation time.
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain: Option<Vec<ChainStepRecord>>,
}

/// Descriptive metadata attached to a single-shot entry.
#[derive(Clone, Debug, Default)]
pub struct PromptMeta {
    pub role: Option<String>,
    pub audience: Option<String>,
    pub tone: Option<String>,
    pub intent: Option<String>,
}

impl LogEntry {
    /// Entry for a single-shot prompt.
    pub fn single(
        email: &str,
        prompt: &RenderedPrompt,
        response: &str,
        meta: PromptMeta,
        params: &GenerationParams,
    ) -> Self {
        Self {
            email: email.to_string(),
            prompt: prompt.as_str().to_string(),
            response: response.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            role: meta.role,
            audience: meta.audience,
            tone: meta.tone,
            intent: meta.intent,
            temperature: params.temperature,
            max_tokens: params.max_tokens,
            rating: None,
            feedback: None,
            chain: None,
        }
    }

    /// Entry for a completed chain run: `prompt` holds the initial input,
    /// `response` the last step's response, `chain` the full trace.
    pub fn chained(email: &str, run: &ChainRun, params: &GenerationParams) -> Self {
        let records = run
            .steps
            .iter()
            .map(|s| ChainStepRecord {
                step: s.label.clone(),
                prompt: s.prompt.clone(),
                response: s.response.clone(),
            })
            .collect();
        Self {
            email: email.to_string(),
            prompt: run.initial_input.clone(),
            response: run.final_response().unwrap_or_default().to_string(),
            timestamp: Utc::now().to_rfc3339(),
            role: None,
            audience: None,
            tone: None,
            intent: None,
            temperature: params.temperature,
            max_tokens: params.max_tokens,
            rating: None,
            feedback: None,
            chain: Some(records),
        }
    }

    pub fn is_chain(&self) -> bool {
        self.chain.is_some()
    }
}

/// Partial patch for an existing entry; only supplied fields change.
#[derive(Clone, Debug, Default)]
pub struct LogPatch {
    pub rating: Option<u8>,
    pub feedback: Option<String>,
}

/// Store id for a user: their email with `.` flattened to `_`.
pub fn user_id(email: &str) -> String {
    email.replace('.', "_")
}

fn user_dir(ctx: &AppCtx, user_id: &str) -> PathBuf {
    ctx.logs_dir.join(user_id)
}

fn entry_path(ctx: &AppCtx, user_id: &str, key: &str) -> PathBuf {
    user_dir(ctx, user_id).join(format!("{}.json", key))
}

/// Writes an entry as a single atomic file creation and returns the
/// store-assigned key. Callers must retain the key to rate the entry later.
pub fn append(ctx: &AppCtx, user_id: &str, entry: &LogEntry) -> Result<String, StoreError> {
    let dir = user_dir(ctx, user_id);
    ensure_dir(&dir).map_err(StoreError::Init)?;

    let key = new_key();
    let json = serde_json::to_vec_pretty(entry)?;

    // Temp file + rename keeps concurrent appenders from ever seeing a
    // half-written entry.
    let tmp = NamedTempFile::new_in(&dir)?;
    fs::write(tmp.path(), &json)?;
    tmp.persist(entry_path(ctx, user_id, &key))
        .map_err(|e| StoreError::Io(e.error))?;

    Ok(key)
}

/// Reads one entry by key.
pub fn get(ctx: &AppCtx, user_id: &str, key: &str) -> Result<LogEntry, StoreError> {
    let path = entry_path(ctx, user_id, key);
    if !path.exists() {
        return Err(StoreError::NotFound(key.to_string()));
    }
    let raw = fs::read_to_string(&path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Applies a rating/feedback patch to the entry under `key`. All other
/// fields are write-once and untouched.
pub fn update(ctx: &AppCtx, user_id: &str, key: &str, patch: &LogPatch) -> Result<(), StoreError> {
    let mut entry = get(ctx, user_id, key)?;
    if let Some(rating) = patch.rating {
        entry.rating = Some(rating);
    }
    if let Some(feedback) = &patch.feedback {
        entry.feedback = Some(feedback.clone());
    }

    let dir = user_dir(ctx, user_id);
    let json = serde_json::to_vec_pretty(&entry)?;
    let tmp = NamedTempFile::new_in(&dir)?;
    fs::write(tmp.path(), &json)?;
    tmp.persist(entry_path(ctx, user_id, key))
        .map_err(|e| StoreError::Io(e.error))?;
    Ok(())
}

/// Every (key, entry) pair for a user. Order is not guaranteed; callers
/// that care must sort by timestamp.
pub fn list(ctx: &AppCtx, user_id: &str) -> Result<Vec<(String, LogEntry)>, StoreError> {
    let dir = user_dir(ctx, user_id);
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

/// Deletes the entry under `key`.
pub fn remove(ctx: &AppCtx, user_id: &str, key: &str) -> Result<(), StoreError> {
    let path = entry_path(ctx, user_id, key);
    if !path.exists() {
        return Err(StoreError::NotFound(key.to_string()));
    }
    fs::remove_file(&path)?;
    Ok(())
}
