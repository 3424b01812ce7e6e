use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use super::utils::ensure_dir;
use crate::api::check_structure;

/// Data for a single, storable template.
#[derive(Serialize, Deserialize, Clone)]
pub struct TemplateData {
    pub name: String,
    pub structure: String,
}

/// Runtime context holding the store's directory layout.
pub struct AppCtx {
    pub base_dir: PathBuf,
    pub templates_dir: PathBuf,
    pub chains_dir: PathBuf,
    pub logs_dir: PathBuf,
    pub teams_dir: PathBuf,
}

impl AppCtx {
    pub fn init() -> Result<Self, String> {
        let home =
            env::var("HOME").map_err(|_| "Unable to determine HOME directory".to_string())?;
        let ctx = Self::with_base_dir(PathBuf::from(home).join(".autoprompt"))?;
        seed_default_templates(&ctx)?;
        Ok(ctx)
    }

    /// Builds the context rooted at an explicit directory. Used by `init`
    /// and by tests that work against a scratch directory.
    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self, String> {
        let templates_dir = base_dir.join("templates");
        let chains_dir = base_dir.join("chains");
        let logs_dir = base_dir.join("logs");
        let teams_dir = base_dir.join("teams");

        ensure_dir(&base_dir)?;
        ensure_dir(&templates_dir)?;
        ensure_dir(&chains_dir)?;
        ensure_dir(&logs_dir)?;
        ensure_dir(&teams_dir)?;

        Ok(Self {
            base_dir,
            templates_dir,
            chains_dir,
            logs_dir,
            teams_dir,
        })
    }

    /// Full path for a template file from its name.
    pub fn template_path(&self, name: &str) -> PathBuf {
        self.templates_dir.join(format!("{}.json", name))
    }

    /// Full path for a chain definition file from its ID.
    pub fn chain_path(&self, id: &str) -> PathBuf {
        self.chains_dir.join(format!("{}.yaml", id))
    }
}

/// Load a template by name.
pub fn load_template(ctx: &AppCtx, name: &str) -> Result<TemplateData, String> {
    let path = ctx.template_path(name);
    if !path.exists() {
        return Err(format!("No template named '{}'", name));
    }
    let raw = fs::read_to_string(&path).map_err(|e| format!("Read error: {}", e))?;
    serde_json::from_str(&raw).map_err(|e| format!("Invalid template file: {}", e))
}

/// Validate and save a template, overwriting any previous version.
pub fn save_template(ctx: &AppCtx, td: &TemplateData) -> Result<(), String> {
    if td.name.trim().is_empty() {
        return Err("Template name cannot be empty".to_string());
    }
    check_structure(&td.structure).map_err(|e| e.to_string())?;

    let json = serde_json::to_string_pretty(td).map_err(|e| format!("Serialize error: {}", e))?;
    fs::write(ctx.template_path(&td.name), json).map_err(|e| format!("Write error: {}", e))?;
    Ok(())
}

/// All stored templates, sorted by name.
pub fn list_templates(ctx: &AppCtx) -> Result<Vec<TemplateData>, String> {
    let mut templates = Vec::new();
    if ctx.templates_dir.exists() {
        for entry in
            fs::read_dir(&ctx.templates_dir).map_err(|e| format!("Read dir error: {}", e))?
        {
            let path = entry.map_err(|e| format!("Dir read error: {}", e))?.path();
            if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json") {
                let raw = fs::read_to_string(&path).map_err(|e| format!("Read error: {}", e))?;
                if let Ok(td) = serde_json::from_str::<TemplateData>(&raw) {
                    templates.push(td);
                }
            }
        }
    }
    templates.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(templates)
}

/// Delete a template by name.
pub fn delete_template(ctx: &AppCtx, name: &str) -> Result<(), String> {
    let path = ctx.template_path(name);
    if !path.exists() {
        return Err(format!("No template named '{}'", name));
    }
    fs::remove_file(&path).map_err(|e| format!("Delete error: {}", e))
}

/// Ship a small set of industry templates on first run so `generate` works
/// out of the box.
fn seed_default_templates(ctx: &AppCtx) -> Result<(), String> {
    let has_any = fs::read_dir(&ctx.templates_dir)
        .map(|mut d| d.next().is_some())
        .unwrap_or(false);
    if has_any {
        return Ok(());
    }

    let defaults = [
        (
            "general",
            "You are a {role} addressing a {audience}. Use a {tone} tone.\nTask: {intent}",
        ),
        (
            "email",
            "Write an email as a {role} to a {audience}. Keep the tone {tone}.\nThe email should accomplish the following: {intent}",
        ),
        (
            "interview",
            "Act as a {role} interviewing a {audience}. Maintain a {tone} tone and focus on: {intent}",
        ),
    ];
    for (name, structure) in defaults {
        save_template(
            ctx,
            &TemplateData {
                name: name.to_string(),
                structure: structure.to_string(),
            },
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn scratch_ctx() -> (tempfile::TempDir, AppCtx) {
        let dir = tempdir().unwrap();
        let ctx = AppCtx::with_base_dir(dir.path().join("store")).unwrap();
        (dir, ctx)
    }

    #[test]
    fn save_load_roundtrip() {
        let (_dir, ctx) = scratch_ctx();
        let td = TemplateData {
            name: "email".to_string(),
            structure: "As a {role}, write to {audience}: {intent}".to_string(),
        };
        save_template(&ctx, &td).unwrap();

        let loaded = load_template(&ctx, "email").unwrap();
        assert_eq!(loaded.structure, td.structure);
    }

    #[test]
    fn save_rejects_ill_formed_structure() {
        let (_dir, ctx) = scratch_ctx();
        let td = TemplateData {
            name: "bad".to_string(),
            structure: "Hello {nobody}".to_string(),
        };
        assert!(save_template(&ctx, &td).is_err());
        assert!(load_template(&ctx, "bad").is_err());
    }

    #[test]
    fn list_is_sorted_and_delete_removes() {
        let (_dir, ctx) = scratch_ctx();
        for name in ["zeta", "alpha"] {
            save_template(
                &ctx,
                &TemplateData {
                    name: name.to_string(),
                    structure: "Do {intent}".to_string(),
                },
            )
            .unwrap();
        }

        let names: Vec<_> = list_templates(&ctx)
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["alpha", "zeta"]);

        delete_template(&ctx, "alpha").unwrap();
        assert!(load_template(&ctx, "alpha").is_err());
    }
}
