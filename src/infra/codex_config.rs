//! Usage: Read / patch Codex user-level `auth.json` and `config.toml` ($CODEX_HOME).

use crate::domain::providers::CodexProviderConfig;
use crate::infra::app_paths;
use crate::infra::fs_util::write_file_atomic;
use crate::shared::error::AppResult;
use serde_json::Value;
use std::path::Path;

fn read_json_or_empty(path: &Path) -> Value {
    let Ok(bytes) = std::fs::read(path) else {
        return Value::Object(serde_json::Map::new());
    };
    serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
}

fn read_text_or_empty(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap_or_default()
}

/// Current external auth; an absent or unreadable file reads as `{}`.
pub fn read_auth() -> AppResult<Value> {
    Ok(read_json_or_empty(&app_paths::codex_auth_json_path()?))
}

/// Shallow-merge the provider's auth fragment into the external auth document.
fn merged_auth(auth: Value, patch: &serde_json::Map<String, Value>) -> Value {
    let mut root = match auth {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };
    for (key, value) in patch {
        root.insert(key.clone(), value.clone());
    }
    Value::Object(root)
}

/// Parse the provider's raw TOML document and shallow-merge its top-level keys
/// into the external `config.toml`. Existing keys not named by the provider
/// survive untouched.
fn merged_config_toml(current: &str, patch: &str) -> AppResult<String> {
    let patch_table: toml::Table = patch
        .parse()
        .map_err(|e| format!("SEC_INVALID_INPUT: invalid provider config toml: {e}"))?;

    let mut table: toml::Table = current.parse().unwrap_or_default();
    for (key, value) in patch_table {
        table.insert(key, value);
    }

    toml::to_string(&table).map_err(|e| format!("SYSTEM_ERROR: failed to serialize config.toml: {e}").into())
}

pub fn apply_provider(config: &CodexProviderConfig) -> AppResult<()> {
    let auth_path = app_paths::codex_auth_json_path()?;
    let config_path = app_paths::codex_config_toml_path()?;

    let next_auth = if config.auth.is_empty() {
        None
    } else {
        Some(merged_auth(read_json_or_empty(&auth_path), &config.auth))
    };

    let next_config = match config.config.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => {
            Some(merged_config_toml(&read_text_or_empty(&config_path), raw)?)
        }
        _ => None,
    };

    // config.toml first, then auth.json, matching the switch order the CLI expects.
    if let Some(text) = next_config {
        write_file_atomic(&config_path, text.as_bytes()).map_err(|e| format!("FILE_ERROR: {e}"))?;
    }
    if let Some(auth) = next_auth {
        let bytes = serde_json::to_vec_pretty(&auth)
            .map_err(|e| format!("SYSTEM_ERROR: failed to serialize auth.json: {e}"))?;
        write_file_atomic(&auth_path, &bytes).map_err(|e| format!("FILE_ERROR: {e}"))?;
    }

    Ok(())
}
