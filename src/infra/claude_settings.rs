//! Usage: Read / patch Claude user-level `settings.json` (~/.claude/settings.json).

use crate::domain::providers::ClaudeProviderConfig;
use crate::infra::app_paths;
use crate::infra::fs_util::write_file_atomic;
use crate::shared::error::AppResult;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// The allow-list of env keys copied out of a provider profile on switch.
/// Everything else in the external `env` mapping is left untouched.
const CLAUDE_ENV_KEYS: [&str; 6] = [
    "ANTHROPIC_AUTH_TOKEN",
    "ANTHROPIC_BASE_URL",
    "ANTHROPIC_MODEL",
    "ANTHROPIC_DEFAULT_HAIKU_MODEL",
    "ANTHROPIC_DEFAULT_OPUS_MODEL",
    "ANTHROPIC_DEFAULT_SONNET_MODEL",
];

fn read_json_or_empty(path: &Path) -> Value {
    let Ok(bytes) = std::fs::read(path) else {
        return Value::Object(serde_json::Map::new());
    };
    serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
}

/// Current external settings; an absent or unreadable file reads as `{}`.
pub fn read_settings() -> AppResult<Value> {
    Ok(read_json_or_empty(&app_paths::claude_settings_path()?))
}

/// Additive merge of the allow-listed provider env keys into the settings
/// document. Keys absent or empty in the provider leave the existing values
/// alone.
fn merged_settings(settings: Value, env: &BTreeMap<String, String>) -> Value {
    let mut root = match settings {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };

    let env_entry = root
        .entry("env".to_string())
        .or_insert_with(|| Value::Object(serde_json::Map::new()));
    if !env_entry.is_object() {
        *env_entry = Value::Object(serde_json::Map::new());
    }

    if let Some(env_map) = env_entry.as_object_mut() {
        for key in CLAUDE_ENV_KEYS {
            if let Some(value) = env.get(key) {
                if !value.trim().is_empty() {
                    env_map.insert(key.to_string(), Value::String(value.clone()));
                }
            }
        }
    }

    Value::Object(root)
}

pub fn apply_provider(config: &ClaudeProviderConfig) -> AppResult<()> {
    let path = app_paths::claude_settings_path()?;
    let next = merged_settings(read_json_or_empty(&path), &config.env);

    let bytes = serde_json::to_vec_pretty(&next)
        .map_err(|e| format!("SYSTEM_ERROR: failed to serialize claude settings: {e}"))?;
    write_file_atomic(&path, &bytes).map_err(|e| format!("FILE_ERROR: {e}"))?;
    Ok(())
}
