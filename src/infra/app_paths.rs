//! Usage: Resolve data-dir and external CLI config paths (supports $CC_SWITCH_DATA_DIR / $CODEX_HOME).

use crate::shared::error::AppResult;
use std::path::{Path, PathBuf};

const ENV_DATA_DIR: &str = "CC_SWITCH_DATA_DIR";
const ENV_CODEX_HOME: &str = "CODEX_HOME";

const DATA_DIR_NAME: &str = ".cc-switch";
const DATA_FILE_NAME: &str = "ccswitch-data.json";
const LOG_SUBDIR: &str = "logs";

pub fn home_dir() -> AppResult<PathBuf> {
    // USERPROFILE is the Windows fallback.
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .ok_or_else(|| "SYSTEM_ERROR: failed to resolve home dir (HOME is unset)".into())
}

fn expand_tilde(home: &Path, raw: &str) -> Option<PathBuf> {
    let trimmed = raw.trim();
    if trimmed == "~" {
        return Some(home.to_path_buf());
    }

    let rest = trimmed
        .strip_prefix("~/")
        .or_else(|| trimmed.strip_prefix("~\\"));

    rest.map(|suffix| home.join(suffix))
}

fn resolve_under_home(home: &Path, raw: &str) -> PathBuf {
    if let Some(p) = expand_tilde(home, raw) {
        return p;
    }

    let candidate = PathBuf::from(raw);
    if candidate.is_absolute() {
        return candidate;
    }

    home.join(candidate)
}

fn env_path_override(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn data_dir() -> AppResult<PathBuf> {
    let home = home_dir()?;
    Ok(match env_path_override(ENV_DATA_DIR) {
        Some(raw) => resolve_under_home(&home, &raw),
        None => home.join(DATA_DIR_NAME),
    })
}

pub fn data_file_path() -> AppResult<PathBuf> {
    Ok(data_dir()?.join(DATA_FILE_NAME))
}

pub fn logs_dir() -> AppResult<PathBuf> {
    Ok(data_dir()?.join(LOG_SUBDIR))
}

pub fn claude_settings_path() -> AppResult<PathBuf> {
    Ok(home_dir()?.join(".claude").join("settings.json"))
}

pub fn codex_home_dir() -> AppResult<PathBuf> {
    let home = home_dir()?;
    Ok(match env_path_override(ENV_CODEX_HOME) {
        Some(raw) => resolve_under_home(&home, &raw),
        None => home.join(".codex"),
    })
}

pub fn codex_auth_json_path() -> AppResult<PathBuf> {
    Ok(codex_home_dir()?.join("auth.json"))
}

pub fn codex_config_toml_path() -> AppResult<PathBuf> {
    Ok(codex_home_dir()?.join("config.toml"))
}
