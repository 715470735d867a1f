//! Usage: Provider profiles (one credential/config profile per CLI app) and the
//! current-selection pointer, plus the switch → external-config projection.

use crate::infra::store::Store;
use crate::infra::{claude_settings, codex_config};
use crate::shared::app_key::AppKey;
use crate::shared::error::{AppError, AppResult};
use crate::shared::ids::new_scoped_id;
use crate::shared::time::now_unix_millis;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderCategory {
    Official,
    ThirdParty,
    #[default]
    Custom,
}

/// Claude profile payload: env vars for `~/.claude/settings.json` plus a few
/// derived display fields. Unknown keys ride along in `extra` so an
/// export/import round-trip never drops data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaudeProviderConfig {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Codex profile payload: an `auth.json` fragment and a raw `config.toml`
/// document (kept as text; parsed only at write-to-disk time).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodexProviderConfig {
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub auth: serde_json::Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Gemini profile payload. Gemini has no on-disk projection; the raw env text
/// is stored for the UI only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiProviderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider<C> {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub settings_config: C,
    #[serde(default)]
    pub category: ProviderCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

/// Per-app provider collection. `current` is a weak reference: it points at a
/// key of `providers` or is empty, and is never validated on switch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig<C> {
    #[serde(default)]
    pub providers: BTreeMap<String, Provider<C>>,
    #[serde(default)]
    pub current: String,
}

impl<C> Default for AppConfig<C> {
    fn default() -> Self {
        Self {
            providers: BTreeMap::new(),
            current: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(
    rename_all = "camelCase",
    bound(deserialize = "C: serde::Deserialize<'de> + Default")
)]
pub struct ProviderInput<C> {
    pub name: String,
    pub website_url: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub settings_config: C,
    #[serde(default)]
    pub category: ProviderCategory,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderPatch<C> {
    pub name: Option<String>,
    pub website_url: Option<String>,
    pub notes: Option<String>,
    pub settings_config: Option<C>,
    pub category: Option<ProviderCategory>,
}

fn to_json<T: Serialize>(value: &T) -> AppResult<Value> {
    serde_json::to_value(value).map_err(|e| format!("SYSTEM_ERROR: failed to serialize: {e}").into())
}

pub fn list(store: &Store, app: AppKey) -> AppResult<Value> {
    let aggregate = store.read();
    match app {
        AppKey::Claude => to_json(&aggregate.claude.providers),
        AppKey::Codex => to_json(&aggregate.codex.providers),
        AppKey::Gemini => to_json(&aggregate.gemini.providers),
    }
}

pub fn current(store: &Store, app: AppKey) -> String {
    let aggregate = store.read();
    match app {
        AppKey::Claude => aggregate.claude.current,
        AppKey::Codex => aggregate.codex.current,
        AppKey::Gemini => aggregate.gemini.current,
    }
}

fn insert_provider<C>(
    config: &mut AppConfig<C>,
    id: &str,
    created_at: i64,
    input: Value,
) -> AppResult<()>
where
    C: DeserializeOwned + Default,
{
    let input: ProviderInput<C> = serde_json::from_value(input)
        .map_err(|e| format!("SEC_INVALID_INPUT: invalid provider payload: {e}"))?;

    config.providers.insert(
        id.to_string(),
        Provider {
            id: id.to_string(),
            name: input.name,
            website_url: input.website_url,
            notes: input.notes,
            settings_config: input.settings_config,
            category: input.category,
            created_at: Some(created_at),
        },
    );
    Ok(())
}

pub fn add(store: &Store, app: AppKey, input: Value) -> AppResult<String> {
    let id = new_scoped_id(app.as_str());
    let created_at = now_unix_millis();

    store.mutate(|aggregate| match app {
        AppKey::Claude => insert_provider(&mut aggregate.claude, &id, created_at, input),
        AppKey::Codex => insert_provider(&mut aggregate.codex, &id, created_at, input),
        AppKey::Gemini => insert_provider(&mut aggregate.gemini, &id, created_at, input),
    })?;

    Ok(id)
}

fn patch_provider<C>(config: &mut AppConfig<C>, id: &str, patch: Value) -> AppResult<()>
where
    C: DeserializeOwned,
{
    let patch: ProviderPatch<C> = serde_json::from_value(patch)
        .map_err(|e| format!("SEC_INVALID_INPUT: invalid provider payload: {e}"))?;

    let Some(existing) = config.providers.get_mut(id) else {
        return Err(AppError::from("STORE_NOT_FOUND: Provider not found"));
    };

    if let Some(name) = patch.name {
        existing.name = name;
    }
    if let Some(website_url) = patch.website_url {
        existing.website_url = Some(website_url);
    }
    if let Some(notes) = patch.notes {
        existing.notes = Some(notes);
    }
    if let Some(settings_config) = patch.settings_config {
        existing.settings_config = settings_config;
    }
    if let Some(category) = patch.category {
        existing.category = category;
    }
    Ok(())
}

/// Shallow merge: fields present in the patch replace the stored ones;
/// `settingsConfig`, when present, is replaced wholesale.
pub fn update(store: &Store, app: AppKey, id: &str, patch: Value) -> AppResult<()> {
    store.mutate(|aggregate| match app {
        AppKey::Claude => patch_provider(&mut aggregate.claude, id, patch),
        AppKey::Codex => patch_provider(&mut aggregate.codex, id, patch),
        AppKey::Gemini => patch_provider(&mut aggregate.gemini, id, patch),
    })
}

fn remove_provider<C>(config: &mut AppConfig<C>, id: &str) {
    config.providers.remove(id);
    if config.current == id {
        config.current.clear();
    }
}

/// Deleting a missing id is a tolerated no-op. Deleting the current provider
/// resets the app's `current` pointer.
pub fn delete(store: &Store, app: AppKey, id: &str) -> AppResult<()> {
    store.mutate(|aggregate| {
        match app {
            AppKey::Claude => remove_provider(&mut aggregate.claude, id),
            AppKey::Codex => remove_provider(&mut aggregate.codex, id),
            AppKey::Gemini => remove_provider(&mut aggregate.gemini, id),
        }
        Ok(())
    })
}

/// Set `current = id` (no existence check, matching the original tool) and
/// project the provider's settings into the app's external config files when
/// the provider exists.
pub fn switch(store: &Store, app: AppKey, id: &str) -> AppResult<()> {
    store.mutate(|aggregate| {
        match app {
            AppKey::Claude => aggregate.claude.current = id.to_string(),
            AppKey::Codex => aggregate.codex.current = id.to_string(),
            AppKey::Gemini => aggregate.gemini.current = id.to_string(),
        }
        Ok(())
    })?;

    let aggregate = store.read();
    match app {
        AppKey::Claude => {
            if let Some(provider) = aggregate.claude.providers.get(id) {
                claude_settings::apply_provider(&provider.settings_config)?;
            }
        }
        AppKey::Codex => {
            if let Some(provider) = aggregate.codex.providers.get(id) {
                codex_config::apply_provider(&provider.settings_config)?;
            }
        }
        AppKey::Gemini => {}
    }

    Ok(())
}
