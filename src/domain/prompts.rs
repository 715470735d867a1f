//! Usage: Per-app prompt library. At most one prompt per app is enabled;
//! enabling one turns its siblings off.

use crate::infra::store::Store;
use crate::shared::app_key::AppKey;
use crate::shared::error::{AppError, AppResult};
use crate::shared::ids::new_scoped_id;
use crate::shared::time::now_unix_millis;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    pub id: String,
    pub name: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptInput {
    pub name: String,
    pub content: String,
    pub description: Option<String>,
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptPatch {
    pub name: Option<String>,
    pub content: Option<String>,
    pub description: Option<String>,
    pub enabled: Option<bool>,
}

fn to_json<T: Serialize>(value: &T) -> AppResult<Value> {
    serde_json::to_value(value).map_err(|e| format!("SYSTEM_ERROR: failed to serialize: {e}").into())
}

fn clear_enabled(prompts: &mut BTreeMap<String, Prompt>, keep_id: &str) {
    for (id, prompt) in prompts.iter_mut() {
        if id != keep_id {
            prompt.enabled = false;
        }
    }
}

pub fn list(store: &Store, app: AppKey) -> AppResult<Value> {
    to_json(store.read().prompts.for_app(app))
}

pub fn add(store: &Store, app: AppKey, input: Value) -> AppResult<String> {
    let input: PromptInput = serde_json::from_value(input)
        .map_err(|e| format!("SEC_INVALID_INPUT: invalid prompt payload: {e}"))?;

    let id = new_scoped_id("prompt");
    let now = now_unix_millis();

    store.mutate(|aggregate| {
        let prompts = aggregate.prompts.for_app_mut(app);
        if input.enabled {
            clear_enabled(prompts, &id);
        }
        prompts.insert(
            id.clone(),
            Prompt {
                id: id.clone(),
                name: input.name,
                content: input.content,
                description: input.description,
                enabled: input.enabled,
                created_at: Some(now),
                updated_at: Some(now),
            },
        );
        Ok(())
    })?;

    Ok(id)
}

pub fn update(store: &Store, app: AppKey, id: &str, patch: Value) -> AppResult<()> {
    let patch: PromptPatch = serde_json::from_value(patch)
        .map_err(|e| format!("SEC_INVALID_INPUT: invalid prompt payload: {e}"))?;

    store.mutate(|aggregate| {
        let prompts = aggregate.prompts.for_app_mut(app);
        if !prompts.contains_key(id) {
            return Err(AppError::from("STORE_NOT_FOUND: Prompt not found"));
        }

        if patch.enabled == Some(true) {
            clear_enabled(prompts, id);
        }

        let Some(prompt) = prompts.get_mut(id) else {
            return Err(AppError::from("STORE_NOT_FOUND: Prompt not found"));
        };
        if let Some(name) = patch.name {
            prompt.name = name;
        }
        if let Some(content) = patch.content {
            prompt.content = content;
        }
        if let Some(description) = patch.description {
            prompt.description = Some(description);
        }
        if let Some(enabled) = patch.enabled {
            prompt.enabled = enabled;
        }
        prompt.updated_at = Some(now_unix_millis());
        Ok(())
    })
}

pub fn delete(store: &Store, app: AppKey, id: &str) -> AppResult<()> {
    store.mutate(|aggregate| {
        if aggregate.prompts.for_app_mut(app).remove(id).is_none() {
            return Err(AppError::from("STORE_NOT_FOUND: Prompt not found"));
        }
        Ok(())
    })
}
