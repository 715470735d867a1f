//! Usage: Direct external-config endpoints (Claude settings / Codex auth reads
//! plus the body-driven switch variants the UI still calls).

use axum::Json;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::response::{success, ApiResult};
use crate::domain::providers::{ClaudeProviderConfig, CodexProviderConfig};
use crate::infra::{claude_settings, codex_config};
use crate::shared::error::AppResult;

#[derive(Debug, Deserialize)]
pub(super) struct SwitchProviderBody {
    provider: Value,
}

/// The switch body carries a full provider object; only `settingsConfig`
/// matters here, translated into the app's typed shape.
fn provider_settings_config<C>(provider: &Value) -> AppResult<C>
where
    C: DeserializeOwned + Default,
{
    match provider.get("settingsConfig") {
        None => Ok(C::default()),
        Some(value) => serde_json::from_value(value.clone())
            .map_err(|e| format!("SEC_INVALID_INPUT: invalid provider settingsConfig: {e}").into()),
    }
}

pub(super) async fn claude_switch_provider(
    Json(body): Json<SwitchProviderBody>,
) -> ApiResult<Json<Value>> {
    let config: ClaudeProviderConfig = provider_settings_config(&body.provider)?;
    claude_settings::apply_provider(&config)?;
    Ok(success())
}

pub(super) async fn claude_settings_get() -> ApiResult<Json<Value>> {
    Ok(Json(claude_settings::read_settings()?))
}

pub(super) async fn codex_switch_provider(
    Json(body): Json<SwitchProviderBody>,
) -> ApiResult<Json<Value>> {
    let config: CodexProviderConfig = provider_settings_config(&body.provider)?;
    codex_config::apply_provider(&config)?;
    Ok(success())
}

pub(super) async fn codex_auth_get() -> ApiResult<Json<Value>> {
    Ok(Json(codex_config::read_auth()?))
}
