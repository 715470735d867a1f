//! Usage: User settings handlers.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use super::response::{success, ApiResult};
use super::routes::ApiState;
use crate::domain::settings::{self, SettingsPatch};
use crate::shared::error::AppError;

#[derive(Debug, Deserialize)]
pub(super) struct SettingsBody {
    settings: SettingsPatch,
}

pub(super) async fn get_settings(State(state): State<ApiState>) -> ApiResult<Json<Value>> {
    let settings = settings::get(&state.store);
    let value = serde_json::to_value(settings)
        .map_err(|e| AppError::from(format!("SYSTEM_ERROR: failed to serialize: {e}")))?;
    Ok(Json(value))
}

pub(super) async fn update_settings(
    State(state): State<ApiState>,
    Json(body): Json<SettingsBody>,
) -> ApiResult<Json<Value>> {
    settings::update(&state.store, body.settings)?;
    Ok(success())
}
