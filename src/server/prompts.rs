//! Usage: Prompt library CRUD handlers.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use super::response::{success, success_with_id, ApiResult};
use super::routes::ApiState;
use crate::domain::prompts;
use crate::shared::app_key::AppKey;

#[derive(Debug, Deserialize)]
pub(super) struct PromptBody {
    prompt: Value,
}

pub(super) async fn list(
    State(state): State<ApiState>,
    Path(app): Path<String>,
) -> ApiResult<Json<Value>> {
    let app = AppKey::parse(&app)?;
    Ok(Json(prompts::list(&state.store, app)?))
}

pub(super) async fn add(
    State(state): State<ApiState>,
    Path(app): Path<String>,
    Json(body): Json<PromptBody>,
) -> ApiResult<Json<Value>> {
    let app = AppKey::parse(&app)?;
    let id = prompts::add(&state.store, app, body.prompt)?;
    Ok(success_with_id(id))
}

pub(super) async fn update(
    State(state): State<ApiState>,
    Path((app, id)): Path<(String, String)>,
    Json(body): Json<PromptBody>,
) -> ApiResult<Json<Value>> {
    let app = AppKey::parse(&app)?;
    prompts::update(&state.store, app, &id, body.prompt)?;
    Ok(success())
}

pub(super) async fn delete(
    State(state): State<ApiState>,
    Path((app, id)): Path<(String, String)>,
) -> ApiResult<Json<Value>> {
    let app = AppKey::parse(&app)?;
    prompts::delete(&state.store, app, &id)?;
    Ok(success())
}
