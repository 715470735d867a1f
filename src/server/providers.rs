//! Usage: Provider CRUD / switch handlers.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use super::response::{success, success_with_id, ApiResult};
use super::routes::ApiState;
use crate::domain::providers;
use crate::shared::app_key::AppKey;

#[derive(Debug, Deserialize)]
pub(super) struct ProviderBody {
    provider: Value,
}

#[derive(Debug, Deserialize)]
pub(super) struct SwitchBody {
    id: String,
}

pub(super) async fn list(
    State(state): State<ApiState>,
    Path(app): Path<String>,
) -> ApiResult<Json<Value>> {
    let app = AppKey::parse(&app)?;
    Ok(Json(providers::list(&state.store, app)?))
}

pub(super) async fn current(
    State(state): State<ApiState>,
    Path(app): Path<String>,
) -> ApiResult<Json<Value>> {
    let app = AppKey::parse(&app)?;
    Ok(Json(json!({ "current": providers::current(&state.store, app) })))
}

pub(super) async fn add(
    State(state): State<ApiState>,
    Path(app): Path<String>,
    Json(body): Json<ProviderBody>,
) -> ApiResult<Json<Value>> {
    let app = AppKey::parse(&app)?;
    let id = providers::add(&state.store, app, body.provider)?;
    Ok(success_with_id(id))
}

pub(super) async fn update(
    State(state): State<ApiState>,
    Path((app, id)): Path<(String, String)>,
    Json(body): Json<ProviderBody>,
) -> ApiResult<Json<Value>> {
    let app = AppKey::parse(&app)?;
    providers::update(&state.store, app, &id, body.provider)?;
    Ok(success())
}

pub(super) async fn delete(
    State(state): State<ApiState>,
    Path((app, id)): Path<(String, String)>,
) -> ApiResult<Json<Value>> {
    let app = AppKey::parse(&app)?;
    providers::delete(&state.store, app, &id)?;
    Ok(success())
}

pub(super) async fn switch_current(
    State(state): State<ApiState>,
    Path(app): Path<String>,
    Json(body): Json<SwitchBody>,
) -> ApiResult<Json<Value>> {
    let app = AppKey::parse(&app)?;
    providers::switch(&state.store, app, &body.id)?;
    Ok(success())
}
