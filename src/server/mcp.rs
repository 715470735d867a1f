//! Usage: MCP server CRUD handlers.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use super::response::{success, success_with_id, ApiResult};
use super::routes::ApiState;
use crate::domain::mcp;

#[derive(Debug, Deserialize)]
pub(super) struct ServerBody {
    server: Value,
}

pub(super) async fn list(State(state): State<ApiState>) -> ApiResult<Json<Value>> {
    Ok(Json(mcp::list(&state.store)?))
}

pub(super) async fn add(
    State(state): State<ApiState>,
    Json(body): Json<ServerBody>,
) -> ApiResult<Json<Value>> {
    let id = mcp::add(&state.store, body.server)?;
    Ok(success_with_id(id))
}

pub(super) async fn update(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(body): Json<ServerBody>,
) -> ApiResult<Json<Value>> {
    mcp::update(&state.store, &id, body.server)?;
    Ok(success())
}

pub(super) async fn delete(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    mcp::delete(&state.store, &id)?;
    Ok(success())
}
