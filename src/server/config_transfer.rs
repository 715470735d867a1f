//! Usage: Bulk export / import handlers (whole-aggregate JSON + legacy SQL dump).

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use super::response::{success, ApiResult};
use super::routes::ApiState;
use crate::domain::sql_import;
use crate::infra::store::Aggregate;
use crate::shared::error::AppError;

#[derive(Debug, Deserialize)]
pub(super) struct ImportBody {
    config: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ImportSqlBody {
    sql_content: String,
}

pub(super) async fn export(State(state): State<ApiState>) -> ApiResult<Json<Value>> {
    let aggregate = state.store.read();
    let value = serde_json::to_value(aggregate)
        .map_err(|e| AppError::from(format!("SYSTEM_ERROR: failed to serialize: {e}")))?;
    Ok(Json(value))
}

/// Full overwrite: the caller-supplied aggregate replaces the stored one, no
/// merge of any kind.
pub(super) async fn import(
    State(state): State<ApiState>,
    Json(body): Json<ImportBody>,
) -> ApiResult<Json<Value>> {
    let aggregate: Aggregate = serde_json::from_value(body.config)
        .map_err(|e| AppError::from(format!("SEC_INVALID_INPUT: invalid config payload: {e}")))?;
    state.store.replace(aggregate)?;
    Ok(success())
}

pub(super) async fn import_sql(
    State(state): State<ApiState>,
    Json(body): Json<ImportSqlBody>,
) -> ApiResult<Json<Value>> {
    let counts = sql_import::import_from_sql(&state.store, &body.sql_content)?;
    Ok(Json(json!({ "success": true, "counts": counts })))
}
