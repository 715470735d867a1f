//! Usage: HTTP API surface (axum router + shared state wiring).

use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;

use crate::infra::store::Store;
use crate::shared::time::now_unix_seconds;

use super::{cli_files, config_transfer, mcp, prompts, providers, settings};

#[derive(Clone)]
pub struct ApiState {
    pub store: Arc<Store>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    app: &'static str,
    version: &'static str,
    ts: u64,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        app: "cc-switch-web",
        version: env!("CARGO_PKG_VERSION"),
        ts: now_unix_seconds(),
    })
}

async fn root() -> &'static str {
    "CC Switch Web is running"
}

pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route(
            "/api/claude/switch-provider",
            post(cli_files::claude_switch_provider),
        )
        .route("/api/claude/settings", get(cli_files::claude_settings_get))
        .route(
            "/api/codex/switch-provider",
            post(cli_files::codex_switch_provider),
        )
        .route("/api/codex/auth", get(cli_files::codex_auth_get))
        .route(
            "/api/providers/:app",
            get(providers::list).post(providers::add),
        )
        .route("/api/providers/:app/current", get(providers::current))
        .route("/api/providers/:app/switch", post(providers::switch_current))
        .route(
            "/api/providers/:app/:id",
            put(providers::update).delete(providers::delete),
        )
        .route("/api/mcp/servers", get(mcp::list).post(mcp::add))
        .route("/api/mcp/servers/:id", put(mcp::update).delete(mcp::delete))
        .route("/api/prompts/:app", get(prompts::list).post(prompts::add))
        .route(
            "/api/prompts/:app/:id",
            put(prompts::update).delete(prompts::delete),
        )
        .route(
            "/api/settings",
            get(settings::get_settings).put(settings::update_settings),
        )
        .route("/api/config/export", get(config_transfer::export))
        .route("/api/config/import", post(config_transfer::import))
        .route("/api/config/import-sql", post(config_transfer::import_sql))
        .with_state(state)
}
