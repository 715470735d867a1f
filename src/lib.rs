mod app;
pub mod domain;
pub mod infra;
pub mod server;
pub mod shared;

pub use domain::{mcp, prompts, providers, settings, sql_import};
pub use infra::{app_paths, claude_settings, codex_config, store};
pub use server::{build_router, ApiState};

use crate::shared::error::AppResult;
use std::sync::Arc;

const DEFAULT_PORT: u16 = 3001;
const ENV_PORT: &str = "PORT";

fn listen_port() -> u16 {
    std::env::var(ENV_PORT)
        .ok()
        .and_then(|v| v.trim().parse::<u16>().ok())
        .filter(|p| *p >= 1024)
        .unwrap_or(DEFAULT_PORT)
}

pub async fn serve() -> AppResult<()> {
    app::logging::init();

    let store = Arc::new(store::Store::open_default()?);
    let state = ApiState { store };
    let router = build_router(state);

    let port = listen_port();
    let addr = format!("127.0.0.1:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| format!("SYSTEM_ERROR: failed to bind {addr}: {e}"))?;

    tracing::info!(addr = %addr, "cc-switch-web listening");

    axum::serve(listener, router)
        .await
        .map_err(|e| format!("SYSTEM_ERROR: server error: {e}"))?;

    Ok(())
}
