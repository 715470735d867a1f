//! Usage: Tracing/logging initialization (rolling file logs + stdout).

use crate::infra::app_paths;
use std::sync::{Mutex, OnceLock};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;

const LOG_FILE_PREFIX: &str = "cc-switch-web.log";

static TRACING_GUARD: OnceLock<Mutex<Option<WorkerGuard>>> = OnceLock::new();
static TRACING_INIT: OnceLock<()> = OnceLock::new();

pub(crate) fn init() {
    TRACING_INIT.get_or_init(|| {
        if let Err(err) = init_impl() {
            // Last-resort fallback: stderr logger.
            let _ = tracing_subscriber::fmt()
                .with_env_filter(default_env_filter())
                .with_target(false)
                .try_init();
            eprintln!("tracing init failed: {err}");
        }
    });
}

fn init_impl() -> Result<(), String> {
    let log_dir = app_paths::logs_dir().map_err(|e| e.to_string())?;
    std::fs::create_dir_all(&log_dir)
        .map_err(|e| format!("failed to create log dir {}: {e}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    TRACING_GUARD
        .get_or_init(|| Mutex::new(None))
        .lock()
        .map_err(|_| "logging guard mutex poisoned".to_string())?
        .replace(guard);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false);

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(false);

    let subscriber = tracing_subscriber::registry()
        .with(default_env_filter())
        .with(file_layer)
        .with(stdout_layer);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| format!("failed to set global tracing subscriber: {e}"))?;

    // Capture `log` crate records from dependencies into `tracing` when possible.
    let _ = tracing_log::LogTracer::init();

    tracing::info!(log_dir = %log_dir.display(), "tracing initialized");
    Ok(())
}

fn default_env_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        #[cfg(debug_assertions)]
        {
            tracing_subscriber::EnvFilter::new("info,cc_switch_web_lib=debug")
        }
        #[cfg(not(debug_assertions))]
        {
            tracing_subscriber::EnvFilter::new("info")
        }
    })
}
