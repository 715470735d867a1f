pub mod app_paths;
pub mod claude_settings;
pub mod codex_config;
pub mod fs_util;
pub mod store;
