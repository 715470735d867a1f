mod cli_files;
mod config_transfer;
mod mcp;
mod prompts;
mod providers;
mod response;
mod routes;
mod settings;

pub use routes::{build_router, ApiState};
