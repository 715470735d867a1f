pub mod app_key;
pub mod error;
pub mod ids;
pub mod mutex_ext;
pub mod time;
