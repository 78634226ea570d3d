//! Application configuration module.
//!
//! Manages the TOML config file holding connection settings for the
//! Festivo API (base URL and request timeout).

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::{ApiConfig, AppConfig};
pub use paths::resolve_config_path;
