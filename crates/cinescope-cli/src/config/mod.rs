//! Application configuration module.
//!
//! Stores TMDB credentials and the response language in a TOML file,
//! with environment variable overrides for the credentials.

#[allow(clippy::module_inception)]
mod config;

#[allow(clippy::module_name_repetitions)]
pub use config::{AppConfig, TmdbConfig, resolve_config_path};
