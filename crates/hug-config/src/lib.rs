//! Configuration for hug-status
//!
//! This crate provides:
//! - Configuration file loading (TOML, or JSON for `.json` files)
//! - The `Configuration` struct with per-section defaults
//! - GitHub token fallback to the environment

pub mod config_file;
pub mod configuration;
pub mod token;

pub use config_file::{load_config_file, ConfigFormat};
pub use configuration::{
    Configuration, GitHubConfig, PollingConfig, RedisConfig, TwitterConfig,
};
pub use token::resolve_github_token;
