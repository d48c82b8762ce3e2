//! CLI command implementations.

pub mod migrate;
pub mod seed;

use thiserror::Error;

use blog_api::config::ConfigError;
use blog_api::db::RepositoryError;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("store error: {0}")]
    Repository(#[from] RepositoryError),
}
