//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! blog-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `BLOG_DATABASE_URL` - Post store URL (falls back to `DATABASE_URL`)
//!
//! Migrations are embedded from `crates/api/migrations/`. Memory stores have
//! no schema, so the command is a no-op for them.

use tracing::info;

use blog_api::{BlogConfig, PostStore};

use super::CommandError;

/// Run post store migrations.
///
/// # Errors
///
/// Returns an error if configuration is missing, the store is unreachable, or
/// a migration fails.
pub async fn run() -> Result<(), CommandError> {
    let config = BlogConfig::from_env()?;

    info!("Connecting to post store...");
    let store = PostStore::connect(&config.database_url).await?;

    info!(backend = store.backend(), "Running migrations...");
    store.migrate().await?;

    info!("Migrations complete!");
    Ok(())
}
