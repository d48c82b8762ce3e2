//! Seed and purge the post store.
//!
//! Seeding inserts random fixture posts, the same data the integration suite
//! uses before each test case.

use tracing::info;

use blog_api::{BlogConfig, PostStore};
use blog_core::fixtures;

use super::CommandError;

/// Insert `count` random posts.
///
/// # Errors
///
/// Returns an error if configuration is missing or the insert fails.
pub async fn posts(count: usize) -> Result<(), CommandError> {
    let store = connect().await?;

    info!(count, "Seeding blog post data");
    let stored = store.insert_many(fixtures::posts(count)).await?;

    for post in &stored {
        info!(id = %post.id, title = %post.title, author = %post.author, "Inserted post");
    }
    info!(total = store.count().await?, "Seeding complete!");
    Ok(())
}

/// Remove every post.
///
/// # Errors
///
/// Returns an error if configuration is missing or the delete fails.
pub async fn purge() -> Result<(), CommandError> {
    let store = connect().await?;

    let removed = store.drop_all().await?;
    info!(removed, "Deleted all posts");
    Ok(())
}

async fn connect() -> Result<PostStore, CommandError> {
    let config = BlogConfig::from_env()?;
    let store = PostStore::connect(&config.database_url).await?;
    store.migrate().await?;
    Ok(store)
}
