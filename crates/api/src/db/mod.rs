//! Post persistence.
//!
//! # Backends
//!
//! The store is chosen by the URL scheme:
//!
//! - `memory://<name>` - process-local document collection, used by tests and
//!   local development. Every connect opens a new empty collection; `<name>`
//!   only labels it in logs
//! - `postgres://...` - the `blog.post` table, author stored as JSONB
//!
//! # Migrations
//!
//! Postgres migrations live in `crates/api/migrations/`. The server runs them
//! on startup, and they can be run explicitly with:
//! ```bash
//! cargo run -p blog-cli -- migrate
//! ```

pub mod memory;
pub mod posts;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use blog_core::{NewPost, Post, PostId, PostUpdate};

pub use memory::MemoryCollection;
pub use posts::PostRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Running migrations failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// The database URL names no known backend.
    #[error("unsupported database url scheme: {0}")]
    UnsupportedUrl(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Handle to the post collection, whichever backend holds it.
///
/// Cloning is cheap: both variants share their underlying storage.
#[derive(Debug, Clone)]
pub enum PostStore {
    Postgres(PostRepository),
    Memory(MemoryCollection),
}

impl PostStore {
    /// Open the store named by `database_url`.
    ///
    /// A `memory://<name>` URL always yields a fresh, empty collection. Two
    /// connects with the same name do not see each other's posts.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::UnsupportedUrl` for unknown schemes and
    /// `RepositoryError::Database` if Postgres is unreachable.
    pub async fn connect(database_url: &SecretString) -> Result<Self, RepositoryError> {
        let url = database_url.expose_secret();
        let (scheme, location) = url.split_once("://").unwrap_or_default();

        match scheme {
            "memory" => {
                let collection = MemoryCollection::new(location);
                tracing::info!(name = collection.name(), "opened in-memory post collection");
                Ok(Self::Memory(collection))
            }
            "postgres" | "postgresql" => {
                let pool = create_pool(database_url).await?;
                Ok(Self::Postgres(PostRepository::new(pool)))
            }
            other => Err(RepositoryError::UnsupportedUrl(other.to_owned())),
        }
    }

    /// Short backend name for logs.
    #[must_use]
    pub const fn backend(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Memory(_) => "memory",
        }
    }

    /// Apply pending schema migrations. No-op for the memory backend.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Migration` if a migration fails.
    pub async fn migrate(&self) -> Result<(), RepositoryError> {
        match self {
            Self::Postgres(repo) => repo.migrate().await,
            Self::Memory(_) => Ok(()),
        }
    }

    /// Check that the backend is reachable.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if Postgres does not answer.
    pub async fn ping(&self) -> Result<(), RepositoryError> {
        match self {
            Self::Postgres(repo) => repo.ping().await,
            Self::Memory(_) => Ok(()),
        }
    }

    /// Store a batch of posts, assigning each an id.
    ///
    /// Returns the stored posts in input order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails. Postgres
    /// inserts the batch in one transaction.
    pub async fn insert_many(&self, posts: Vec<NewPost>) -> Result<Vec<Post>, RepositoryError> {
        match self {
            Self::Postgres(repo) => repo.insert_many(posts).await,
            Self::Memory(collection) => Ok(collection.insert_many(posts).await),
        }
    }

    /// Store a single post.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(&self, post: NewPost) -> Result<Post, RepositoryError> {
        self.insert_many(vec![post])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| RepositoryError::DataCorruption("insert returned no row".to_owned()))
    }

    /// All posts in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Post>, RepositoryError> {
        match self {
            Self::Postgres(repo) => repo.list().await,
            Self::Memory(collection) => Ok(collection.list().await),
        }
    }

    /// The first post in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_one(&self) -> Result<Option<Post>, RepositoryError> {
        match self {
            Self::Postgres(repo) => repo.find_one().await,
            Self::Memory(collection) => Ok(collection.find_one().await),
        }
    }

    /// Get a post by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepositoryError> {
        match self {
            Self::Postgres(repo) => repo.find_by_id(id).await,
            Self::Memory(collection) => Ok(collection.find_by_id(id).await),
        }
    }

    /// Number of stored posts.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<usize, RepositoryError> {
        match self {
            Self::Postgres(repo) => repo.count().await,
            Self::Memory(collection) => Ok(collection.count().await),
        }
    }

    /// Overwrite the fields present in `update`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no post has this id.
    pub async fn update(&self, id: PostId, update: &PostUpdate) -> Result<Post, RepositoryError> {
        match self {
            Self::Postgres(repo) => repo.update(id, update).await,
            Self::Memory(collection) => collection.update(id, update).await,
        }
    }

    /// Remove a post.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no post has this id.
    pub async fn delete(&self, id: PostId) -> Result<(), RepositoryError> {
        match self {
            Self::Postgres(repo) => repo.delete(id).await,
            Self::Memory(collection) => collection.delete(id).await,
        }
    }

    /// Remove every post. Returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn drop_all(&self) -> Result<u64, RepositoryError> {
        match self {
            Self::Postgres(repo) => repo.drop_all().await,
            Self::Memory(collection) => Ok(collection.drop_all().await),
        }
    }
}
