//! Integration test harness for the blog posts API.
//!
//! # Running Tests
//!
//! ```bash
//! # Against an in-memory store (no services needed)
//! cargo test -p blog-integration-tests
//!
//! # Against PostgreSQL
//! TEST_DATABASE_URL=postgres://localhost/test_blog_app cargo test -p blog-integration-tests
//! ```
//!
//! # Lifecycle
//!
//! Each test case runs inside a [`TestContext`]:
//!
//! 1. [`TestContext::start`] takes the suite lock, starts a server bound to
//!    the test database, clears the collection, and seeds [`SEED_SIZE`]
//!    random posts.
//! 2. The test issues requests one at a time and asserts on the responses.
//! 3. [`TestContext::finish`] drops the collection and stops the server.
//!
//! Cases share one collection that is reset between them, so the suite lock
//! keeps them sequential even though the test runner uses threads.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Once;

use rand::Rng;
use reqwest::Client;
use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard};

use blog_api::config::test_database_url;
use blog_api::{BlogConfig, PostStore, RepositoryError, RunningServer, ServerError, run_server};
use blog_core::{Post, fixtures};

/// Posts inserted before each test case.
pub const SEED_SIZE: usize = 10;

static SUITE_LOCK: Mutex<()> = Mutex::const_new(());
static TRACING: Once = Once::new();

/// Errors raised by the harness itself (not by assertions).
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("server error: {0}")]
    Server(#[from] ServerError),

    #[error("store error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// A running server with a freshly seeded collection.
pub struct TestContext {
    pub client: Client,
    server: RunningServer,
    _guard: MutexGuard<'static, ()>,
}

impl TestContext {
    /// Start the server against the test database and seed it.
    ///
    /// # Errors
    ///
    /// Returns an error if the server cannot start or seeding fails.
    pub async fn start() -> Result<Self, HarnessError> {
        init_tracing();
        let guard = SUITE_LOCK.lock().await;

        let server = run_server(&BlogConfig::for_database(test_database_url())).await?;
        let client = Client::builder().build()?;

        let ctx = Self {
            client,
            server,
            _guard: guard,
        };

        // A previous case may have panicked before tearing down
        ctx.store().drop_all().await?;
        ctx.seed().await?;
        Ok(ctx)
    }

    /// Absolute URL for a request path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.server.base_url())
    }

    /// Direct handle to the server's post store.
    #[must_use]
    pub const fn store(&self) -> &PostStore {
        self.server.store()
    }

    async fn seed(&self) -> Result<Vec<Post>, HarnessError> {
        tracing::info!("seeding blog post data");
        Ok(self.store().insert_many(fixtures::posts(SEED_SIZE)).await?)
    }

    async fn tear_down_db(&self) -> Result<(), HarnessError> {
        tracing::info!("deleting database");
        self.store().drop_all().await?;
        Ok(())
    }

    /// Drop the collection and stop the server.
    ///
    /// A teardown failure is logged rather than returned so it never masks
    /// the assertions that already ran.
    ///
    /// # Errors
    ///
    /// Returns an error if the server does not shut down cleanly.
    pub async fn finish(self) -> Result<(), HarnessError> {
        if let Err(err) = self.tear_down_db().await {
            tracing::error!(error = %err, "teardown failed");
        }
        self.server.close().await?;
        Ok(())
    }
}

/// A random index in `0..len`.
///
/// # Panics
///
/// Panics if `len` is zero.
#[must_use]
pub fn random_index(len: usize) -> usize {
    rand::rng().random_range(0..len)
}

fn init_tracing() {
    TRACING.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "blog_api=info,blog_integration_tests=info".into());
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}
