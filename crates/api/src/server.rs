//! Server lifecycle: bind, serve in the background, shut down on request.
//!
//! `run_server` is shared by the binary and the integration suite so both
//! exercise the same startup path (connect, migrate, bind).

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::config::BlogConfig;
use crate::db::{PostStore, RepositoryError};
use crate::routes;
use crate::state::AppState;

/// Errors starting or stopping the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The post store could not be opened or migrated.
    #[error("store error: {0}")]
    Repository(#[from] RepositoryError),

    /// The listening socket could not be bound.
    #[error("failed to bind: {0}")]
    Bind(#[source] std::io::Error),

    /// The server loop exited with an I/O error.
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),

    /// The server task panicked or was cancelled.
    #[error("server task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// A server accepting connections on a background task.
///
/// Dropping the handle also triggers graceful shutdown, but only
/// [`RunningServer::close`] waits for it to finish.
#[derive(Debug)]
pub struct RunningServer {
    local_addr: SocketAddr,
    store: PostStore,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<std::io::Result<()>>,
}

/// Connect the store, run migrations, bind, and start serving.
///
/// # Errors
///
/// Returns `ServerError::Repository` if the store is unreachable or a
/// migration fails, and `ServerError::Bind` if the address is taken.
pub async fn run_server(config: &BlogConfig) -> Result<RunningServer, ServerError> {
    let store = PostStore::connect(&config.database_url).await?;
    store.migrate().await?;

    let listener = TcpListener::bind(config.socket_addr())
        .await
        .map_err(ServerError::Bind)?;
    let local_addr = listener.local_addr().map_err(ServerError::Bind)?;

    let app = routes::app(AppState::new(store.clone()));
    let (shutdown, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                // Either an explicit close or the sender being dropped
                let _ = shutdown_rx.await;
            })
            .await
    });

    tracing::info!(addr = %local_addr, backend = store.backend(), "blog api listening");

    Ok(RunningServer {
        local_addr,
        store,
        shutdown,
        task,
    })
}

impl RunningServer {
    /// The bound address (useful when the configured port was 0).
    #[must_use]
    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// `http://<addr>` for building request URLs.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.local_addr)
    }

    /// The store the server is bound to.
    #[must_use]
    pub const fn store(&self) -> &PostStore {
        &self.store
    }

    /// Stop accepting connections and wait for in-flight requests.
    ///
    /// # Errors
    ///
    /// Returns `ServerError::Serve` if the server loop failed, or
    /// `ServerError::Join` if its task panicked.
    pub async fn close(self) -> Result<(), ServerError> {
        // The receiver is gone only if the task already exited
        let _ = self.shutdown.send(());
        self.task.await?.map_err(ServerError::Serve)?;

        tracing::info!(addr = %self.local_addr, "blog api stopped");
        Ok(())
    }
}
