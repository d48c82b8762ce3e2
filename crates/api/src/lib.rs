//! Blog API library.
//!
//! This crate provides the blog posts HTTP server as a library, so the
//! binary, the CLI, and the integration suite share one implementation.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::BlogConfig;
pub use db::{PostStore, RepositoryError};
pub use server::{RunningServer, ServerError, run_server};
