//! Blog Core - Shared domain types for the blog posts API.
//!
//! This crate provides the types used across all blog components:
//! - `api` - The HTTP server exposing the `/posts` resource
//! - `cli` - Command-line tools for migrations and seeding
//! - `integration-tests` - The end-to-end suite run against a live server
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no database
//! access, no HTTP clients. Validation lives in the constructors so a post
//! can only be built with a non-empty title, content, and author.
//!
//! # Modules
//!
//! - [`types`] - Post identifiers, authors, and post documents
//! - [`fixtures`] - Random but valid post data (feature `fixtures`)

#![cfg_attr(not(test), forbid(unsafe_code))]

#[cfg(feature = "fixtures")]
pub mod fixtures;
pub mod types;

pub use types::*;
