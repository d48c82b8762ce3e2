//! Core types for blog posts.
//!
//! This module provides type-safe wrappers for the post document and its parts.

pub mod author;
pub mod id;
pub mod post;

pub use author::Author;
pub use id::{PostId, PostIdError};
pub use post::{NewPost, Post, PostError, PostUpdate};
