//! In-memory document collection.

use std::sync::Arc;

use tokio::sync::RwLock;

use blog_core::{NewPost, Post, PostId, PostUpdate};

use super::RepositoryError;

/// A process-local post collection kept in insertion order.
///
/// Clones share the same collection. Separately created collections never
/// share posts, whatever their names.
#[derive(Debug, Clone)]
pub struct MemoryCollection {
    name: Arc<str>,
    posts: Arc<RwLock<Vec<Post>>>,
}

impl MemoryCollection {
    /// Create an empty collection labelled `name`.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: Arc::from(name),
            posts: Arc::default(),
        }
    }

    /// Label taken from the `memory://<name>` URL.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn insert_many(&self, posts: Vec<NewPost>) -> Vec<Post> {
        let stored: Vec<Post> = posts
            .into_iter()
            .map(|new| Post::from_new(PostId::generate(), new))
            .collect();

        self.posts.write().await.extend(stored.iter().cloned());
        stored
    }

    pub async fn list(&self) -> Vec<Post> {
        self.posts.read().await.clone()
    }

    pub async fn find_one(&self) -> Option<Post> {
        self.posts.read().await.first().cloned()
    }

    pub async fn find_by_id(&self, id: PostId) -> Option<Post> {
        self.posts.read().await.iter().find(|p| p.id == id).cloned()
    }

    pub async fn count(&self) -> usize {
        self.posts.read().await.len()
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no post has this id.
    pub async fn update(&self, id: PostId, update: &PostUpdate) -> Result<Post, RepositoryError> {
        let mut posts = self.posts.write().await;
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepositoryError::NotFound)?;

        post.apply(update);
        Ok(post.clone())
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no post has this id.
    pub async fn delete(&self, id: PostId) -> Result<(), RepositoryError> {
        let mut posts = self.posts.write().await;
        let index = posts
            .iter()
            .position(|p| p.id == id)
            .ok_or(RepositoryError::NotFound)?;

        posts.remove(index);
        Ok(())
    }

    pub async fn drop_all(&self) -> u64 {
        let mut posts = self.posts.write().await;
        let removed = posts.len() as u64;
        posts.clear();
        removed
    }
}
