//! Post documents and the validated inputs that create or change them.

use serde::{Deserialize, Serialize};

use super::author::Author;
use super::id::PostId;

/// Errors raised when building post inputs.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PostError {
    /// A required text field is empty or whitespace.
    #[error("`{0}` cannot be empty")]
    EmptyField(&'static str),
    /// An update carries no fields.
    #[error("update must set at least one of `title`, `content`, `author`")]
    NoChanges,
}

/// A stored blog post.
///
/// This is the document shape owned by the persistence layer. The HTTP
/// representation flattens `author` to a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub author: Author,
}

impl Post {
    /// Build a stored post from its id and validated fields.
    #[must_use]
    pub fn from_new(id: PostId, new: NewPost) -> Self {
        Self {
            id,
            title: new.title,
            content: new.content,
            author: new.author,
        }
    }

    /// Overwrite the fields present in `update`.
    pub fn apply(&mut self, update: &PostUpdate) {
        if let Some(title) = &update.title {
            title.clone_into(&mut self.title);
        }
        if let Some(content) = &update.content {
            content.clone_into(&mut self.content);
        }
        if let Some(author) = &update.author {
            self.author = author.clone();
        }
    }
}

/// A post that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    title: String,
    content: String,
    author: Author,
}

impl NewPost {
    /// Create a new post.
    ///
    /// # Errors
    ///
    /// Returns `PostError::EmptyField` if the title or content is empty.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        author: Author,
    ) -> Result<Self, PostError> {
        let title = non_empty(title.into(), "title")?;
        let content = non_empty(content.into(), "content")?;
        Ok(Self {
            title,
            content,
            author,
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub const fn author(&self) -> &Author {
        &self.author
    }
}

/// A partial change to a stored post.
///
/// Absent fields are left untouched when applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostUpdate {
    title: Option<String>,
    content: Option<String>,
    author: Option<Author>,
}

impl PostUpdate {
    /// Create an update from the fields to overwrite.
    ///
    /// # Errors
    ///
    /// Returns `PostError::NoChanges` if every field is `None` and
    /// `PostError::EmptyField` if a present text field is empty.
    pub fn new(
        title: Option<String>,
        content: Option<String>,
        author: Option<Author>,
    ) -> Result<Self, PostError> {
        if title.is_none() && content.is_none() && author.is_none() {
            return Err(PostError::NoChanges);
        }

        Ok(Self {
            title: title.map(|t| non_empty(t, "title")).transpose()?,
            content: content.map(|c| non_empty(c, "content")).transpose()?,
            author,
        })
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    #[must_use]
    pub const fn author(&self) -> Option<&Author> {
        self.author.as_ref()
    }
}

fn non_empty(value: String, field: &'static str) -> Result<String, PostError> {
    if value.trim().is_empty() {
        Err(PostError::EmptyField(field))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn author() -> Author {
        Author::new("Izzy", "West").unwrap()
    }

    #[test]
    fn test_new_post_rejects_empty_title() {
        let err = NewPost::new("", "body", author()).unwrap_err();
        assert_eq!(err, PostError::EmptyField("title"));
        assert_eq!(err.to_string(), "`title` cannot be empty");
    }

    #[test]
    fn test_new_post_rejects_blank_content() {
        let err = NewPost::new("title", " \n", author()).unwrap_err();
        assert_eq!(err, PostError::EmptyField("content"));
    }

    #[test]
    fn test_from_new_keeps_fields() {
        let new = NewPost::new("new blog post test", "hello world", author()).unwrap();
        let id = PostId::generate();
        let post = Post::from_new(id, new);
        assert_eq!(post.id, id);
        assert_eq!(post.title, "new blog post test");
        assert_eq!(post.content, "hello world");
        assert_eq!(post.author.full_name(), "Izzy West");
    }

    #[test]
    fn test_update_requires_a_field() {
        assert_eq!(
            PostUpdate::new(None, None, None).unwrap_err(),
            PostError::NoChanges
        );
    }

    #[test]
    fn test_update_rejects_empty_title() {
        let err = PostUpdate::new(Some(String::new()), None, None).unwrap_err();
        assert_eq!(err, PostError::EmptyField("title"));
    }

    #[test]
    fn test_apply_leaves_absent_fields() {
        let new = NewPost::new("Original", "Keep me", author()).unwrap();
        let mut post = Post::from_new(PostId::generate(), new);

        let update = PostUpdate::new(
            Some("Updated title".to_string()),
            None,
            Some(Author::new("Katie", "West").unwrap()),
        )
        .unwrap();
        post.apply(&update);

        assert_eq!(post.title, "Updated title");
        assert_eq!(post.content, "Keep me");
        assert_eq!(post.author.first_name(), "Katie");
        assert_eq!(post.author.last_name(), "West");
    }

    #[test]
    fn test_post_document_shape() {
        let new = NewPost::new("t", "c", author()).unwrap();
        let post = Post::from_new(PostId::generate(), new);
        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["author"]["firstName"], "Izzy");
        assert_eq!(value["author"]["lastName"], "West");
        assert!(value["id"].is_string());
    }
}
