//! Post author type.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::post::PostError;

/// The author of a post.
///
/// Stored as a `{ firstName, lastName }` document. Both parts must be
/// non-empty; deserialization enforces the same rule as [`Author::new`].
///
/// ## Examples
///
/// ```
/// use blog_core::Author;
///
/// let author = Author::new("Izzy", "West").unwrap();
/// assert_eq!(author.full_name(), "Izzy West");
///
/// assert!(Author::new("", "West").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "AuthorFields")]
pub struct Author {
    first_name: String,
    last_name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthorFields {
    first_name: String,
    last_name: String,
}

impl TryFrom<AuthorFields> for Author {
    type Error = PostError;

    fn try_from(fields: AuthorFields) -> Result<Self, Self::Error> {
        Self::new(fields.first_name, fields.last_name)
    }
}

impl Author {
    /// Create an author from first and last name.
    ///
    /// # Errors
    ///
    /// Returns `PostError::EmptyField` if either name is empty or whitespace.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<Self, PostError> {
        let first_name = first_name.into();
        let last_name = last_name.into();

        if first_name.trim().is_empty() {
            return Err(PostError::EmptyField("author.firstName"));
        }
        if last_name.trim().is_empty() {
            return Err(PostError::EmptyField("author.lastName"));
        }

        Ok(Self {
            first_name,
            last_name,
        })
    }

    /// The author's first name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// The author's last name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// First and last name joined by a single space.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_single_space() {
        let author = Author::new("Katie", "West").unwrap();
        assert_eq!(author.full_name(), "Katie West");
        assert_eq!(author.to_string(), "Katie West");
    }

    #[test]
    fn test_rejects_blank_names() {
        assert!(matches!(
            Author::new("  ", "West"),
            Err(PostError::EmptyField("author.firstName"))
        ));
        assert!(matches!(
            Author::new("Katie", ""),
            Err(PostError::EmptyField("author.lastName"))
        ));
    }

    #[test]
    fn test_deserialize_camel_case() {
        let author: Author =
            serde_json::from_str(r#"{"firstName":"Izzy","lastName":"West"}"#).unwrap();
        assert_eq!(author.first_name(), "Izzy");
        assert_eq!(author.last_name(), "West");
    }

    #[test]
    fn test_deserialize_validates() {
        let result = serde_json::from_str::<Author>(r#"{"firstName":"","lastName":"West"}"#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("author.firstName"), "got: {err}");
    }

    #[test]
    fn test_serialize_camel_case() {
        let author = Author::new("Izzy", "West").unwrap();
        let value = serde_json::to_value(&author).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"firstName": "Izzy", "lastName": "West"})
        );
    }
}
