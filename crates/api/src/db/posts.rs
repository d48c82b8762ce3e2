//! Post repository for `PostgreSQL`.
//!
//! Posts live in `blog.post` with the author kept as a JSONB document.
//! Queries are checked at runtime so the crate builds without a database.

use sqlx::PgPool;
use sqlx::types::Json;

use blog_core::{Author, NewPost, Post, PostId, PostUpdate};

use super::RepositoryError;

const POST_COLUMNS: &str = "id, title, content, author";

#[derive(sqlx::FromRow)]
struct PostRow {
    id: PostId,
    title: String,
    content: String,
    author: Json<serde_json::Value>,
}

impl TryFrom<PostRow> for Post {
    type Error = RepositoryError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        let author: Author = serde_json::from_value(row.author.0).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid author in post {}: {e}", row.id))
        })?;

        Ok(Self {
            id: row.id,
            title: row.title,
            content: row.content,
            author,
        })
    }
}

/// Repository for post database operations.
#[derive(Debug, Clone)]
pub struct PostRepository {
    pool: PgPool,
}

impl PostRepository {
    /// Create a new post repository.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run the embedded migrations.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Migration` if a migration fails.
    pub async fn migrate(&self) -> Result<(), RepositoryError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Insert a batch of posts in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any insert fails; nothing is
    /// stored in that case.
    pub async fn insert_many(&self, posts: Vec<NewPost>) -> Result<Vec<Post>, RepositoryError> {
        let sql = format!(
            "INSERT INTO blog.post (id, title, content, author) VALUES ($1, $2, $3, $4) \
             RETURNING {POST_COLUMNS}"
        );

        let mut tx = self.pool.begin().await?;
        let mut stored = Vec::with_capacity(posts.len());

        for post in posts {
            let row = sqlx::query_as::<_, PostRow>(&sql)
                .bind(PostId::generate())
                .bind(post.title())
                .bind(post.content())
                .bind(Json(post.author()))
                .fetch_one(&mut *tx)
                .await?;
            stored.push(Post::try_from(row)?);
        }

        tx.commit().await?;
        Ok(stored)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored author is invalid.
    pub async fn list(&self) -> Result<Vec<Post>, RepositoryError> {
        let sql = format!("SELECT {POST_COLUMNS} FROM blog.post ORDER BY seq");
        sqlx::query_as::<_, PostRow>(&sql)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Post::try_from)
            .collect()
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_one(&self) -> Result<Option<Post>, RepositoryError> {
        let sql = format!("SELECT {POST_COLUMNS} FROM blog.post ORDER BY seq LIMIT 1");
        sqlx::query_as::<_, PostRow>(&sql)
            .fetch_optional(&self.pool)
            .await?
            .map(Post::try_from)
            .transpose()
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, RepositoryError> {
        let sql = format!("SELECT {POST_COLUMNS} FROM blog.post WHERE id = $1");
        sqlx::query_as::<_, PostRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Post::try_from)
            .transpose()
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<usize, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM blog.post")
            .fetch_one(&self.pool)
            .await?;

        usize::try_from(count)
            .map_err(|_| RepositoryError::DataCorruption(format!("negative post count: {count}")))
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no post has this id.
    pub async fn update(&self, id: PostId, update: &PostUpdate) -> Result<Post, RepositoryError> {
        let sql = format!(
            "UPDATE blog.post SET \
                 title = COALESCE($2, title), \
                 content = COALESCE($3, content), \
                 author = COALESCE($4, author) \
             WHERE id = $1 \
             RETURNING {POST_COLUMNS}"
        );

        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(id)
            .bind(update.title())
            .bind(update.content())
            .bind(update.author().map(Json))
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        Post::try_from(row)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no post has this id.
    pub async fn delete(&self, id: PostId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM blog.post WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn drop_all(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM blog.post")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
