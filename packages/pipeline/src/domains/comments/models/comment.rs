use anyhow::Result;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlx::{PgConnection, PgPool};

use crate::common::CommentId;

/// A comment object as returned by the comments API.
///
/// Only `body` matters downstream. `id` is kept as whatever JSON the API
/// sent, and a `body` that is not a string decodes as `None`, so one odd
/// record never fails the whole listing. Other fields (`postId`, `name`,
/// `email`) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentRecord {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default, deserialize_with = "text_or_none")]
    pub body: Option<String>,
}

fn text_or_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Ok(Some(text)),
        _ => Ok(None),
    }
}

impl CommentRecord {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            id: None,
            body: Some(body.into()),
        }
    }

    /// Body text, if present and non-empty.
    pub fn text(&self) -> Option<&str> {
        self.body.as_deref().filter(|body| !body.is_empty())
    }
}

/// Row in `fashion_comments`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct StagedComment {
    pub id: CommentId,
    pub comment: Option<String>,
}

// =============================================================================
// Queries
// =============================================================================

impl StagedComment {
    /// Insert one comment and return the store-generated id.
    ///
    /// Takes a connection rather than the pool so callers can batch inserts
    /// inside a single transaction.
    pub async fn insert(comment: &str, conn: &mut PgConnection) -> Result<CommentId> {
        sqlx::query_scalar::<_, CommentId>(
            "INSERT INTO fashion_comments (comment) VALUES ($1) RETURNING id",
        )
        .bind(comment)
        .fetch_one(conn)
        .await
        .map_err(Into::into)
    }

    /// Find all staged comments in insertion order
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, StagedComment>("SELECT id, comment FROM fashion_comments ORDER BY id")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_id(id: CommentId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, StagedComment>("SELECT id, comment FROM fashion_comments WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn count(pool: &PgPool) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM fashion_comments")
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }
}
