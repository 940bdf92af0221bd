use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgPool};

use crate::common::CommentId;

/// Normalised classifier label, stored lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Negative,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Sentiment {
    type Err = anyhow::Error;

    /// Accepts the classifier's `POSITIVE`/`NEGATIVE` in any case.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Ok(Sentiment::Positive),
            "negative" => Ok(Sentiment::Negative),
            _ => Err(anyhow::anyhow!("Invalid sentiment label: {}", s)),
        }
    }
}

/// Row in `sentiment_analysis`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub comment_id: CommentId,
    pub sentiment: Sentiment,
}

#[derive(sqlx::FromRow)]
struct SentimentRow {
    comment_id: CommentId,
    sentiment: String,
}

impl TryFrom<SentimentRow> for SentimentResult {
    type Error = anyhow::Error;

    fn try_from(row: SentimentRow) -> Result<Self> {
        Ok(Self {
            comment_id: row.comment_id,
            sentiment: row.sentiment.parse()?,
        })
    }
}

// =============================================================================
// Queries
// =============================================================================

impl SentimentResult {
    pub fn new(comment_id: CommentId, sentiment: Sentiment) -> Self {
        Self {
            comment_id,
            sentiment,
        }
    }

    pub async fn insert(&self, conn: &mut PgConnection) -> Result<()> {
        sqlx::query("INSERT INTO sentiment_analysis (comment_id, sentiment) VALUES ($1, $2)")
            .bind(self.comment_id)
            .bind(self.sentiment.as_str())
            .execute(conn)
            .await?;
        Ok(())
    }

    /// All results, ordered by comment id (duplicates included)
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        let rows = sqlx::query_as::<_, SentimentRow>(
            "SELECT comment_id, sentiment FROM sentiment_analysis ORDER BY comment_id",
        )
        .fetch_all(pool)
        .await?;

        rows.into_iter().map(SentimentResult::try_from).collect()
    }

    pub async fn count(pool: &PgPool) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM sentiment_analysis")
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }
}
