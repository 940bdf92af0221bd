// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Stage logic lives in `pipeline::*` and talks to collaborators through these traits.
//
// Naming convention: Base* for trait names (e.g., BaseCommentSource)

use anyhow::Result;
use async_trait::async_trait;

use crate::domains::comments::CommentRecord;

// =============================================================================
// Comment Source Trait (Infrastructure - upstream comments API)
// =============================================================================

#[async_trait]
pub trait BaseCommentSource: Send + Sync {
    /// Fetch the full comment listing. Truncation is the caller's job.
    async fn fetch_comments(&self) -> Result<Vec<CommentRecord>>;
}

// =============================================================================
// Sentiment Classifier Trait (Infrastructure - pretrained model)
// =============================================================================

/// Raw classifier output before label normalisation.
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentPrediction {
    /// Label as the model reports it (e.g. `POSITIVE`)
    pub label: String,
    /// Confidence in [0, 1]
    pub score: f32,
}

#[async_trait]
pub trait BaseSentimentClassifier: Send + Sync {
    /// Classify a single piece of text
    async fn classify(&self, text: &str) -> Result<SentimentPrediction>;
}
