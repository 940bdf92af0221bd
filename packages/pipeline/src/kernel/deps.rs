//! Pipeline dependencies for stages (using traits for testability)
//!
//! Every external collaborator is held behind a trait object so tests can
//! swap in mocks from `test_dependencies`.

use anyhow::Result;
use sqlx::PgPool;
use std::sync::Arc;

use crate::config::Config;
use crate::kernel::{
    BaseCommentSource, BaseSentimentClassifier, CommentsApiClient, HuggingFaceSentimentClassifier,
};

/// Collaborators shared by all stages of a run
#[derive(Clone)]
pub struct PipelineDeps {
    pub db_pool: PgPool,
    pub comment_source: Arc<dyn BaseCommentSource>,
    pub classifier: Arc<dyn BaseSentimentClassifier>,
}

impl PipelineDeps {
    pub fn new(
        db_pool: PgPool,
        comment_source: Arc<dyn BaseCommentSource>,
        classifier: Arc<dyn BaseSentimentClassifier>,
    ) -> Self {
        Self {
            db_pool,
            comment_source,
            classifier,
        }
    }

    /// Wire up the production HTTP collaborators from configuration
    pub fn from_config(config: &Config, db_pool: PgPool) -> Result<Self> {
        let comment_source = match config.http_timeout {
            Some(timeout) => CommentsApiClient::with_timeout(&config.comments_api_url, timeout)?,
            None => CommentsApiClient::new(&config.comments_api_url),
        };

        let mut classifier = HuggingFaceSentimentClassifier::new(&config.sentiment_model)
            .with_base_url(&config.sentiment_api_url);
        if let Some(timeout) = config.http_timeout {
            classifier = classifier.with_timeout(timeout)?;
        }
        if let Some(token) = &config.hf_api_token {
            classifier = classifier.with_token(token);
        }

        Ok(Self::new(
            db_pool,
            Arc::new(comment_source),
            Arc::new(classifier),
        ))
    }
}
