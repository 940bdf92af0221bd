//! Stage 3: classify staged comments and store the labels.

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::{error, info, warn};

use super::{preview, PipelineError, RunContext, StageOutcome};
use crate::common::CommentId;
use crate::domains::comments::CommentRecord;
use crate::domains::sentiment::{Sentiment, SentimentResult};
use crate::kernel::BaseSentimentClassifier;

/// Pair records with ids by position, classify each one with text and insert
/// all results in a single transaction.
///
/// Pairing is positional: if the persist stage skipped a blank record the
/// ids after it shift onto the wrong records, and the tail of the record list
/// goes unpaired.
pub async fn analyze_sentiment(
    ctx: &RunContext,
    fetched: &StageOutcome<Vec<CommentRecord>>,
    persisted: &StageOutcome<Vec<CommentId>>,
) -> Result<StageOutcome<Vec<SentimentResult>>, PipelineError> {
    let (Some(comments), Some(comment_ids)) = (fetched.non_empty(), persisted.non_empty()) else {
        warn!("No comments data or IDs to analyze");
        return Ok(StageOutcome::Empty);
    };

    if comments.len() != comment_ids.len() {
        warn!(
            comments = comments.len(),
            comment_ids = comment_ids.len(),
            "Comment and id counts differ; pairing by position"
        );
    }

    let run = async {
        let results = classify_all(ctx.deps.classifier.as_ref(), comments, comment_ids).await?;
        insert_results(&ctx.deps.db_pool, &results).await?;
        Ok::<_, anyhow::Error>(results)
    };

    let results = run.await.map_err(|e| {
        error!(error = ?e, "Error in sentiment analysis");
        PipelineError::Analysis(e)
    })?;

    Ok(StageOutcome::Completed(results))
}

async fn classify_all(
    classifier: &dyn BaseSentimentClassifier,
    comments: &[CommentRecord],
    comment_ids: &[CommentId],
) -> Result<Vec<SentimentResult>> {
    info!(count = comments.len(), "Analyzing sentiment for comments");

    let mut results = Vec::with_capacity(comment_ids.len());
    for (comment, &comment_id) in comments.iter().zip(comment_ids) {
        let Some(text) = comment.text() else {
            warn!(record = ?comment, "Skipping comment with missing text");
            continue;
        };

        info!(comment = %preview(text), "Analyzing comment");
        let prediction = classifier
            .classify(text)
            .await
            .with_context(|| format!("Classifier failed for comment {}", comment_id))?;
        let sentiment: Sentiment = prediction.label.parse()?;

        info!(%comment_id, %sentiment, score = prediction.score, "Sentiment");
        results.push(SentimentResult::new(comment_id, sentiment));
    }

    Ok(results)
}

async fn insert_results(pool: &PgPool, results: &[SentimentResult]) -> Result<()> {
    info!(count = results.len(), "Saving sentiment results to database");

    let mut tx = pool
        .begin()
        .await
        .context("Failed to open transaction on sentiment_analysis")?;

    for result in results {
        result
            .insert(&mut *tx)
            .await
            .with_context(|| format!("Failed to insert sentiment for comment {}", result.comment_id))?;
    }

    tx.commit().await.context("Failed to commit sentiment results")?;
    info!("Sentiment analysis results committed");

    Ok(())
}
