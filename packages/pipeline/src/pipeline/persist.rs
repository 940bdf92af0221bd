//! Stage 2: stage comment bodies in `fashion_comments`.

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::{error, info, warn};

use super::{preview, PipelineError, RunContext, StageOutcome};
use crate::common::CommentId;
use crate::domains::comments::{CommentRecord, StagedComment};

/// Insert every record that has text and return the generated ids in
/// insertion order.
///
/// Records without a body are skipped without a placeholder id, so the
/// returned list can be shorter than the input.
pub async fn save_comments(
    ctx: &RunContext,
    fetched: &StageOutcome<Vec<CommentRecord>>,
) -> Result<StageOutcome<Vec<CommentId>>, PipelineError> {
    let Some(comments) = fetched.non_empty() else {
        warn!("No comments data to save");
        return Ok(StageOutcome::Empty);
    };

    info!(count = comments.len(), "Processing comment records");

    let ids = insert_comments(&ctx.deps.db_pool, comments)
        .await
        .map_err(|e| {
            error!(error = ?e, "Error saving comments to database");
            PipelineError::Persistence(e)
        })?;

    Ok(StageOutcome::Completed(ids))
}

async fn insert_comments(pool: &PgPool, comments: &[CommentRecord]) -> Result<Vec<CommentId>> {
    // Dropping the transaction on any early return rolls back every insert.
    let mut tx = pool
        .begin()
        .await
        .context("Failed to open transaction on fashion_comments")?;

    let mut ids = Vec::with_capacity(comments.len());
    for record in comments {
        match record.text() {
            Some(text) => {
                info!(comment = %preview(text), "Inserting comment");
                let id = StagedComment::insert(text, &mut *tx)
                    .await
                    .context("Failed to insert comment")?;
                ids.push(id);
            }
            None => warn!(record = ?record, "Skipping record with missing comment"),
        }
    }

    tx.commit().await.context("Failed to commit comments")?;
    info!(count = ids.len(), "Database changes committed");

    Ok(ids)
}
