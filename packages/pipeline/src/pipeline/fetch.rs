//! Stage 1: pull the comment listing and keep the first `fetch_limit` records.

use tracing::{error, info, warn};

use super::{PipelineError, RunContext, StageOutcome};
use crate::domains::comments::CommentRecord;

pub async fn fetch_comments(
    ctx: &RunContext,
) -> Result<StageOutcome<Vec<CommentRecord>>, PipelineError> {
    info!("Fetching comments from external API");

    let mut comments = ctx
        .deps
        .comment_source
        .fetch_comments()
        .await
        .map_err(|e| {
            error!(error = ?e, "Error fetching comments from API");
            PipelineError::Fetch(e)
        })?;

    info!(count = comments.len(), "Fetched comments from API");

    comments.truncate(ctx.fetch_limit);

    if comments.is_empty() {
        warn!("No comments fetched from API");
        return Ok(StageOutcome::Empty);
    }

    info!(count = comments.len(), "Handing comments to persist stage");
    Ok(StageOutcome::Completed(comments))
}
