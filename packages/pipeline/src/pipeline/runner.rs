//! Runs the three stages in order, retrying a failing stage.
//!
//! # Architecture
//!
//! ```text
//! PipelineRunner::run
//!     │
//!     ├─► fetch_comments      (retry up to max_retries)
//!     ├─► save_comments       (retry up to max_retries)
//!     └─► analyze_sentiment   (retry up to max_retries)
//! ```
//!
//! Only the failing stage is retried. Once a stage has used up its retries
//! its error is returned and later stages never run.
//!
//! # Example
//!
//! ```ignore
//! let runner = PipelineRunner::new(RunnerConfig::default());
//! let report = runner.run(&RunContext::new(deps)).await?;
//! ```

use std::future::Future;
use std::time::Duration;

use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use super::{
    analyze_sentiment, fetch_comments, save_comments, PipelineError, RunContext, Stage,
    StageOutcome,
};
use crate::common::CommentId;
use crate::config::Config;
use crate::domains::comments::CommentRecord;
use crate::domains::sentiment::SentimentResult;

/// Configuration for the pipeline runner.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Extra attempts per stage after the first failure
    pub max_retries: u32,
    /// Wait between attempts of the same stage
    pub retry_delay: Duration,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            max_retries: 1,
            retry_delay: Duration::from_secs(300),
        }
    }
}

impl RunnerConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_retries: config.stage_max_retries,
            retry_delay: config.stage_retry_delay,
        }
    }

    /// Retry without waiting (tests).
    pub fn immediate(max_retries: u32) -> Self {
        Self {
            max_retries,
            retry_delay: Duration::ZERO,
        }
    }
}

/// What each stage produced during a run.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub run_id: Uuid,
    pub comments: StageOutcome<Vec<CommentRecord>>,
    pub comment_ids: StageOutcome<Vec<CommentId>>,
    pub results: StageOutcome<Vec<SentimentResult>>,
}

impl PipelineReport {
    pub fn fetched(&self) -> usize {
        self.comments.len()
    }

    pub fn persisted(&self) -> usize {
        self.comment_ids.len()
    }

    pub fn analyzed(&self) -> usize {
        self.results.len()
    }
}

pub struct PipelineRunner {
    config: RunnerConfig,
}

impl PipelineRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// Run fetch, persist and analyze once, in order.
    pub async fn run(&self, ctx: &RunContext) -> Result<PipelineReport, PipelineError> {
        let span = ctx.span();
        async {
            info!(
                max_retries = self.config.max_retries,
                retry_delay_secs = self.config.retry_delay.as_secs(),
                fetch_limit = ctx.fetch_limit,
                "Pipeline run starting"
            );

            let comments = self
                .run_stage(Stage::Fetch, || fetch_comments(ctx))
                .await?;

            let fetched = &comments;
            let comment_ids = self
                .run_stage(Stage::Persist, move || save_comments(ctx, fetched))
                .await?;

            let persisted = &comment_ids;
            let results = self
                .run_stage(Stage::Analyze, move || {
                    analyze_sentiment(ctx, fetched, persisted)
                })
                .await?;

            let report = PipelineReport {
                run_id: ctx.run_id,
                comments,
                comment_ids,
                results,
            };

            info!(
                fetched = report.fetched(),
                persisted = report.persisted(),
                analyzed = report.analyzed(),
                "Pipeline run complete"
            );

            Ok::<_, PipelineError>(report)
        }
        .instrument(span)
        .await
    }

    /// Run one stage, retrying it up to `max_retries` times on failure.
    pub async fn run_stage<T, F, Fut>(
        &self,
        stage: Stage,
        mut attempt_stage: F,
    ) -> Result<StageOutcome<T>, PipelineError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<StageOutcome<T>, PipelineError>>,
    {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            let span = info_span!("stage", stage = stage.task_id(), attempt);

            match attempt_stage().instrument(span).await {
                Ok(outcome) => {
                    if outcome.is_empty() {
                        info!(stage = %stage, attempt, "Stage completed with nothing to do");
                    } else {
                        info!(stage = %stage, attempt, "Stage completed");
                    }
                    return Ok(outcome);
                }
                Err(e) if attempt <= self.config.max_retries => {
                    warn!(
                        stage = %stage,
                        attempt,
                        max_retries = self.config.max_retries,
                        error = %e,
                        "Stage failed, retrying"
                    );
                    if !self.config.retry_delay.is_zero() {
                        tokio::time::sleep(self.config.retry_delay).await;
                    }
                }
                Err(e) => {
                    error!(stage = %stage, attempt, error = %e, "Stage failed, giving up");
                    return Err(e);
                }
            }
        }
    }
}
