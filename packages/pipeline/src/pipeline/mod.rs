//! The fetch → persist → analyze chain.
//!
//! Each stage is a plain async function taking the run context and the typed
//! outcome of the stage before it:
//!
//! ```text
//! fetch_comments ──► StageOutcome<Vec<CommentRecord>>
//!                        │
//! save_comments  ◄───────┘ ──► StageOutcome<Vec<CommentId>>
//!                                   │
//! analyze_sentiment ◄───────────────┘ ──► StageOutcome<Vec<SentimentResult>>
//! ```
//!
//! `StageOutcome::Empty` flows through the rest of the chain as a no-op.
//! Failures are `Err(PipelineError)`; `PipelineRunner` retries the failing
//! stage and stops the chain if it keeps failing.

pub mod analyze;
pub mod context;
pub mod error;
pub mod fetch;
pub mod persist;
pub mod runner;
pub mod stage;

pub use analyze::analyze_sentiment;
pub use context::{RunContext, DAG_ID};
pub use error::PipelineError;
pub use fetch::fetch_comments;
pub use persist::save_comments;
pub use runner::{PipelineReport, PipelineRunner, RunnerConfig};
pub use stage::{Stage, StageOutcome};

/// Longest prefix of a comment that goes into log lines.
const LOG_PREVIEW_CHARS: usize = 50;

pub(crate) fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(LOG_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
