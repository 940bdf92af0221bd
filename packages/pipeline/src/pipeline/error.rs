//! Stage failures.

use thiserror::Error;

use super::Stage;

/// A stage failed. The wrapped error carries the collaborator's context chain.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Network/HTTP failure while fetching comments
    #[error("fetch failed: {0:#}")]
    Fetch(anyhow::Error),

    /// Connection, query or commit failure while staging comments
    #[error("persistence failed: {0:#}")]
    Persistence(anyhow::Error),

    /// Classifier or database failure while labelling comments
    #[error("analysis failed: {0:#}")]
    Analysis(anyhow::Error),
}

impl PipelineError {
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Fetch(_) => Stage::Fetch,
            PipelineError::Persistence(_) => Stage::Persist,
            PipelineError::Analysis(_) => Stage::Analyze,
        }
    }
}
