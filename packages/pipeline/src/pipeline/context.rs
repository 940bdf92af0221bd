//! Per-run context handed to every stage.

use tracing::Span;
use uuid::Uuid;

use crate::config::DEFAULT_FETCH_LIMIT;
use crate::kernel::PipelineDeps;

/// Name of the pipeline in logs.
pub const DAG_ID: &str = "fashion_pipeline";

/// Everything a stage needs for one run. Built once by the caller and passed
/// by reference to each stage.
#[derive(Clone)]
pub struct RunContext {
    pub run_id: Uuid,
    pub deps: PipelineDeps,
    /// Maximum number of fetched records handed to the persist stage
    pub fetch_limit: usize,
}

impl RunContext {
    pub fn new(deps: PipelineDeps) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            deps,
            fetch_limit: DEFAULT_FETCH_LIMIT,
        }
    }

    pub fn with_fetch_limit(mut self, fetch_limit: usize) -> Self {
        self.fetch_limit = fetch_limit;
        self
    }

    /// Span every log line of this run is recorded under.
    pub fn span(&self) -> Span {
        tracing::info_span!("pipeline_run", dag_id = DAG_ID, run_id = %self.run_id)
    }
}
