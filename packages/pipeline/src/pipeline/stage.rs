use std::fmt;

/// The three steps of a run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Fetch,
    Persist,
    Analyze,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Fetch, Stage::Persist, Stage::Analyze];

    /// Task name used in logs
    pub fn task_id(&self) -> &'static str {
        match self {
            Stage::Fetch => "fetch_comments",
            Stage::Persist => "save_comments",
            Stage::Analyze => "analyze_sentiment",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.task_id())
    }
}

/// Successful result of a stage. Failure is the `Err` side of the stage's
/// `Result`.
#[derive(Debug, Clone, PartialEq)]
pub enum StageOutcome<T> {
    /// The stage produced data for the next stage
    Completed(T),
    /// Nothing to do; downstream stages no-op
    Empty,
}

impl<T> StageOutcome<T> {
    pub fn is_empty(&self) -> bool {
        matches!(self, StageOutcome::Empty)
    }

    pub fn completed(self) -> Option<T> {
        match self {
            StageOutcome::Completed(data) => Some(data),
            StageOutcome::Empty => None,
        }
    }
}

impl<T> StageOutcome<Vec<T>> {
    /// Completed data, treating an empty list the same as `Empty`.
    pub fn non_empty(&self) -> Option<&[T]> {
        match self {
            StageOutcome::Completed(items) if !items.is_empty() => Some(items),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            StageOutcome::Completed(items) => items.len(),
            StageOutcome::Empty => 0,
        }
    }
}
