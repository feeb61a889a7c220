use thiserror::Error;

/// Errors that abort a search for the next match
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Search exceeded its step budget ({steps} steps, limit {limit})")]
    StepBudgetExceeded { steps: usize, limit: usize },
}
