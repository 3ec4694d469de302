use std::time::Duration;

use thiserror::Error;

/// Result alias used throughout the analysis core.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Failures that stop an analysis from running.
///
/// A failed sentiment call for a single sentence is *not* represented here: it is
/// absorbed by the scorer and reported as a degraded outcome on the run instead.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The aspect keyword table or the analysis tunables are invalid.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The sentiment capability could not be loaded, so no run can score anything.
    #[error("sentiment scoring is unavailable: {0}")]
    ScoringUnavailable(String),

    /// The caller-configured input bound was exceeded.
    #[error("input is too long ({len} characters, max {max})")]
    InputTooLong { len: usize, max: usize },

    /// Two reports built from different aspect vocabularies cannot be paired.
    #[error("aspect vocabularies differ: {left:?} vs {right:?}")]
    VocabularyMismatch {
        left: Vec<String>,
        right: Vec<String>,
    },

    /// A paired run did not finish before the caller's deadline.
    #[error("analysis timed out after {0:?}")]
    Timeout(Duration),

    /// A concurrent analysis task panicked or was cancelled.
    #[error("analysis task failed: {0}")]
    TaskFailed(String),
}

impl AnalysisError {
    /// `true` when the failure means the analysis could not run at all, as opposed
    /// to bad input or configuration supplied by the caller.
    pub fn is_capability_failure(&self) -> bool {
        matches!(
            self,
            AnalysisError::ScoringUnavailable(_)
                | AnalysisError::Timeout(_)
                | AnalysisError::TaskFailed(_)
        )
    }
}
