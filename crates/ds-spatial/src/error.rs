//! Selection-pipeline error type.

use thiserror::Error;

/// Errors produced while turning candidates into a sample.
///
/// Both variants mean "no agents can be spawned from this request"; callers
/// treat them identically.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SelectionError {
    #[error("no eligible candidate points")]
    EmptyCandidateSet,

    #[error("candidate weights sum to {total}; nothing can be selected")]
    NumericDegenerate { total: f64 },
}

pub type SelectionResult<T> = Result<T, SelectionError>;
