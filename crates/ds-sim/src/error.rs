use ds_core::DsError;
use ds_source::SourceError;
use ds_spatial::SelectionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("engine configuration error: {0}")]
    Config(String),

    #[error("no agents spawned: {0}")]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Core(#[from] DsError),

    #[error("a route needs a spawn origin; spawn agents first")]
    NoOrigin,
}

impl SimError {
    /// `true` when the request failed only because nothing could be sampled.
    pub fn is_no_agents(&self) -> bool {
        matches!(
            self,
            SimError::Selection(SelectionError::EmptyCandidateSet)
                | SimError::Selection(SelectionError::NumericDegenerate { .. })
        )
    }
}

pub type SimResult<T> = Result<T, SimError>;
