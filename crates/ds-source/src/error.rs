use thiserror::Error;

/// A candidate or route request that produced nothing usable.
///
/// Callers keep their previous state.  Bodies that are not JSON, or not of
/// the expected shape, carry the parser error as their source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("invalid upstream response: {reason}")]
    InvalidUpstreamResponse {
        reason: String,
        #[source]
        source: Option<serde_json::Error>,
    },
}

impl SourceError {
    /// An unusable response with no underlying parse error.
    pub fn invalid(reason: impl Into<String>) -> Self {
        SourceError::InvalidUpstreamResponse { reason: reason.into(), source: None }
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(e: serde_json::Error) -> Self {
        SourceError::InvalidUpstreamResponse {
            reason: "malformed body".into(),
            source: Some(e),
        }
    }
}

pub type SourceResult<T> = Result<T, SourceError>;
