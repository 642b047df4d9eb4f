use crate::dataset::SubjectId;
use thiserror::Error;

pub type Result<T, E = DashboardError> = std::result::Result<T, E>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DashboardError {
    /// The dataset could not be retrieved or decoded
    #[error("failed to load dataset: {0}")]
    FetchFailure(String),

    /// Parallel sequences in the dataset disagree on length
    #[error("malformed dataset: {0}")]
    MalformedDataset(String),

    #[error("unknown subject: {0}")]
    UnknownSubject(SubjectId),

    #[error("invalid transition from {from} with event {event}")]
    InvalidTransition {
        from: &'static str,
        event: &'static str,
    },
}

impl From<serde_json::Error> for DashboardError {
    fn from(error: serde_json::Error) -> Self {
        Self::FetchFailure(format!("invalid dataset JSON: {error}"))
    }
}
