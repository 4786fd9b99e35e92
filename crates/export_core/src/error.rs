use thiserror::Error;

use crate::ValidationError;

/// Failures the controller recovers from. Display text is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Failed to fetch preview data")]
    PreviewFetchFailed,
    /// Message from the service's `error` field, shown verbatim.
    #[error("{0}")]
    ServiceReported(String),
    #[error("Something went wrong while downloading the file.")]
    DownloadFailed,
}
