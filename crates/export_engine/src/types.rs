use std::fmt;

use export_core::{DownloadedFile, PreviewRow, RequestId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Preview,
    Download,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Preview => "preview_csv",
            Endpoint::Download => "download_csv",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    PreviewCompleted {
        request_id: RequestId,
        result: Result<Vec<PreviewRow>, FetchError>,
    },
    DownloadCompleted {
        request_id: RequestId,
        result: Result<DownloadedFile, FetchError>,
    },
    TimerElapsed {
        request_id: RequestId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for FetchError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Network,
    MalformedBody,
    /// The service answered with an `error` field instead of data.
    ServiceReported(String),
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::MalformedBody => write!(f, "malformed response body"),
            FailureKind::ServiceReported(message) => write!(f, "service error {message:?}"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build http client: {0}")]
    Client(#[from] FetchError),
}
