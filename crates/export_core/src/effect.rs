use crate::{FilterParams, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchPreview {
        request_id: RequestId,
        params: FilterParams,
    },
    FetchDownload {
        request_id: RequestId,
        params: FilterParams,
    },
    /// Deliver `Msg::LongRunningElapsed` once the warning delay has passed.
    StartLongRunningTimer { request_id: RequestId },
    SaveFile { file: DownloadedFile },
    Notify(Notification),
}

/// Payload of a successful download, ready for the file-save primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// Auto-dismissing notification. Never stored in controller state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notification {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}
