//! Export core: pure request-orchestration state machine and view-model helpers.
mod effect;
mod error;
mod msg;
mod params;
mod row;
mod state;
mod update;
mod view_model;

pub use effect::{DownloadedFile, Effect, NoticeLevel, Notification};
pub use error::WorkflowError;
pub use msg::Msg;
pub use params::{
    export_file_name, validate, Division, FilterParams, FormField, ValidationError,
    ValidationResult, DAYS_REASON, INDEX_REASON,
};
pub use row::{PreviewRow, RATING_UNKNOWN};
pub use state::{
    AppState, FeedbackState, FormState, OperationState, RequestId, DEFAULT_DAYS, DEFAULT_INDEX,
};
pub use update::{update, DOWNLOAD_FAILED_NOTICE, DOWNLOAD_STARTED_NOTICE, DOWNLOAD_SUCCESS_NOTICE};
pub use view_model::{AppViewModel, ConfirmationView, OperationKind};
