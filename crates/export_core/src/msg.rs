use crate::{Division, DownloadedFile, PreviewRow, RequestId, WorkflowError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked a division in the form.
    DivisionSelected(Division),
    /// User edited the problem index box.
    IndexEdited(String),
    /// User edited the days-back box.
    DaysEdited(String),
    /// User clicked Load Preview.
    PreviewClicked,
    /// User clicked Download; opens the confirmation gate.
    DownloadClicked,
    /// User confirmed the pending download.
    ConfirmClicked,
    /// User dismissed the pending download.
    CancelClicked,
    /// User closed the sticky download-success message.
    SuccessNoticeDismissed,
    /// Engine finished a preview request.
    PreviewSettled {
        request_id: RequestId,
        result: Result<Vec<PreviewRow>, WorkflowError>,
    },
    /// Engine finished a download request.
    DownloadSettled {
        request_id: RequestId,
        result: Result<DownloadedFile, WorkflowError>,
    },
    /// The long-running timer for a request fired.
    LongRunningElapsed { request_id: RequestId },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
