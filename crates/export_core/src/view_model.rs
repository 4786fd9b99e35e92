use crate::{Division, FilterParams, FormField, PreviewRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperationKind {
    #[default]
    Idle,
    Previewing,
    AwaitingConfirmation,
    Downloading,
}

/// What the confirmation dialog shows: the held parameters and the exact
/// name the file will be saved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationView {
    pub params: FilterParams,
    pub file_name: String,
}

/// Read-only snapshot for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub division: Division,
    pub index_input: String,
    pub days_input: String,
    pub operation: OperationKind,
    pub form_enabled: bool,
    pub preview_busy: bool,
    pub download_busy: bool,
    pub file_name_hint: String,
    pub pending_confirmation: Option<ConfirmationView>,
    pub error_text: Option<String>,
    pub error_field: Option<FormField>,
    pub long_running_warning: bool,
    pub success_notice: bool,
    pub preview_rows: Vec<PreviewRow>,
    pub dirty: bool,
}
