use crate::view_model::{AppViewModel, ConfirmationView, OperationKind};
use crate::{export_file_name, Division, FilterParams, FormField, PreviewRow};

pub type RequestId = u64;

pub const DEFAULT_INDEX: &str = "A";
pub const DEFAULT_DAYS: &str = "365";

/// Which workflow, if any, is in flight. Exactly one value at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperationState {
    #[default]
    Idle,
    Previewing {
        request_id: RequestId,
    },
    AwaitingConfirmation(FilterParams),
    Downloading {
        request_id: RequestId,
        params: FilterParams,
    },
}

impl OperationState {
    pub fn kind(&self) -> OperationKind {
        match self {
            OperationState::Idle => OperationKind::Idle,
            OperationState::Previewing { .. } => OperationKind::Previewing,
            OperationState::AwaitingConfirmation(_) => OperationKind::AwaitingConfirmation,
            OperationState::Downloading { .. } => OperationKind::Downloading,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeedbackState {
    pub error_text: Option<String>,
    /// Set when `error_text` came from validation, so it can be shown next to the field.
    pub error_field: Option<FormField>,
    pub long_running_warning: bool,
    /// Sticky until the user dismisses it.
    pub success_notice: bool,
}

/// Raw form input, exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub division: Division,
    pub index: String,
    pub days: String,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            division: Division::default(),
            index: DEFAULT_INDEX.to_string(),
            days: DEFAULT_DAYS.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    form: FormState,
    operation: OperationState,
    feedback: FeedbackState,
    preview_rows: Vec<PreviewRow>,
    last_request_id: RequestId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let pending_confirmation = match self.operation {
            OperationState::AwaitingConfirmation(params) => Some(ConfirmationView {
                params,
                file_name: params.file_name(),
            }),
            _ => None,
        };
        AppViewModel {
            division: self.form.division,
            index_input: self.form.index.clone(),
            days_input: self.form.days.clone(),
            operation: self.operation.kind(),
            form_enabled: self.form_enabled(),
            preview_busy: matches!(self.operation, OperationState::Previewing { .. }),
            download_busy: matches!(self.operation, OperationState::Downloading { .. }),
            file_name_hint: export_file_name(self.form.division, &self.form.index),
            pending_confirmation,
            error_text: self.feedback.error_text.clone(),
            error_field: self.feedback.error_field,
            long_running_warning: self.feedback.long_running_warning,
            success_notice: self.feedback.success_notice,
            preview_rows: self.preview_rows.clone(),
            dirty: self.dirty,
        }
    }

    pub fn operation(&self) -> OperationState {
        self.operation
    }

    pub fn feedback(&self) -> &FeedbackState {
        &self.feedback
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn preview_rows(&self) -> &[PreviewRow] {
        &self.preview_rows
    }

    pub fn is_idle(&self) -> bool {
        self.operation == OperationState::Idle
    }

    pub fn form_enabled(&self) -> bool {
        self.is_idle()
    }

    /// Returns whether the state changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn form_mut(&mut self) -> &mut FormState {
        self.mark_dirty();
        &mut self.form
    }

    pub(crate) fn set_operation(&mut self, operation: OperationState) {
        self.operation = operation;
        self.mark_dirty();
    }

    pub(crate) fn next_request_id(&mut self) -> RequestId {
        self.last_request_id += 1;
        self.last_request_id
    }

    pub(crate) fn clear_error(&mut self) {
        if self.feedback.error_text.is_some() || self.feedback.error_field.is_some() {
            self.feedback.error_text = None;
            self.feedback.error_field = None;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_error(&mut self, text: String, field: Option<FormField>) {
        self.feedback.error_text = Some(text);
        self.feedback.error_field = field;
        self.mark_dirty();
    }

    pub(crate) fn set_long_running_warning(&mut self, on: bool) {
        if self.feedback.long_running_warning != on {
            self.feedback.long_running_warning = on;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_success_notice(&mut self, on: bool) {
        if self.feedback.success_notice != on {
            self.feedback.success_notice = on;
            self.mark_dirty();
        }
    }

    /// Swaps in a whole new row set; rows are never appended.
    pub(crate) fn replace_preview_rows(&mut self, rows: Vec<PreviewRow>) {
        self.preview_rows = rows;
        self.mark_dirty();
    }
}
