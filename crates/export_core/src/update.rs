use export_logging::{export_debug, export_info, export_warn};

use crate::{validate, AppState, Effect, Msg, Notification, OperationState, RequestId};

pub const DOWNLOAD_STARTED_NOTICE: &str = "Preparing your CSV file. Please wait...";
pub const DOWNLOAD_SUCCESS_NOTICE: &str = "File downloaded successfully!";
pub const DOWNLOAD_FAILED_NOTICE: &str = "Something went wrong while downloading the file.";

/// Pure update function: applies a message to state and returns any effects.
///
/// Triggers that do not fit the current operation are ignored rather than
/// reported, so a double click or a late response can never start a second
/// workflow or clobber the state of a newer one.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::DivisionSelected(division) => {
            if state.form_enabled() {
                state.form_mut().division = division;
            }
            Vec::new()
        }
        Msg::IndexEdited(text) => {
            if state.form_enabled() {
                state.form_mut().index = text;
            }
            Vec::new()
        }
        Msg::DaysEdited(text) => {
            if state.form_enabled() {
                state.form_mut().days = text;
            }
            Vec::new()
        }
        Msg::PreviewClicked => {
            if !state.is_idle() {
                export_debug!("Preview ignored while {:?}", state.operation().kind());
                return (state, Vec::new());
            }
            state.clear_error();
            let Some(params) = validate_form(&mut state) else {
                return (state, Vec::new());
            };
            let request_id = state.next_request_id();
            state.set_operation(OperationState::Previewing { request_id });
            export_info!(
                "Preview request_id={} division={} index={} days={}",
                request_id,
                params.division(),
                params.problem_index(),
                params.lookback_days()
            );
            vec![
                Effect::FetchPreview { request_id, params },
                Effect::StartLongRunningTimer { request_id },
            ]
        }
        Msg::DownloadClicked => {
            if !state.is_idle() {
                export_debug!("Download ignored while {:?}", state.operation().kind());
                return (state, Vec::new());
            }
            state.clear_error();
            if let Some(params) = validate_form(&mut state) {
                export_info!("Awaiting confirmation for {}", params.file_name());
                state.set_operation(OperationState::AwaitingConfirmation(params));
            }
            Vec::new()
        }
        Msg::ConfirmClicked => match state.operation() {
            OperationState::AwaitingConfirmation(params) => {
                let request_id = state.next_request_id();
                state.set_operation(OperationState::Downloading { request_id, params });
                export_info!(
                    "Download request_id={} file={}",
                    request_id,
                    params.file_name()
                );
                vec![
                    Effect::Notify(Notification::info(DOWNLOAD_STARTED_NOTICE)),
                    Effect::FetchDownload { request_id, params },
                ]
            }
            other => {
                export_debug!("Confirm ignored while {:?}", other.kind());
                Vec::new()
            }
        },
        Msg::CancelClicked => {
            if let OperationState::AwaitingConfirmation(params) = state.operation() {
                export_info!("Download of {} cancelled", params.file_name());
                state.set_operation(OperationState::Idle);
            }
            Vec::new()
        }
        Msg::SuccessNoticeDismissed => {
            state.set_success_notice(false);
            Vec::new()
        }
        Msg::PreviewSettled { request_id, result } => {
            if !is_previewing(&state, request_id) {
                export_debug!("Stale preview result request_id={}", request_id);
                return (state, Vec::new());
            }
            state.set_operation(OperationState::Idle);
            state.set_long_running_warning(false);
            match result {
                Ok(rows) => {
                    export_info!("Preview request_id={} rows={}", request_id, rows.len());
                    state.replace_preview_rows(rows);
                }
                Err(err) => {
                    export_warn!("Preview request_id={} failed: {}", request_id, err);
                    state.replace_preview_rows(Vec::new());
                    state.set_error(err.to_string(), None);
                }
            }
            Vec::new()
        }
        Msg::DownloadSettled { request_id, result } => {
            let in_flight = matches!(
                state.operation(),
                OperationState::Downloading { request_id: id, .. } if id == request_id
            );
            if !in_flight {
                export_debug!("Stale download result request_id={}", request_id);
                return (state, Vec::new());
            }
            state.set_operation(OperationState::Idle);
            match result {
                Ok(file) => {
                    export_info!(
                        "Download request_id={} bytes={} file={}",
                        request_id,
                        file.bytes.len(),
                        file.file_name
                    );
                    state.set_success_notice(true);
                    vec![
                        Effect::SaveFile { file },
                        Effect::Notify(Notification::success(DOWNLOAD_SUCCESS_NOTICE)),
                    ]
                }
                Err(err) => {
                    export_warn!("Download request_id={} failed: {}", request_id, err);
                    vec![Effect::Notify(Notification::error(DOWNLOAD_FAILED_NOTICE))]
                }
            }
        }
        Msg::LongRunningElapsed { request_id } => {
            if is_previewing(&state, request_id) {
                export_info!("Preview request_id={} is taking a while", request_id);
                state.set_long_running_warning(true);
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn is_previewing(state: &AppState, request_id: RequestId) -> bool {
    state.operation() == OperationState::Previewing { request_id }
}

fn validate_form(state: &mut AppState) -> Option<crate::FilterParams> {
    let form = state.form();
    match validate(form.division, &form.index, &form.days) {
        Ok(params) => Some(params),
        Err(err) => {
            export_debug!("Validation failed on {:?}: {}", err.field, err);
            state.set_error(err.to_string(), Some(err.field));
            None
        }
    }
}
