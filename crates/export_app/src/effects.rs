use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use export_core::{Effect, Msg, Notification, WorkflowError};
use export_engine::{EngineEvent, EngineHandle, FailureKind, FileSaver};
use export_logging::{export_debug, export_error, export_info, export_warn};

/// Executes core effects against the engine and the file saver, and turns
/// engine events back into core messages.
pub struct EffectRunner {
    engine: EngineHandle,
    saver: Box<dyn FileSaver>,
    notifications: Mutex<VecDeque<Notification>>,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, saver: Box<dyn FileSaver>) -> Self {
        Self {
            engine,
            saver,
            notifications: Mutex::new(VecDeque::new()),
        }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchPreview { request_id, params } => {
                    export_debug!("FetchPreview request_id={}", request_id);
                    self.engine.preview(request_id, params);
                }
                Effect::FetchDownload { request_id, params } => {
                    export_debug!("FetchDownload request_id={}", request_id);
                    self.engine.download(request_id, params);
                }
                Effect::StartLongRunningTimer { request_id } => {
                    self.engine.start_timer(request_id);
                }
                Effect::SaveFile { file } => {
                    // The controller treats saving as fire-and-forget.
                    if let Err(err) = self.saver.save(&file.file_name, &file.bytes) {
                        export_error!("Failed to save {}: {}", file.file_name, err);
                    }
                }
                Effect::Notify(notification) => {
                    export_info!("Notify {:?}: {}", notification.level, notification.text);
                    self.queue().push_back(notification);
                }
            }
        }
    }

    /// Next engine event as a core message, without blocking.
    pub fn try_next_msg(&self) -> Option<Msg> {
        self.engine.try_recv().map(map_engine_event)
    }

    /// Next engine event as a core message, waiting at most `timeout`.
    pub fn next_msg(&self, timeout: Duration) -> Option<Msg> {
        self.engine.recv_timeout(timeout).map(map_engine_event)
    }

    pub fn take_notifications(&self) -> Vec<Notification> {
        self.queue().drain(..).collect()
    }

    fn queue(&self) -> std::sync::MutexGuard<'_, VecDeque<Notification>> {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Maps engine failures onto the error kinds the controller knows about.
pub fn map_engine_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::PreviewCompleted { request_id, result } => Msg::PreviewSettled {
            request_id,
            result: result.map_err(|err| match err.kind {
                FailureKind::ServiceReported(message) => WorkflowError::ServiceReported(message),
                _ => {
                    export_warn!("Preview request_id={} failed: {}", request_id, err.message);
                    WorkflowError::PreviewFetchFailed
                }
            }),
        },
        EngineEvent::DownloadCompleted { request_id, result } => Msg::DownloadSettled {
            request_id,
            result: result.map_err(|err| {
                export_warn!("Download request_id={} failed: {}", request_id, err);
                WorkflowError::DownloadFailed
            }),
        },
        EngineEvent::TimerElapsed { request_id } => Msg::LongRunningElapsed { request_id },
    }
}
