use std::sync::{mpsc, Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use export_core::{DownloadedFile, FilterParams, RequestId};
use export_logging::{export_debug, export_info};

use crate::client::{ClientSettings, ExportService, ReqwestExportService};
use crate::{EngineError, EngineEvent};

pub const LONG_RUNNING_AFTER: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub client: ClientSettings,
    /// Delay before a pending request is reported as long-running. Cosmetic only.
    pub long_running_after: Duration,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            client: ClientSettings::default(),
            long_running_after: LONG_RUNNING_AFTER,
        }
    }
}

enum EngineCommand {
    Preview {
        request_id: RequestId,
        params: FilterParams,
    },
    Download {
        request_id: RequestId,
        params: FilterParams,
    },
    StartTimer {
        request_id: RequestId,
    },
}

/// Runs requests on a background tokio runtime and reports completions as
/// [`EngineEvent`]s. Every request runs to completion; there is no cancel.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Mutex<mpsc::Receiver<EngineEvent>>,
}

impl EngineHandle {
    pub fn new(settings: EngineSettings) -> Result<Self, EngineError> {
        let service = ReqwestExportService::new(settings.client)?;
        Ok(Self::with_service(
            Arc::new(service),
            settings.long_running_after,
        )?)
    }

    pub fn with_service(
        service: Arc<dyn ExportService>,
        long_running_after: Duration,
    ) -> std::io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("export-engine-worker")
            .build()?;

        thread::Builder::new()
            .name("export-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let service = service.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(service.as_ref(), command, long_running_after, event_tx)
                            .await;
                    });
                }
                export_debug!("Engine command channel closed");
            })?;

        Ok(Self {
            cmd_tx,
            event_rx: Mutex::new(event_rx),
        })
    }

    pub fn preview(&self, request_id: RequestId, params: FilterParams) {
        self.send(EngineCommand::Preview { request_id, params });
    }

    pub fn download(&self, request_id: RequestId, params: FilterParams) {
        self.send(EngineCommand::Download { request_id, params });
    }

    pub fn start_timer(&self, request_id: RequestId) {
        self.send(EngineCommand::StartTimer { request_id });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.receiver().try_recv().ok()
    }

    /// Blocks until the next event or until `timeout` passes.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.receiver().recv_timeout(timeout).ok()
    }

    fn receiver(&self) -> std::sync::MutexGuard<'_, mpsc::Receiver<EngineEvent>> {
        self.event_rx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn send(&self, command: EngineCommand) {
        let _ = self.cmd_tx.send(command);
    }
}

async fn handle_command(
    service: &dyn ExportService,
    command: EngineCommand,
    long_running_after: Duration,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::Preview { request_id, params } => {
            let result = service.fetch_preview(&params).await;
            export_info!(
                "Preview request_id={} settled ok={}",
                request_id,
                result.is_ok()
            );
            EngineEvent::PreviewCompleted { request_id, result }
        }
        EngineCommand::Download { request_id, params } => {
            let result = service
                .fetch_export(&params)
                .await
                .map(|bytes| DownloadedFile {
                    file_name: params.file_name(),
                    bytes,
                });
            export_info!(
                "Download request_id={} settled ok={}",
                request_id,
                result.is_ok()
            );
            EngineEvent::DownloadCompleted { request_id, result }
        }
        EngineCommand::StartTimer { request_id } => {
            tokio::time::sleep(long_running_after).await;
            EngineEvent::TimerElapsed { request_id }
        }
    };
    let _ = event_tx.send(event);
}
