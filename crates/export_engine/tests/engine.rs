use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use export_core::{validate, Division, FilterParams, PreviewRow};
use export_engine::{EngineEvent, EngineHandle, ExportService, FailureKind, FetchError};

const WAIT: Duration = Duration::from_secs(5);

#[derive(Default)]
struct FakeService {
    previews: AtomicUsize,
    exports: AtomicUsize,
}

#[async_trait::async_trait]
impl ExportService for FakeService {
    async fn fetch_preview(&self, params: &FilterParams) -> Result<Vec<PreviewRow>, FetchError> {
        self.previews.fetch_add(1, Ordering::SeqCst);
        Ok(vec![PreviewRow {
            contest_name: format!("Round ({})", params.division()),
            problem_name: params.problem_index().to_string(),
            rating: "N/A".to_string(),
            tags: String::new(),
            link: String::new(),
        }])
    }

    async fn fetch_export(&self, _params: &FilterParams) -> Result<Vec<u8>, FetchError> {
        self.exports.fetch_add(1, Ordering::SeqCst);
        Err(FetchError {
            kind: FailureKind::HttpStatus(500),
            message: "boom".to_string(),
        })
    }
}

fn params() -> FilterParams {
    validate(Division::Div3, "d", "60").unwrap()
}

#[test]
fn preview_completion_is_reported_with_request_id() {
    let service = Arc::new(FakeService::default());
    let engine = EngineHandle::with_service(service.clone(), Duration::from_secs(60)).unwrap();

    engine.preview(4, params());
    match engine.recv_timeout(WAIT) {
        Some(EngineEvent::PreviewCompleted { request_id, result }) => {
            assert_eq!(request_id, 4);
            let rows = result.unwrap();
            assert_eq!(rows[0].contest_name, "Round (div. 3)");
            assert_eq!(rows[0].problem_name, "D");
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(service.previews.load(Ordering::SeqCst), 1);
    assert_eq!(service.exports.load(Ordering::SeqCst), 0);
}

#[test]
fn download_failure_is_reported() {
    let service = Arc::new(FakeService::default());
    let engine = EngineHandle::with_service(service.clone(), Duration::from_secs(60)).unwrap();

    engine.download(9, params());
    match engine.recv_timeout(WAIT) {
        Some(EngineEvent::DownloadCompleted { request_id, result }) => {
            assert_eq!(request_id, 9);
            assert_eq!(result.unwrap_err().kind, FailureKind::HttpStatus(500));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn timer_fires_after_configured_delay() {
    let engine =
        EngineHandle::with_service(Arc::new(FakeService::default()), Duration::from_millis(50))
            .unwrap();

    engine.start_timer(2);
    assert!(engine.try_recv().is_none());
    assert_eq!(
        engine.recv_timeout(WAIT),
        Some(EngineEvent::TimerElapsed { request_id: 2 })
    );
}
