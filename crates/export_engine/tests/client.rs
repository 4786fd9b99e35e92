use export_core::{validate, Division, FilterParams};
use export_engine::{ClientSettings, ExportService, FailureKind, ReqwestExportService};
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service_for(server: &MockServer) -> ReqwestExportService {
    ReqwestExportService::new(ClientSettings {
        base_url: server.uri(),
        ..ClientSettings::default()
    })
    .expect("client")
}

fn params(division: Division, index: &str, days: &str) -> FilterParams {
    validate(division, index, days).expect("valid params")
}

#[tokio::test]
async fn preview_sends_normalized_query_and_decodes_rows() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/preview_csv"))
        .and(query_param("division", "div. 2"))
        .and(query_param("index", "A"))
        .and(query_param("days", "365"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"data":[{"contest_name":"Codeforces Round 900 (Div. 2)","problem_name":"How Much Does Daytona Cost?","rating":800,"tags":"greedy","link":"https://codeforces.com/contest/1878/problem/A","complete":""}],"total_count":1}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let rows = service_for(&server)
        .fetch_preview(&params(Division::Div2, "a", "365"))
        .await
        .expect("preview ok");

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].contest_name, "Codeforces Round 900 (Div. 2)");
    assert_eq!(rows[0].rating, "800");
    assert_eq!(rows[0].link, "https://codeforces.com/contest/1878/problem/A");
}

#[tokio::test]
async fn preview_surfaces_service_error_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/preview_csv"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"error":"rate limited"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let err = service_for(&server)
        .fetch_preview(&params(Division::Div3, "b", "30"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::ServiceReported("rate limited".to_string()));
}

#[tokio::test]
async fn preview_error_body_wins_over_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/preview_csv"))
        .respond_with(
            ResponseTemplate::new(503)
                .set_body_raw(r#"{"error":"Failed to fetch contests."}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let err = service_for(&server)
        .fetch_preview(&params(Division::Div1, "e", "10"))
        .await
        .unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::ServiceReported("Failed to fetch contests.".to_string())
    );
}

#[tokio::test]
async fn preview_without_data_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/preview_csv"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .mount(&server)
        .await;

    let rows = service_for(&server)
        .fetch_preview(&params(Division::Div4, "a", "1"))
        .await
        .expect("preview ok");
    assert!(rows.is_empty());
}

#[tokio::test]
async fn preview_rejects_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/preview_csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = service_for(&server)
        .fetch_preview(&params(Division::Div2, "a", "5"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::MalformedBody);
}

#[tokio::test]
async fn preview_fails_on_status_without_error_field() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/preview_csv"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = service_for(&server)
        .fetch_preview(&params(Division::Div2, "a", "5"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
}

#[tokio::test]
async fn export_returns_raw_bytes() {
    let server = MockServer::start().await;
    let csv = "contest_name,problem_name,rating,tags,link,complete\r\n";
    Mock::given(method("GET"))
        .and(path("/download_csv"))
        .and(query_param("division", "div. 1"))
        .and(query_param("index", "C"))
        .and(query_param("days", "90"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(csv, "text/csv"))
        .expect(1)
        .mount(&server)
        .await;

    let bytes = service_for(&server)
        .fetch_export(&params(Division::Div1, "c", "90"))
        .await
        .expect("export ok");
    assert_eq!(bytes, csv.as_bytes());
}

#[tokio::test]
async fn export_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/download_csv"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let err = service_for(&server)
        .fetch_export(&params(Division::Div1, "c", "90"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(502));
}

#[tokio::test]
async fn unreachable_service_is_a_network_failure() {
    let service = ReqwestExportService::new(ClientSettings {
        base_url: "http://127.0.0.1:9".to_string(),
        ..ClientSettings::default()
    })
    .expect("client");

    let err = service
        .fetch_preview(&params(Division::Div2, "a", "5"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Network);
}
