//! End-to-end runs against an in-process mock of the NutriMed API

use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use nutri_probe::driver::{HttpTransport, Transport};
use nutri_probe::report::{self, types::TestResults};
use nutri_probe::{ApiTester, Config, ProbeError};

struct MockServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
}

impl MockServer {
    async fn start(router: Router) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = rx.await;
                })
                .await
                .unwrap();
        });
        Self {
            addr,
            shutdown: Some(tx),
        }
    }

    fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": "2024-05-01T10:00:00.000Z",
        "responseTime": "12ms",
        "database": { "connected": true, "provider": "postgresql" },
        "supabase": { "connected": true, "error": null },
        "services": { "cache": true }
    }))
}

async fn unauthorized() -> impl IntoResponse {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "No autorizado" })),
    )
}

/// Every endpoint except `/api/foods`
fn app_without_foods() -> Router {
    Router::new()
        .route("/", get(|| async { Html("<html><body>NutriMed</body></html>") }))
        .route("/api/health", get(health))
        .route("/api/dashboard/stats", get(unauthorized))
        .route("/api/nutrition/summary", get(unauthorized))
        .route("/api/meals/today", get(|| async { Json(json!([])) }))
        .route("/api/profile", get(unauthorized))
}

fn healthy_app() -> Router {
    app_without_foods().route(
        "/api/foods",
        get(|| async { Json(json!({ "foods": [], "total": 0 })) }),
    )
}

fn config_for(server: &MockServer) -> Config {
    let mut config = Config::with_base_url(&server.base_url());
    config.timeout = Duration::from_secs(2);
    config
}

#[tokio::test]
async fn healthy_application_passes_every_check() {
    let server = MockServer::start(healthy_app()).await;
    let config = config_for(&server);
    let transport = HttpTransport::new(config.timeout).unwrap();

    let mut tester = ApiTester::silent(transport, config);
    let summary = tester.run_all_tests().await;

    assert_eq!(summary.total_tests, 7);
    assert_eq!(summary.passed_tests, 7);
    assert!(summary.critical_issues.is_empty());
    assert_eq!(summary.exit_code(), 0);

    let health = &summary.test_results[1];
    assert_eq!(health.details, "Status: healthy, DB: true, Supabase: true");
    assert_eq!(
        health.response_data.as_ref().unwrap()["response_time"],
        "12ms"
    );
}

#[tokio::test]
async fn json_root_and_missing_health_field_are_critical() {
    let app = Router::new()
        .route("/", get(|| async { Json(json!({ "app": "nutrimed" })) }))
        .route(
            "/api/health",
            get(|| async {
                Json(json!({
                    "status": "healthy",
                    "timestamp": "2024-05-01T10:00:00.000Z",
                    "database": { "connected": true },
                    "services": {}
                }))
            }),
        );
    let server = MockServer::start(app).await;
    let config = config_for(&server);
    let transport = HttpTransport::new(config.timeout).unwrap();

    let mut tester = ApiTester::silent(transport, config);
    let summary = tester.run_all_tests().await;

    assert!(!summary.app_accessible);
    assert!(!summary.health_check_passed);
    assert_eq!(
        summary.critical_issues,
        vec!["Application not accessible", "Health endpoint failing"]
    );
    assert_eq!(summary.test_results[1].details, "Missing fields: supabase");
    // Unrouted endpoints answer 404, which no check accepts
    assert_eq!(summary.passed_tests, 0);
    assert_eq!(summary.exit_code(), 1);
}

#[tokio::test]
async fn root_content_type_header_is_captured() {
    let app = Router::new().route(
        "/",
        get(|| async { ([(header::CONTENT_TYPE, "text/html; charset=utf-8")], "<html/>") }),
    );
    let server = MockServer::start(app).await;
    let transport = HttpTransport::new(Duration::from_secs(2)).unwrap();

    let response = transport.get(&server.base_url()).await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.content_type, "text/html; charset=utf-8");
    assert_eq!(response.body, "<html/>");
}

#[tokio::test]
async fn refused_connection_is_a_transport_error() {
    // Bind then drop to get a port nobody listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport = HttpTransport::new(Duration::from_secs(2)).unwrap();
    let err = transport
        .get(&format!("http://{}/api/health", addr))
        .await
        .unwrap_err();
    assert!(matches!(err, ProbeError::Transport(_)));

    let mut tester = ApiTester::silent(transport, Config::with_base_url(&format!("http://{}", addr)));
    let summary = tester.run_all_tests().await;
    assert_eq!(summary.total_tests, 7);
    assert_eq!(summary.passed_tests, 0);
    assert_eq!(summary.exit_code(), 1);
}

#[tokio::test]
async fn slow_endpoint_times_out_and_run_continues() {
    let app = app_without_foods().route(
        "/api/foods",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({ "foods": [] }))
        }),
    );
    let server = MockServer::start(app).await;
    let mut config = Config::with_base_url(&server.base_url());
    config.timeout = Duration::from_millis(300);
    let transport = HttpTransport::new(config.timeout).unwrap();

    let mut tester = ApiTester::silent(transport, config);
    let summary = tester.run_all_tests().await;

    assert_eq!(summary.total_tests, 7);
    assert_eq!(summary.passed_tests, 6);
    let foods = &summary.test_results[5];
    assert_eq!(foods.name, "Foods Endpoint - Error");
    assert!(foods.details.starts_with("Error: "));
    // 6/7 clears the threshold and neither critical check failed
    assert_eq!(summary.exit_code(), 0);
}

#[tokio::test]
async fn reports_are_written_to_output_dir() {
    let server = MockServer::start(healthy_app()).await;
    let config = config_for(&server);
    let transport = HttpTransport::new(config.timeout).unwrap();
    let mut tester = ApiTester::silent(transport, config.clone());
    let summary = tester.run_all_tests().await;

    let dir = std::env::temp_dir().join(format!("nutri-probe-{}", tester.session_id()));
    let results = TestResults::new(tester.session_id(), &config.base_url, summary);
    let paths = report::write_reports(&results, &dir).unwrap();
    assert_eq!(paths.len(), 2);

    let json = std::fs::read_to_string(dir.join("results.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["summary"]["totalTests"], 7);
    assert_eq!(parsed["sessionId"], tester.session_id());

    let xml = std::fs::read_to_string(dir.join("junit.xml")).unwrap();
    assert!(xml.contains(r#"failures="0""#));

    std::fs::remove_dir_all(&dir).unwrap();
}
