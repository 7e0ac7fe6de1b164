use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use sea_orm::{DatabaseBackend, DatabaseConnection, DbErr, MockDatabase};
use serde_json::Value;

use leadtrack_pulse::config::PulseSettings;
use leadtrack_pulse::infra::feed::ChangeFeed;
use leadtrack_pulse::infra::identity::HttpIdentityGateway;
use leadtrack_pulse::router::build_router;
use leadtrack_pulse::state::AppState;
use leadtrack_pulse::usecase::optimistic::TaskStatusView;
use leadtrack_testing::auth::MockPrincipal;

/// Router over a disconnected database and an unreachable identity gateway.
fn offline_server() -> TestServer {
    server_over(DatabaseConnection::default())
}

fn server_over(db: DatabaseConnection) -> TestServer {
    let http = reqwest::Client::new();
    let state = AppState {
        db,
        feed: ChangeFeed::default(),
        identity: HttpIdentityGateway::new(http.clone(), "http://127.0.0.1:1"),
        http,
        settings: Arc::new(PulseSettings::default()),
        task_view: TaskStatusView::default(),
    };
    TestServer::new(build_router(state)).unwrap()
}

#[tokio::test]
async fn should_answer_liveness_with_request_id() {
    let server = offline_server();

    let response = server.get("/healthz").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn should_report_not_ready_without_database() {
    let server = offline_server();
    let response = server.get("/readyz").await;
    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn should_report_unauthenticated_session() {
    let server = offline_server();

    let response = server.get("/session").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["state"], "unauthenticated");
    assert!(body.get("user").is_none());
}

#[tokio::test]
async fn should_reject_protected_routes_without_principal() {
    let server = offline_server();

    for path in ["/fields", "/users/@me", "/performance", "/dashboard"] {
        let response = server.get(path).await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED, "{path}");
        let body: Value = response.json();
        assert_eq!(body["kind"], "UNAUTHENTICATED", "{path}");
    }

    let response = server
        .post("/logs")
        .json(&serde_json::json!({"values": {}}))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_fail_closed_when_role_lookup_fails() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Custom("connection reset".to_owned())])
        .into_connection();
    let server = server_over(db);
    let principal = MockPrincipal::new("uid-ana", "ana@example.com");

    let mut request = server.get("/performance");
    for (name, value) in principal.header_pairs() {
        request = request.add_header(name, value);
    }
    let response = request.await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["kind"], "RECORD_INCONSISTENT");
}
