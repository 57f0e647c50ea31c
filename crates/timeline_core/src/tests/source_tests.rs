use super::*;
use axum::{
    extract::Query,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;

#[derive(Deserialize)]
struct YearQuery {
    year: Option<i32>,
}

async fn timeline(Query(q): Query<YearQuery>) -> Json<serde_json::Value> {
    let items = vec![
        json!({ "id": "evt_001", "title": "First Song Saved", "artist": "", "year": 2018 }),
        json!({ "id": "evt_002", "title": "Music Rewind Started", "artist": "", "year": 2020 }),
    ];
    let items: Vec<_> = items
        .into_iter()
        .filter(|item| q.year.map_or(true, |year| item["year"] == json!(year)))
        .collect();
    Json(json!({ "status": "ok", "items": items }))
}

async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    format!("http://{addr}/api/v1")
}

fn source_for(base: &str) -> HttpTimelineSource {
    let settings = ClientSettings {
        api_base_url: Some(base.to_string()),
        ..ClientSettings::default()
    };
    HttpTimelineSource::new(&settings).expect("source")
}

#[tokio::test]
async fn fetches_timeline_envelope() {
    let base = spawn(Router::new().route("/api/v1/timeline", get(timeline))).await;
    let source = source_for(&base);

    let response = source.fetch_timeline().await.expect("fetch");

    assert_eq!(response.status.as_deref(), Some("ok"));
    assert_eq!(response.items.len(), 2);
}

#[tokio::test]
async fn trailing_slash_in_base_is_tolerated() {
    let base = spawn(Router::new().route("/api/v1/timeline", get(timeline))).await;
    let source = source_for(&format!("{base}/"));

    let response = source.fetch_timeline().await.expect("fetch");
    assert_eq!(response.items.len(), 2);
}

#[tokio::test]
async fn year_query_is_forwarded() {
    let base = spawn(Router::new().route("/api/v1/timeline", get(timeline))).await;
    let source = source_for(&base);

    let response = source.fetch_timeline_for_year(2020).await.expect("fetch");
    let (records, _) = response.into_records();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id.as_deref(), Some("evt_002"));
}

#[tokio::test]
async fn non_success_status_maps_to_status_error() {
    let router = Router::new().route(
        "/api/v1/timeline",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down").into_response() }),
    );
    let base = spawn(router).await;

    let err = source_for(&base).fetch_timeline().await.expect_err("should fail");
    assert_eq!(err, FetchError::Status(503));
}

#[tokio::test]
async fn invalid_body_maps_to_malformed_payload() {
    let router = Router::new().route("/api/v1/timeline", get(|| async { "<html>oops</html>" }));
    let base = spawn(router).await;

    let err = source_for(&base).fetch_timeline().await.expect_err("should fail");
    assert!(matches!(err, FetchError::MalformedPayload(_)));
}

#[tokio::test]
async fn non_array_items_map_to_malformed_payload() {
    let router = Router::new().route(
        "/api/v1/timeline",
        get(|| async { Json(json!({ "items": { "id": "a" } })) }),
    );
    let base = spawn(router).await;

    let err = source_for(&base).fetch_timeline().await.expect_err("should fail");
    assert!(matches!(err, FetchError::MalformedPayload(_)));
}

#[tokio::test]
async fn unreachable_server_maps_to_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let err = source_for(&format!("http://{addr}/api/v1"))
        .fetch_timeline()
        .await
        .expect_err("should fail");
    assert!(matches!(err, FetchError::Transport(_)));
}

#[tokio::test]
async fn unconfigured_source_always_fails() {
    let err = UnconfiguredSource.fetch_timeline().await.expect_err("should fail");
    assert_eq!(err, FetchError::Unconfigured);
}
