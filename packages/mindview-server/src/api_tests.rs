use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use crate::config::ServerConfig;
use crate::router::create_router;
use crate::state::ServerState;

// Helper to create a test router with default configuration
fn create_test_router() -> axum::Router {
    let state = Arc::new(ServerState::new(ServerConfig::default()));
    create_router(state)
}

// Helper to send a request and get the response
async fn send_request(
    router: axum::Router,
    request: Request<Body>,
) -> (StatusCode, serde_json::Value) {
    let response = router
        .oneshot(request)
        .await
        .expect("Failed to send request");

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap_or(serde_json::json!({}));

    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "text/csv")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

// A 20s two-channel vitals CSV: ECG at 1 Hz, ABP every other second.
fn sample_csv() -> String {
    let mut csv = String::from("time,ECG,ABP\n");
    for i in 0..20 {
        if i % 2 == 0 {
            csv.push_str(&format!("{}.0,{},{}\n", i, i, 80 + i));
        } else {
            csv.push_str(&format!("{}.0,{},\n", i, i));
        }
    }
    csv
}

#[tokio::test]
async fn test_health_endpoint() {
    let router = create_test_router();

    let (status, body) = send_request(router, get("/api/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["records_loaded"]["eeg"], false);
    assert_eq!(body["records_loaded"]["vitals_waves"], false);
}

#[tokio::test]
async fn test_info_reports_playback_settings() {
    let router = create_test_router();

    let (status, body) = send_request(router, get("/api/info")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["window_length"], 10.0);
    assert_eq!(body["scroll_step"], 0.5);
    assert_eq!(body["record_kinds"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_ingest_then_live_window() {
    let router = create_test_router();

    let (status, body) = send_request(
        router.clone(),
        post("/api/records/vitals_waves", &sample_csv()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["kind"], "vitals_waves");
    assert_eq!(body["channels"], serde_json::json!(["ABP", "ECG"]));
    assert_eq!(body["duration"], 19.0);

    let (status, body) = send_request(router.clone(), get("/api/live/vitals_waves")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["window_start"], 0.0);
    assert_eq!(body["window_end"], 10.0);
    // 10 ECG samples at 1 Hz in [0, 10), 5 ABP samples on even seconds.
    assert_eq!(body["channels"]["ECG"]["times"].as_array().unwrap().len(), 10);
    assert_eq!(body["channels"]["ABP"]["times"].as_array().unwrap().len(), 5);

    // The next poll advances by one scroll step.
    let (_, body) = send_request(router, get("/api/live/vitals_waves")).await;
    assert_eq!(body["window_start"], 0.5);
}

#[tokio::test]
async fn test_live_window_carries_scale_hints() {
    let router = create_test_router();

    send_request(router.clone(), post("/api/records/eeg", "time,Fp1\n0.0,2.0\n1.0,6.0\n2.0,4.0\n")).await;

    let (status, body) = send_request(router, get("/api/live/eeg")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["channels"]["Fp1"]["scale_min"], 2.0);
    assert_eq!(body["channels"]["Fp1"]["scale_max"], 6.0);
}

#[tokio::test]
async fn test_live_before_ingest_is_404() {
    let router = create_test_router();

    let (status, body) = send_request(router, get("/api/live/eeg")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NO_RECORD_LOADED");
}

#[tokio::test]
async fn test_empty_upload_is_422() {
    let router = create_test_router();

    let (status, body) = send_request(router.clone(), post("/api/records/eeg", "")).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "EMPTY_RECORD");

    // A failed ingest leaves nothing behind: live polls still report no
    // record loaded.
    let (status, body) = send_request(router, get("/api/live/eeg")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NO_RECORD_LOADED");
}

#[tokio::test]
async fn test_malformed_upload_is_400() {
    let router = create_test_router();

    let (status, body) =
        send_request(router, post("/api/records/eeg", "time,A\n0.0,1.0\nbroken,2.0\n")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MALFORMED_RECORD");
    assert!(body["error"].as_str().unwrap().contains("broken"));
}

#[tokio::test]
async fn test_unknown_kind_is_404() {
    let router = create_test_router();

    let (status, body) = send_request(router, get("/api/live/ekg")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "UNKNOWN_RECORD_KIND");
}

#[tokio::test]
async fn test_failed_ingest_preserves_loaded_record() {
    let router = create_test_router();

    send_request(router.clone(), post("/api/records/eeg", "time,Fp1\n0.0,1.0\n5.0,2.0\n")).await;
    let (status, _) = send_request(router.clone(), post("/api/records/eeg", "garbage,\n")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send_request(router, get("/api/records/eeg")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["channels"], serde_json::json!(["Fp1"]));
}

#[tokio::test]
async fn test_trend_respects_points_bound() {
    let router = create_test_router();

    send_request(router.clone(), post("/api/records/vitals_waves", &sample_csv())).await;

    let (status, body) =
        send_request(router, get("/api/trend/vitals_waves?points=5&method=mean")).await;

    assert_eq!(status, StatusCode::OK);
    let ecg_times = body["ECG"]["times"].as_array().unwrap();
    assert!(ecg_times.len() <= 5);
    assert!(!ecg_times.is_empty());
}

#[tokio::test]
async fn test_trend_channel_selection_degrades_missing() {
    let router = create_test_router();

    send_request(router.clone(), post("/api/records/vitals_waves", &sample_csv())).await;

    let (status, body) =
        send_request(router, get("/api/trend/vitals_waves?channels=ECG,Nope")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body["ECG"]["times"].as_array().unwrap().is_empty());
    assert!(body["Nope"]["times"].as_array().unwrap().is_empty());
    assert!(body.get("ABP").is_none());
}

#[tokio::test]
async fn test_trend_rejects_bad_parameters() {
    let router = create_test_router();

    send_request(router.clone(), post("/api/records/eeg", "time,A\n0.0,1.0\n1.0,2.0\n")).await;

    let (status, body) = send_request(router.clone(), get("/api/trend/eeg?points=0")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_TREND_POINTS");

    let (status, body) = send_request(router, get("/api/trend/eeg?method=median")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_TREND_METHOD");
}

#[tokio::test]
async fn test_demo_record_roundtrip() {
    let router = create_test_router();

    let (status, body) = send_request(
        router.clone(),
        Request::builder()
            .method("POST")
            .uri("/api/records/eeg/demo")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["kind"], "eeg");

    let (status, body) = send_request(router.clone(), get("/api/live/eeg")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["channels"]["Fp1"]["values"].as_array().unwrap().is_empty());

    let (status, body) = send_request(router, get("/api/trend/eeg")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["Fp1"]["times"].as_array().unwrap().len() <= 200);
}

#[tokio::test]
async fn test_delete_record() {
    let router = create_test_router();

    send_request(router.clone(), post("/api/records/eeg", "time,A\n0.0,1.0\n1.0,2.0\n")).await;

    let (status, _) = send_request(router.clone(), delete("/api/records/eeg")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send_request(router.clone(), delete("/api/records/eeg")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send_request(router, get("/api/live/eeg")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_kinds_do_not_interact() {
    let router = create_test_router();

    send_request(router.clone(), post("/api/records/eeg", "time,A\n0.0,1.0\n30.0,2.0\n")).await;

    let (status, _) = send_request(router.clone(), get("/api/live/vitals_numerics")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Polling EEG twice must not move the (independent) vitals cursor once
    // a vitals record is loaded.
    send_request(router.clone(), get("/api/live/eeg")).await;
    send_request(router.clone(), get("/api/live/eeg")).await;
    send_request(
        router.clone(),
        post("/api/records/vitals_numerics", "time,HR\n0.0,70.0\n30.0,72.0\n"),
    )
    .await;
    let (_, body) = send_request(router, get("/api/live/vitals_numerics")).await;
    assert_eq!(body["window_start"], 0.0);
}

#[tokio::test]
async fn test_unknown_endpoint_is_404() {
    let router = create_test_router();

    let (status, body) = send_request(router, get("/api/nope")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}
