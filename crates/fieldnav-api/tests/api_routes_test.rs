use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use fieldnav_api::{create_router, ApiConfig, AppState};

async fn demo_app() -> Router {
    let state = AppState::bootstrap(&ApiConfig::default()).await.unwrap();
    create_router(Arc::new(state))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn assert_error(body: &Value, code: &str) {
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"]["code"], json!(code), "unexpected body {}", body);
}

#[tokio::test]
async fn test_health() {
    let app = demo_app().await;

    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "fieldnav-api");
}

#[tokio::test]
async fn test_worker_directory() {
    let app = demo_app().await;

    let (status, body) = send(&app, Method::GET, "/api/workers", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"].as_array().unwrap().len(), 5);

    let (status, body) = send(&app, Method::GET, "/api/workers/3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["first_name"], "Priya");
    assert_eq!(body["data"]["current_status"], "busy");

    let (status, body) = send(&app, Method::GET, "/api/workers/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, "WORKER_001");

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/workers/5/status",
        Some(json!({ "status": "available" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["current_status"], "available");
}

#[tokio::test]
async fn test_nearby_workers_sorted_by_distance() {
    let app = demo_app().await;

    let (status, body) =
        send(&app, Method::GET, "/api/workers/nearby/22.7196/75.8577?radius=5000", None).await;

    assert_eq!(status, StatusCode::OK);
    let workers = body["data"].as_array().unwrap();
    let ids: Vec<&str> = workers.iter().map(|w| w["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["2", "6"]);
    assert_eq!(workers[0]["distance_m"], json!(0.0));
}

#[tokio::test]
async fn test_optimal_workers_respects_max_distance() {
    let app = demo_app().await;

    // Demo workers are in Indore, far beyond the default radius of the Delhi jobs
    let (status, body) = send(&app, Method::GET, "/api/jobs/1/optimal-workers", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_available"], json!(0));

    let (_, body) = send(
        &app,
        Method::GET,
        "/api/jobs/1/optimal-workers?max_distance=2000000&limit=1",
        None,
    )
    .await;
    assert_eq!(body["data"]["total_available"], json!(1));
    assert_eq!(body["data"]["workers"].as_array().unwrap().len(), 1);

    let (status, body) = send(&app, Method::GET, "/api/jobs/42/optimal-workers", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, "JOB_001");
}

#[tokio::test]
async fn test_job_assignment_flow() {
    let app = demo_app().await;

    let (status, body) =
        send(&app, Method::PUT, "/api/jobs/1/assign", Some(json!({ "worker_id": "3" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_error(&body, "JOB_002");

    let (status, body) =
        send(&app, Method::PUT, "/api/jobs/1/assign", Some(json!({ "worker_id": "2" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["job"]["status"], "assigned");
    assert_eq!(body["data"]["worker"]["current_status"], "busy");
    assert_eq!(body["data"]["audit"]["state"], "recorded");

    let (status, body) =
        send(&app, Method::PUT, "/api/jobs/1/assign", Some(json!({ "worker_id": "4" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_error(&body, "JOB_003");

    let (_, body) = send(&app, Method::GET, "/api/jobs/status/assigned", None).await;
    let assigned = body["data"].as_array().unwrap();
    assert_eq!(assigned.len(), 1);
    assert_eq!(assigned[0]["assigned_worker"]["id"], "2");

    let (_, body) = send(&app, Method::GET, "/api/workers/2/jobs?status=assigned", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (_, body) = send(&app, Method::GET, "/api/notifications/2/unread-count", None).await;
    assert_eq!(body["data"]["count"], json!(1));
}

#[tokio::test]
async fn test_job_status_transitions() {
    let app = demo_app().await;

    let (status, body) =
        send(&app, Method::PUT, "/api/jobs/2/status", Some(json!({ "status": "completed" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "JOB_004");

    send(&app, Method::PUT, "/api/jobs/2/assign", Some(json!({ "worker_id": "4" }))).await;
    let (status, body) =
        send(&app, Method::PUT, "/api/jobs/2/status", Some(json!({ "status": "in_progress" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["previous_status"], "assigned");
    assert_eq!(body["data"]["job"]["status"], "in_progress");

    let (status, body) =
        send(&app, Method::PUT, "/api/jobs/2/reassign", Some(json!({ "worker_id": "6" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["previous_worker_id"], "4");

    let (_, body) = send(&app, Method::GET, "/api/workers/4", None).await;
    assert_eq!(body["data"]["current_status"], "available");
}

#[tokio::test]
async fn test_create_job_validation() {
    let app = demo_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/jobs",
        Some(json!({
            "title": "Transformer check",
            "location": { "latitude": 22.72, "longitude": 75.86 }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["id"], json!(3));
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["priority"], "medium");
    assert_eq!(body["data"]["estimated_duration_minutes"], json!(60));

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/jobs",
        Some(json!({
            "title": "Nowhere",
            "location": { "latitude": 95.0, "longitude": 75.86 }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "LOCATION_001");
}

#[tokio::test]
async fn test_geofence_attendance_over_http() {
    let app = demo_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/jobsites",
        Some(json!({
            "name": "Rajwada Palace",
            "address": "Rajwada, Indore",
            "coordinates": { "latitude": 22.7196, "longitude": 75.8577 }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["geofence"]["radius_m"], json!(100.0));

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/locations",
        Some(json!({
            "worker_id": "2",
            "coordinates": { "latitude": 22.7196, "longitude": 75.8577 }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["geofence_events"][0]["type"], "enter");
    assert_eq!(body["data"]["auto_check_in"]["site_name"], "Rajwada Palace");
    assert_eq!(body["data"]["location_update"]["accuracy_m"], json!(10.0));

    let (_, body) = send(&app, Method::GET, "/api/workers/2/checkin-status", None).await;
    assert_eq!(body["data"]["is_checked_in"], json!(true));

    let (_, body) = send(
        &app,
        Method::POST,
        "/api/locations",
        Some(json!({
            "worker_id": "2",
            "coordinates": { "latitude": 22.730, "longitude": 75.870 },
            "accuracy": 5.0
        })),
    )
    .await;
    assert_eq!(body["data"]["geofence_events"][0]["type"], "exit");

    let (_, body) = send(&app, Method::GET, "/api/timesheets/2", None).await;
    assert_eq!(body["data"][0]["status"], "completed");

    let (_, body) = send(&app, Method::GET, "/api/expenses/2?status=pending", None).await;
    let expenses = body["data"].as_array().unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0]["kind"], "mileage");
    let expense_id = expenses[0]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/expenses/{}/status", expense_id),
        Some(json!({ "status": "bogus" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "EXPENSE_002");

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/expenses/{}/status", expense_id),
        Some(json!({ "status": "approved" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "approved");

    let (_, body) = send(&app, Method::GET, "/api/geofence-events/2", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (_, body) = send(&app, Method::GET, "/api/locations/2", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_unknown_expense_is_not_found() {
    let app = demo_app().await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/expenses/00000000-0000-0000-0000-000000000000/status",
        Some(json!({ "status": "approved" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, "EXPENSE_001");
}

#[tokio::test]
async fn test_manual_attendance_and_inbox() {
    let app = demo_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/checkin",
        Some(json!({
            "worker_id": "4",
            "location": { "latitude": 22.6708, "longitude": 75.8718 },
            "job_id": 1
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["job_id"], json!(1));

    let (_, body) = send(&app, Method::GET, "/api/workers/4", None).await;
    assert_eq!(body["data"]["current_status"], "busy");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/checkout",
        Some(json!({
            "worker_id": "ghost",
            "location": { "latitude": 22.6708, "longitude": 75.8718 }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, "WORKER_001");

    send(&app, Method::PUT, "/api/jobs/1/assign", Some(json!({ "worker_id": "2" }))).await;
    let (_, body) = send(&app, Method::GET, "/api/notifications/2?unread_only=true", None).await;
    let id = body["data"][0]["id"].as_str().unwrap().to_string();

    let (status, body) =
        send(&app, Method::PUT, &format!("/api/notifications/{}/read", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["read"], json!(true));

    let (_, body) = send(&app, Method::PUT, "/api/notifications/2/mark-all-read", None).await;
    assert_eq!(body["data"]["marked_count"], json!(0));

    let (status, body) = send(&app, Method::PUT, "/api/notifications/not-a-uuid/read", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, "NOTIFICATION_001");
}

#[tokio::test]
async fn test_sites_geojson_and_audit_status() {
    let app = demo_app().await;

    let (status, body) = send(&app, Method::GET, "/api/jobsites/geojson", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "FeatureCollection");
    assert_eq!(body["features"].as_array().unwrap().len(), 2);
    assert_eq!(body["features"][0]["geometry"]["coordinates"], json!([77.2295, 28.6129]));

    let (status, body) = send(&app, Method::GET, "/api/audit/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["connected"], json!(false));
}

#[tokio::test]
async fn test_timesheet_summary_empty_directory() {
    let app = demo_app().await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/timesheets/summary?start_date=2024-01-01&end_date=2024-01-31",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));

    let (status, body) = send(&app, Method::GET, "/api/timesheets/daily/2/2024-03-04", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_hours"], json!(0.0));
}
