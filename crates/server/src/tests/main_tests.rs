use super::*;
use axum::{body, body::Body, http::Request};
use dashboard_api::DashboardOptions;
use serde_json::{json, Value};
use shared::{protocol::Alert, Stage};
use tower::ServiceExt;

use crate::app_state::telemetry_step;

fn test_state() -> Arc<AppState> {
    Arc::new(AppState::new(Dashboard::seeded(DashboardOptions::default())))
}

fn test_app() -> (Router, Arc<AppState>) {
    let state = test_state();
    (build_router(state.clone()), state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request");
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn healthz_reports_ok() {
    let (app, _) = test_app();
    let request = Request::get("/healthz")
        .body(Body::empty())
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    assert_eq!(body.as_ref(), b"ok");
}

#[tokio::test]
async fn admin_search_and_sort_routes() {
    let (app, _) = test_app();

    let (status, page) = send(&app, "GET", "/admins", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total_records"], 8);
    assert_eq!(page["rows"].as_array().expect("rows").len(), 5);

    let (status, page) = send(&app, "POST", "/admins/search", Some(json!({ "term": "개발" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total_records"], 1);
    assert_eq!(page["rows"][0]["name"], "한개발");

    send(&app, "POST", "/admins/search", Some(json!({ "term": "" }))).await;
    let (_, page) = send(&app, "POST", "/admins/sort", Some(json!({ "key": "last_login" }))).await;
    assert_eq!(page["sort"]["direction"], "asc");
    assert_eq!(page["rows"][0]["id"], "ADM004");

    let (_, page) = send(&app, "POST", "/admins/sort", Some(json!({ "key": "last_login" }))).await;
    assert_eq!(page["sort"]["direction"], "desc");
    assert_eq!(page["rows"][0]["id"], "ADM005");

    let (status, err) = send(&app, "POST", "/admins/sort", Some(json!({ "key": "salary" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["code"], "validation");
}

#[tokio::test]
async fn page_route_clamps() {
    let (app, _) = test_app();
    let (_, page) = send(&app, "POST", "/devices/page", Some(json!({ "page": 40 }))).await;
    assert_eq!(page["current_page"], 2);
    assert_eq!(page["rows"][0]["id"], "DEV004");
}

#[tokio::test]
async fn create_update_and_delete_flow() {
    let (app, state) = test_app();
    let mut events = state.events.subscribe();

    let (status, created) = send(
        &app,
        "POST",
        "/admins",
        Some(json!({ "name": "오신입", "email": "new@example.com", "department": "품질 부서" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], "ADM009");
    assert!(matches!(
        events.try_recv().expect("event"),
        DashboardEvent::RecordsChanged { collection } if collection == "admins"
    ));

    let (status, err) = send(&app, "POST", "/admins", Some(json!({ "name": "이름만" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["code"], "validation");

    let (status, row) = send(
        &app,
        "PATCH",
        "/admins/ADM009",
        Some(json!({ "role": "super_admin" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(row["role"], "super_admin");

    let (status, pending) = send(&app, "POST", "/admins/ADM009/delete", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pending["pending"], "ADM009");

    let (_, cancelled) = send(&app, "POST", "/admins/delete/cancel", None).await;
    assert!(cancelled["pending"].is_null());
    let (_, removed) = send(&app, "POST", "/admins/delete/confirm", None).await;
    assert!(removed.is_null());
    assert_eq!(state.dashboard.lock().await.admins().len(), 9);

    send(&app, "POST", "/admins/ADM009/delete", None).await;
    let (status, removed) = send(&app, "POST", "/admins/delete/confirm", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed["id"], "ADM009");
    assert_eq!(state.dashboard.lock().await.admins().len(), 8);

    let (status, err) = send(&app, "POST", "/admins/ADM404/delete", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err["code"], "not_found");
}

#[tokio::test]
async fn project_stage_routes() {
    let (app, state) = test_app();
    let mut events = state.events.subscribe();

    let (status, view) = send(&app, "GET", "/projects/1/lifecycle", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["stage"], "design");
    assert_eq!(view["progress"], 25);

    let (status, view) = send(
        &app,
        "POST",
        "/projects/1/stage",
        Some(json!({ "stage": "production" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["progress"], 50);
    assert!(matches!(
        events.try_recv().expect("event"),
        DashboardEvent::StageChanged { stage: Stage::Production, .. }
    ));

    let (status, err) = send(
        &app,
        "POST",
        "/projects/1/stage",
        Some(json!({ "stage": "complete" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(err["code"], "conflict");

    let (_, page) = send(&app, "GET", "/projects", None).await;
    assert_eq!(page["rows"][0]["status"], "진행중 - 제작");
}

#[tokio::test]
async fn stock_movement_routes() {
    let (app, state) = test_app();
    let on_hand = state.dashboard.lock().await.inventory().records()[0].stock;

    let (status, item) = send(
        &app,
        "POST",
        "/inventory/INV-1000/movements",
        Some(json!({ "kind": "incoming", "quantity": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item["stock"], on_hand + 5);

    let (status, _) = send(
        &app,
        "POST",
        "/inventory/INV-1000/movements",
        Some(json!({ "kind": "outgoing", "project_id": "3", "quantity": on_hand + 6 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, totals) = send(&app, "GET", "/inventory/ledger", None).await;
    assert_eq!(totals["incoming"], 157);
    assert_eq!(totals["outgoing"], 112);

    let (status, _) = send(
        &app,
        "POST",
        "/print-materials/MAT-1000/movements",
        Some(json!({ "kind": "incoming", "quantity_g": 10, "quantity_cc": 100 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, totals) = send(&app, "GET", "/print-materials/ledger", None).await;
    assert_eq!(totals["incoming"], 129);

    let (_, chart) = send(&app, "GET", "/print-materials/chart?filter=all", None).await;
    assert_eq!(chart.as_array().expect("points").len(), 30);
    let (_, chart) = send(&app, "GET", "/print-materials/chart?filter=%EC%86%8C%EC%9E%AC%203", None).await;
    // 소재 3, 30
    assert_eq!(chart.as_array().expect("points").len(), 2);
}

#[tokio::test]
async fn monitoring_and_alert_routes() {
    let (app, state) = test_app();

    let (status, snapshot) = send(&app, "GET", "/monitoring", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(snapshot["cpu"].as_array().expect("cpu").len(), 10);

    let (status, _) = send(&app, "POST", "/monitoring/refresh", None).await;
    assert_eq!(status, StatusCode::OK);

    let raised = {
        let mut dashboard = state.dashboard.lock().await;
        let now = chrono::Utc::now();
        dashboard.scan_alerts(now.date_naive(), now)
    };
    // DEV003 holds 120cc, under the default threshold
    assert!(raised.iter().any(|alert: &Alert| alert.subject == "DEV003"));

    let (_, list) = send(&app, "GET", "/monitoring/alerts", None).await;
    let unread = list["unread"].as_u64().expect("unread");
    assert_eq!(unread as usize, raised.len());

    let first = raised[0].id.0;
    let (status, alert) = send(&app, "POST", &format!("/monitoring/alerts/{first}/read"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(alert["read"], true);

    let (status, _) = send(&app, "POST", "/monitoring/alerts/999/read", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, marked) = send(&app, "POST", "/monitoring/alerts/read-all", None).await;
    assert_eq!(marked["marked"].as_u64(), Some(unread - 1));
    let (_, list) = send(&app, "GET", "/monitoring/alerts", None).await;
    assert_eq!(list["unread"], 0);
}

#[tokio::test]
async fn telemetry_step_publishes_snapshot() {
    let state = test_state();
    let mut events = state.events.subscribe();
    telemetry_step(&state).await;
    assert!(matches!(
        events.try_recv().expect("event"),
        DashboardEvent::TelemetryUpdated { .. }
    ));
}

#[tokio::test]
async fn telemetry_task_stops_when_aborted() {
    let state = test_state();
    let handle = spawn_telemetry(state, Duration::from_millis(10));
    handle.abort();
    let joined = handle.await;
    assert!(joined.expect_err("aborted").is_cancelled());
}

#[tokio::test]
async fn oversized_bodies_are_rejected() {
    let (app, _) = test_app();
    let term = "x".repeat(MAX_BODY_BYTES + 1);
    let (status, _) = send(&app, "POST", "/admins/search", Some(json!({ "term": term }))).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

fn changed(collection: &str) -> DashboardEvent {
    DashboardEvent::RecordsChanged {
        collection: collection.into(),
    }
}

#[tokio::test]
async fn lagging_socket_skips_ahead_instead_of_stopping() {
    let (tx, mut rx) = tokio::sync::broadcast::channel(2);
    for collection in ["admins", "devices", "projects", "inventory"] {
        tx.send(changed(collection)).expect("send");
    }

    assert!(matches!(
        next_event(&mut rx).await,
        Some(DashboardEvent::RecordsChanged { collection }) if collection == "projects"
    ));
    assert!(matches!(
        next_event(&mut rx).await,
        Some(DashboardEvent::RecordsChanged { collection }) if collection == "inventory"
    ));

    tx.send(changed("admins")).expect("send");
    drop(tx);
    assert!(next_event(&mut rx).await.is_some());
    assert!(next_event(&mut rx).await.is_none());
}
