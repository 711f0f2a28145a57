use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use axum::{
    extract::{ws::WebSocket, Path, Query, State, WebSocketUpgrade},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};
use dashboard_api::{admins, ledger, projects, Collection, Dashboard};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use shared::{
    domain::{Admin, Device, InventoryItem, PrintMaterial, Project},
    error::{ApiError, ErrorCode},
    protocol::{
        AdminSummary, Alert, AlertId, ChartPoint, CreatedResponse, DashboardEvent,
        InventoryMovement, LedgerTotals, LifecycleView, MaterialMovement, MetricsSnapshot, Page,
        PageRequest, SearchRequest, SortRequest, StageChangeRequest,
    },
};
use tokio::sync::broadcast::{self, error::RecvError};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{info, warn};

mod app_state;
mod config;

use app_state::{spawn_telemetry, AppState};
use config::load_settings;

const MAX_BODY_BYTES: usize = 64 * 1024;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

#[derive(Debug, Serialize, Deserialize)]
struct PendingDelete {
    pending: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct AlertList {
    unread: usize,
    alerts: Vec<Alert>,
}

#[derive(Debug, Serialize, Deserialize)]
struct MarkedRead {
    marked: usize,
}

#[derive(Debug, Deserialize)]
struct ChartQuery {
    filter: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let dashboard = Dashboard::seeded(settings.dashboard_options());
    let state = Arc::new(AppState::new(dashboard));
    let telemetry = spawn_telemetry(
        state.clone(),
        Duration::from_secs(settings.telemetry_interval_secs.max(1)),
    );
    let app = build_router(state);

    let addr: SocketAddr = settings
        .bind_addr
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.bind_addr))?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    telemetry.abort();
    info!("server stopped");
    served?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // no signal handler: run until the process is killed
        std::future::pending::<()>().await;
    }
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .nest(
            "/admins",
            collection_routes::<Admin>().route("/summary", get(admin_summary)),
        )
        .nest("/devices", collection_routes::<Device>())
        .nest(
            "/projects",
            collection_routes::<Project>()
                .route("/:id/lifecycle", get(project_lifecycle))
                .route("/:id/stage", post(change_project_stage)),
        )
        .nest(
            "/inventory",
            collection_routes::<InventoryItem>()
                .route("/:id/movements", post(inventory_movement))
                .route("/ledger", get(inventory_ledger)),
        )
        .nest(
            "/print-materials",
            collection_routes::<PrintMaterial>()
                .route("/:id/movements", post(material_movement))
                .route("/ledger", get(material_ledger))
                .route("/chart", get(material_chart)),
        )
        .route("/monitoring", get(monitoring_snapshot))
        .route("/monitoring/refresh", post(monitoring_refresh))
        .route("/monitoring/alerts", get(list_alerts))
        .route("/monitoring/alerts/read-all", post(mark_all_alerts_read))
        .route("/monitoring/alerts/:id/read", post(mark_alert_read))
        .route("/ws", get(ws_handler))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}

/// List, search, sort, page, edit and delete routes shared by every screen.
fn collection_routes<C>() -> Router<Arc<AppState>>
where
    C: Collection + Send + 'static,
    C::Row: Send,
    C::Draft: DeserializeOwned + Send,
    C::Patch: DeserializeOwned + Send,
{
    Router::new()
        .route("/", get(list_records::<C>).post(create_record::<C>))
        .route("/:id", patch(update_record::<C>))
        .route("/search", post(search_records::<C>))
        .route("/sort", post(sort_records::<C>))
        .route("/page", post(page_records::<C>))
        .route("/:id/delete", post(request_delete::<C>))
        .route("/delete/confirm", post(confirm_delete::<C>))
        .route("/delete/cancel", post(cancel_delete::<C>))
}

fn reject(error: ApiError) -> (StatusCode, Json<ApiError>) {
    let status = match error.code {
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(error))
}

async fn healthz() -> &'static str {
    "ok"
}

async fn list_records<C>(State(state): State<Arc<AppState>>) -> Json<Page<C::Row>>
where
    C: Collection + Send + 'static,
{
    let dashboard = state.dashboard.lock().await;
    Json(dashboard_api::view::<C>(&dashboard))
}

async fn create_record<C>(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<C::Draft>,
) -> Result<(StatusCode, Json<CreatedResponse>), (StatusCode, Json<ApiError>)>
where
    C: Collection + Send + 'static,
    C::Draft: DeserializeOwned + Send,
{
    let id = {
        let mut dashboard = state.dashboard.lock().await;
        dashboard_api::create::<C>(&mut dashboard, draft).map_err(reject)?
    };
    state.publish(records_changed::<C>());
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse { id: id.to_string() }),
    ))
}

async fn update_record<C>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<C::Patch>,
) -> ApiResult<C::Row>
where
    C: Collection + Send + 'static,
    C::Patch: DeserializeOwned + Send,
{
    let row = {
        let mut dashboard = state.dashboard.lock().await;
        dashboard_api::update::<C>(&mut dashboard, &id, patch).map_err(reject)?
    };
    state.publish(records_changed::<C>());
    Ok(Json(row))
}

async fn search_records<C>(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SearchRequest>,
) -> ApiResult<Page<C::Row>>
where
    C: Collection + Send + 'static,
{
    let mut dashboard = state.dashboard.lock().await;
    dashboard_api::search::<C>(&mut dashboard, &request)
        .map(Json)
        .map_err(reject)
}

async fn sort_records<C>(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SortRequest>,
) -> ApiResult<Page<C::Row>>
where
    C: Collection + Send + 'static,
{
    let mut dashboard = state.dashboard.lock().await;
    dashboard_api::sort::<C>(&mut dashboard, &request.key)
        .map(|(_, page)| Json(page))
        .map_err(reject)
}

async fn page_records<C>(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PageRequest>,
) -> Json<Page<C::Row>>
where
    C: Collection + Send + 'static,
{
    let mut dashboard = state.dashboard.lock().await;
    Json(dashboard_api::go_to_page::<C>(&mut dashboard, request.page))
}

async fn request_delete<C>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<PendingDelete>
where
    C: Collection + Send + 'static,
{
    let mut dashboard = state.dashboard.lock().await;
    dashboard_api::request_delete::<C>(&mut dashboard, &id).map_err(reject)?;
    Ok(Json(PendingDelete { pending: Some(id) }))
}

async fn confirm_delete<C>(State(state): State<Arc<AppState>>) -> ApiResult<Option<C::Row>>
where
    C: Collection + Send + 'static,
    C::Row: Send,
{
    let removed = {
        let mut dashboard = state.dashboard.lock().await;
        dashboard_api::confirm_delete::<C>(&mut dashboard).map_err(reject)?
    };
    if removed.is_some() {
        state.publish(records_changed::<C>());
    }
    Ok(Json(removed))
}

async fn cancel_delete<C>(State(state): State<Arc<AppState>>) -> Json<PendingDelete>
where
    C: Collection + Send + 'static,
{
    let mut dashboard = state.dashboard.lock().await;
    dashboard_api::cancel_delete::<C>(&mut dashboard);
    Json(PendingDelete { pending: None })
}

fn records_changed<C: Collection>() -> DashboardEvent {
    DashboardEvent::RecordsChanged {
        collection: C::NAME.to_string(),
    }
}

async fn admin_summary(State(state): State<Arc<AppState>>) -> Json<AdminSummary> {
    let dashboard = state.dashboard.lock().await;
    Json(admins::summary(&dashboard))
}

async fn project_lifecycle(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<LifecycleView> {
    let dashboard = state.dashboard.lock().await;
    projects::lifecycle(&dashboard, &id).map(Json).map_err(reject)
}

async fn change_project_stage(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<StageChangeRequest>,
) -> ApiResult<LifecycleView> {
    let (view, _) = {
        let mut dashboard = state.dashboard.lock().await;
        projects::change_stage(&mut dashboard, &id, request.stage).map_err(reject)?
    };
    state.publish(DashboardEvent::StageChanged {
        project_id: view.project_id,
        stage: view.stage,
    });
    Ok(Json(view))
}

async fn inventory_movement(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(movement): Json<InventoryMovement>,
) -> ApiResult<InventoryItem> {
    let item = {
        let mut dashboard = state.dashboard.lock().await;
        ledger::record_inventory_movement(&mut dashboard, &id, &movement).map_err(reject)?
    };
    state.publish(records_changed::<InventoryItem>());
    Ok(Json(item))
}

async fn inventory_ledger(State(state): State<Arc<AppState>>) -> Json<LedgerTotals> {
    Json(state.dashboard.lock().await.inventory_totals())
}

async fn material_movement(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(movement): Json<MaterialMovement>,
) -> ApiResult<PrintMaterial> {
    let material = {
        let mut dashboard = state.dashboard.lock().await;
        ledger::record_material_movement(&mut dashboard, &id, &movement).map_err(reject)?
    };
    state.publish(records_changed::<PrintMaterial>());
    Ok(Json(material))
}

async fn material_ledger(State(state): State<Arc<AppState>>) -> Json<LedgerTotals> {
    Json(state.dashboard.lock().await.material_totals())
}

async fn material_chart(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ChartQuery>,
) -> Json<Vec<ChartPoint>> {
    let dashboard = state.dashboard.lock().await;
    Json(ledger::material_chart(&dashboard, query.filter.as_deref()))
}

async fn monitoring_snapshot(State(state): State<Arc<AppState>>) -> Json<MetricsSnapshot> {
    Json(state.dashboard.lock().await.monitoring().snapshot())
}

async fn monitoring_refresh(State(state): State<Arc<AppState>>) -> Json<MetricsSnapshot> {
    let snapshot = state.dashboard.lock().await.refresh_telemetry();
    state.publish(DashboardEvent::TelemetryUpdated {
        snapshot: snapshot.clone(),
    });
    Json(snapshot)
}

async fn list_alerts(State(state): State<Arc<AppState>>) -> Json<AlertList> {
    let dashboard = state.dashboard.lock().await;
    Json(AlertList {
        unread: dashboard.alerts().unread_count(),
        alerts: dashboard.alerts().list(),
    })
}

async fn mark_alert_read(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Alert> {
    let mut dashboard = state.dashboard.lock().await;
    dashboard
        .alerts_mut()
        .mark_read(AlertId(id))
        .map(|alert| Json(alert.clone()))
        .map_err(reject)
}

async fn mark_all_alerts_read(State(state): State<Arc<AppState>>) -> Json<MarkedRead> {
    let marked = state.dashboard.lock().await.alerts_mut().mark_all_read();
    Json(MarkedRead { marked })
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| ws_connection(state, socket))
}

async fn ws_connection(state: Arc<AppState>, socket: WebSocket) {
    use axum::extract::ws::Message;
    use futures::{SinkExt, StreamExt};

    let (mut sender, mut receiver) = socket.split();
    let mut events_rx = state.events.subscribe();

    let send_task = tokio::spawn(async move {
        while let Some(event) = next_event(&mut events_rx).await {
            let text = match serde_json::to_string(&event) {
                Ok(v) => v,
                Err(_) => continue,
            };
            if sender.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(_msg)) = receiver.next().await {}

    send_task.abort();
}

/// Next event for one socket. A lagging receiver skips what it missed and
/// keeps going; `None` once the channel is closed.
async fn next_event(
    events_rx: &mut broadcast::Receiver<DashboardEvent>,
) -> Option<DashboardEvent> {
    loop {
        match events_rx.recv().await {
            Ok(event) => return Some(event),
            Err(RecvError::Lagged(skipped)) => warn!(skipped, "websocket client lagging"),
            Err(RecvError::Closed) => return None,
        }
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
