use std::{sync::Arc, time::Duration};

use chrono::Utc;
use dashboard_api::Dashboard;
use shared::protocol::DashboardEvent;
use tokio::{
    sync::{broadcast, Mutex},
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};
use tracing::{debug, info};

const EVENT_CAPACITY: usize = 256;

pub(crate) struct AppState {
    pub(crate) dashboard: Mutex<Dashboard>,
    pub(crate) events: broadcast::Sender<DashboardEvent>,
}

impl AppState {
    pub(crate) fn new(dashboard: Dashboard) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            dashboard: Mutex::new(dashboard),
            events,
        }
    }

    /// Publishes to every connected socket. Having no listeners is fine.
    pub(crate) fn publish(&self, event: DashboardEvent) {
        let _ = self.events.send(event);
    }
}

/// Advances telemetry every `period`, then scans for new alerts. The task
/// runs until its handle is aborted.
pub(crate) fn spawn_telemetry(state: Arc<AppState>, period: Duration) -> JoinHandle<()> {
    info!(period_secs = period.as_secs(), "telemetry task started");
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // the first tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            telemetry_step(&state).await;
        }
    })
}

pub(crate) async fn telemetry_step(state: &AppState) {
    let now = Utc::now();
    let (snapshot, raised) = {
        let mut dashboard = state.dashboard.lock().await;
        let snapshot = dashboard.tick_telemetry();
        let raised = dashboard.scan_alerts(now.date_naive(), now);
        (snapshot, raised)
    };
    debug!(health = ?snapshot.health, alerts = raised.len(), "telemetry tick");
    state.publish(DashboardEvent::TelemetryUpdated { snapshot });
    for alert in raised {
        state.publish(DashboardEvent::AlertRaised { alert });
    }
}
