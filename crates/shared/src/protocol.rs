use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use lifecycle::{Stage, StagePanel};
use serde::{Deserialize, Serialize};

use crate::domain::{Project, ProjectId, ProjectKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Column-header indicator for the active sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortIndicator {
    pub key: String,
    pub direction: SortDirection,
}

/// One rendered page of a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub rows: Vec<T>,
    pub current_page: usize,
    pub total_pages: usize,
    /// Records matching the current search, across all pages.
    pub total_records: usize,
    pub page_size: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortIndicator>,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            rows: self.rows.into_iter().map(f).collect(),
            current_page: self.current_page,
            total_pages: self.total_pages,
            total_records: self.total_records,
            page_size: self.page_size,
            sort: self.sort,
        }
    }

    /// 1-based position of the first row, or 0 on an empty page.
    pub fn first_row(&self) -> usize {
        if self.rows.is_empty() {
            0
        } else {
            (self.current_page - 1) * self.page_size + 1
        }
    }

    pub fn last_row(&self) -> usize {
        if self.rows.is_empty() {
            0
        } else {
            self.first_row() + self.rows.len() - 1
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub term: String,
    /// Overrides the collection's searchable columns when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortRequest {
    pub key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: String,
}

// ---------------------------------------------------------------------------
// Projects

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRow {
    pub id: ProjectId,
    pub client: String,
    pub title: String,
    pub kind: ProjectKind,
    pub worker: String,
    pub registrar: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub stage: Stage,
    pub status: String,
    pub progress: u8,
}

impl From<&Project> for ProjectRow {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id,
            client: project.client.clone(),
            title: project.title.clone(),
            kind: project.kind,
            worker: project.worker.clone(),
            registrar: project.registrar.clone(),
            start_date: project.start_date,
            end_date: project.end_date,
            stage: project.lifecycle.stage(),
            status: project.status_label().to_string(),
            progress: project.lifecycle.progress_percent(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifecycleView {
    pub project_id: ProjectId,
    pub stage: Stage,
    pub status: String,
    pub progress: u8,
    pub panel: StagePanel,
    pub enabled_transitions: Vec<Stage>,
}

impl From<&Project> for LifecycleView {
    fn from(project: &Project) -> Self {
        let lifecycle = &project.lifecycle;
        Self {
            project_id: project.id,
            stage: lifecycle.stage(),
            status: lifecycle.status_label().to_string(),
            progress: lifecycle.progress_percent(),
            panel: lifecycle.panel(),
            enabled_transitions: lifecycle.enabled_transitions().to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageChangeRequest {
    pub stage: Stage,
}

// ---------------------------------------------------------------------------
// Admins

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestLogin {
    pub name: String,
    pub at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminSummary {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub super_admins: usize,
    pub latest_login: Option<LatestLogin>,
}

// ---------------------------------------------------------------------------
// Stock ledgers

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InventoryMovementKind {
    Incoming,
    Outgoing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryMovement {
    pub kind: InventoryMovementKind,
    /// Free-text project reference; not checked against the project list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    pub quantity: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialMovementKind {
    Incoming,
    Outgoing,
    Disposal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialMovement {
    pub kind: MaterialMovementKind,
    #[serde(default)]
    pub quantity_g: u32,
    #[serde(default)]
    pub quantity_cc: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LedgerTotals {
    pub incoming: u32,
    pub outgoing: u32,
    pub disposal: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub name: String,
    pub cc: u32,
}

// ---------------------------------------------------------------------------
// Monitoring

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemHealth {
    Healthy,
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub cpu: Vec<u8>,
    pub memory: Vec<u8>,
    pub disk: Vec<u8>,
    pub network: Vec<u8>,
    pub health: SystemHealth,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    LowMaterial,
    Deadline,
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: AlertId,
    pub kind: AlertKind,
    /// Record the alert is about, e.g. a device or project id.
    pub subject: String,
    pub title: String,
    pub description: String,
    pub raised_at: DateTime<Utc>,
    pub read: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum DashboardEvent {
    TelemetryUpdated { snapshot: MetricsSnapshot },
    AlertRaised { alert: Alert },
    RecordsChanged { collection: String },
    StageChanged { project_id: ProjectId, stage: Stage },
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
