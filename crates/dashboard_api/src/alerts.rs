//! Notification centre fed by periodic scans of devices, projects and
//! telemetry.

use chrono::{DateTime, NaiveDate, Utc};
use shared::{
    error::ApiError,
    protocol::{Alert, AlertId, AlertKind, SystemHealth},
    Stage,
};
use tracing::{debug, warn};

use crate::Dashboard;

/// Unfinished projects ending within this many days raise a deadline alert.
pub const DEADLINE_WINDOW_DAYS: i64 = 3;

#[derive(Debug, Clone, Default)]
pub struct AlertCenter {
    alerts: Vec<Alert>,
    next_id: i64,
}

impl AlertCenter {
    pub fn new() -> Self {
        Self {
            alerts: Vec::new(),
            next_id: 1,
        }
    }

    /// Raises an alert unless one for the same kind and subject exists.
    pub fn raise(
        &mut self,
        kind: AlertKind,
        subject: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Option<&Alert> {
        let subject = subject.into();
        if self
            .alerts
            .iter()
            .any(|alert| alert.kind == kind && alert.subject == subject)
        {
            return None;
        }

        let id = AlertId(self.next_id.max(1));
        self.next_id = id.0 + 1;
        self.alerts.push(Alert {
            id,
            kind,
            subject,
            title: title.into(),
            description: description.into(),
            raised_at: at,
            read: false,
        });
        debug!(id = id.0, ?kind, "alert raised");
        self.alerts.last()
    }

    /// Newest first.
    pub fn list(&self) -> Vec<Alert> {
        self.alerts.iter().rev().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    pub fn unread_count(&self) -> usize {
        self.alerts.iter().filter(|alert| !alert.read).count()
    }

    pub fn mark_read(&mut self, id: AlertId) -> Result<&Alert, ApiError> {
        match self.alerts.iter_mut().find(|alert| alert.id == id) {
            Some(alert) => {
                alert.read = true;
                Ok(alert)
            }
            None => {
                warn!(id = id.0, "alert not found");
                Err(ApiError::not_found(format!("alert {} not found", id.0)))
            }
        }
    }

    /// Returns how many alerts were unread.
    pub fn mark_all_read(&mut self) -> usize {
        let mut changed = 0;
        for alert in self.alerts.iter_mut().filter(|alert| !alert.read) {
            alert.read = true;
            changed += 1;
        }
        changed
    }
}

struct Candidate {
    kind: AlertKind,
    subject: String,
    title: &'static str,
    description: String,
}

impl Dashboard {
    /// Checks material levels, deadlines and system health, returning the
    /// alerts raised by this pass.
    pub fn scan_alerts(&mut self, today: NaiveDate, now: DateTime<Utc>) -> Vec<Alert> {
        let threshold = self.low_material_threshold();
        let mut candidates = Vec::new();

        for device in self.devices().records() {
            if device.remaining_material < threshold {
                candidates.push(Candidate {
                    kind: AlertKind::LowMaterial,
                    subject: device.id.to_string(),
                    title: "3D 프린터 소재 부족",
                    description: format!(
                        "{}의 소재가 {}cc 남았습니다. 소재를 보충해주세요.",
                        device.name, device.remaining_material
                    ),
                });
            }
        }

        for project in self.projects().records() {
            if project.lifecycle.stage() == Stage::Complete {
                continue;
            }
            let Some(end) = project.end_date else {
                continue;
            };
            let days_left = (end - today).num_days();
            if (0..=DEADLINE_WINDOW_DAYS).contains(&days_left) {
                candidates.push(Candidate {
                    kind: AlertKind::Deadline,
                    subject: project.id.to_string(),
                    title: "프로젝트 마감일 임박",
                    description: format!(
                        "{} 프로젝트의 마감일이 {days_left}일 남았습니다.",
                        project.title
                    ),
                });
            }
        }

        let health = self.monitoring().health();
        let system = match health {
            SystemHealth::Healthy => None,
            SystemHealth::Warning => Some(("warning", "시스템 상태 경고")),
            SystemHealth::Critical => Some(("critical", "시스템 상태 위험")),
        };
        if let Some((subject, title)) = system {
            let snapshot = self.monitoring().snapshot();
            let cpu = snapshot.cpu.last().copied().unwrap_or_default();
            let memory = snapshot.memory.last().copied().unwrap_or_default();
            candidates.push(Candidate {
                kind: AlertKind::System,
                subject: subject.to_string(),
                title,
                description: format!("CPU {cpu}%, 메모리 {memory}% 사용 중입니다."),
            });
        }

        let raised: Vec<Alert> = candidates
            .into_iter()
            .filter_map(|candidate| {
                self.alerts_mut()
                    .raise(
                        candidate.kind,
                        candidate.subject,
                        candidate.title,
                        candidate.description,
                        now,
                    )
                    .cloned()
            })
            .collect();
        if !raised.is_empty() {
            debug!(count = raised.len(), "alert scan raised alerts");
        }
        raised
    }
}

#[cfg(test)]
#[path = "tests/alerts_tests.rs"]
mod tests;
