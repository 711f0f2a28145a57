use shared::{
    domain::{ActiveStatus, AdminRole},
    protocol::{AdminSummary, LatestLogin},
};

use crate::Dashboard;

/// Totals for the admin screen's summary cards.
pub fn summary(dashboard: &Dashboard) -> AdminSummary {
    let admins = dashboard.admins().records();
    let active = admins
        .iter()
        .filter(|admin| admin.status == ActiveStatus::Active)
        .count();
    let super_admins = admins
        .iter()
        .filter(|admin| admin.role == AdminRole::SuperAdmin)
        .count();
    let latest_login = admins
        .iter()
        .filter_map(|admin| admin.last_login.map(|at| (admin, at)))
        .max_by_key(|(_, at)| *at)
        .map(|(admin, at)| LatestLogin {
            name: admin.name.clone(),
            at,
        });

    AdminSummary {
        total: admins.len(),
        active,
        inactive: admins.len() - active,
        super_admins,
        latest_login,
    }
}

#[cfg(test)]
#[path = "tests/admins_tests.rs"]
mod tests;
