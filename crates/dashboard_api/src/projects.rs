use shared::{
    domain::{Project, ProjectId},
    error::ApiError,
    protocol::LifecycleView,
    Stage,
};
use tracing::info;

use crate::{parse_id, Dashboard};

pub fn lifecycle(dashboard: &Dashboard, raw_id: &str) -> Result<LifecycleView, ApiError> {
    let id = parse_id::<Project>(raw_id)?;
    dashboard
        .projects()
        .get(&id)
        .map(LifecycleView::from)
        .ok_or_else(|| ApiError::not_found(format!("project {id} not found")))
}

/// Moves a project to an adjacent stage. Returns the updated view and the
/// stage it left.
pub fn change_stage(
    dashboard: &mut Dashboard,
    raw_id: &str,
    to: Stage,
) -> Result<(LifecycleView, Stage), ApiError> {
    let id: ProjectId = parse_id::<Project>(raw_id)?;
    let outcome = dashboard.projects.modify(&id, |project| {
        let previous = project.lifecycle.transition(to)?;
        Ok::<_, lifecycle::TransitionError>((LifecycleView::from(&*project), previous))
    })?;
    let (view, previous) = outcome?;
    info!(project = %id, from = %previous, to = %to, "project stage changed");
    Ok((view, previous))
}

#[cfg(test)]
#[path = "tests/projects_tests.rs"]
mod tests;
