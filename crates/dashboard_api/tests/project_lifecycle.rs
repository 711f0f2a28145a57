use dashboard_api::{create, go_to_page, projects, view, Dashboard, DashboardOptions};
use shared::{
    domain::{Project, ProjectDraft, ProjectKind},
    error::ErrorCode,
    Stage,
};

fn new_project(dashboard: &mut Dashboard) -> String {
    create::<Project>(
        dashboard,
        ProjectDraft {
            client: "한빛정밀".into(),
            title: "브래킷 시제품".into(),
            kind: ProjectKind::Security,
            worker: "김철수".into(),
            registrar: "이영희".into(),
            start_date: "2025-06-01".parse().ok(),
            end_date: "2025-06-30".parse().ok(),
        },
    )
    .expect("create project")
    .to_string()
}

#[test]
fn project_walks_through_every_stage() {
    let mut dashboard = Dashboard::seeded(DashboardOptions::default());
    let id = new_project(&mut dashboard);
    assert_eq!(id, "11");

    let view = projects::lifecycle(&dashboard, &id).expect("lifecycle");
    assert_eq!(view.stage, Stage::Design);
    assert_eq!(view.progress, 25);

    let mut progress = Vec::new();
    for stage in [Stage::Production, Stage::FinalReview, Stage::Complete] {
        let (view, _) = projects::change_stage(&mut dashboard, &id, stage).expect("advance");
        progress.push(view.progress);
    }
    assert_eq!(progress, vec![50, 75, 100]);

    let done = projects::lifecycle(&dashboard, &id).expect("lifecycle");
    assert_eq!(done.status, "완료");
    assert_eq!(done.enabled_transitions, vec![Stage::FinalReview]);

    let err = projects::change_stage(&mut dashboard, &id, Stage::Design).expect_err("no restart");
    assert_eq!(err.code, ErrorCode::Conflict);
    assert_eq!(
        projects::lifecycle(&dashboard, &id).expect("lifecycle").stage,
        Stage::Complete
    );
}

#[test]
fn new_project_appears_last_in_id_order() {
    let mut dashboard = Dashboard::seeded(DashboardOptions::default());
    new_project(&mut dashboard);
    let last_page = go_to_page::<Project>(&mut dashboard, usize::MAX);
    assert_eq!(last_page.current_page, 3);
    let row = last_page.rows.last().expect("row");
    assert_eq!(row.id.0, 11);
    assert_eq!(row.status, "진행중 - 설계");

    go_to_page::<Project>(&mut dashboard, 1);
    assert_eq!(view::<Project>(&dashboard).rows[0].id.0, 1);
}
