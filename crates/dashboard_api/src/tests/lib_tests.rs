use super::*;

use shared::{
    domain::{AdminDraft, AdminPatch, DeviceDraft, MaterialDraft},
    error::ErrorCode,
};

fn dashboard() -> Dashboard {
    Dashboard::seeded(DashboardOptions::default())
}

#[test]
fn seeded_dashboard_opens_every_screen_on_page_one() {
    let dashboard = dashboard();
    let admins = view::<Admin>(&dashboard);
    assert_eq!(admins.total_records, 8);
    assert_eq!(admins.total_pages, 2);
    assert_eq!(admins.rows.len(), 5);

    let devices = view::<Device>(&dashboard);
    assert_eq!(devices.total_pages, 2);
    assert_eq!(devices.rows.len(), 3);

    let projects = view::<Project>(&dashboard);
    assert_eq!(projects.page_size, 5);
    let sort = projects.sort.expect("projects sort by id");
    assert_eq!(sort.key, "id");
    assert_eq!(sort.direction, SortDirection::Asc);

    assert_eq!(view::<InventoryItem>(&dashboard).total_pages, 3);
    assert_eq!(view::<PrintMaterial>(&dashboard).total_pages, 3);
}

#[test]
fn search_by_named_columns() {
    let mut dashboard = dashboard();
    let page = search::<Admin>(
        &mut dashboard,
        &SearchRequest {
            term: "마케팅".into(),
            fields: Some(vec!["department".into()]),
        },
    )
    .expect("search");
    assert_eq!(page.total_records, 2);

    let err = search::<Admin>(
        &mut dashboard,
        &SearchRequest {
            term: "x".into(),
            fields: Some(vec!["salary".into()]),
        },
    )
    .expect_err("unknown column");
    assert_eq!(err.code, ErrorCode::Validation);
}

#[test]
fn sort_reports_the_direction_it_applied() {
    let mut dashboard = dashboard();
    let (direction, page) = sort::<Device>(&mut dashboard, "usage").expect("sort");
    assert_eq!(direction, SortDirection::Asc);
    assert_eq!(page.rows[0].id.0, "DEV004");

    let (direction, page) = sort::<Device>(&mut dashboard, "usage").expect("sort again");
    assert_eq!(direction, SortDirection::Desc);
    assert_eq!(page.rows[0].id.0, "DEV003");

    assert!(sort::<Device>(&mut dashboard, "colour").is_err());
}

#[test]
fn go_to_page_clamps() {
    let mut dashboard = dashboard();
    assert_eq!(go_to_page::<Admin>(&mut dashboard, 9).current_page, 2);
    assert_eq!(go_to_page::<Admin>(&mut dashboard, 0).current_page, 1);
}

#[test]
fn create_update_and_two_phase_delete() {
    let mut dashboard = dashboard();
    let id = create::<Admin>(
        &mut dashboard,
        AdminDraft {
            name: "오신입".into(),
            email: "new@example.com".into(),
            department: "품질 부서".into(),
            ..Default::default()
        },
    )
    .expect("create");
    assert_eq!(id.0, "ADM009");

    let row = update::<Admin>(
        &mut dashboard,
        "ADM009",
        AdminPatch {
            department: Some("QA 부서".into()),
            ..Default::default()
        },
    )
    .expect("update");
    assert_eq!(row.department, "QA 부서");

    request_delete::<Admin>(&mut dashboard, "ADM009").expect("request");
    assert_eq!(dashboard.admins().len(), 9);
    assert_eq!(cancel_delete::<Admin>(&mut dashboard), Some("ADM009".into()));
    assert_eq!(confirm_delete::<Admin>(&mut dashboard).expect("noop"), None);

    request_delete::<Admin>(&mut dashboard, "ADM009").expect("request");
    let removed = confirm_delete::<Admin>(&mut dashboard)
        .expect("confirm")
        .expect("removed");
    assert_eq!(removed.id.0, "ADM009");
    assert_eq!(dashboard.admins().len(), 8);
}

#[test]
fn errors_carry_api_codes() {
    let mut dashboard = dashboard();
    let err = create::<Device>(
        &mut dashboard,
        DeviceDraft {
            id: Some("DEV001".into()),
            name: "중복".into(),
        },
    )
    .expect_err("duplicate id");
    assert_eq!(err.code, ErrorCode::Validation);

    let err = request_delete::<Device>(&mut dashboard, "DEV999").expect_err("missing");
    assert_eq!(err.code, ErrorCode::NotFound);

    let err = update::<Project>(&mut dashboard, "abc", Default::default()).expect_err("bad id");
    assert_eq!(err.code, ErrorCode::Validation);
}

#[test]
fn new_material_gets_the_next_code() {
    let mut dashboard = dashboard();
    let id = create::<PrintMaterial>(
        &mut dashboard,
        MaterialDraft {
            name: "PLA 화이트".into(),
            ..Default::default()
        },
    )
    .expect("create");
    assert_eq!(id.0, "MAT-1030");
    let material = dashboard.materials().get(&id).expect("stored");
    assert_eq!(material.color, shared::domain::DEFAULT_MATERIAL_COLOR);
}

#[test]
fn empty_dashboard_has_no_records() {
    let dashboard = Dashboard::empty(DashboardOptions::default());
    assert!(dashboard.admins().is_empty());
    assert_eq!(dashboard.inventory_totals(), LedgerTotals::default());
    assert_eq!(view::<Project>(&dashboard).total_pages, 1);
}

#[test]
fn refresh_replaces_every_series() {
    let mut dashboard = dashboard();
    let snapshot = dashboard.refresh_telemetry();
    assert_eq!(snapshot.cpu.len(), monitoring::SERIES_LEN);
    let ticked = dashboard.tick_telemetry();
    assert_eq!(ticked.cpu[..monitoring::SERIES_LEN - 1], snapshot.cpu[1..]);
}
