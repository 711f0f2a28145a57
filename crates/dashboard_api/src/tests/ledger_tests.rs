use super::*;

use shared::error::ErrorCode;

use crate::{create, DashboardOptions};
use shared::domain::{InventoryDraft, MaterialDraft};

fn dashboard() -> Dashboard {
    let mut dashboard = Dashboard::empty(DashboardOptions::default());
    create::<InventoryItem>(
        &mut dashboard,
        InventoryDraft {
            name: "볼트".into(),
            stock: 10,
        },
    )
    .expect("inventory");
    create::<PrintMaterial>(
        &mut dashboard,
        MaterialDraft {
            name: "PLA 블랙".into(),
            stock_g: 50,
            stock_cc: 400,
            color: Some("#000000".into()),
        },
    )
    .expect("material");
    dashboard
}

fn inbound(quantity: u32) -> InventoryMovement {
    InventoryMovement {
        kind: InventoryMovementKind::Incoming,
        project_id: None,
        quantity,
    }
}

fn outbound(quantity: u32) -> InventoryMovement {
    InventoryMovement {
        kind: InventoryMovementKind::Outgoing,
        project_id: Some("PRJ-7".into()),
        quantity,
    }
}

#[test]
fn inventory_movements_adjust_stock_and_totals() {
    let mut dashboard = dashboard();
    let item = record_inventory_movement(&mut dashboard, "INV-1000", &inbound(5)).expect("in");
    assert_eq!(item.stock, 15);
    let item = record_inventory_movement(&mut dashboard, "INV-1000", &outbound(15)).expect("out");
    assert_eq!(item.stock, 0);

    let totals = dashboard.inventory_totals();
    assert_eq!((totals.incoming, totals.outgoing), (1, 1));
}

#[test]
fn outgoing_beyond_stock_is_rejected() {
    let mut dashboard = dashboard();
    let err = record_inventory_movement(&mut dashboard, "INV-1000", &outbound(11))
        .expect_err("underflow");
    assert_eq!(err.code, ErrorCode::Validation);
    assert_eq!(dashboard.inventory().records()[0].stock, 10);
    assert_eq!(dashboard.inventory_totals().outgoing, 0);
}

#[test]
fn zero_quantity_and_unknown_items() {
    let mut dashboard = dashboard();
    assert_eq!(
        record_inventory_movement(&mut dashboard, "INV-1000", &inbound(0))
            .expect_err("zero")
            .code,
        ErrorCode::Validation
    );
    assert_eq!(
        record_inventory_movement(&mut dashboard, "INV-9999", &inbound(1))
            .expect_err("missing")
            .code,
        ErrorCode::NotFound
    );
}

#[test]
fn material_disposal_reduces_both_measures() {
    let mut dashboard = dashboard();
    let movement = MaterialMovement {
        kind: MaterialMovementKind::Disposal,
        quantity_g: 20,
        quantity_cc: 100,
    };
    let material = record_material_movement(&mut dashboard, "MAT-1000", &movement).expect("dispose");
    assert_eq!((material.stock_g, material.stock_cc), (30, 300));
    assert_eq!(dashboard.material_totals().disposal, 1);

    let too_much = MaterialMovement {
        kind: MaterialMovementKind::Outgoing,
        quantity_g: 1,
        quantity_cc: 301,
    };
    let err = record_material_movement(&mut dashboard, "MAT-1000", &too_much).expect_err("underflow");
    assert_eq!(err.code, ErrorCode::Validation);
    let stored = &dashboard.materials().records()[0];
    assert_eq!((stored.stock_g, stored.stock_cc), (30, 300));
    assert_eq!(dashboard.material_totals().outgoing, 0);
}

#[test]
fn seeded_ledgers_start_from_sample_totals() {
    let dashboard = Dashboard::seeded(DashboardOptions::default());
    assert_eq!(dashboard.inventory_totals().incoming, 156);
    assert_eq!(dashboard.inventory_totals().outgoing, 112);
    assert_eq!(dashboard.material_totals().incoming, 128);
    assert_eq!(dashboard.material_totals().outgoing, 95);
}

#[test]
fn chart_filters_by_name() {
    let dashboard = Dashboard::seeded(DashboardOptions::default());
    assert_eq!(material_chart(&dashboard, None).len(), 30);
    assert_eq!(material_chart(&dashboard, Some(ALL_MATERIALS)).len(), 30);

    // 소재 1, 10..19
    let points = material_chart(&dashboard, Some("소재 1"));
    assert_eq!(points.len(), 11);
    assert_eq!(points[0].name, "3D 프린트 소재 1");
    assert!(material_chart(&dashboard, Some("없음")).is_empty());
}
