//! Stock movements for general inventory and 3D print materials.

use shared::{
    domain::{InventoryItem, PrintMaterial},
    error::ApiError,
    protocol::{
        ChartPoint, InventoryMovement, InventoryMovementKind, MaterialMovement,
        MaterialMovementKind,
    },
};
use tracing::{debug, warn};

use crate::{parse_id, Dashboard};

/// Chart filter value that selects every material.
pub const ALL_MATERIALS: &str = "all";

pub fn record_inventory_movement(
    dashboard: &mut Dashboard,
    raw_id: &str,
    movement: &InventoryMovement,
) -> Result<InventoryItem, ApiError> {
    if movement.quantity == 0 {
        return Err(ApiError::validation("quantity must be greater than zero"));
    }
    let id = parse_id::<InventoryItem>(raw_id)?;
    let quantity = movement.quantity;

    let item = dashboard.inventory.modify(&id, |item| {
        item.stock = match movement.kind {
            InventoryMovementKind::Incoming => item.stock.saturating_add(quantity),
            InventoryMovementKind::Outgoing => match item.stock.checked_sub(quantity) {
                Some(stock) => stock,
                None => return Err(insufficient(&item.name, item.stock, quantity)),
            },
        };
        Ok(item.clone())
    })??;

    match movement.kind {
        InventoryMovementKind::Incoming => dashboard.inventory_totals.incoming += 1,
        InventoryMovementKind::Outgoing => dashboard.inventory_totals.outgoing += 1,
    }
    debug!(
        item = %id,
        kind = ?movement.kind,
        quantity,
        project = movement.project_id.as_deref().unwrap_or("-"),
        stock = item.stock,
        "inventory movement recorded"
    );
    Ok(item)
}

pub fn record_material_movement(
    dashboard: &mut Dashboard,
    raw_id: &str,
    movement: &MaterialMovement,
) -> Result<PrintMaterial, ApiError> {
    if movement.quantity_g == 0 && movement.quantity_cc == 0 {
        return Err(ApiError::validation("quantity must be greater than zero"));
    }
    let id = parse_id::<PrintMaterial>(raw_id)?;
    let (grams, cc) = (movement.quantity_g, movement.quantity_cc);

    let material = dashboard.materials.modify(&id, |material| {
        match movement.kind {
            MaterialMovementKind::Incoming => {
                material.stock_g = material.stock_g.saturating_add(grams);
                material.stock_cc = material.stock_cc.saturating_add(cc);
            }
            MaterialMovementKind::Outgoing | MaterialMovementKind::Disposal => {
                let (Some(stock_g), Some(stock_cc)) =
                    (material.stock_g.checked_sub(grams), material.stock_cc.checked_sub(cc))
                else {
                    return Err(ApiError::validation(format!(
                        "insufficient stock for {}: {}g/{}cc on hand, {grams}g/{cc}cc requested",
                        material.name, material.stock_g, material.stock_cc
                    )));
                };
                material.stock_g = stock_g;
                material.stock_cc = stock_cc;
            }
        }
        Ok(material.clone())
    })??;

    let totals = &mut dashboard.material_totals;
    match movement.kind {
        MaterialMovementKind::Incoming => totals.incoming += 1,
        MaterialMovementKind::Outgoing => totals.outgoing += 1,
        MaterialMovementKind::Disposal => totals.disposal += 1,
    }
    debug!(
        material = %id,
        kind = ?movement.kind,
        grams,
        cc,
        "material movement recorded"
    );
    Ok(material)
}

/// Holdings by name for the material chart. `None`, an empty filter or
/// `"all"` selects everything; otherwise names must contain the filter.
pub fn material_chart(dashboard: &Dashboard, filter: Option<&str>) -> Vec<ChartPoint> {
    let filter = filter.filter(|f| !f.is_empty() && *f != ALL_MATERIALS);
    dashboard
        .materials()
        .records()
        .iter()
        .filter(|material| filter.map_or(true, |f| material.name.contains(f)))
        .map(|material| ChartPoint {
            name: material.name.clone(),
            cc: material.stock_cc,
        })
        .collect()
}

fn insufficient(name: &str, on_hand: u32, requested: u32) -> ApiError {
    warn!(item = name, on_hand, requested, "outgoing exceeds stock");
    ApiError::validation(format!(
        "insufficient stock for {name}: {on_hand} on hand, {requested} requested"
    ))
}

#[cfg(test)]
#[path = "tests/ledger_tests.rs"]
mod tests;
