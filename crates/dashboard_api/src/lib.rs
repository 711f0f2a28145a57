//! The dashboard: one list controller per screen plus the stock ledgers,
//! telemetry and alert centre, behind operations that speak `ApiError`.

pub mod admins;
pub mod alerts;
pub mod catalog;
pub mod ledger;
pub mod monitoring;
pub mod projects;
pub mod seed;

use chrono::Utc;
use list_core::ListController;
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use shared::{
    domain::{Admin, Device, InventoryItem, PrintMaterial, Project},
    error::ApiError,
    protocol::{LedgerTotals, MetricsSnapshot, Page, ProjectRow, SearchRequest, SortDirection},
    record::{FieldKey, Record, SequentialId},
};
use tracing::{debug, info};

pub use alerts::AlertCenter;
pub use monitoring::Monitoring;

pub const DEFAULT_LOW_MATERIAL_CC: u32 = 200;

#[derive(Debug, Clone, Copy)]
pub struct DashboardOptions {
    /// Seed for the generated stock levels and telemetry samples.
    pub seed: u64,
    pub low_material_threshold: u32,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            seed: 7,
            low_material_threshold: DEFAULT_LOW_MATERIAL_CC,
        }
    }
}

pub struct Dashboard {
    admins: ListController<Admin>,
    devices: ListController<Device>,
    projects: ListController<Project>,
    inventory: ListController<InventoryItem>,
    materials: ListController<PrintMaterial>,
    inventory_totals: LedgerTotals,
    material_totals: LedgerTotals,
    monitoring: Monitoring,
    alerts: AlertCenter,
    low_material_threshold: u32,
    rng: StdRng,
}

impl Dashboard {
    /// A dashboard with no records, zeroed ledgers and fresh telemetry.
    pub fn empty(options: DashboardOptions) -> Self {
        let mut rng = StdRng::seed_from_u64(options.seed);
        let monitoring = Monitoring::new(&mut rng, Utc::now());
        Self {
            admins: ListController::new(catalog::admin_list()),
            devices: ListController::new(catalog::device_list()),
            projects: ListController::new(catalog::project_list()),
            inventory: ListController::new(catalog::inventory_list()),
            materials: ListController::new(catalog::material_list()),
            inventory_totals: LedgerTotals::default(),
            material_totals: LedgerTotals::default(),
            monitoring,
            alerts: AlertCenter::new(),
            low_material_threshold: options.low_material_threshold,
            rng,
        }
    }

    /// A dashboard loaded with the sample data every screen starts from.
    pub fn seeded(options: DashboardOptions) -> Self {
        let mut rng = StdRng::seed_from_u64(options.seed);
        let monitoring = Monitoring::new(&mut rng, Utc::now());
        let inventory = seed::inventory(&mut rng);
        let materials = seed::materials(&mut rng);
        info!(
            seed = options.seed,
            inventory = inventory.len(),
            materials = materials.len(),
            "dashboard seeded"
        );
        Self {
            admins: ListController::with_records(catalog::admin_list(), seed::admins()),
            devices: ListController::with_records(catalog::device_list(), seed::devices()),
            projects: ListController::with_records(catalog::project_list(), seed::projects()),
            inventory: ListController::with_records(catalog::inventory_list(), inventory),
            materials: ListController::with_records(catalog::material_list(), materials),
            inventory_totals: seed::INVENTORY_TOTALS,
            material_totals: seed::MATERIAL_TOTALS,
            monitoring,
            alerts: AlertCenter::new(),
            low_material_threshold: options.low_material_threshold,
            rng,
        }
    }

    pub fn admins(&self) -> &ListController<Admin> {
        &self.admins
    }

    pub fn devices(&self) -> &ListController<Device> {
        &self.devices
    }

    pub fn projects(&self) -> &ListController<Project> {
        &self.projects
    }

    pub fn inventory(&self) -> &ListController<InventoryItem> {
        &self.inventory
    }

    pub fn materials(&self) -> &ListController<PrintMaterial> {
        &self.materials
    }

    pub fn inventory_totals(&self) -> LedgerTotals {
        self.inventory_totals
    }

    pub fn material_totals(&self) -> LedgerTotals {
        self.material_totals
    }

    pub fn monitoring(&self) -> &Monitoring {
        &self.monitoring
    }

    pub fn alerts(&self) -> &AlertCenter {
        &self.alerts
    }

    pub fn alerts_mut(&mut self) -> &mut AlertCenter {
        &mut self.alerts
    }

    pub fn low_material_threshold(&self) -> u32 {
        self.low_material_threshold
    }

    /// Shifts every metric series by one fresh sample.
    pub fn tick_telemetry(&mut self) -> MetricsSnapshot {
        self.monitoring.tick(&mut self.rng, Utc::now());
        self.monitoring.snapshot()
    }

    /// Regenerates every metric series.
    pub fn refresh_telemetry(&mut self) -> MetricsSnapshot {
        self.monitoring.refresh(&mut self.rng, Utc::now());
        debug!(health = ?self.monitoring.health(), "telemetry refreshed");
        self.monitoring.snapshot()
    }
}

/// Binds a record type to its controller inside [`Dashboard`] and to the row
/// shape the outer layers render.
pub trait Collection: Record + Sized {
    /// Path segment and event name, e.g. `print-materials`.
    const NAME: &'static str;
    type Row: Serialize;

    fn list(dashboard: &Dashboard) -> &ListController<Self>;
    fn list_mut(dashboard: &mut Dashboard) -> &mut ListController<Self>;
    fn row(record: &Self) -> Self::Row;
}

impl Collection for Admin {
    const NAME: &'static str = "admins";
    type Row = Admin;

    fn list(dashboard: &Dashboard) -> &ListController<Self> {
        &dashboard.admins
    }

    fn list_mut(dashboard: &mut Dashboard) -> &mut ListController<Self> {
        &mut dashboard.admins
    }

    fn row(record: &Self) -> Self::Row {
        record.clone()
    }
}

impl Collection for Device {
    const NAME: &'static str = "devices";
    type Row = Device;

    fn list(dashboard: &Dashboard) -> &ListController<Self> {
        &dashboard.devices
    }

    fn list_mut(dashboard: &mut Dashboard) -> &mut ListController<Self> {
        &mut dashboard.devices
    }

    fn row(record: &Self) -> Self::Row {
        record.clone()
    }
}

impl Collection for Project {
    const NAME: &'static str = "projects";
    type Row = ProjectRow;

    fn list(dashboard: &Dashboard) -> &ListController<Self> {
        &dashboard.projects
    }

    fn list_mut(dashboard: &mut Dashboard) -> &mut ListController<Self> {
        &mut dashboard.projects
    }

    fn row(record: &Self) -> Self::Row {
        ProjectRow::from(record)
    }
}

impl Collection for InventoryItem {
    const NAME: &'static str = "inventory";
    type Row = InventoryItem;

    fn list(dashboard: &Dashboard) -> &ListController<Self> {
        &dashboard.inventory
    }

    fn list_mut(dashboard: &mut Dashboard) -> &mut ListController<Self> {
        &mut dashboard.inventory
    }

    fn row(record: &Self) -> Self::Row {
        record.clone()
    }
}

impl Collection for PrintMaterial {
    const NAME: &'static str = "print-materials";
    type Row = PrintMaterial;

    fn list(dashboard: &Dashboard) -> &ListController<Self> {
        &dashboard.materials
    }

    fn list_mut(dashboard: &mut Dashboard) -> &mut ListController<Self> {
        &mut dashboard.materials
    }

    fn row(record: &Self) -> Self::Row {
        record.clone()
    }
}

pub fn view<C: Collection>(dashboard: &Dashboard) -> Page<C::Row> {
    C::list(dashboard).view().map(|record| C::row(record))
}

pub fn search<C: Collection>(
    dashboard: &mut Dashboard,
    request: &SearchRequest,
) -> Result<Page<C::Row>, ApiError> {
    let fields = match &request.fields {
        Some(names) => names
            .iter()
            .map(|name| parse_field::<C>(name))
            .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };
    C::list_mut(dashboard).set_search_in(request.term.clone(), fields);
    Ok(view::<C>(dashboard))
}

/// Sorts by the named column, toggling on a repeated key.
pub fn sort<C: Collection>(
    dashboard: &mut Dashboard,
    key: &str,
) -> Result<(SortDirection, Page<C::Row>), ApiError> {
    let field = parse_field::<C>(key)?;
    let direction = C::list_mut(dashboard).set_sort(field);
    Ok((direction, view::<C>(dashboard)))
}

pub fn go_to_page<C: Collection>(dashboard: &mut Dashboard, page: usize) -> Page<C::Row> {
    C::list_mut(dashboard).set_page(page);
    view::<C>(dashboard)
}

pub fn create<C: Collection>(dashboard: &mut Dashboard, draft: C::Draft) -> Result<C::Id, ApiError> {
    let id = C::list_mut(dashboard).create(draft)?;
    info!(collection = C::NAME, %id, "record created");
    Ok(id)
}

pub fn update<C: Collection>(
    dashboard: &mut Dashboard,
    raw_id: &str,
    patch: C::Patch,
) -> Result<C::Row, ApiError> {
    let id = parse_id::<C>(raw_id)?;
    let record = C::list_mut(dashboard).update(&id, patch)?;
    Ok(C::row(record))
}

pub fn request_delete<C: Collection>(dashboard: &mut Dashboard, raw_id: &str) -> Result<(), ApiError> {
    let id = parse_id::<C>(raw_id)?;
    C::list_mut(dashboard).request_delete(&id)?;
    Ok(())
}

/// Removes the pending record, if any, and returns it.
pub fn confirm_delete<C: Collection>(dashboard: &mut Dashboard) -> Result<Option<C::Row>, ApiError> {
    let removed = C::list_mut(dashboard).confirm_delete()?;
    if let Some(record) = &removed {
        info!(collection = C::NAME, id = %record.id(), "record deleted");
    }
    Ok(removed.as_ref().map(C::row))
}

pub fn cancel_delete<C: Collection>(dashboard: &mut Dashboard) -> Option<String> {
    C::list_mut(dashboard)
        .cancel_delete()
        .map(|id| id.to_string())
}

pub(crate) fn parse_id<C: Collection>(raw: &str) -> Result<C::Id, ApiError> {
    <C::Id as SequentialId>::parse(raw)
        .ok_or_else(|| ApiError::validation(format!("invalid {} id: {raw:?}", C::NAME)))
}

fn parse_field<C: Collection>(name: &str) -> Result<C::Field, ApiError> {
    <C::Field as FieldKey>::parse(name)
        .ok_or_else(|| ApiError::validation(format!("unknown {} column: {name:?}", C::NAME)))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
