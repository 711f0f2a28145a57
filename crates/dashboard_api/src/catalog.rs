//! Static list settings for each dashboard screen.

use list_core::ListConfig;
use shared::{
    domain::{AdminField, DeviceField, InventoryField, MaterialField, ProjectField},
    protocol::SortDirection,
    record::IdScheme,
};

pub const ADMIN_IDS: IdScheme = IdScheme::new("ADM", 3, 1);
pub const DEVICE_IDS: IdScheme = IdScheme::new("DEV", 3, 1);
pub const PROJECT_IDS: IdScheme = IdScheme::new("", 0, 1);
pub const INVENTORY_IDS: IdScheme = IdScheme::new("INV-", 4, 1000);
pub const MATERIAL_IDS: IdScheme = IdScheme::new("MAT-", 4, 1000);

pub fn admin_list() -> ListConfig<AdminField> {
    let columns = [AdminField::Name, AdminField::Email, AdminField::Department];
    ListConfig::new(5, ADMIN_IDS)
        .searchable(&columns)
        .required(&columns)
}

pub fn device_list() -> ListConfig<DeviceField> {
    let columns = [DeviceField::Name, DeviceField::Id];
    ListConfig::new(3, DEVICE_IDS)
        .searchable(&columns)
        .required(&columns)
}

pub fn project_list() -> ListConfig<ProjectField> {
    let columns = [
        ProjectField::Client,
        ProjectField::Title,
        ProjectField::Worker,
        ProjectField::Registrar,
    ];
    ListConfig::new(5, PROJECT_IDS)
        .searchable(&columns)
        .required(&columns)
        .sorted_by(ProjectField::Id, SortDirection::Asc)
}

pub fn inventory_list() -> ListConfig<InventoryField> {
    ListConfig::new(10, INVENTORY_IDS)
        .searchable(&[InventoryField::Name, InventoryField::Id])
        .required(&[InventoryField::Name])
}

pub fn material_list() -> ListConfig<MaterialField> {
    ListConfig::new(10, MATERIAL_IDS)
        .searchable(&[MaterialField::Name, MaterialField::Id])
        .required(&[MaterialField::Name])
}
