use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use lifecycle::ProjectLifecycle;
use serde::{Deserialize, Serialize};

use crate::record::{FieldKey, FieldSource, FieldValue, IdScheme, Record, SequentialId};

macro_rules! code_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl SequentialId for $name {
            fn from_sequence(scheme: &IdScheme, sequence: u64) -> Self {
                Self(scheme.format(sequence))
            }

            fn sequence(&self, scheme: &IdScheme) -> Option<u64> {
                scheme.sequence_of(&self.0)
            }

            fn parse(raw: &str) -> Option<Self> {
                let raw = raw.trim();
                (!raw.is_empty()).then(|| Self(raw.to_string()))
            }
        }
    };
}

code_newtype!(AdminId);
code_newtype!(DeviceId);
code_newtype!(InventoryId);
code_newtype!(MaterialId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub i64);

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl SequentialId for ProjectId {
    fn from_sequence(_scheme: &IdScheme, sequence: u64) -> Self {
        Self(sequence as i64)
    }

    fn sequence(&self, _scheme: &IdScheme) -> Option<u64> {
        u64::try_from(self.0).ok()
    }

    fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse().ok().map(Self)
    }
}

fn text_or_none(value: &Option<String>) -> Option<FieldValue<'_>> {
    value.as_deref().map(FieldValue::text)
}

/// Patched text is stored the same way drafts are.
fn trimmed(value: String) -> String {
    value.trim().to_string()
}

// ---------------------------------------------------------------------------
// Admins

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    SuperAdmin,
    Admin,
    #[default]
    User,
}

impl AdminRole {
    pub fn label(self) -> &'static str {
        match self {
            AdminRole::SuperAdmin => "슈퍼관리자",
            AdminRole::Admin => "관리자",
            AdminRole::User => "일반 사용자",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveStatus {
    #[default]
    Active,
    Inactive,
}

impl ActiveStatus {
    pub fn label(self) -> &'static str {
        match self {
            ActiveStatus::Active => "활성",
            ActiveStatus::Inactive => "비활성",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminField {
    Id,
    Name,
    Email,
    Role,
    Department,
    Status,
    LastLogin,
}

impl FieldKey for AdminField {
    const ALL: &'static [Self] = &[
        AdminField::Id,
        AdminField::Name,
        AdminField::Email,
        AdminField::Role,
        AdminField::Department,
        AdminField::Status,
        AdminField::LastLogin,
    ];

    fn name(self) -> &'static str {
        match self {
            AdminField::Id => "id",
            AdminField::Name => "name",
            AdminField::Email => "email",
            AdminField::Role => "role",
            AdminField::Department => "department",
            AdminField::Status => "status",
            AdminField::LastLogin => "last_login",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Admin {
    pub id: AdminId,
    pub name: String,
    pub email: String,
    pub role: AdminRole,
    pub department: String,
    pub status: ActiveStatus,
    /// `None` until the admin signs in for the first time.
    pub last_login: Option<NaiveDateTime>,
}

impl Admin {
    pub fn last_login_label(&self) -> String {
        match self.last_login {
            Some(at) => at.format("%Y-%m-%d %H:%M").to_string(),
            None => "아직 로그인하지 않음".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: AdminRole,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub status: ActiveStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<AdminRole>,
    pub department: Option<String>,
    pub status: Option<ActiveStatus>,
}

impl FieldSource for Admin {
    type Field = AdminField;

    fn field(&self, field: AdminField) -> Option<FieldValue<'_>> {
        Some(match field {
            AdminField::Id => FieldValue::text(&self.id.0),
            AdminField::Name => FieldValue::text(&self.name),
            AdminField::Email => FieldValue::text(&self.email),
            AdminField::Role => FieldValue::text(self.role.label()),
            AdminField::Department => FieldValue::text(&self.department),
            AdminField::Status => FieldValue::text(self.status.label()),
            AdminField::LastLogin => self.last_login.into(),
        })
    }
}

impl FieldSource for AdminDraft {
    type Field = AdminField;

    fn field(&self, field: AdminField) -> Option<FieldValue<'_>> {
        match field {
            AdminField::Name => Some(FieldValue::text(&self.name)),
            AdminField::Email => Some(FieldValue::text(&self.email)),
            AdminField::Role => Some(FieldValue::text(self.role.label())),
            AdminField::Department => Some(FieldValue::text(&self.department)),
            AdminField::Status => Some(FieldValue::text(self.status.label())),
            AdminField::Id | AdminField::LastLogin => None,
        }
    }
}

impl FieldSource for AdminPatch {
    type Field = AdminField;

    fn field(&self, field: AdminField) -> Option<FieldValue<'_>> {
        match field {
            AdminField::Name => text_or_none(&self.name),
            AdminField::Email => text_or_none(&self.email),
            AdminField::Role => self.role.map(|role| FieldValue::text(role.label())),
            AdminField::Department => text_or_none(&self.department),
            AdminField::Status => self.status.map(|status| FieldValue::text(status.label())),
            AdminField::Id | AdminField::LastLogin => None,
        }
    }
}

impl Record for Admin {
    type Id = AdminId;
    type Draft = AdminDraft;
    type Patch = AdminPatch;

    fn id(&self) -> &AdminId {
        &self.id
    }

    fn from_draft(id: AdminId, draft: AdminDraft) -> Self {
        Self {
            id,
            name: draft.name.trim().to_string(),
            email: draft.email.trim().to_string(),
            role: draft.role,
            department: draft.department.trim().to_string(),
            status: draft.status,
            last_login: None,
        }
    }

    fn apply(&mut self, patch: AdminPatch) {
        if let Some(name) = patch.name {
            self.name = trimmed(name);
        }
        if let Some(email) = patch.email {
            self.email = trimmed(email);
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(department) = patch.department {
            self.department = trimmed(department);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

// ---------------------------------------------------------------------------
// Devices

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceStatus {
    #[default]
    Idle,
    Running,
    Stopped,
}

impl DeviceStatus {
    pub fn label(self) -> &'static str {
        match self {
            DeviceStatus::Idle => "대기",
            DeviceStatus::Running => "진행중",
            DeviceStatus::Stopped => "종료",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceField {
    Id,
    Name,
    Status,
    Usage,
    WaitingJobs,
    RemainingMaterial,
}

impl FieldKey for DeviceField {
    const ALL: &'static [Self] = &[
        DeviceField::Id,
        DeviceField::Name,
        DeviceField::Status,
        DeviceField::Usage,
        DeviceField::WaitingJobs,
        DeviceField::RemainingMaterial,
    ];

    fn name(self) -> &'static str {
        match self {
            DeviceField::Id => "id",
            DeviceField::Name => "name",
            DeviceField::Status => "status",
            DeviceField::Usage => "usage",
            DeviceField::WaitingJobs => "waiting_jobs",
            DeviceField::RemainingMaterial => "remaining_material",
        }
    }
}

pub const NEW_DEVICE_MATERIAL_CC: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    pub status: DeviceStatus,
    /// Accumulated hours of use.
    pub usage: u32,
    pub waiting_jobs: u32,
    /// Material left in the printer, in cc.
    pub remaining_material: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceDraft {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DevicePatch {
    pub name: Option<String>,
    pub status: Option<DeviceStatus>,
    pub usage: Option<u32>,
    pub waiting_jobs: Option<u32>,
    pub remaining_material: Option<u32>,
}

impl FieldSource for Device {
    type Field = DeviceField;

    fn field(&self, field: DeviceField) -> Option<FieldValue<'_>> {
        Some(match field {
            DeviceField::Id => FieldValue::text(&self.id.0),
            DeviceField::Name => FieldValue::text(&self.name),
            DeviceField::Status => FieldValue::text(self.status.label()),
            DeviceField::Usage => FieldValue::number(self.usage),
            DeviceField::WaitingJobs => FieldValue::number(self.waiting_jobs),
            DeviceField::RemainingMaterial => FieldValue::number(self.remaining_material),
        })
    }
}

impl FieldSource for DeviceDraft {
    type Field = DeviceField;

    fn field(&self, field: DeviceField) -> Option<FieldValue<'_>> {
        match field {
            DeviceField::Id => text_or_none(&self.id),
            DeviceField::Name => Some(FieldValue::text(&self.name)),
            _ => None,
        }
    }
}

impl FieldSource for DevicePatch {
    type Field = DeviceField;

    fn field(&self, field: DeviceField) -> Option<FieldValue<'_>> {
        match field {
            DeviceField::Id => None,
            DeviceField::Name => text_or_none(&self.name),
            DeviceField::Status => self.status.map(|status| FieldValue::text(status.label())),
            DeviceField::Usage => self.usage.map(FieldValue::number),
            DeviceField::WaitingJobs => self.waiting_jobs.map(FieldValue::number),
            DeviceField::RemainingMaterial => self.remaining_material.map(FieldValue::number),
        }
    }
}

impl Record for Device {
    type Id = DeviceId;
    type Draft = DeviceDraft;
    type Patch = DevicePatch;

    fn id(&self) -> &DeviceId {
        &self.id
    }

    fn explicit_id(draft: &DeviceDraft) -> Option<DeviceId> {
        draft.id.as_deref().and_then(DeviceId::parse)
    }

    fn from_draft(id: DeviceId, draft: DeviceDraft) -> Self {
        Self {
            id,
            name: draft.name.trim().to_string(),
            status: DeviceStatus::Idle,
            usage: 0,
            waiting_jobs: 0,
            remaining_material: NEW_DEVICE_MATERIAL_CC,
        }
    }

    fn apply(&mut self, patch: DevicePatch) {
        if let Some(name) = patch.name {
            self.name = trimmed(name);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(usage) = patch.usage {
            self.usage = usage;
        }
        if let Some(waiting_jobs) = patch.waiting_jobs {
            self.waiting_jobs = waiting_jobs;
        }
        if let Some(remaining_material) = patch.remaining_material {
            self.remaining_material = remaining_material;
        }
    }
}

// ---------------------------------------------------------------------------
// Projects

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectKind {
    Security,
    #[default]
    General,
}

impl ProjectKind {
    pub fn label(self) -> &'static str {
        match self {
            ProjectKind::Security => "보안",
            ProjectKind::General => "일반",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectField {
    Id,
    Client,
    Title,
    Kind,
    Worker,
    Registrar,
    StartDate,
    EndDate,
    Status,
}

impl FieldKey for ProjectField {
    const ALL: &'static [Self] = &[
        ProjectField::Id,
        ProjectField::Client,
        ProjectField::Title,
        ProjectField::Kind,
        ProjectField::Worker,
        ProjectField::Registrar,
        ProjectField::StartDate,
        ProjectField::EndDate,
        ProjectField::Status,
    ];

    fn name(self) -> &'static str {
        match self {
            ProjectField::Id => "id",
            ProjectField::Client => "client",
            ProjectField::Title => "title",
            ProjectField::Kind => "type",
            ProjectField::Worker => "worker",
            ProjectField::Registrar => "registrar",
            ProjectField::StartDate => "start_date",
            ProjectField::EndDate => "end_date",
            ProjectField::Status => "status",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub client: String,
    pub title: String,
    pub kind: ProjectKind,
    pub worker: String,
    pub registrar: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub lifecycle: ProjectLifecycle,
}

impl Project {
    pub fn status_label(&self) -> &'static str {
        self.lifecycle.status_label()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectDraft {
    #[serde(default)]
    pub client: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub kind: ProjectKind,
    #[serde(default)]
    pub worker: String,
    #[serde(default)]
    pub registrar: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// Editable project columns. The stage is absent: it only
/// changes through a lifecycle transition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectPatch {
    pub client: Option<String>,
    pub title: Option<String>,
    pub kind: Option<ProjectKind>,
    pub worker: Option<String>,
    pub registrar: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl FieldSource for Project {
    type Field = ProjectField;

    fn field(&self, field: ProjectField) -> Option<FieldValue<'_>> {
        Some(match field {
            ProjectField::Id => FieldValue::Number(self.id.0 as f64),
            ProjectField::Client => FieldValue::text(&self.client),
            ProjectField::Title => FieldValue::text(&self.title),
            ProjectField::Kind => FieldValue::text(self.kind.label()),
            ProjectField::Worker => FieldValue::text(&self.worker),
            ProjectField::Registrar => FieldValue::text(&self.registrar),
            ProjectField::StartDate => self.start_date.into(),
            ProjectField::EndDate => self.end_date.into(),
            ProjectField::Status => FieldValue::Number(self.lifecycle.stage().index() as f64),
        })
    }
}

impl FieldSource for ProjectDraft {
    type Field = ProjectField;

    fn field(&self, field: ProjectField) -> Option<FieldValue<'_>> {
        match field {
            ProjectField::Client => Some(FieldValue::text(&self.client)),
            ProjectField::Title => Some(FieldValue::text(&self.title)),
            ProjectField::Kind => Some(FieldValue::text(self.kind.label())),
            ProjectField::Worker => Some(FieldValue::text(&self.worker)),
            ProjectField::Registrar => Some(FieldValue::text(&self.registrar)),
            ProjectField::StartDate => self.start_date.map(FieldValue::Date),
            ProjectField::EndDate => self.end_date.map(FieldValue::Date),
            ProjectField::Id | ProjectField::Status => None,
        }
    }
}

impl FieldSource for ProjectPatch {
    type Field = ProjectField;

    fn field(&self, field: ProjectField) -> Option<FieldValue<'_>> {
        match field {
            ProjectField::Client => text_or_none(&self.client),
            ProjectField::Title => text_or_none(&self.title),
            ProjectField::Kind => self.kind.map(|kind| FieldValue::text(kind.label())),
            ProjectField::Worker => text_or_none(&self.worker),
            ProjectField::Registrar => text_or_none(&self.registrar),
            ProjectField::StartDate => self.start_date.map(FieldValue::Date),
            ProjectField::EndDate => self.end_date.map(FieldValue::Date),
            ProjectField::Id | ProjectField::Status => None,
        }
    }
}

impl Record for Project {
    type Id = ProjectId;
    type Draft = ProjectDraft;
    type Patch = ProjectPatch;

    fn id(&self) -> &ProjectId {
        &self.id
    }

    fn from_draft(id: ProjectId, draft: ProjectDraft) -> Self {
        Self {
            id,
            client: draft.client.trim().to_string(),
            title: draft.title.trim().to_string(),
            kind: draft.kind,
            worker: draft.worker.trim().to_string(),
            registrar: draft.registrar.trim().to_string(),
            start_date: draft.start_date,
            end_date: draft.end_date,
            lifecycle: ProjectLifecycle::new(),
        }
    }

    fn apply(&mut self, patch: ProjectPatch) {
        if let Some(client) = patch.client {
            self.client = trimmed(client);
        }
        if let Some(title) = patch.title {
            self.title = trimmed(title);
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(worker) = patch.worker {
            self.worker = trimmed(worker);
        }
        if let Some(registrar) = patch.registrar {
            self.registrar = trimmed(registrar);
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = Some(start_date);
        }
        if let Some(end_date) = patch.end_date {
            self.end_date = Some(end_date);
        }
    }
}

// ---------------------------------------------------------------------------
// General inventory

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InventoryField {
    Id,
    Name,
    Stock,
}

impl FieldKey for InventoryField {
    const ALL: &'static [Self] = &[InventoryField::Id, InventoryField::Name, InventoryField::Stock];

    fn name(self) -> &'static str {
        match self {
            InventoryField::Id => "id",
            InventoryField::Name => "name",
            InventoryField::Stock => "stock",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: InventoryId,
    pub name: String,
    pub stock: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub stock: u32,
}

/// Stock is not patchable; it moves through the ledger.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryPatch {
    pub name: Option<String>,
}

impl FieldSource for InventoryItem {
    type Field = InventoryField;

    fn field(&self, field: InventoryField) -> Option<FieldValue<'_>> {
        Some(match field {
            InventoryField::Id => FieldValue::text(&self.id.0),
            InventoryField::Name => FieldValue::text(&self.name),
            InventoryField::Stock => FieldValue::number(self.stock),
        })
    }
}

impl FieldSource for InventoryDraft {
    type Field = InventoryField;

    fn field(&self, field: InventoryField) -> Option<FieldValue<'_>> {
        match field {
            InventoryField::Id => None,
            InventoryField::Name => Some(FieldValue::text(&self.name)),
            InventoryField::Stock => Some(FieldValue::number(self.stock)),
        }
    }
}

impl FieldSource for InventoryPatch {
    type Field = InventoryField;

    fn field(&self, field: InventoryField) -> Option<FieldValue<'_>> {
        match field {
            InventoryField::Name => text_or_none(&self.name),
            InventoryField::Id | InventoryField::Stock => None,
        }
    }
}

impl Record for InventoryItem {
    type Id = InventoryId;
    type Draft = InventoryDraft;
    type Patch = InventoryPatch;

    fn id(&self) -> &InventoryId {
        &self.id
    }

    fn from_draft(id: InventoryId, draft: InventoryDraft) -> Self {
        Self {
            id,
            name: draft.name.trim().to_string(),
            stock: draft.stock,
        }
    }

    fn apply(&mut self, patch: InventoryPatch) {
        if let Some(name) = patch.name {
            self.name = trimmed(name);
        }
    }
}

// ---------------------------------------------------------------------------
// 3D print materials

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialField {
    Id,
    Name,
    StockG,
    StockCc,
    Color,
}

impl FieldKey for MaterialField {
    const ALL: &'static [Self] = &[
        MaterialField::Id,
        MaterialField::Name,
        MaterialField::StockG,
        MaterialField::StockCc,
        MaterialField::Color,
    ];

    fn name(self) -> &'static str {
        match self {
            MaterialField::Id => "id",
            MaterialField::Name => "name",
            MaterialField::StockG => "stock_g",
            MaterialField::StockCc => "stock_cc",
            MaterialField::Color => "color",
        }
    }
}

pub const DEFAULT_MATERIAL_COLOR: &str = "#808080";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintMaterial {
    pub id: MaterialId,
    pub name: String,
    pub stock_g: u32,
    pub stock_cc: u32,
    /// Display colour as `#rrggbb`.
    pub color: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaterialDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub stock_g: u32,
    #[serde(default)]
    pub stock_cc: u32,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaterialPatch {
    pub name: Option<String>,
    pub color: Option<String>,
}

impl FieldSource for PrintMaterial {
    type Field = MaterialField;

    fn field(&self, field: MaterialField) -> Option<FieldValue<'_>> {
        Some(match field {
            MaterialField::Id => FieldValue::text(&self.id.0),
            MaterialField::Name => FieldValue::text(&self.name),
            MaterialField::StockG => FieldValue::number(self.stock_g),
            MaterialField::StockCc => FieldValue::number(self.stock_cc),
            MaterialField::Color => FieldValue::text(&self.color),
        })
    }
}

impl FieldSource for MaterialDraft {
    type Field = MaterialField;

    fn field(&self, field: MaterialField) -> Option<FieldValue<'_>> {
        match field {
            MaterialField::Id => None,
            MaterialField::Name => Some(FieldValue::text(&self.name)),
            MaterialField::StockG => Some(FieldValue::number(self.stock_g)),
            MaterialField::StockCc => Some(FieldValue::number(self.stock_cc)),
            MaterialField::Color => text_or_none(&self.color),
        }
    }
}

impl FieldSource for MaterialPatch {
    type Field = MaterialField;

    fn field(&self, field: MaterialField) -> Option<FieldValue<'_>> {
        match field {
            MaterialField::Name => text_or_none(&self.name),
            MaterialField::Color => text_or_none(&self.color),
            _ => None,
        }
    }
}

impl Record for PrintMaterial {
    type Id = MaterialId;
    type Draft = MaterialDraft;
    type Patch = MaterialPatch;

    fn id(&self) -> &MaterialId {
        &self.id
    }

    fn from_draft(id: MaterialId, draft: MaterialDraft) -> Self {
        let color = draft
            .color
            .map(|color| color.trim().to_string())
            .filter(|color| !color.is_empty())
            .unwrap_or_else(|| DEFAULT_MATERIAL_COLOR.to_string());
        Self {
            id,
            name: draft.name.trim().to_string(),
            stock_g: draft.stock_g,
            stock_cc: draft.stock_cc,
            color,
        }
    }

    fn apply(&mut self, patch: MaterialPatch) {
        if let Some(name) = patch.name {
            self.name = trimmed(name);
        }
        if let Some(color) = patch.color {
            let color = trimmed(color);
            self.color = if color.is_empty() {
                DEFAULT_MATERIAL_COLOR.to_string()
            } else {
                color
            };
        }
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
