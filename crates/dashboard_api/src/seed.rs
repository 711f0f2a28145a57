//! Sample records each screen opens with.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rand::Rng;
use shared::{
    domain::{
        ActiveStatus, Admin, AdminId, AdminRole, Device, DeviceId, DeviceStatus, InventoryId,
        InventoryItem, MaterialId, PrintMaterial, Project, ProjectId, ProjectKind,
    },
    protocol::LedgerTotals,
    ProjectLifecycle, Stage,
};

use crate::catalog::{INVENTORY_IDS, MATERIAL_IDS};

pub const STOCK_ITEMS: u64 = 30;

pub const INVENTORY_TOTALS: LedgerTotals = LedgerTotals {
    incoming: 156,
    outgoing: 112,
    disposal: 0,
};

pub const MATERIAL_TOTALS: LedgerTotals = LedgerTotals {
    incoming: 128,
    outgoing: 95,
    disposal: 0,
};

fn date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

fn login(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<NaiveDateTime> {
    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
    date(year, month, day).map(|day| day.and_time(time))
}

pub fn admins() -> Vec<Admin> {
    use ActiveStatus::{Active, Inactive};
    use AdminRole::{Admin as Manager, SuperAdmin, User};

    let rows = [
        ("ADM001", "김관리", "admin1@example.com", SuperAdmin, "IT 부서", Active, login(2025, 5, 10, 14, 30)),
        ("ADM002", "이사용", "admin2@example.com", Manager, "인사 부서", Active, login(2025, 5, 9, 11, 15)),
        ("ADM003", "박일반", "user1@example.com", User, "영업 부서", Active, login(2025, 5, 8, 9, 45)),
        ("ADM004", "최비활", "inactive@example.com", User, "마케팅 부서", Inactive, login(2025, 4, 30, 16, 20)),
        ("ADM005", "정보안", "security@example.com", Manager, "보안 부서", Active, login(2025, 5, 11, 10, 45)),
        ("ADM006", "한개발", "developer@example.com", User, "개발 부서", Active, login(2025, 5, 10, 9, 30)),
        ("ADM007", "송디자인", "designer@example.com", User, "디자인 부서", Active, login(2025, 5, 9, 14, 20)),
        ("ADM008", "강마케팅", "marketing@example.com", User, "마케팅 부서", Inactive, login(2025, 5, 1, 11, 10)),
    ];

    rows.into_iter()
        .map(|(id, name, email, role, department, status, last_login)| Admin {
            id: AdminId(id.into()),
            name: name.into(),
            email: email.into(),
            role,
            department: department.into(),
            status,
            last_login,
        })
        .collect()
}

pub fn devices() -> Vec<Device> {
    let rows = [
        ("DEV001", "Markforged X7", DeviceStatus::Running, 1250, 3, 450),
        ("DEV002", "Ultimaker S5", DeviceStatus::Idle, 890, 0, 600),
        ("DEV003", "Formlabs Form 3", DeviceStatus::Stopped, 2100, 0, 120),
        ("DEV004", "Prusa i3 MK3S+", DeviceStatus::Idle, 450, 1, 800),
    ];

    rows.into_iter()
        .map(|(id, name, status, usage, waiting_jobs, remaining_material)| Device {
            id: DeviceId(id.into()),
            name: name.into(),
            status,
            usage,
            waiting_jobs,
            remaining_material,
        })
        .collect()
}

/// Projects still waiting for kickoff open in the design stage.
pub fn projects() -> Vec<Project> {
    use ProjectKind::{General, Security};
    use Stage::{Complete, Design, FinalReview, Production};

    let rows = [
        (1, "삼성전자", "ERP 시스템 구축", General, "김철수", "이영희", (2025, 1, 15), (2025, 4, 30), Design),
        (2, "LG전자", "모바일 앱 개발", Security, "박지민", "김민수", (2025, 2, 1), (2025, 5, 15), Design),
        (3, "현대자동차", "웹사이트 리뉴얼", General, "정수진", "이영희", (2024, 12, 1), (2025, 2, 28), Complete),
        (4, "SK텔레콤", "데이터 분석 시스템", Security, "한지훈", "김철수", (2025, 3, 10), (2025, 6, 20), Production),
        (5, "롯데그룹", "온라인 쇼핑몰 개발", General, "이민지", "박지민", (2025, 4, 1), (2025, 7, 30), FinalReview),
        (6, "네이버", "검색 엔진 최적화", Security, "최영수", "김철수", (2025, 5, 1), (2025, 8, 30), Design),
        (7, "카카오", "메신저 앱 업데이트", General, "정민호", "이영희", (2025, 4, 15), (2025, 7, 15), Design),
        (8, "쿠팡", "물류 시스템 개선", Security, "김지연", "박지민", (2025, 6, 1), (2025, 9, 30), Design),
        (9, "배달의민족", "주문 시스템 개발", General, "이승우", "김민수", (2025, 3, 15), (2025, 6, 15), Complete),
        (10, "토스", "결제 시스템 보안 강화", Security, "박서연", "이영희", (2025, 5, 10), (2025, 8, 10), Production),
    ];

    rows.into_iter()
        .map(|(id, client, title, kind, worker, registrar, start, end, stage)| Project {
            id: ProjectId(id),
            client: client.into(),
            title: title.into(),
            kind,
            worker: worker.into(),
            registrar: registrar.into(),
            start_date: date(start.0, start.1, start.2),
            end_date: date(end.0, end.1, end.2),
            lifecycle: ProjectLifecycle::at(stage),
        })
        .collect()
}

pub fn inventory(rng: &mut impl Rng) -> Vec<InventoryItem> {
    (0..STOCK_ITEMS)
        .map(|i| InventoryItem {
            id: InventoryId(INVENTORY_IDS.format(INVENTORY_IDS.first + i)),
            name: format!("일반 재고 품목 {}", i + 1),
            stock: rng.gen_range(0..100),
        })
        .collect()
}

pub fn materials(rng: &mut impl Rng) -> Vec<PrintMaterial> {
    (0..STOCK_ITEMS)
        .map(|i| PrintMaterial {
            id: MaterialId(MATERIAL_IDS.format(MATERIAL_IDS.first + i)),
            name: format!("3D 프린트 소재 {}", i + 1),
            stock_g: rng.gen_range(0..100),
            stock_cc: rng.gen_range(0..1000),
            color: format!("#{:06x}", rng.gen_range(0..0xff_ffffu32)),
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/seed_tests.rs"]
mod tests;
