use super::*;

#[test]
fn code_ids_follow_prefix_and_width() {
    let scheme = IdScheme::new("ADM", 3, 1);
    let id = AdminId::from_sequence(&scheme, 4);
    assert_eq!(id.to_string(), "ADM004");
    assert_eq!(id.sequence(&scheme), Some(4));
    assert_eq!(AdminId("USR001".into()).sequence(&scheme), None);

    let inventory = IdScheme::new("INV-", 4, 1000);
    assert_eq!(InventoryId::from_sequence(&inventory, 1030).0, "INV-1030");
}

#[test]
fn project_ids_are_plain_numbers() {
    let scheme = IdScheme::new("", 0, 1);
    assert_eq!(ProjectId::from_sequence(&scheme, 11), ProjectId(11));
    assert_eq!(ProjectId::parse(" 7 "), Some(ProjectId(7)));
    assert_eq!(ProjectId::parse("seven"), None);
}

#[test]
fn admin_draft_leaves_id_and_login_unset() {
    let draft = AdminDraft {
        name: "신규".into(),
        ..Default::default()
    };
    assert!(draft.field(AdminField::Id).is_none());
    assert!(draft.field(AdminField::LastLogin).is_none());
    assert!(draft.field(AdminField::Email).expect("email").is_blank());
}

#[test]
fn admin_without_login_reads_as_empty() {
    let admin = Admin::from_draft(
        AdminId("ADM009".into()),
        AdminDraft {
            name: " 홍길동 ".into(),
            email: "hong@example.com".into(),
            department: "품질 부서".into(),
            ..Default::default()
        },
    );
    assert_eq!(admin.name, "홍길동");
    assert_eq!(admin.field(AdminField::LastLogin), Some(FieldValue::Empty));
    assert_eq!(admin.last_login_label(), "아직 로그인하지 않음");
    assert_eq!(admin.role, AdminRole::User);
}

#[test]
fn device_draft_supplies_explicit_id() {
    let draft = DeviceDraft {
        id: Some(" DEV010 ".into()),
        name: "Bambu X1".into(),
    };
    assert_eq!(Device::explicit_id(&draft), Some(DeviceId("DEV010".into())));

    let device = Device::from_draft(DeviceId("DEV010".into()), draft);
    assert_eq!(device.status, DeviceStatus::Idle);
    assert_eq!(device.remaining_material, NEW_DEVICE_MATERIAL_CC);
}

#[test]
fn project_status_column_sorts_by_stage_index() {
    let mut project = Project::from_draft(
        ProjectId(1),
        ProjectDraft {
            client: "삼성전자".into(),
            title: "ERP 시스템 구축".into(),
            worker: "김철수".into(),
            registrar: "이영희".into(),
            ..Default::default()
        },
    );
    assert_eq!(project.field(ProjectField::Status), Some(FieldValue::Number(0.0)));
    assert_eq!(project.status_label(), "진행중 - 설계");

    project
        .lifecycle
        .transition(lifecycle::Stage::Production)
        .expect("adjacent");
    assert_eq!(project.field(ProjectField::Status), Some(FieldValue::Number(1.0)));
}

#[test]
fn material_defaults_colour_when_blank() {
    let material = PrintMaterial::from_draft(
        MaterialId("MAT-1030".into()),
        MaterialDraft {
            name: "PLA 화이트".into(),
            color: Some("  ".into()),
            ..Default::default()
        },
    );
    assert_eq!(material.color, DEFAULT_MATERIAL_COLOR);
}

#[test]
fn field_names_parse_case_insensitively() {
    assert_eq!(AdminField::parse("LAST_LOGIN"), Some(AdminField::LastLogin));
    assert_eq!(ProjectField::parse("type"), Some(ProjectField::Kind));
    assert_eq!(DeviceField::parse("colour"), None);
}

#[test]
fn patched_text_is_trimmed_like_drafts() {
    let mut admin = Admin::from_draft(
        AdminId("ADM009".into()),
        AdminDraft {
            name: "홍길동".into(),
            email: "hong@example.com".into(),
            department: "품질 부서".into(),
            ..Default::default()
        },
    );
    admin.apply(AdminPatch {
        name: Some("  spaced  ".into()),
        department: Some(" 개발 부서\t".into()),
        ..Default::default()
    });
    assert_eq!(admin.name, "spaced");
    assert_eq!(admin.department, "개발 부서");
    assert_eq!(admin.email, "hong@example.com");

    let mut material = PrintMaterial::from_draft(
        MaterialId("MAT-1030".into()),
        MaterialDraft {
            name: "PLA 화이트".into(),
            color: Some("#ffffff".into()),
            ..Default::default()
        },
    );
    material.apply(MaterialPatch {
        name: Some(" PLA 블랙 ".into()),
        color: Some(" ".into()),
    });
    assert_eq!(material.name, "PLA 블랙");
    assert_eq!(material.color, DEFAULT_MATERIAL_COLOR);
}
