//! End-to-end tests against the local backend (remote unconfigured).

use std::sync::Arc;

use chrono::Utc;
use pitstock_server::{
    config::RemoteConfig,
    error::AppError,
    models::{EquipmentPatch, EquipmentStatus, NewEquipment, StatusChange},
    repository::{EquipmentRepository, LocalRepository},
    services::Services,
    store::{RecordStore, EQUIPMENT_KEY},
};

fn new_item(name: &str, serial: &str) -> NewEquipment {
    NewEquipment {
        name: name.into(),
        serial_number: serial.into(),
        status: EquipmentStatus::InStock,
        location: "L1".into(),
        borrower: None,
        borrow_date: None,
        return_date: None,
        repair_receive_date: None,
        repair_complete_date: None,
        notes: None,
    }
}

/// Services wired to an empty local store, no remote configured.
async fn setup() -> (tempfile::TempDir, Services) {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::open(dir.path()).unwrap();
    store
        .put(EQUIPMENT_KEY, &Vec::<pitstock_server::models::Equipment>::new())
        .await
        .unwrap();

    let local = LocalRepository::new(store.clone());
    let repository = Arc::new(EquipmentRepository::new(local, &RemoteConfig::default()));
    let services = Services::new(repository, store, RemoteConfig::default());
    (dir, services)
}

#[tokio::test]
async fn test_register_list_deploy_scenario() {
    let (_dir, services) = setup().await;

    let created = services
        .equipment
        .create(&new_item("PC1", "S1"))
        .await
        .unwrap();
    assert!(!created.id.is_empty());
    assert_eq!(created.created_at, created.updated_at);

    let listed = services.equipment.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], created);

    let deployed = services
        .equipment
        .change_status(
            &created.id,
            &StatusChange {
                status: EquipmentStatus::Deployed,
                location: "L1".into(),
                borrower: Some("Kim".into()),
                borrow_date: None,
                return_date: None,
                notes: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(deployed.status, EquipmentStatus::Deployed);
    assert_eq!(deployed.borrower.as_deref(), Some("Kim"));
    assert_eq!(deployed.borrow_date, Some(Utc::now().date_naive()));
    assert_eq!(deployed.return_date, None);
    assert!(deployed.updated_at > created.updated_at);
}

#[tokio::test]
async fn test_add_then_list_contains_record_exactly_once() {
    let (_dir, services) = setup().await;

    let first = services
        .equipment
        .create(&new_item("PC1", "S1"))
        .await
        .unwrap();
    let second = services
        .equipment
        .create(&new_item("PC2", "S2"))
        .await
        .unwrap();
    assert_ne!(first.id, second.id);

    let listed = services.equipment.list().await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(
        listed.iter().filter(|r| r.id == first.id).count(),
        1
    );
}

#[tokio::test]
async fn test_duplicate_serial_is_rejected() {
    let (_dir, services) = setup().await;

    services
        .equipment
        .create(&new_item("PC1", "S1"))
        .await
        .unwrap();
    let err = services
        .equipment
        .create(&new_item("PC2", "S1"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_missing_required_fields_are_rejected() {
    let (_dir, services) = setup().await;

    let err = services
        .equipment
        .create(&new_item("", "S1"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_record_keeps_its_own_serial_across_update() {
    let (_dir, services) = setup().await;

    let created = services
        .equipment
        .create(&new_item("PC1", "S1"))
        .await
        .unwrap();

    // Re-submitting the same serial for the same record is not a conflict.
    let patch = EquipmentPatch {
        serial_number: Some("S1".into()),
        name: Some("PC1b".into()),
        ..Default::default()
    };
    let updated = services.equipment.update(&created.id, &patch).await.unwrap();
    assert_eq!(updated.name, "PC1b");

    // But stealing another record's serial is.
    services
        .equipment
        .create(&new_item("PC2", "S2"))
        .await
        .unwrap();
    let patch = EquipmentPatch {
        serial_number: Some("S2".into()),
        ..Default::default()
    };
    let err = services
        .equipment
        .update(&created.id, &patch)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_updated_at_is_monotonic() {
    let (_dir, services) = setup().await;

    let created = services
        .equipment
        .create(&new_item("PC1", "S1"))
        .await
        .unwrap();

    let mut previous = created.updated_at;
    for location in ["L2", "L3", "L4"] {
        let patch = EquipmentPatch {
            location: Some(location.into()),
            ..Default::default()
        };
        let updated = services.equipment.update(&created.id, &patch).await.unwrap();
        assert!(updated.updated_at > previous);
        assert!(updated.updated_at >= updated.created_at);
        previous = updated.updated_at;
    }
}

#[tokio::test]
async fn test_delete_then_status_change_is_not_found() {
    let (_dir, services) = setup().await;

    let created = services
        .equipment
        .create(&new_item("PC1", "S1"))
        .await
        .unwrap();
    services.equipment.delete(&created.id).await.unwrap();
    // Deleting again is fine
    services.equipment.delete(&created.id).await.unwrap();

    let err = services
        .equipment
        .change_status(
            &created.id,
            &StatusChange {
                status: EquipmentStatus::InRepair,
                location: "Workshop".into(),
                borrower: None,
                borrow_date: None,
                return_date: None,
                notes: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_full_repair_cycle_stamps_timestamps() {
    let (_dir, services) = setup().await;

    let created = services
        .equipment
        .create(&new_item("PC1", "S1"))
        .await
        .unwrap();

    let step = |status: EquipmentStatus| StatusChange {
        status,
        location: "Workshop".into(),
        borrower: None,
        borrow_date: None,
        return_date: None,
        notes: None,
    };

    let in_repair = services
        .equipment
        .change_status(&created.id, &step(EquipmentStatus::InRepair))
        .await
        .unwrap();
    assert!(in_repair.repair_receive_date.is_some());
    assert!(in_repair.repair_complete_date.is_none());

    let done = services
        .equipment
        .change_status(&created.id, &step(EquipmentStatus::RepairDone))
        .await
        .unwrap();
    assert_eq!(done.repair_receive_date, in_repair.repair_receive_date);
    assert!(done.repair_complete_date.is_some());
}

#[tokio::test]
async fn test_backend_status_reports_local() {
    let (_dir, services) = setup().await;

    let status = services.settings.status().await.unwrap();
    assert_eq!(status.active, "local");
    assert!(!status.remote_configured);
    assert!(!services.settings.test_connection().await.unwrap());
}

#[tokio::test]
async fn test_stats_count_per_status() {
    let (_dir, services) = setup().await;

    services
        .equipment
        .create(&new_item("PC1", "S1"))
        .await
        .unwrap();
    let second = services
        .equipment
        .create(&new_item("PC2", "S2"))
        .await
        .unwrap();
    services
        .equipment
        .change_status(
            &second.id,
            &StatusChange {
                status: EquipmentStatus::Deployed,
                location: "Floor 1".into(),
                borrower: Some("Kim".into()),
                borrow_date: None,
                return_date: None,
                notes: None,
            },
        )
        .await
        .unwrap();

    let stats = services.stats.summary().await.unwrap();
    assert_eq!(stats.total, 2);
    assert_eq!(stats.in_stock, 1);
    assert_eq!(stats.deployed, 1);
    assert_eq!(stats.in_repair, 0);
}

#[tokio::test]
async fn test_settings_save_switches_backend() {
    let (_dir, services) = setup().await;

    let err = services
        .settings
        .save(RemoteConfig {
            url: "ftp://nope".into(),
            anon_key: "short".into(),
            service_role_key: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let status = services
        .settings
        .save(RemoteConfig {
            url: "https://abcd1234.supabase.co".into(),
            anon_key: "eyJ".to_string() + &"a".repeat(60),
            service_role_key: None,
        })
        .await
        .unwrap();
    assert_eq!(status.active, "remote");
    assert!(status.remote_configured);
}
