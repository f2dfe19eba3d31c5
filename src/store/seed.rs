//! Built-in demo dataset installed on first run.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::models::{Equipment, EquipmentStatus};

fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, d, 9, 0, 0).unwrap()
}

fn date(m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(2024, m, d)
}

fn record(id: u32, name: &str, serial: &str, status: EquipmentStatus, location: &str) -> Equipment {
    let created = day(id);
    Equipment {
        id: id.to_string(),
        name: name.to_string(),
        serial_number: serial.to_string(),
        status,
        location: location.to_string(),
        borrower: None,
        borrow_date: None,
        return_date: None,
        repair_receive_date: None,
        repair_complete_date: None,
        notes: None,
        created_at: created,
        updated_at: created,
    }
}

/// Fixed example records for first-run/demo purposes.
pub fn demo_equipment() -> Vec<Equipment> {
    let mut records = vec![
        record(1, "Game table computer", "GT-2024-001", EquipmentStatus::Deployed, "Floor 1 blackjack tables"),
        record(2, "Security monitoring PC", "SM-2024-002", EquipmentStatus::InStock, "Security office"),
        record(3, "Counter tablet", "CT-2024-003", EquipmentStatus::Deployed, "Main counter"),
        record(4, "POS system", "POS-2024-004", EquipmentStatus::InRepair, "Cafeteria"),
        record(5, "Slot machine control PC", "SL-2024-005", EquipmentStatus::RepairDone, "Floor 2 slot area"),
        record(6, "Network switch", "NS-2024-006", EquipmentStatus::AwaitingRepair, "Server room"),
        record(7, "Baccarat table PC", "BC-2024-007", EquipmentStatus::AwaitingRepair, "Floor 2 baccarat area"),
        record(8, "Casino printer", "PR-2024-008", EquipmentStatus::InRepair, "Counter"),
        record(9, "Security camera PC", "SC-2024-009", EquipmentStatus::RepairDone, "Security office"),
    ];

    records[0].borrower = Some("C. Kim".to_string());
    records[0].borrow_date = date(7, 10);
    records[0].return_date = date(7, 20);
    records[0].notes = Some("Working normally".to_string());

    records[1].repair_receive_date = Some(Utc.with_ymd_and_hms(2024, 7, 14, 15, 30, 0).unwrap());

    records[2].borrower = Some("Y. Lee".to_string());
    records[2].borrow_date = date(7, 12);
    records[2].return_date = date(7, 25);
    records[2].notes = Some("Screen protector needs replacing".to_string());

    records[3].notes = Some("Printer fault".to_string());
    records[3].repair_receive_date = Some(Utc.with_ymd_and_hms(2024, 7, 13, 10, 15, 0).unwrap());

    records[4].notes = Some("Hardware replaced".to_string());
    records[4].repair_complete_date = Some(Utc.with_ymd_and_hms(2024, 7, 15, 14, 30, 0).unwrap());

    records[5].notes = Some("Bad port".to_string());
    records[6].notes = Some("Screen flicker".to_string());

    records[7].notes = Some("Paper jam".to_string());
    records[7].repair_receive_date = Some(Utc.with_ymd_and_hms(2024, 7, 14, 11, 20, 0).unwrap());

    records[8].notes = Some("Hardware replaced".to_string());
    records[8].repair_complete_date = Some(Utc.with_ymd_and_hms(2024, 7, 13, 16, 45, 0).unwrap());

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_serials_are_unique() {
        let records = demo_equipment();
        let serials: HashSet<_> = records.iter().map(|r| r.serial_number.as_str()).collect();
        assert_eq!(serials.len(), records.len());
    }

    #[test]
    fn test_seed_ids_are_unique() {
        let records = demo_equipment();
        let ids: HashSet<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), records.len());
    }
}
