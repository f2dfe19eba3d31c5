//! Shared domain enums

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// EquipmentStatus
// ---------------------------------------------------------------------------

/// Equipment lifecycle status.
///
/// Drives which custody fields are meaningful: borrower, borrow_date and
/// return_date only apply while `Deployed`; the repair timestamps are set on
/// the repair-pipeline boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentStatus {
    InStock,
    Deployed,
    AwaitingRepair,
    InRepair,
    RepairDone,
}

impl EquipmentStatus {
    /// All statuses, in dashboard display order.
    pub const ALL: [EquipmentStatus; 5] = [
        EquipmentStatus::InStock,
        EquipmentStatus::Deployed,
        EquipmentStatus::AwaitingRepair,
        EquipmentStatus::InRepair,
        EquipmentStatus::RepairDone,
    ];

    /// Wire name used in serialized records and query strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentStatus::InStock => "in_stock",
            EquipmentStatus::Deployed => "deployed",
            EquipmentStatus::AwaitingRepair => "awaiting_repair",
            EquipmentStatus::InRepair => "in_repair",
            EquipmentStatus::RepairDone => "repair_done",
        }
    }
}

impl std::fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            EquipmentStatus::InStock => "In stock",
            EquipmentStatus::Deployed => "Deployed",
            EquipmentStatus::AwaitingRepair => "Awaiting repair",
            EquipmentStatus::InRepair => "In repair",
            EquipmentStatus::RepairDone => "Repair done",
        };
        write!(f, "{}", label)
    }
}

impl std::str::FromStr for EquipmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_stock" => Ok(EquipmentStatus::InStock),
            "deployed" => Ok(EquipmentStatus::Deployed),
            "awaiting_repair" => Ok(EquipmentStatus::AwaitingRepair),
            "in_repair" => Ok(EquipmentStatus::InRepair),
            "repair_done" => Ok(EquipmentStatus::RepairDone),
            other => Err(format!("unknown equipment status: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_round_trip() {
        for status in EquipmentStatus::ALL {
            assert_eq!(status.as_str().parse::<EquipmentStatus>(), Ok(status));
        }
    }

    #[test]
    fn test_unknown_wire_name_rejected() {
        assert!("retired".parse::<EquipmentStatus>().is_err());
    }
}
