//! Status transition rules.
//!
//! [`transition_patch`] computes the field mutations implied by a requested
//! status change. It is a pure function over the current record, the request
//! and the clock, returning a patch for `EquipmentRepository::update`; it
//! never touches storage itself.

use chrono::{DateTime, Utc};

use crate::models::{Equipment, EquipmentPatch, EquipmentStatus, StatusChange};

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Compute the update patch for a status change.
///
/// Rules, in order:
/// 1. `status`, `location` and `notes` always come from the request; blank
///    notes are stored as absent.
/// 2. Entering `Deployed` sets the custody fields: borrower from the request
///    (cleared when blank), borrow_date from the request or defaulted to
///    today, return_date from the request (cleared when absent). Entering any
///    other status clears borrower and return_date; borrow_date is left
///    alone so the last deployment date stays visible as history.
/// 3. `repair_receive_date` is stamped when the item comes back from the
///    field (Deployed -> anything else) or freshly enters active repair
///    (anything else -> InRepair); the two conditions are independent.
/// 4. `repair_complete_date` is stamped on first entering `RepairDone`.
///
/// Fields the rules do not mention are left out of the patch and keep their
/// stored values.
pub fn transition_patch(
    current: &Equipment,
    request: &StatusChange,
    now: DateTime<Utc>,
) -> EquipmentPatch {
    let mut patch = EquipmentPatch {
        status: Some(request.status),
        location: Some(request.location.clone()),
        notes: Some(non_blank(&request.notes)),
        ..Default::default()
    };

    if request.status == EquipmentStatus::Deployed {
        patch.borrower = Some(non_blank(&request.borrower));
        patch.borrow_date = Some(Some(request.borrow_date.unwrap_or_else(|| now.date_naive())));
        patch.return_date = Some(request.return_date);
    } else {
        // Leaving (or staying outside) deployment clears custody data.
        patch.borrower = Some(None);
        patch.return_date = Some(None);
    }

    let returning_from_field = current.status == EquipmentStatus::Deployed
        && request.status != EquipmentStatus::Deployed;
    let entering_repair = request.status == EquipmentStatus::InRepair
        && current.status != EquipmentStatus::InRepair;
    if returning_from_field || entering_repair {
        patch.repair_receive_date = Some(Some(now));
    }

    if request.status == EquipmentStatus::RepairDone
        && current.status != EquipmentStatus::RepairDone
    {
        patch.repair_complete_date = Some(Some(now));
    }

    patch
}
