//! Equipment model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::enums::EquipmentStatus;

/// Equipment record, the sole persisted entity.
///
/// `id` and `created_at` are immutable after creation; `updated_at` is
/// maintained by whichever backend performs the mutation (server-side trigger
/// on the remote backend, the local adapter otherwise).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Equipment {
    /// Backend-assigned identifier (remote: generated key, local: time-based)
    pub id: String,
    pub name: String,
    /// Unique across all live records
    pub serial_number: String,
    pub status: EquipmentStatus,
    pub location: String,
    /// Meaningful only while deployed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borrower: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borrow_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_date: Option<NaiveDate>,
    /// Set when the item enters the repair pipeline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repair_receive_date: Option<DateTime<Utc>>,
    /// Set when a repair finishes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repair_complete_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create equipment request (id and timestamps are backend-assigned)
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct NewEquipment {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "serial_number is required"))]
    pub serial_number: String,
    pub status: EquipmentStatus,
    #[validate(length(min = 1, message = "location is required"))]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub borrower: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub borrow_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repair_receive_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repair_complete_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Partial update for an equipment record.
///
/// Required fields are plain `Option`: present means "set", absent means
/// "leave alone". Optional fields use the double-option pattern so a patch
/// can also express "clear" (`Some(None)`), which serializes as an explicit
/// `null` in the PostgREST PATCH body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct EquipmentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EquipmentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(
        default,
        with = "serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub borrower: Option<Option<String>>,
    #[serde(
        default,
        with = "serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>, format = Date)]
    pub borrow_date: Option<Option<NaiveDate>>,
    #[serde(
        default,
        with = "serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>, format = Date)]
    pub return_date: Option<Option<NaiveDate>>,
    #[serde(
        default,
        with = "serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub repair_receive_date: Option<Option<DateTime<Utc>>>,
    #[serde(
        default,
        with = "serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub repair_complete_date: Option<Option<DateTime<Utc>>>,
    #[serde(
        default,
        with = "serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub notes: Option<Option<String>>,
}

impl EquipmentPatch {
    /// True when the patch touches nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.serial_number.is_none()
            && self.status.is_none()
            && self.location.is_none()
            && self.borrower.is_none()
            && self.borrow_date.is_none()
            && self.return_date.is_none()
            && self.repair_receive_date.is_none()
            && self.repair_complete_date.is_none()
            && self.notes.is_none()
    }

    /// Merge this patch into a record. Absent fields retain their prior
    /// values; `id`, `created_at` and `updated_at` are never touched here.
    pub fn apply_to(&self, record: &mut Equipment) {
        if let Some(ref name) = self.name {
            record.name = name.clone();
        }
        if let Some(ref serial) = self.serial_number {
            record.serial_number = serial.clone();
        }
        if let Some(status) = self.status {
            record.status = status;
        }
        if let Some(ref location) = self.location {
            record.location = location.clone();
        }
        if let Some(ref borrower) = self.borrower {
            record.borrower = borrower.clone();
        }
        if let Some(borrow_date) = self.borrow_date {
            record.borrow_date = borrow_date;
        }
        if let Some(return_date) = self.return_date {
            record.return_date = return_date;
        }
        if let Some(repair_receive_date) = self.repair_receive_date {
            record.repair_receive_date = repair_receive_date;
        }
        if let Some(repair_complete_date) = self.repair_complete_date {
            record.repair_complete_date = repair_complete_date;
        }
        if let Some(ref notes) = self.notes {
            record.notes = notes.clone();
        }
    }
}

/// Status transition request.
///
/// Carries the target status plus the auxiliary fields whose relevance
/// depends on it; the transition rules decide what is actually stored.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct StatusChange {
    pub status: EquipmentStatus,
    pub location: String,
    #[serde(default)]
    pub borrower: Option<String>,
    #[serde(default)]
    pub borrow_date: Option<NaiveDate>,
    #[serde(default)]
    pub return_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}
