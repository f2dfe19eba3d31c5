//! Storage backend contract.

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{Equipment, EquipmentPatch, NewEquipment};

/// The five storage operations every backend implements.
///
/// Two implementations exist: [`super::remote::RemoteRepository`] against the
/// hosted database and [`super::local::LocalRepository`] against the record
/// store. The facade in [`super::EquipmentRepository`] owns the choice
/// between them; nothing outside the repository module talks to a backend
/// directly.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EquipmentBackend: Send + Sync {
    /// All records, newest first.
    async fn list(&self) -> AppResult<Vec<Equipment>>;

    /// Insert a record; the backend assigns id, created_at and updated_at.
    /// Serial uniqueness must have been checked by the caller beforehand.
    async fn insert(&self, data: &NewEquipment) -> AppResult<Equipment>;

    /// Merge a patch into the record with the given id and return the full
    /// updated record. Fails with `NotFound` when the id does not exist.
    async fn update(&self, id: &str, patch: &EquipmentPatch) -> AppResult<Equipment>;

    /// Delete by id. Idempotent: deleting a nonexistent id is not an error.
    async fn delete(&self, id: &str) -> AppResult<()>;

    /// Whether any record other than `exclude_id` carries this serial number.
    async fn exists_by_serial<'a>(
        &self,
        serial: &str,
        exclude_id: Option<&'a str>,
    ) -> AppResult<bool>;
}
