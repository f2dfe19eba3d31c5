//! Repository layer.
//!
//! [`EquipmentRepository`] is the sole storage interface the service layer
//! consumes. It dispatches every operation to the remote backend when one is
//! configured and falls back to the local record store when the remote is
//! absent or fails; the fallback decision lives here and nowhere else.

pub mod backend;
pub mod local;
pub mod remote;

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::RemoteConfig;
use crate::error::AppResult;
use crate::models::{Equipment, EquipmentPatch, NewEquipment};

pub use backend::EquipmentBackend;
pub use local::LocalRepository;
pub use remote::RemoteRepository;

/// Which backend actually served an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServedVia {
    /// Remote backend answered.
    Remote,
    /// Local store by configuration (no remote installed).
    Local,
    /// Remote failed; local store served as a substitute outcome.
    LocalFallback,
}

/// Operation result tagged with the backend that produced it, so callers and
/// tests can tell "remote worked", "remote failed, local served" and "local
/// by configuration" apart instead of inferring it from logs.
#[derive(Debug)]
pub struct Served<T> {
    pub value: T,
    pub via: ServedVia,
}

impl<T> Served<T> {
    pub fn into_value(self) -> T {
        self.value
    }
}

/// Single fallback path shared by all five operations: try the installed
/// remote, log and re-run the same call against the local store on error.
macro_rules! with_fallback {
    ($self:ident, $op:literal, |$backend:ident| $call:expr) => {{
        let remote = $self.remote.read().await.clone();
        match remote {
            Some(remote) => {
                let $backend = remote.as_ref();
                match $call.await {
                    Ok(value) => Ok(Served {
                        value,
                        via: ServedVia::Remote,
                    }),
                    Err(e) => {
                        tracing::warn!(
                            op = $op,
                            error = %e,
                            "remote backend failed, serving from local store"
                        );
                        let $backend = &$self.local;
                        $call.await.map(|value| Served {
                            value,
                            via: ServedVia::LocalFallback,
                        })
                    }
                }
            }
            None => {
                let $backend = &$self.local;
                $call.await.map(|value| Served {
                    value,
                    via: ServedVia::Local,
                })
            }
        }
    }};
}

/// Facade over the two storage backends.
pub struct EquipmentRepository {
    local: LocalRepository,
    remote: RwLock<Option<Arc<dyn EquipmentBackend>>>,
}

impl EquipmentRepository {
    /// Build from the resolved backend configuration; installs a remote
    /// adapter only when the configuration passes the selector.
    pub fn new(local: LocalRepository, config: &RemoteConfig) -> Self {
        let remote: Option<Arc<dyn EquipmentBackend>> = if config.is_configured() {
            Some(Arc::new(RemoteRepository::new(config)))
        } else {
            None
        };
        Self {
            local,
            remote: RwLock::new(remote),
        }
    }

    /// Inject an arbitrary remote backend (tests).
    pub fn with_remote(local: LocalRepository, remote: Arc<dyn EquipmentBackend>) -> Self {
        Self {
            local,
            remote: RwLock::new(Some(remote)),
        }
    }

    /// Swap the remote backend in or out after a configuration change. This
    /// is the only point where the backend selection is re-resolved.
    pub async fn reconfigure(&self, config: &RemoteConfig) {
        let mut slot = self.remote.write().await;
        if config.is_configured() {
            tracing::info!(url = %config.url, "switching to remote backend");
            *slot = Some(Arc::new(RemoteRepository::new(config)));
        } else {
            tracing::info!("remote backend unconfigured, using local store");
            *slot = None;
        }
    }

    /// Whether a remote backend is currently installed.
    pub async fn remote_active(&self) -> bool {
        self.remote.read().await.is_some()
    }

    pub async fn list(&self) -> AppResult<Served<Vec<Equipment>>> {
        with_fallback!(self, "list", |backend| backend.list())
    }

    pub async fn add(&self, data: &NewEquipment) -> AppResult<Served<Equipment>> {
        with_fallback!(self, "add", |backend| backend.insert(data))
    }

    pub async fn update(&self, id: &str, patch: &EquipmentPatch) -> AppResult<Served<Equipment>> {
        with_fallback!(self, "update", |backend| backend.update(id, patch))
    }

    pub async fn remove(&self, id: &str) -> AppResult<Served<()>> {
        with_fallback!(self, "remove", |backend| backend.delete(id))
    }

    pub async fn exists_by_serial(
        &self,
        serial: &str,
        exclude_id: Option<&str>,
    ) -> AppResult<Served<bool>> {
        with_fallback!(self, "exists_by_serial", |backend| backend
            .exists_by_serial(serial, exclude_id))
    }
}

#[cfg(test)]
mod tests {
    use super::backend::MockEquipmentBackend;
    use super::*;
    use crate::error::AppError;
    use crate::models::EquipmentStatus;
    use crate::store::RecordStore;

    fn new_item(serial: &str) -> NewEquipment {
        NewEquipment {
            name: "PC1".into(),
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

    fn local_repo(dir: &tempfile::TempDir) -> LocalRepository {
        LocalRepository::new(RecordStore::open(dir.path()).unwrap())
    }

    #[tokio::test]
    async fn test_unconfigured_remote_serves_local() {
        let dir = tempfile::tempdir().unwrap();
        let repo = EquipmentRepository::new(local_repo(&dir), &RemoteConfig::default());

        assert!(!repo.remote_active().await);
        let served = repo.list().await.unwrap();
        assert_eq!(served.via, ServedVia::Local);
    }

    #[tokio::test]
    async fn test_remote_success_is_tagged_remote() {
        let dir = tempfile::tempdir().unwrap();
        let mut mock = MockEquipmentBackend::new();
        mock.expect_list().returning(|| Ok(Vec::new()));

        let repo = EquipmentRepository::with_remote(local_repo(&dir), Arc::new(mock));
        let served = repo.list().await.unwrap();
        assert_eq!(served.via, ServedVia::Remote);
    }

    #[tokio::test]
    async fn test_remote_failure_falls_back_to_local() {
        let dir = tempfile::tempdir().unwrap();
        let local = local_repo(&dir);
        // Pre-populate the local store so the fallback has something to serve.
        let seeded = local.insert(&new_item("S1")).await.unwrap();

        let mut mock = MockEquipmentBackend::new();
        mock.expect_list()
            .returning(|| Err(AppError::Backend("connection refused".into())));

        let repo = EquipmentRepository::with_remote(local, Arc::new(mock));
        let served = repo.list().await.unwrap();

        assert_eq!(served.via, ServedVia::LocalFallback);
        assert_eq!(served.value.len(), 1);
        assert_eq!(served.value[0].id, seeded.id);
    }

    #[tokio::test]
    async fn test_mutating_ops_use_the_same_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let mut mock = MockEquipmentBackend::new();
        mock.expect_insert()
            .returning(|_| Err(AppError::Backend("timeout".into())));
        mock.expect_list()
            .returning(|| Err(AppError::Backend("timeout".into())));

        let repo = EquipmentRepository::with_remote(local_repo(&dir), Arc::new(mock));
        let served = repo.add(&new_item("S1")).await.unwrap();

        assert_eq!(served.via, ServedVia::LocalFallback);
        assert_eq!(served.value.serial_number, "S1");
        // The fallback write landed in the local store.
        let listed = repo.list().await.unwrap();
        assert_eq!(listed.value.len(), 1);
    }

    #[tokio::test]
    async fn test_reconfigure_installs_and_removes_remote() {
        let dir = tempfile::tempdir().unwrap();
        let repo = EquipmentRepository::new(local_repo(&dir), &RemoteConfig::default());
        assert!(!repo.remote_active().await);

        let configured = RemoteConfig {
            url: "https://abcd1234.supabase.co".into(),
            anon_key: "eyJ".to_string() + &"a".repeat(60),
            service_role_key: None,
        };
        repo.reconfigure(&configured).await;
        assert!(repo.remote_active().await);

        repo.reconfigure(&RemoteConfig::default()).await;
        assert!(!repo.remote_active().await);
    }
}
