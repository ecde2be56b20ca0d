use tokio::sync::RwLock;

use crate::backend::{StorageBackend, StoreError};
use crate::data::ClinicData;

/// Shared clinic state behind one reader-writer lock.
///
/// `write` runs the caller's closure under the exclusive lock and persists
/// only when the closure returns `Ok`. A check-then-set sequence such as
/// booking a slot therefore cannot interleave with another writer, and a
/// rejected call leaves nothing half-applied.
pub struct ClinicStore {
    data: RwLock<ClinicData>,
    backend: Box<dyn StorageBackend>,
}

impl ClinicStore {
    pub async fn open(backend: Box<dyn StorageBackend>) -> Result<Self, StoreError> {
        let data = backend.load().await?;
        Ok(Self {
            data: RwLock::new(data),
            backend,
        })
    }

    pub async fn read<R>(&self, f: impl FnOnce(&ClinicData) -> R) -> R {
        let guard = self.data.read().await;
        f(&guard)
    }

    pub async fn write<R, E>(
        &self,
        f: impl FnOnce(&mut ClinicData) -> Result<R, E>,
    ) -> Result<R, E>
    where
        E: From<StoreError>,
    {
        let mut guard = self.data.write().await;
        let value = f(&mut guard)?;
        self.backend.persist(&guard).await?;
        Ok(value)
    }
}
