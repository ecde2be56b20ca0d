use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::data::ClinicData;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Where the clinic state lives between runs. Injected into `ClinicStore`
/// so services never touch the medium directly.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    async fn load(&self) -> Result<ClinicData, StoreError>;
    async fn persist(&self, data: &ClinicData) -> Result<(), StoreError>;
}

/// Single JSON document on disk.
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl StorageBackend for JsonFileBackend {
    async fn load(&self) -> Result<ClinicData, StoreError> {
        if !self.path.exists() {
            debug!("No data file at {}, starting empty", self.path.display());
            return Ok(ClinicData::default());
        }
        let raw = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&raw)?)
    }

    async fn persist(&self, data: &ClinicData) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let raw = serde_json::to_string_pretty(data)?;
        tokio::fs::write(&self.path, raw).await?;
        Ok(())
    }
}

/// Volatile backend for tests: loads empty, persists nowhere.
pub struct MemoryBackend;

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn load(&self) -> Result<ClinicData, StoreError> {
        Ok(ClinicData::default())
    }

    async fn persist(&self, _data: &ClinicData) -> Result<(), StoreError> {
        Ok(())
    }
}
