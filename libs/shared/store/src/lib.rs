pub mod backend;
pub mod data;
pub mod seed;
pub mod store;

pub use backend::{JsonFileBackend, MemoryBackend, StorageBackend, StoreError};
pub use data::ClinicData;
pub use store::ClinicStore;

use std::sync::Arc;

use shared_config::AppConfig;

/// Shared axum state: configuration plus the injected store.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<ClinicStore>,
}

impl AppState {
    pub fn new(config: Arc<AppConfig>, store: Arc<ClinicStore>) -> Self {
        Self { config, store }
    }

    /// In-memory state with a blank configuration, for cell tests.
    pub async fn in_memory() -> Self {
        let config = AppConfig {
            data_path: String::new(),
            openai_api_key: String::new(),
            openai_base_url: String::new(),
            assistant_model: String::new(),
            port: 0,
        };
        let store = ClinicStore::open(Box::new(MemoryBackend))
            .await
            .expect("memory backend cannot fail to load");
        Self::new(Arc::new(config), Arc::new(store))
    }
}
