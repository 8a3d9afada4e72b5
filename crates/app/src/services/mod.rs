mod api_key;
mod sync;

use std::sync::Arc;

use crate::app::AppConfig;
use crate::error::Result;
use authlog_store::LogStore;

pub use api_key::ApiKeyService;
pub use sync::SyncService;

type SharedConfig = Arc<AppConfig>;

/// Service registry for app-level operations.
#[derive(Clone)]
pub struct AppServices {
    pub api_key: ApiKeyService,
    pub sync: SyncService,
}

impl AppServices {
    pub fn new(config: &AppConfig) -> Self {
        let shared = Arc::new(config.clone());
        let api_key = ApiKeyService::new(shared.clone());
        Self {
            sync: SyncService::new(shared, api_key.clone()),
            api_key,
        }
    }
}

fn open_store(config: &SharedConfig) -> Result<LogStore> {
    Ok(LogStore::open(config.paths.store_paths())?)
}
