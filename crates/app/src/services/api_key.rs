use std::fs;
use std::io;

use crate::error::Result;
use crate::services::SharedConfig;
use ingest::{HttpClient, IngestError};
use tracing::info;

/// Fetches the API key once and caches it in the data directory.
#[derive(Clone)]
pub struct ApiKeyService {
    config: SharedConfig,
}

impl ApiKeyService {
    pub(super) fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    pub fn cached(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.config.paths.api_key_path) {
            Ok(contents) => {
                let key = contents.trim();
                Ok((!key.is_empty()).then(|| key.to_string()))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub fn save(&self, key: &str) -> Result<()> {
        if let Some(parent) = self.config.paths.api_key_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.config.paths.api_key_path, key)?;
        Ok(())
    }

    pub fn discard(&self) -> Result<()> {
        match fs::remove_file(&self.config.paths.api_key_path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Requests a new key from the API and caches it.
    pub fn refresh(&self, client: &HttpClient) -> Result<String> {
        info!(base_url = %self.config.settings.api_base_url, "grabbing api key");
        let key = ingest::fetch_api_key(client, self.config.settings.api_base_url.trim())
            .map_err(IngestError::from)?;
        self.save(&key)?;
        info!(path = %self.config.paths.api_key_path.display(), "saved api key");
        Ok(key)
    }
}
