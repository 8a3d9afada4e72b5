use crate::error::Result;
use crate::services::{ApiKeyService, SharedConfig, open_store};
use ingest::{ApiClient, EventSource, HttpClient, IngestError, SyncStats};
use tracing::warn;

#[derive(Clone)]
pub struct SyncService {
    config: SharedConfig,
    api_key: ApiKeyService,
}

impl SyncService {
    pub(super) fn new(config: SharedConfig, api_key: ApiKeyService) -> Self {
        Self { config, api_key }
    }

    /// Syncs over HTTP. A cached key the API refuses is replaced once.
    pub fn run(&self) -> Result<SyncStats> {
        let client_settings = self.config.settings.client_settings();
        let http = ingest::build_http_client(&client_settings).map_err(IngestError::from)?;

        let Some(cached) = self.api_key.cached()? else {
            let key = self.api_key.refresh(&http)?;
            return self.run_with_key(&http, key);
        };
        let stats = self.run_with_key(&http, cached)?;
        if !stats.key_rejected() {
            return Ok(stats);
        }

        warn!(status = ?stats.remote_status, "cached api key rejected; requesting a new one");
        self.api_key.discard()?;
        let key = self.api_key.refresh(&http)?;
        self.run_with_key(&http, key)
    }

    pub fn run_with_source(&self, source: &dyn EventSource) -> Result<SyncStats> {
        let mut store = open_store(&self.config)?;
        Ok(ingest::sync_events(
            &mut store,
            source,
            &self.config.settings.sync_options(),
        )?)
    }

    fn run_with_key(&self, http: &HttpClient, key: String) -> Result<SyncStats> {
        let base_url = self.config.settings.api_base_url.trim();
        let source = ApiClient::with_client(http.clone(), base_url, key);
        self.run_with_source(&source)
    }
}
