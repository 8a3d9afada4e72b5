use crate::config::AppSettings;
use crate::error::Result;
use crate::services::AppServices;
use crate::startup::{AppPaths, ensure_app_data_dir};
use ingest::SyncStats;

/// Where files live and how to talk to the API.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub paths: AppPaths,
    pub settings: AppSettings,
}

/// Application state shared by frontends.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub services: AppServices,
}

impl AppState {
    pub fn new(paths: AppPaths, settings: AppSettings) -> Self {
        let config = AppConfig { paths, settings };
        let services = AppServices::new(&config);
        Self { config, services }
    }

    pub fn is_fresh(&self) -> bool {
        !self.config.paths.progress_path.exists()
    }

    pub fn initialize(&self) -> Result<()> {
        self.config.settings.validate()?;
        ensure_app_data_dir(&self.config.paths)
    }

    pub fn refresh_data(&self) -> Result<SyncStats> {
        self.services.sync.run()
    }
}
