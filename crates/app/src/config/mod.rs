use std::time::Duration;

use ingest::{ClientSettings, DEFAULT_WINDOW_SIZE, SyncOptions};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

pub const DEFAULT_API_BASE_URL: &str = "https://challenger.btbsecurity.com";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Remote API and sync tunables, independent of where files live.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AppSettings {
    pub api_base_url: String,
    pub window_size: u64,
    pub parallel_windows: bool,
    pub request_timeout_secs: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            window_size: DEFAULT_WINDOW_SIZE,
            parallel_windows: false,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl AppSettings {
    pub fn validate(&self) -> Result<()> {
        let base = self.api_base_url.trim();
        if base.is_empty() {
            return Err(AppError::InvalidInput("api base url is empty".to_string()));
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(AppError::InvalidInput(format!(
                "api base url must start with http:// or https://: {}",
                base
            )));
        }
        if self.window_size == 0 {
            return Err(AppError::InvalidInput(
                "window size must be greater than zero".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(AppError::InvalidInput(
                "request timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.api_base_url.trim().to_string(),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    pub fn sync_options(&self) -> SyncOptions {
        SyncOptions {
            window_size: self.window_size,
            parallel_windows: self.parallel_windows,
        }
    }
}
