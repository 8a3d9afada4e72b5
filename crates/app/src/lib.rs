pub mod app;
pub mod config;
pub mod error;
pub mod services;
pub mod startup;

pub use app::{AppConfig, AppState};
pub use config::{AppSettings, DEFAULT_API_BASE_URL};
pub use error::{AppError, Result};
pub use services::{ApiKeyService, AppServices, SyncService};
pub use startup::{AppPaths, ensure_app_data_dir};
