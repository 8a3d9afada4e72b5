use std::path::PathBuf;

use authlog_store::StorePaths;

use crate::Result;

const LOG_FILE_NAME: &str = "Logs.json";
const PROGRESS_FILE_NAME: &str = "EntryInfo.json";
const API_KEY_FILE_NAME: &str = "apikey.txt";
const LOCK_FILE_NAME: &str = ".authlog.lock";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppPaths {
    pub app_data_dir: PathBuf,
    pub log_path: PathBuf,
    pub progress_path: PathBuf,
    pub api_key_path: PathBuf,
    pub lock_path: PathBuf,
}

impl AppPaths {
    pub fn new(app_data_dir: PathBuf) -> Self {
        let log_path = app_data_dir.join(LOG_FILE_NAME);
        let progress_path = app_data_dir.join(PROGRESS_FILE_NAME);
        let api_key_path = app_data_dir.join(API_KEY_FILE_NAME);
        let lock_path = app_data_dir.join(LOCK_FILE_NAME);
        Self {
            app_data_dir,
            log_path,
            progress_path,
            api_key_path,
            lock_path,
        }
    }

    pub fn store_paths(&self) -> StorePaths {
        StorePaths {
            log_path: self.log_path.clone(),
            progress_path: self.progress_path.clone(),
            lock_path: self.lock_path.clone(),
        }
    }
}

pub fn ensure_app_data_dir(paths: &AppPaths) -> Result<()> {
    std::fs::create_dir_all(&paths.app_data_dir)?;
    Ok(())
}
