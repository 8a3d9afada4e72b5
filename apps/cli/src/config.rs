use std::fs;
use std::path::{Path, PathBuf};

use authlog_app::AppSettings;
use serde::{Deserialize, Serialize};

const CONFIG_DIR_NAME: &str = "authlog";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub api_base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    pub window_size: u64,
    pub parallel_windows: bool,
    pub request_timeout_secs: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        let settings = AppSettings::default();
        Self {
            api_base_url: settings.api_base_url,
            data_dir: None,
            window_size: settings.window_size,
            parallel_windows: settings.parallel_windows,
            request_timeout_secs: settings.request_timeout_secs,
        }
    }
}

impl CliConfig {
    pub fn settings(&self) -> AppSettings {
        AppSettings {
            api_base_url: self.api_base_url.clone(),
            window_size: self.window_size,
            parallel_windows: self.parallel_windows,
            request_timeout_secs: self.request_timeout_secs,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: CliConfig,
    pub file: PathBuf,
    pub created: bool,
}

/// Loads `explicit` or the default config file, writing defaults when it is missing.
pub fn load_or_create(explicit: Option<&Path>) -> Result<ConfigLoad, String> {
    let file = match explicit {
        Some(path) => path.to_path_buf(),
        None => config_dir()?.join(CONFIG_FILE_NAME),
    };

    if file.exists() {
        let contents = fs::read_to_string(&file)
            .map_err(|err| format!("read config {}: {}", file.display(), err))?;
        let config: CliConfig = toml::from_str(&contents)
            .map_err(|err| format!("parse config {}: {}", file.display(), err))?;
        return Ok(ConfigLoad {
            config,
            file,
            created: false,
        });
    }

    if let Some(dir) = file.parent() {
        fs::create_dir_all(dir)
            .map_err(|err| format!("create config dir {}: {}", dir.display(), err))?;
    }
    let config = CliConfig::default();
    let contents =
        toml::to_string_pretty(&config).map_err(|err| format!("serialize config: {}", err))?;
    fs::write(&file, contents).map_err(|err| format!("write config {}: {}", file.display(), err))?;

    Ok(ConfigLoad {
        config,
        file,
        created: true,
    })
}

fn config_dir() -> Result<PathBuf, String> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME")
        && !xdg.is_empty()
    {
        return Ok(PathBuf::from(xdg).join(CONFIG_DIR_NAME));
    }
    let home = std::env::var("HOME").map_err(|err| format!("resolve HOME: {}", err))?;
    Ok(PathBuf::from(home).join(".config").join(CONFIG_DIR_NAME))
}
