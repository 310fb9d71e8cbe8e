use crate::errors::{AppError, AppResult};
use crate::utils::path::{expand_tilde, sibling};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_DIR: &str = ".zlog";
const CONFIG_FILE: &str = "zlog.conf";
const DATA_FILE: &str = "zlog.csv";
const RECOVERY_DIR: &str = "temp";
const LOG_DIR: &str = "logs";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub data_file: String,
    /// Defaults to `temp/` next to the data file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_dir: Option<String>,
    /// Defaults to `logs/` in the configuration directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<String>,
    #[serde(default)]
    pub heartbeat_enabled: bool,
    /// Seconds between heartbeat entries.
    #[serde(default = "default_heartbeat_interval")]
    pub heartbeat_interval: u64,
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,
    /// Seconds of silence that start a new line in text exports.
    #[serde(default = "default_export_gap")]
    pub export_gap: u64,
}

fn default_heartbeat_interval() -> u64 {
    5
}
fn default_list_limit() -> usize {
    5
}
fn default_export_gap() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: Self::default_data_file().to_string_lossy().to_string(),
            recovery_dir: None,
            log_dir: None,
            heartbeat_enabled: false,
            heartbeat_interval: default_heartbeat_interval(),
            list_limit: default_list_limit(),
            export_gap: default_export_gap(),
        }
    }
}

impl Config {
    /// Per-user configuration directory (`~/.zlog`).
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join(CONFIG_FILE)
    }

    pub fn default_data_file() -> PathBuf {
        Self::config_dir().join(DATA_FILE)
    }

    /// Load the configuration file, or defaults when there is none.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::File::create(path)?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.data_file.trim().is_empty() {
            return Err(AppError::Config("data_file must not be empty".into()));
        }
        if self.heartbeat_interval == 0 {
            return Err(AppError::Config(
                "heartbeat_interval must be at least 1 second".into(),
            ));
        }
        if self.export_gap == 0 {
            return Err(AppError::Config("export_gap must be at least 1 second".into()));
        }
        Ok(())
    }

    pub fn data_path(&self) -> PathBuf {
        expand_tilde(&self.data_file)
    }

    pub fn recovery_path(&self) -> PathBuf {
        match &self.recovery_dir {
            Some(dir) => expand_tilde(dir),
            None => sibling(&self.data_path(), RECOVERY_DIR),
        }
    }

    pub fn log_path(&self) -> PathBuf {
        match &self.log_dir {
            Some(dir) => expand_tilde(dir),
            None => Self::config_dir().join(LOG_DIR),
        }
    }

    pub fn heartbeat_every(&self) -> Duration {
        Duration::from_secs(self.heartbeat_interval)
    }

    /// Create the configuration directory, the configuration file and the
    /// data file's directory. Returns the configuration that was written.
    ///
    /// In test mode the configuration file is left alone.
    pub fn init_all(custom_data_file: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();

        let data_path = match custom_data_file {
            Some(name) => {
                let p = expand_tilde(&name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => Self::default_data_file(),
        };

        let config = Config {
            data_file: data_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        if !is_test {
            fs::create_dir_all(&dir)?;
            config.save_to(&Self::config_file())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = data_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        Ok(config)
    }
}
