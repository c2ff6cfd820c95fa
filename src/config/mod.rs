use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Default worksheet holding the machine log.
pub const DEFAULT_TABLE: &str = "MachineLog";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_storage_path")]
    pub storage_path: String,
    #[serde(default = "default_table_name")]
    pub table_name: String,
    #[serde(default = "default_lock_timeout")]
    pub lock_timeout_ms: u64,
    #[serde(default = "default_require_project")]
    pub require_project: bool,
    #[serde(default)]
    pub report: ReportColumns,
}

/// Column names of the multi-sheet machining report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportColumns {
    #[serde(default = "default_machine_col")]
    pub machine: String,
    #[serde(default = "default_description_col")]
    pub description: String,
    #[serde(default = "default_project_col")]
    pub project: String,
    #[serde(default = "default_minutes_col")]
    pub minutes: String,
}

/// Storage settings injected into the store. Built once from [`Config`].
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub storage_path: PathBuf,
    pub table_name: String,
    pub lock_timeout_ms: u64,
}

fn default_storage_path() -> String {
    Config::storage_file().to_string_lossy().to_string()
}
fn default_table_name() -> String {
    DEFAULT_TABLE.to_string()
}
fn default_lock_timeout() -> u64 {
    5000
}
fn default_require_project() -> bool {
    true
}
fn default_machine_col() -> String {
    "Machine/máy".to_string()
}
fn default_description_col() -> String {
    "Mô tả/Description".to_string()
}
fn default_project_col() -> String {
    "Mã dự án/Project".to_string()
}
fn default_minutes_col() -> String {
    "Tổng thời gian gia công/Total machining time (min)".to_string()
}

impl Default for ReportColumns {
    fn default() -> Self {
        Self {
            machine: default_machine_col(),
            description: default_description_col(),
            project: default_project_col(),
            minutes: default_minutes_col(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_path: default_storage_path(),
            table_name: default_table_name(),
            lock_timeout_ms: default_lock_timeout(),
            require_project: default_require_project(),
            report: ReportColumns::default(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("machlog")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".machlog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("machlog.conf")
    }

    /// Return the default path of the log workbook
    pub fn storage_file() -> PathBuf {
        Self::config_dir().join("machine_log.xlsx")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        Ok(cfg)
    }

    /// Storage settings handed to the store.
    pub fn store(&self) -> StoreConfig {
        StoreConfig {
            storage_path: expand_tilde(&self.storage_path),
            table_name: self.table_name.clone(),
            lock_timeout_ms: self.lock_timeout_ms,
        }
    }

    /// Initialize the configuration file. With `is_test` nothing is written.
    pub fn init_all(&self, is_test: bool) -> AppResult<()> {
        if self.table_name.trim().is_empty() {
            return Err(AppError::Config("table name cannot be empty".into()));
        }

        if is_test {
            return Ok(());
        }

        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let yaml = serde_yaml::to_string(self)?;
        let mut file = fs::File::create(Self::config_file())?;
        file.write_all(yaml.as_bytes())?;
        println!("✅ Config file: {:?}", Self::config_file());

        Ok(())
    }
}
