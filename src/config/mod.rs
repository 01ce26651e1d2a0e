use crate::core::chart::manifest::default_palette;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

const APP_DIR: &str = "paperlab";
const CONFIG_FILE: &str = "paperlab.conf";
const DB_FILE: &str = "paperlab.sqlite";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    /// Manifest used by `report` when none is given.
    #[serde(default = "default_manifest")]
    pub default_manifest: String,
    /// Series colours assigned by position.
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
    /// Pre-fills `--person` on `paper add`.
    #[serde(default)]
    pub default_responsible_person: Option<String>,
}

fn default_manifest() -> String {
    "technical".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            default_manifest: default_manifest(),
            palette: default_palette(),
            default_responsible_person: None,
        }
    }
}

impl Config {
    /// `%APPDATA%\paperlab` on Windows, `~/.paperlab` elsewhere.
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join(APP_DIR)
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(format!(".{APP_DIR}"))
        }
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join(CONFIG_FILE)
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join(DB_FILE)
    }

    /// Read the config file. A missing file yields the defaults; missing keys
    /// take their default value.
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Create the config directory, the config file (skipped in test mode)
    /// and an empty database file. Returns the database path.
    ///
    /// A custom database path is taken as given, like the global `--db`.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = match custom_db {
            Some(name) => expand_tilde(name),
            None => dir.join(DB_FILE),
        };

        if !is_test {
            let config = Config {
                database: db_path.to_string_lossy().to_string(),
                ..Self::load().unwrap_or_default()
            };
            fs::write(Self::config_file(), config.to_yaml()?)?;
            success(format!("Config file: {}", Self::config_file().display()));
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        Ok(db_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        let cfg: Config = serde_yaml::from_str("database: /tmp/lab.sqlite\n").unwrap();
        assert_eq!(cfg.database, "/tmp/lab.sqlite");
        assert_eq!(cfg.default_manifest, "technical");
        assert_eq!(cfg.palette, default_palette());
        assert_eq!(cfg.default_responsible_person, None);
    }

    #[test]
    fn yaml_round_trip_keeps_person() {
        let cfg = Config {
            default_responsible_person: Some("Rezaei".into()),
            ..Config::default()
        };
        let back: Config = serde_yaml::from_str(&cfg.to_yaml().unwrap()).unwrap();
        assert_eq!(back, cfg);
    }
}
