//! User configuration, loaded through confy
//!
//! Lives in the platform config directory under the `trove` app name and
//! is created with defaults on first run.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const APP_NAME: &str = "trove";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding both collection files
    pub data_directory: String,
    /// File name of the active task list
    pub active_filename: String,
    /// File name of the recycle bin
    pub recycle_filename: String,
}

impl Default for Config {
    fn default() -> Self {
        let data_directory = dirs::data_dir()
            .map(|dir| dir.join(APP_NAME))
            .unwrap_or_else(|| PathBuf::from("."))
            .to_string_lossy()
            .into_owned();

        Self {
            data_directory,
            active_filename: "todo.json".to_string(),
            recycle_filename: "recycle_bin.json".to_string(),
        }
    }
}

impl Config {
    /// Load the config file, writing defaults if it does not exist yet
    pub fn load() -> crate::error::Result<Self> {
        Ok(confy::load(APP_NAME, None)?)
    }

    /// Point the config at another data directory
    pub fn with_data_directory(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(dir) = dir {
            self.data_directory = dir.to_string_lossy().into_owned();
        }
        self
    }

    pub fn data_path(&self) -> PathBuf {
        PathBuf::from(&self.data_directory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filenames() {
        let cfg = Config::default();
        assert_eq!(cfg.active_filename, "todo.json");
        assert_eq!(cfg.recycle_filename, "recycle_bin.json");
        assert!(cfg.data_directory.ends_with(APP_NAME) || cfg.data_directory == ".");
    }

    #[test]
    fn test_data_directory_override() {
        let cfg = Config::default().with_data_directory(Some(PathBuf::from("/tmp/elsewhere")));
        assert_eq!(cfg.data_path(), PathBuf::from("/tmp/elsewhere"));

        let untouched = Config::default().with_data_directory(None);
        assert_eq!(untouched, Config::default());
    }

    #[test]
    fn test_missing_keys_fall_back_to_defaults() {
        let cfg: Config = serde_json::from_str(r#"{"data_directory": "/srv/tasks"}"#).unwrap();
        assert_eq!(cfg.data_directory, "/srv/tasks");
        assert_eq!(cfg.active_filename, "todo.json");
        assert_eq!(cfg.recycle_filename, "recycle_bin.json");
    }
}
