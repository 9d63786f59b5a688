//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Default database file
    pub database: Option<PathBuf>,

    /// Default number of notes per listing page
    pub page_size: Option<u32>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/tango/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tango")
            .join("config.toml")
    }

    /// Resolve the database path, with the CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--db` argument (or `TANGO_DB`)
    /// 2. Config file `database` setting
    /// 3. `tango.db` in the user data directory
    pub fn database_path(&self, cli_db: Option<&PathBuf>) -> PathBuf {
        cli_db
            .cloned()
            .or_else(|| self.database.clone())
            .unwrap_or_else(Self::default_database_path)
    }

    fn default_database_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tango")
            .join("tango.db")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_is_empty() {
        let config = Config::default();
        assert!(config.database.is_none());
        assert!(config.page_size.is_none());
    }

    #[test]
    fn database_path_prefers_cli_arg() {
        let config = Config {
            database: Some(PathBuf::from("/config/tango.db")),
            page_size: None,
        };
        let cli_db = PathBuf::from("/cli/tango.db");
        assert_eq!(
            config.database_path(Some(&cli_db)),
            PathBuf::from("/cli/tango.db")
        );
    }

    #[test]
    fn database_path_falls_back_to_config() {
        let config = Config {
            database: Some(PathBuf::from("/config/tango.db")),
            page_size: None,
        };
        assert_eq!(config.database_path(None), PathBuf::from("/config/tango.db"));
    }

    #[test]
    fn database_path_falls_back_to_data_dir() {
        let config = Config::default();
        assert!(config.database_path(None).ends_with("tango/tango.db"));
    }

    #[test]
    fn config_path_is_in_config_dir() {
        let path = Config::config_path();
        assert!(path.ends_with("tango/config.toml"));
    }

    #[test]
    fn load_from_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load_from(&temp.path().join("absent.toml")).unwrap();
        assert!(config.database.is_none());
    }

    #[test]
    fn load_from_parses_keys() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "database = \"/tmp/words.db\"\npage_size = 50\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.database, Some(PathBuf::from("/tmp/words.db")));
        assert_eq!(config.page_size, Some(50));
    }

    #[test]
    fn load_from_reports_bad_toml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "page_size = \"many\"").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("failed to parse config file"));
    }
}
