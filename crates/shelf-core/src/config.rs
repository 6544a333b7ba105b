//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/shelf/config.toml)
//! 3. Environment variables (SHELF_* prefix)
//!
//! Environment variables take precedence over config file values.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::{Catalog, CatalogSource};
use crate::theme::Theme;

/// Environment variable prefix
const ENV_PREFIX: &str = "SHELF";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory for local files (debug log)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Catalog JSON file; the bundled sample is used when unset
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// Overrides the catalog's books_per_page
    #[serde(default)]
    pub page_size: Option<usize>,

    /// Theme applied at startup
    #[serde(default)]
    pub theme: Theme,

    /// Log file for TUI mode (defaults to {data_dir}/debug.log)
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            catalog_path: None,
            page_size: None,
            theme: Theme::Day,
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (SHELF_DATA_DIR, SHELF_CATALOG, SHELF_PAGE_SIZE, SHELF_THEME)
    /// 2. Config file (~/.config/shelf/config.toml or SHELF_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration, preferring a path given on the command line
    pub fn load_with_cli_override(path: Option<&PathBuf>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from_path(p),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // SHELF_DATA_DIR
        if let Ok(val) = std::env::var(format!("{}_DATA_DIR", ENV_PREFIX)) {
            self.data_dir = PathBuf::from(val);
        }

        // SHELF_CATALOG
        if let Ok(val) = std::env::var(format!("{}_CATALOG", ENV_PREFIX)) {
            self.catalog_path = if val.is_empty() {
                None
            } else {
                Some(PathBuf::from(val))
            };
        }

        // SHELF_PAGE_SIZE
        if let Ok(val) = std::env::var(format!("{}_PAGE_SIZE", ENV_PREFIX)) {
            match val.parse::<usize>() {
                Ok(n) if n > 0 => self.page_size = Some(n),
                _ => warn!("Ignoring {}_PAGE_SIZE={:?}: not a positive number", ENV_PREFIX, val),
            }
        }

        // SHELF_THEME
        if let Ok(val) = std::env::var(format!("{}_THEME", ENV_PREFIX)) {
            match val.parse::<Theme>() {
                Ok(theme) => self.theme = theme,
                Err(e) => warn!("Ignoring {}_THEME: {}", ENV_PREFIX, e),
            }
        }
    }

    /// Ensure data directory exists
    pub fn ensure_data_dir(&self) -> Result<()> {
        if !self.data_dir.exists() {
            std::fs::create_dir_all(&self.data_dir)
                .with_context(|| format!("Failed to create data directory: {:?}", self.data_dir))?;
        }
        Ok(())
    }

    /// Save configuration to a specific file
    pub fn save_to_path(&self, config_path: &PathBuf) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with SHELF_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("shelf")
            .join("config.toml")
    }

    /// Where the catalog comes from
    pub fn catalog_source(&self) -> CatalogSource {
        match &self.catalog_path {
            Some(path) => CatalogSource::File(path.clone()),
            None => CatalogSource::Bundled,
        }
    }

    /// Configured page size override, if any
    pub fn page_size_override(&self) -> Result<Option<NonZeroUsize>> {
        match self.page_size {
            None => Ok(None),
            Some(n) => NonZeroUsize::new(n)
                .map(Some)
                .with_context(|| format!("Invalid page_size {}: must be at least 1", n)),
        }
    }

    /// Load the configured catalog and apply the page size override
    pub fn open_catalog(&self) -> Result<Catalog> {
        let source = self.catalog_source();
        let mut catalog = source
            .load()
            .with_context(|| format!("Failed to load catalog {}", source))?;
        if let Some(page_size) = self.page_size_override()? {
            catalog = catalog.with_page_size(page_size);
        }
        Ok(catalog)
    }

    /// Get the path of the debug log
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join("debug.log"))
    }
}

/// Get the default data directory
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("shelf")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to serialize tests that touch environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Guard that locks env access and saves/restores env vars
    struct EnvGuard<'a> {
        _lock: std::sync::MutexGuard<'a, ()>,
        saved: Vec<(String, Option<String>)>,
    }

    impl<'a> EnvGuard<'a> {
        fn new(vars: &[&str]) -> Self {
            let lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
            let saved = vars
                .iter()
                .map(|&name| (name.to_string(), env::var(name).ok()))
                .collect();
            for name in vars {
                env::remove_var(name);
            }
            Self { _lock: lock, saved }
        }
    }

    impl Drop for EnvGuard<'_> {
        fn drop(&mut self) {
            for (name, value) in &self.saved {
                match value {
                    Some(v) => env::set_var(name, v),
                    None => env::remove_var(name),
                }
            }
        }
    }

    const ENV_VARS: &[&str] = &[
        "SHELF_DATA_DIR",
        "SHELF_CATALOG",
        "SHELF_PAGE_SIZE",
        "SHELF_THEME",
    ];

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme, Theme::Day);
        assert!(config.catalog_path.is_none());
        assert!(config.page_size.is_none());
        assert!(config.data_dir.ends_with("shelf"));
        assert_eq!(config.catalog_source(), CatalogSource::Bundled);
    }

    #[test]
    fn test_log_path() {
        let mut config = Config::default();
        assert!(config.log_path().ends_with("debug.log"));

        config.log_file = Some(PathBuf::from("/tmp/shelf.log"));
        assert_eq!(config.log_path(), PathBuf::from("/tmp/shelf.log"));
    }

    #[test]
    fn test_env_override_catalog() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();
        env::set_var("SHELF_CATALOG", "/data/books.json");
        config.apply_env_overrides();
        assert_eq!(
            config.catalog_source(),
            CatalogSource::File(PathBuf::from("/data/books.json"))
        );

        // Empty string clears it
        env::set_var("SHELF_CATALOG", "");
        config.apply_env_overrides();
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn test_env_override_page_size() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();
        env::set_var("SHELF_PAGE_SIZE", "12");
        config.apply_env_overrides();
        assert_eq!(config.page_size, Some(12));

        // Invalid values are ignored
        env::set_var("SHELF_PAGE_SIZE", "0");
        config.apply_env_overrides();
        assert_eq!(config.page_size, Some(12));
        env::set_var("SHELF_PAGE_SIZE", "lots");
        config.apply_env_overrides();
        assert_eq!(config.page_size, Some(12));
    }

    #[test]
    fn test_env_override_theme() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();
        env::set_var("SHELF_THEME", "night");
        config.apply_env_overrides();
        assert_eq!(config.theme, Theme::Night);

        env::set_var("SHELF_THEME", "sepia");
        config.apply_env_overrides();
        assert_eq!(config.theme, Theme::Night);
    }

    #[test]
    fn test_env_beats_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        env::set_var("SHELF_THEME", "day");
        let config = Config::load_from_str(r#"theme = "night""#).unwrap();
        assert_eq!(config.theme, Theme::Day);
    }

    #[test]
    fn test_load_from_str() {
        let _guard = EnvGuard::new(ENV_VARS);

        let toml = r#"
            data_dir = "/custom/data"
            catalog_path = "/custom/books.json"
            page_size = 6
            theme = "night"
        "#;

        let config = Config::load_from_str(toml).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/custom/data"));
        assert_eq!(config.catalog_path, Some(PathBuf::from("/custom/books.json")));
        assert_eq!(config.page_size_override().unwrap().map(|n| n.get()), Some(6));
        assert_eq!(config.theme, Theme::Night);
    }

    #[test]
    fn test_zero_page_size_in_file_is_rejected() {
        let _guard = EnvGuard::new(ENV_VARS);

        let config = Config::load_from_str("page_size = 0").unwrap();
        assert!(config.page_size_override().is_err());
    }

    #[test]
    fn test_load_from_path_missing_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let path = PathBuf::from("/nonexistent/config.toml");
        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.theme, Theme::Day);
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let _guard = EnvGuard::new(ENV_VARS);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config {
            data_dir: PathBuf::from("/data/shelf"),
            catalog_path: Some(PathBuf::from("/data/books.json")),
            page_size: Some(10),
            theme: Theme::Night,
            log_file: None,
        };
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded.data_dir, config.data_dir);
        assert_eq!(loaded.catalog_path, config.catalog_path);
        assert_eq!(loaded.page_size, Some(10));
        assert_eq!(loaded.theme, Theme::Night);
    }

    #[test]
    fn test_open_catalog_applies_page_size() {
        let _guard = EnvGuard::new(ENV_VARS);

        let config = Config {
            page_size: Some(3),
            ..Config::default()
        };
        let catalog = config.open_catalog().unwrap();
        assert_eq!(catalog.page_size().get(), 3);
    }

    #[test]
    fn test_open_catalog_missing_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let config = Config {
            catalog_path: Some(PathBuf::from("/nonexistent/books.json")),
            ..Config::default()
        };
        let err = config.open_catalog().unwrap_err();
        assert!(err.to_string().contains("Failed to load catalog"));
    }
}
