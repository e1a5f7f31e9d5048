use crate::errors::{AppError, AppResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application settings read from `config.toml`
///
/// These are the settings of the tool itself. Organizations, users, and
/// friends live in `state.json` next to it, managed by
/// [`Configuration`](crate::configuration::Configuration).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Storage strategy used unless `--store` overrides it
    pub store: String,
    /// Printers output is sent to, by name
    pub printers: Vec<String>,
    /// Default tracing filter
    pub log_level: String,
    /// Where strategies keep backend files; the home directory when unset
    pub data_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            store: "local".to_string(),
            printers: vec!["console".to_string()],
            log_level: "warn".to_string(),
            data_dir: None,
        }
    }
}

/// Configuration manager for fidelius
///
/// Owns the fidelius home directory: `config.toml` with the application
/// settings and `state.json` with the organization hierarchy. The home is
/// `--home` / `FIDELIUS_HOME` when given, otherwise the platform config
/// directory.
///
/// # Example
///
/// ```rust,no_run
/// use fidelius::config::ConfigManager;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let manager = ConfigManager::new(None)?;
///     println!("Storage strategy: {}", manager.config().store);
///     Ok(())
/// }
/// ```
pub struct ConfigManager {
    home: PathBuf,
    config: AppConfig,
}

impl ConfigManager {
    /// Load the configuration from `home`, or from the default home
    ///
    /// A missing `config.toml` is created with default settings.
    ///
    /// # Errors
    ///
    /// Fails when the home directory cannot be created, or the file cannot
    /// be read, parsed, or written.
    pub fn new(home: Option<PathBuf>) -> AppResult<Self> {
        let home = match home {
            Some(home) => home,
            None => Self::default_home()?,
        };
        fs::create_dir_all(&home)
            .map_err(|e| AppError::io_with_source(&home, "create home directory", e))?;

        let config = Self::load_or_create(&home.join("config.toml"))?;
        Ok(ConfigManager { home, config })
    }

    /// The platform config directory for fidelius
    pub fn default_home() -> AppResult<PathBuf> {
        ProjectDirs::from("", "", "fidelius")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or_else(|| AppError::config("Failed to determine the fidelius home directory"))
    }

    fn load_or_create(path: &Path) -> AppResult<AppConfig> {
        if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| AppError::io_with_source(path, "read config file", e))?;
            toml::from_str(&content)
                .map_err(|e| AppError::config_with_source("Failed to parse config file", e))
        } else {
            let config = AppConfig::default();
            let content = toml::to_string_pretty(&config)
                .map_err(|e| AppError::config_with_source("Failed to serialize default config", e))?;
            fs::write(path, content)
                .map_err(|e| AppError::io_with_source(path, "write default config", e))?;
            Ok(config)
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    /// File holding the organization hierarchy
    pub fn state_path(&self) -> PathBuf {
        self.home.join("state.json")
    }

    /// Directory for backend files, relative paths resolved against home
    pub fn data_dir(&self) -> PathBuf {
        match &self.config.data_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => self.home.join(dir),
            None => self.home.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_default_config() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::new(Some(temp.path().to_path_buf())).unwrap();

        assert_eq!(manager.config(), &AppConfig::default());
        assert!(temp.path().join("config.toml").exists());
        assert_eq!(manager.state_path(), temp.path().join("state.json"));
        assert_eq!(manager.data_dir(), temp.path());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("config.toml"), "store = \"ephemeral\"\n").unwrap();

        let manager = ConfigManager::new(Some(temp.path().to_path_buf())).unwrap();
        assert_eq!(manager.config().store, "ephemeral");
        assert_eq!(manager.config().printers, vec!["console"]);
        assert_eq!(manager.config().log_level, "warn");
    }

    #[test]
    fn test_relative_data_dir_resolves_against_home() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("config.toml"),
            "printers = [\"console\", \"log\"]\ndata_dir = \"data\"\n",
        )
        .unwrap();

        let manager = ConfigManager::new(Some(temp.path().to_path_buf())).unwrap();
        assert_eq!(manager.config().printers, vec!["console", "log"]);
        assert_eq!(manager.data_dir(), temp.path().join("data"));
    }

    #[test]
    fn test_invalid_toml_is_a_config_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("config.toml"), "store = [").unwrap();

        let err = ConfigManager::new(Some(temp.path().to_path_buf())).err().unwrap();
        assert!(matches!(err, AppError::Config { .. }));
    }
}
