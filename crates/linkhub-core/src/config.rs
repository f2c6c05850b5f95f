//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/linkhub/config.toml)
//! 3. Environment variables (LINKHUB_* prefix)
//!
//! Environment variables take precedence over config file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix
const ENV_PREFIX: &str = "LINKHUB";

/// Admin secret used when nothing else is configured
pub const DEFAULT_ADMIN_PASSWORD: &str = "changeme";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// The JSON document holding the link collection
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Shared secret required for add/delete over HTTP
    #[serde(default = "default_admin_password")]
    pub admin_password: String,

    /// Address the HTTP server binds to
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Write logs here instead of stderr
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            admin_password: default_admin_password(),
            bind: default_bind(),
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (LINKHUB_DATA_FILE, LINKHUB_ADMIN_PASSWORD, ...)
    /// 2. Config file (~/.config/linkhub/config.toml or LINKHUB_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration, preferring a path given on the command line
    pub fn load_with_cli_override(path: Option<&PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        config.ensure_data_dir()?;
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
        // LINKHUB_DATA_FILE
        if let Ok(val) = std::env::var(format!("{}_DATA_FILE", ENV_PREFIX)) {
            if !val.is_empty() {
                self.data_file = PathBuf::from(val);
            }
        }

        // LINKHUB_ADMIN_PASSWORD
        if let Ok(val) = std::env::var(format!("{}_ADMIN_PASSWORD", ENV_PREFIX)) {
            self.admin_password = val;
        }

        // LINKHUB_BIND
        if let Ok(val) = std::env::var(format!("{}_BIND", ENV_PREFIX)) {
            if !val.is_empty() {
                self.bind = val;
            }
        }

        // LINKHUB_LOG_FILE
        if let Ok(val) = std::env::var(format!("{}_LOG_FILE", ENV_PREFIX)) {
            self.log_file = if val.is_empty() {
                None
            } else {
                Some(PathBuf::from(val))
            };
        }
    }

    /// Ensure the directory holding the data file exists
    fn ensure_data_dir(&self) -> Result<()> {
        let dir = self.data_dir();
        if !dir.as_os_str().is_empty() && !dir.exists() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create data directory: {:?}", dir))?;
        }
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with LINKHUB_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("linkhub")
            .join("config.toml")
    }

    /// Directory containing the data file
    pub fn data_dir(&self) -> &Path {
        self.data_file.parent().unwrap_or_else(|| Path::new(""))
    }

    /// Whether the admin secret is still the shipped default
    pub fn uses_default_password(&self) -> bool {
        self.admin_password == DEFAULT_ADMIN_PASSWORD
    }
}

/// Get the default data file
fn default_data_file() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("linkhub")
        .join("links.json")
}

fn default_admin_password() -> String {
    DEFAULT_ADMIN_PASSWORD.to_string()
}

fn default_bind() -> String {
    "127.0.0.1:5000".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;
    use tempfile::TempDir;

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
        "LINKHUB_DATA_FILE",
        "LINKHUB_ADMIN_PASSWORD",
        "LINKHUB_BIND",
        "LINKHUB_LOG_FILE",
    ];

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.admin_password, "changeme");
        assert!(config.uses_default_password());
        assert_eq!(config.bind, "127.0.0.1:5000");
        assert!(config.log_file.is_none());
        assert!(config.data_file.ends_with("linkhub/links.json"));
    }

    #[test]
    fn test_data_dir_is_parent_of_data_file() {
        let config = Config {
            data_file: PathBuf::from("/srv/linkhub/links.json"),
            ..Config::default()
        };
        assert_eq!(config.data_dir(), Path::new("/srv/linkhub"));
    }

    #[test]
    fn test_env_override_data_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("LINKHUB_DATA_FILE", "/tmp/linkhub-test/links.json");
        config.apply_env_overrides();

        assert_eq!(
            config.data_file,
            PathBuf::from("/tmp/linkhub-test/links.json")
        );
    }

    #[test]
    fn test_env_override_admin_password() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();
        env::set_var("LINKHUB_ADMIN_PASSWORD", "s3cret");
        config.apply_env_overrides();

        assert_eq!(config.admin_password, "s3cret");
        assert!(!config.uses_default_password());
    }

    #[test]
    fn test_env_override_log_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("LINKHUB_LOG_FILE", "/var/log/linkhub.log");
        config.apply_env_overrides();
        assert_eq!(config.log_file, Some(PathBuf::from("/var/log/linkhub.log")));

        // Empty string clears it
        env::set_var("LINKHUB_LOG_FILE", "");
        config.apply_env_overrides();
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_empty_bind_keeps_current_value() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();
        env::set_var("LINKHUB_BIND", "");
        config.apply_env_overrides();
        assert_eq!(config.bind, "127.0.0.1:5000");
    }

    #[test]
    fn test_load_from_str() {
        let _guard = EnvGuard::new(ENV_VARS);

        let toml = r#"
            data_file = "/custom/data/links.json"
            admin_password = "hunter2"
            bind = "0.0.0.0:8080"
        "#;

        let config = Config::load_from_str(toml).unwrap();
        assert_eq!(config.data_file, PathBuf::from("/custom/data/links.json"));
        assert_eq!(config.admin_password, "hunter2");
        assert_eq!(config.bind, "0.0.0.0:8080");
    }

    #[test]
    fn test_load_from_str_partial_uses_defaults() {
        let _guard = EnvGuard::new(ENV_VARS);

        let config = Config::load_from_str(r#"bind = "0.0.0.0:9000""#).unwrap();
        assert_eq!(config.bind, "0.0.0.0:9000");
        assert_eq!(config.admin_password, "changeme");
    }

    #[test]
    fn test_env_beats_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        env::set_var("LINKHUB_ADMIN_PASSWORD", "from-env");
        let config = Config::load_from_str(r#"admin_password = "from-file""#).unwrap();
        assert_eq!(config.admin_password, "from-env");
    }

    #[test]
    fn test_load_from_path_creates_data_dir() {
        let _guard = EnvGuard::new(ENV_VARS);
        let temp_dir = TempDir::new().unwrap();

        let data_file = temp_dir.path().join("nested").join("links.json");
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            format!("data_file = {:?}\n", data_file.to_string_lossy()),
        )
        .unwrap();

        let config = Config::load_from_path(&config_path).unwrap();
        assert_eq!(config.data_file, data_file);
        assert!(temp_dir.path().join("nested").is_dir());
    }

    #[test]
    fn test_load_from_path_invalid_toml() {
        let _guard = EnvGuard::new(ENV_VARS);
        let temp_dir = TempDir::new().unwrap();

        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "bind = [unterminated").unwrap();

        assert!(Config::load_from_path(&config_path).is_err());
    }

    #[test]
    fn test_serialization() {
        let config = Config {
            data_file: PathBuf::from("/data/linkhub/links.json"),
            admin_password: "pw".to_string(),
            bind: "127.0.0.1:5001".to_string(),
            log_file: None,
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("data_file"));
        assert!(toml_str.contains("admin_password"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.data_file, config.data_file);
        assert_eq!(parsed.bind, config.bind);
    }
}
