use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_NAME: &str = "reddit-media";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    /// `json` or `pretty`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: format!("{}/{}", APP_NAME, env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        if config.http.timeout_secs == 0 {
            anyhow::bail!("http.timeout_secs must be greater than zero");
        }
        Ok(config)
    }

    pub fn get_logging_format(&self) -> &str {
        &self.logging.format
    }
}

/// Finds the config file: explicit path, then `CONFIG_FILE`, then the XDG and
/// home config directories.
pub fn get_config_path(explicit: Option<&str>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(PathBuf::from(path));
    }

    if let Ok(path) = std::env::var("CONFIG_FILE") {
        return Some(PathBuf::from(path));
    }

    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        let config_path = Path::new(&xdg_config_home)
            .join(APP_NAME)
            .join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
    }

    if let Some(home) = dirs::home_dir() {
        let config_path = home.join(".config").join(APP_NAME).join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.get_logging_format(), "json");
        assert_eq!(config.http.timeout(), Duration::from_secs(30));
        assert!(config.http.user_agent.starts_with("reddit-media/"));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml("[logging]\nformat = \"pretty\"\n").unwrap();
        assert_eq!(config.get_logging_format(), "pretty");
        assert_eq!(config.http.timeout_secs, 30);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(Config::from_toml("[http]\ntimeout_secs = 0\n").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[http]\ntimeout_secs = 5\nuser_agent = \"tester\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.http.timeout(), Duration::from_secs(5));
        assert_eq!(config.http.user_agent, "tester");
    }

    #[test]
    fn test_from_missing_file() {
        assert!(Config::from_file("/nonexistent/reddit-media.toml").is_err());
    }

    #[test]
    fn test_explicit_config_path_wins() {
        assert_eq!(
            get_config_path(Some("/tmp/custom.toml")),
            Some(PathBuf::from("/tmp/custom.toml"))
        );
    }
}
