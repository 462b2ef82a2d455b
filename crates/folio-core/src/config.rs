use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use folio_api::{ClientOptions, RetryConfig};

/// Main configuration structure
///
/// Loaded from the config file; the CLI layers flags and `GITHUB_TOKEN`
/// on top. Priority: CLI > Env > File > Defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub github: GitHubConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub profile: ProfileConfig,
}

impl Config {
    /// Load config from the default location, or defaults if there is none
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to parse config: {}", e)))
    }

    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// `folio/config.toml` under the platform config dir
    pub fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find config directory".into()))?
            .join("folio");

        Ok(config_dir.join("config.toml"))
    }

    /// Options for the GitHub client built from the `github` and `fetch` tables
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            token: self.github.token.clone(),
            base_url: self.github.api_url.clone(),
            timeout: self.fetch.timeout_secs.map(Duration::from_secs),
            retry: RetryConfig::with_retries(self.fetch.max_retries),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// Account whose repositories fill the gallery; the profile's
    /// username is used when unset
    pub username: Option<String>,

    /// Personal access token, raises the rate limit
    pub token: Option<String>,

    /// API URL (for GitHub Enterprise)
    #[serde(default = "default_github_url")]
    pub api_url: String,
}

fn default_github_url() -> String {
    "https://api.github.com".to_string()
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            username: None,
            token: None,
            api_url: default_github_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Repositories requested in the single page fetched
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    #[serde(default)]
    pub max_retries: u32,

    /// Request timeout; none means wait for the transport
    pub timeout_secs: Option<u64>,
}

fn default_per_page() -> u32 {
    100
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            max_retries: 0,
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProfileConfig {
    /// Profile TOML to use instead of the bundled one
    pub path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(config.fetch.per_page, 100);
        assert_eq!(config.fetch.max_retries, 0);
        assert!(config.fetch.timeout_secs.is_none());
        assert!(config.profile.path.is_none());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str("[github]\nusername = \"ada\"\n").unwrap();
        assert_eq!(config.github.username.as_deref(), Some("ada"));
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(config.fetch.per_page, 100);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert!(config.github.username.is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folio").join("config.toml");

        let mut config = Config::default();
        config.github.username = Some("sdnssr1".into());
        config.fetch.timeout_secs = Some(10);
        config.save_to(&path).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.github.username.as_deref(), Some("sdnssr1"));
        assert_eq!(reloaded.fetch.timeout_secs, Some(10));
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "github = 3").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(crate::Error::ConfigError(_))
        ));
    }

    #[test]
    fn test_client_options() {
        let mut config = Config::default();
        config.fetch.timeout_secs = Some(5);
        config.fetch.max_retries = 2;

        let options = config.client_options();
        assert_eq!(options.timeout, Some(Duration::from_secs(5)));
        assert_eq!(options.retry.max_retries, 2);
        assert_eq!(options.base_url, "https://api.github.com");
    }
}
