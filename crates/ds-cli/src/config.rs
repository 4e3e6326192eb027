//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
///
/// Loaded from defaults, then the platform config file, then an explicit
/// `--config` file, then `DEVSTATS_*` environment variables (nested keys
/// split on `__`, e.g. `DEVSTATS_GITHUB__TOKEN`).
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub github: GithubSettings,
    #[serde(default)]
    pub gitea: GiteaSettings,
    #[serde(default)]
    pub wakatime: WakatimeSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

/// GitHub credentials.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct GithubSettings {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// Gitea instance location and credentials.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct GiteaSettings {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    /// Optional PEM bundle to trust for self-signed instances.
    #[serde(default)]
    pub ca_cert: Option<PathBuf>,
}

/// WakaTime credentials.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct WakatimeSettings {
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Response cache location and lifetime.
#[derive(Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    pub dir: PathBuf,
    pub ttl_hours: i64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            dir: dirs_cache_path().unwrap_or_else(|| PathBuf::from(".devstats-cache")),
            ttl_hours: 24,
        }
    }
}

/// Chart output location.
#[derive(Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    pub figures_dir: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            figures_dir: PathBuf::from("figures"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github: GithubSettings::default(),
            gitea: GiteaSettings::default(),
            wakatime: WakatimeSettings::default(),
            cache: CacheSettings::default(),
            output: OutputSettings::default(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redacted = |secret: &Option<String>| secret.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("Config")
            .field("github.username", &self.github.username)
            .field("github.token", &redacted(&self.github.token))
            .field("gitea.url", &self.gitea.url)
            .field("gitea.username", &self.gitea.username)
            .field("gitea.token", &redacted(&self.gitea.token))
            .field("gitea.ca_cert", &self.gitea.ca_cert)
            .field("wakatime.api_key", &redacted(&self.wakatime.api_key))
            .field("cache.dir", &self.cache.dir)
            .field("cache.ttl_hours", &self.cache.ttl_hours)
            .field("output.figures_dir", &self.output.figures_dir)
            .finish()
    }
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (DEVSTATS_*)
        figment = figment.merge(Env::prefixed("DEVSTATS_").split("__"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for devstats.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("devstats"))
}

/// Returns the platform-specific cache directory for devstats.
///
/// On Linux: `~/.cache/devstats`
pub fn dirs_cache_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|p| p.join("devstats"))
}
