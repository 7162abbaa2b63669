use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::DEFAULT_BASE_URL;
use crate::components::Signature;
use crate::jobs::discovery_poller::PollerConfig;

const DEFAULT_CONFIG: &str = r#"
[server]
# Backend API root, including the /api prefix
base_url = "http://localhost:5001/api"

[polling]
# Discovery job progress polling
interval_secs = 2
max_secs = 300

[campaigns]
default_daily_limit = 30

[export]
# Where exports, previews and templates are saved
# directory = "/home/me/Downloads"

[email]
# Signature appended to outgoing emails
# name = "Jane Doe"
# tagline = "Founder, Example Co"
# email = "jane@example.com"
"#;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct ConsoleConfig {
    pub server: ServerConfig,
    pub polling: PollingConfig,
    pub campaigns: CampaignsConfig,
    pub export: ExportConfig,
    pub email: Signature,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct PollingConfig {
    pub interval_secs: u64,
    pub max_secs: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_secs: 2,
            max_secs: 300,
        }
    }
}

impl PollingConfig {
    pub fn poller_config(&self) -> PollerConfig {
        PollerConfig {
            interval: Duration::from_secs(self.interval_secs.max(1)),
            max_duration: Duration::from_secs(self.max_secs),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct CampaignsConfig {
    pub default_daily_limit: u32,
}

impl Default for CampaignsConfig {
    fn default() -> Self {
        Self {
            default_daily_limit: 30,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct ExportConfig {
    pub directory: Option<PathBuf>,
}

impl ExportConfig {
    /// Configured directory, else the user's downloads folder, else the
    /// working directory.
    pub fn directory(&self) -> PathBuf {
        self.directory
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

impl ConsoleConfig {
    /// Loads the default config file, creating it on first run.
    pub fn load() -> Result<(Self, PathBuf), ConfigError> {
        let config_path = get_config_path();
        let config = Self::load_from(&config_path)?;
        Ok((config, config_path))
    }

    /// Reads `path` (written with defaults when missing) and applies
    /// `LEADCTL_SECTION__KEY` environment overrides.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        if !path.exists() {
            std::fs::write(path, DEFAULT_CONFIG).map_err(|e| {
                ConfigError::Message(format!("Failed to write default config: {e}"))
            })?;
            tracing::info!("Wrote default config to {}", path.display());
        }

        let builder = Config::builder()
            .add_source(File::from(path.to_path_buf()))
            .add_source(Environment::with_prefix("LEADCTL").separator("__"))
            .build()?;

        builder.try_deserialize()
    }
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("lead-console").join("console.toml")
    } else {
        PathBuf::from("console.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_run_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("console.toml");

        let config = ConsoleConfig::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.server.base_url, "http://localhost:5001/api");
        assert_eq!(config.polling.interval_secs, 2);
        assert_eq!(config.polling.max_secs, 300);
        assert_eq!(config.campaigns.default_daily_limit, 30);
        assert!(config.export.directory.is_none());
        assert!(config.email.name.is_empty());
    }

    #[test]
    fn test_file_values_and_partial_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("console.toml");
        std::fs::write(
            &path,
            r#"
[server]
base_url = "http://crm.internal:9000/api"

[campaigns]
default_daily_limit = 50

[export]
directory = "/tmp/leads"

[email]
name = "Sam"
tagline = "Owner"
"#,
        )
        .unwrap();

        let config = ConsoleConfig::load_from(&path).unwrap();
        assert_eq!(config.server.base_url, "http://crm.internal:9000/api");
        assert_eq!(config.campaigns.default_daily_limit, 50);
        assert_eq!(config.polling.max_secs, 300);
        assert_eq!(config.export.directory(), PathBuf::from("/tmp/leads"));
        assert_eq!(config.email.name, "Sam");
        assert_eq!(config.email.email, "");
    }

    #[test]
    fn test_poller_config_from_polling() {
        let polling = PollingConfig {
            interval_secs: 0,
            max_secs: 60,
        };
        let poller = polling.poller_config();
        assert_eq!(poller.interval, Duration::from_secs(1));
        assert_eq!(poller.max_duration, Duration::from_secs(60));
    }
}
