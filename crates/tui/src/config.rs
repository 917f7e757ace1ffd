use anyhow::{bail, Context, Result};
use fan_ctl_client::api::{parse_endpoint, DEFAULT_ENDPOINT};
use fan_ctl_client::EndpointOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint: EndpointConfig,
    pub storage: StorageConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub url: String,
    pub connect_timeout_seconds: u64,
    /// Unset means a request may stay in flight forever.
    pub request_timeout_seconds: Option<u64>,
    pub user_agent: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub tick_rate_ms: u64,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_ENDPOINT.to_string(),
            connect_timeout_seconds: 5,
            request_timeout_seconds: None,
            user_agent: "fan-ctl/0.1".to_string(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { tick_rate_ms: 100 }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Config =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Ignoring config file: {e:#}");
            Self::default()
        })
    }

    pub fn validate(&self) -> Result<()> {
        parse_endpoint(&self.endpoint.url)?;
        if self.ui.tick_rate_ms == 0 {
            bail!("ui.tick_rate_ms must be greater than zero");
        }
        Ok(())
    }

    pub fn endpoint_options(&self) -> EndpointOptions {
        EndpointOptions {
            url: self.endpoint.url.clone(),
            connect_timeout: Duration::from_secs(self.endpoint.connect_timeout_seconds),
            request_timeout: self.endpoint.request_timeout_seconds.map(Duration::from_secs),
            user_agent: self.endpoint.user_agent.clone(),
        }
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.ui.tick_rate_ms)
    }
}
