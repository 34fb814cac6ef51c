use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const MASTER_SERVER_IP_ENV: &str = "PUBLIC_MASTER_SERVER_IP";
pub const MASTER_SERVER_PORT_ENV: &str = "PUBLIC_MASTER_SERVER_PORT";

/// Discovery server listing the available compute servers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MasterServerConfig {
    pub address: String,
    pub port: u16,
}

impl MasterServerConfig {
    /// An address without a scheme is treated as plain http.
    pub fn url(&self) -> String {
        let address = self.address.trim().trim_end_matches('/');
        if address.contains("://") {
            format!("{address}:{}", self.port)
        } else {
            format!("http://{address}:{}", self.port)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub master_server: Option<MasterServerConfig>,
    #[serde(default)]
    pub request_timeout_seconds: Option<u64>,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Settings {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(master) = &self.master_server {
            if master.address.trim().is_empty() {
                return Err(ConfigError::Settings(
                    "`master_server.address` must be non-empty".to_string(),
                ));
            }
            if master.port == 0 {
                return Err(ConfigError::Settings(
                    "`master_server.port` must be greater than 0".to_string(),
                ));
            }
        }
        if self.request_timeout_seconds == Some(0) {
            return Err(ConfigError::Settings(
                "`request_timeout_seconds` must be greater than 0 when set".to_string(),
            ));
        }
        Ok(())
    }

    /// No timeout unless configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_seconds.map(Duration::from_secs)
    }

    /// Applies `PUBLIC_MASTER_SERVER_IP` / `PUBLIC_MASTER_SERVER_PORT` on top of
    /// the file values.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let address = lookup(MASTER_SERVER_IP_ENV).filter(|v| !v.trim().is_empty());
        let port = match lookup(MASTER_SERVER_PORT_ENV).filter(|v| !v.trim().is_empty()) {
            Some(raw) => Some(raw.trim().parse::<u16>().map_err(|_| {
                ConfigError::InvalidEnv {
                    key: MASTER_SERVER_PORT_ENV.to_string(),
                    reason: format!("`{raw}` is not a valid port"),
                }
            })?),
            None => None,
        };
        if address.is_none() && port.is_none() {
            return Ok(());
        }

        let current = self.master_server.take();
        let address = address
            .map(|v| v.trim().to_string())
            .or_else(|| current.as_ref().map(|m| m.address.clone()))
            .ok_or_else(|| ConfigError::InvalidEnv {
                key: MASTER_SERVER_IP_ENV.to_string(),
                reason: format!("must be set when {MASTER_SERVER_PORT_ENV} is set"),
            })?;
        let port = port
            .or_else(|| current.as_ref().map(|m| m.port))
            .ok_or_else(|| ConfigError::InvalidEnv {
                key: MASTER_SERVER_PORT_ENV.to_string(),
                reason: format!("must be set when {MASTER_SERVER_IP_ENV} is set"),
            })?;
        self.master_server = Some(MasterServerConfig { address, port });
        Ok(())
    }
}
