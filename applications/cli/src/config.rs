/// CLI configuration
use crate::error::{CliError, Result};
use employee_client::{routes::DEFAULT_BASE_URL, ClientConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "employee.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default = "default_api")]
    pub api: ApiSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Overall request timeout. Unset means the transport default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit path must exist. Without one, `employee.toml` in the
    /// working directory is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables, e.g. EMS_API__BASE_URL
        settings = settings.add_source(
            config::Environment::with_prefix("EMS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let url = self.api.base_url.trim();
        if url.is_empty() {
            return Err(CliError::Config(
                "API base URL is required (set EMS_API__BASE_URL)".to_string(),
            ));
        }

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(CliError::Config(format!(
                "API base URL must start with http:// or https://, got {:?}",
                url
            )));
        }

        if self.api.timeout_secs == Some(0) || self.api.connect_timeout_secs == Some(0) {
            return Err(CliError::Config(
                "Timeouts must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        let mut client = ClientConfig::new(self.api.base_url.trim());
        if let Some(secs) = self.api.timeout_secs {
            client = client.with_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = self.api.connect_timeout_secs {
            client = client.with_connect_timeout(Duration::from_secs(secs));
        }
        client
    }
}

// Default values
fn default_api() -> ApiSettings {
    ApiSettings {
        base_url: default_base_url(),
        timeout_secs: None,
        connect_timeout_secs: None,
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self { api: default_api() }
    }
}
