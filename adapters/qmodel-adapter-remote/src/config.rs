//! Configuration for the remote platform.
//!
//! Supports loading configuration from:
//! 1. Default values
//! 2. A YAML file (`~/.qmodel/config.yaml` or an explicit path)
//! 3. Environment variables (`QMODEL_ENDPOINT`, `QMODEL_TOKEN`, `QMODEL_TIMEOUT`)
//!
//! Later sources override earlier ones.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{RemoteError, RemoteResult};

/// Environment variable overriding the endpoint.
pub const ENDPOINT_ENV_VAR: &str = "QMODEL_ENDPOINT";
/// Environment variable overriding the request timeout, in seconds.
pub const TIMEOUT_ENV_VAR: &str = "QMODEL_TIMEOUT";

/// Remote platform settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the platform API.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Bearer token; falls back to `QMODEL_TOKEN` when unset.
    #[serde(default)]
    pub token: Option<String>,
    /// Per-request HTTP timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Upper bound on the synthesis round trip.
    #[serde(default)]
    pub synthesis_timeout_secs: Option<u64>,
    /// Upper bound on the execution round trip.
    #[serde(default)]
    pub execution_timeout_secs: Option<u64>,
    /// Directory where artifacts are written.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("endpoint", &self.endpoint)
            .field("token", &"[REDACTED]")
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("synthesis_timeout_secs", &self.synthesis_timeout_secs)
            .field("execution_timeout_secs", &self.execution_timeout_secs)
            .field("output_dir", &self.output_dir)
            .finish()
    }
}

fn default_endpoint() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_request_timeout() -> u64 {
    60
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            token: None,
            request_timeout_secs: default_request_timeout(),
            synthesis_timeout_secs: None,
            execution_timeout_secs: None,
            output_dir: default_output_dir(),
        }
    }
}

impl RemoteConfig {
    /// Default configuration file location, `~/.qmodel/config.yaml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".qmodel").join("config.yaml"))
    }

    /// Parse configuration from YAML text.
    pub fn from_yaml_str(contents: &str) -> RemoteResult<Self> {
        serde_yaml_ng::from_str(contents).map_err(|e| RemoteError::ConfigParse(e.to_string()))
    }

    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> RemoteResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| RemoteError::ConfigIo {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Load configuration with the following precedence:
    /// 1. Defaults
    /// 2. `config_file`, or the default path if it exists
    /// 3. Environment variable overrides
    pub fn load(config_file: Option<&Path>) -> RemoteResult<Self> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => {
                    debug!(path = %path.display(), "Loading default configuration file");
                    Self::from_file(path)?
                }
                None => Self::default(),
            },
        };
        let config = config.merge_env_from(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup.
    ///
    /// Only variables that are present override the current values; an
    /// unparsable timeout is ignored.
    pub fn merge_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup(ENDPOINT_ENV_VAR) {
            self.endpoint = v;
        }
        if let Some(v) = lookup(qmodel_hal::TOKEN_ENV_VAR) {
            self.token = Some(v);
        }
        if let Some(v) = lookup(TIMEOUT_ENV_VAR) {
            if let Ok(val) = v.parse() {
                self.request_timeout_secs = val;
            }
        }
        self
    }

    /// Override the endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> RemoteResult<()> {
        let endpoint = self.endpoint.trim();
        if endpoint.is_empty() {
            return Err(RemoteError::InvalidConfig("endpoint is empty".to_string()));
        }
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(RemoteError::InvalidConfig(format!(
                "endpoint must use http or https: {endpoint}"
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(RemoteError::InvalidConfig(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if let Some(ref token) = self.token {
            if token.is_empty() {
                return Err(RemoteError::InvalidConfig(
                    "token must not be empty; omit the field to send no token".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// HTTP timeout per request.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Synthesis round-trip bound, if any.
    pub fn synthesis_timeout(&self) -> Option<Duration> {
        self.synthesis_timeout_secs.map(Duration::from_secs)
    }

    /// Execution round-trip bound, if any.
    pub fn execution_timeout(&self) -> Option<Duration> {
        self.execution_timeout_secs.map(Duration::from_secs)
    }
}
