//! Client configuration, loadable from TOML.
//!
//! ```toml
//! api_version = "v2"
//! api_key = "..."          # optional, usually supplied via OPENFIGI_KEY
//! base_url = "https://api.openfigi.com"
//! batch_size = 100
//! pacing_ms = 600
//! ```

use crate::endpoint::{ApiVersion, ServiceEndpoint};
use crate::error::FigiError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Hard per-request item cap imposed by the service.
pub const MAX_BATCH_SIZE: usize = 100;

/// Delay between consecutive batches.
pub const DEFAULT_PACING_MS: u64 = 600;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "OPENFIGI_KEY";

/// Older lowercase spelling of [`API_KEY_ENV`], still honoured.
pub const LEGACY_API_KEY_ENV: &str = "openfigi_key";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    pub api_version: ApiVersion,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub batch_size: usize,
    pub pacing_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_version: ApiVersion::default(),
            api_key: None,
            base_url: None,
            batch_size: MAX_BATCH_SIZE,
            pacing_ms: DEFAULT_PACING_MS,
        }
    }
}

impl ClientConfig {
    /// Default configuration for the given API version token (`"v1"`, `"V2"`, ...).
    pub fn for_version(version: &str) -> Result<Self, FigiError> {
        Ok(Self {
            api_version: version.parse()?,
            ..Self::default()
        })
    }

    pub fn from_toml(s: &str) -> Result<Self, FigiError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, FigiError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Fill `api_key` from the environment when it is not already set.
    pub fn with_env_key(mut self) -> Self {
        if self.api_key.is_none() {
            self.api_key = api_key_from_env();
        }
        self
    }

    pub fn validate(&self) -> Result<(), FigiError> {
        if self.batch_size == 0 || self.batch_size > MAX_BATCH_SIZE {
            return Err(FigiError::BatchSizeOutOfRange(self.batch_size));
        }
        self.endpoint().map(|_| ())
    }

    /// Resolve the mapping endpoint this configuration points at.
    pub fn endpoint(&self) -> Result<ServiceEndpoint, FigiError> {
        match &self.base_url {
            Some(base) => ServiceEndpoint::with_base_url(self.api_version, base),
            None => Ok(ServiceEndpoint::new(self.api_version)),
        }
    }

    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }
}

/// Read the API key from [`API_KEY_ENV`], falling back to [`LEGACY_API_KEY_ENV`].
pub fn api_key_from_env() -> Option<String> {
    [API_KEY_ENV, LEGACY_API_KEY_ENV]
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|key| !key.is_empty())
}
