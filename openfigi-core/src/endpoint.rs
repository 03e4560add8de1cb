//! Service endpoints, selected by API version.

use crate::error::FigiError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Production host of the mapping service.
pub const DEFAULT_BASE_URL: &str = "https://api.openfigi.com";

/// Mapping API version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ApiVersion {
    V1,
    #[default]
    V2,
}

impl ApiVersion {
    pub fn as_str(self) -> &'static str {
        match self {
            ApiVersion::V1 => "v1",
            ApiVersion::V2 => "v2",
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiVersion {
    type Err = FigiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "v1" => Ok(ApiVersion::V1),
            "v2" => Ok(ApiVersion::V2),
            _ => Err(FigiError::UnsupportedApiVersion(s.to_string())),
        }
    }
}

impl Serialize for ApiVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ApiVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(serde::de::Error::custom)
    }
}

/// A resolved mapping URL. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoint {
    version: ApiVersion,
    url: String,
}

impl ServiceEndpoint {
    /// The production endpoint for `version`.
    pub fn new(version: ApiVersion) -> Self {
        Self {
            version,
            url: mapping_url(DEFAULT_BASE_URL, version),
        }
    }

    /// An endpoint on a different host (proxy, local mock server).
    pub fn with_base_url(version: ApiVersion, base_url: &str) -> Result<Self, FigiError> {
        let parsed = reqwest::Url::parse(base_url).map_err(|e| FigiError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FigiError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }
        Ok(Self {
            version,
            url: mapping_url(base_url, version),
        })
    }

    pub fn version(&self) -> ApiVersion {
        self.version
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

fn mapping_url(base_url: &str, version: ApiVersion) -> String {
    format!("{}/{}/mapping", base_url.trim_end_matches('/'), version)
}
