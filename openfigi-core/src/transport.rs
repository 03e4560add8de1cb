//! Transport adapter: one HTTP exchange per batch.
//!
//! The [`Transport`] trait abstracts the exchange so the batcher can be driven by a
//! mock in tests. [`HttpTransport`] is the real implementation over a blocking
//! reqwest client. Failures are classified and logged here and handed back as a
//! [`TransportError`]; merging with requests happens in the client, not here.

use crate::endpoint::ServiceEndpoint;
use crate::error::{FigiError, StatusCause, TransportError};
use crate::request::{LookupRequest, ResponseRecord};
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, error};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-OPENFIGI-APIKEY";

/// Content type the service expects for mapping bodies.
pub const MAPPING_CONTENT_TYPE: &str = "text/json";

/// Performs a single batch exchange with the mapping service.
pub trait Transport {
    /// Post `items` as one JSON array and return the parsed response array unmodified.
    fn post_batch(&self, items: &[LookupRequest]) -> Result<Vec<ResponseRecord>, TransportError>;
}

/// Blocking HTTP transport bound to one endpoint and optional API key.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    endpoint: ServiceEndpoint,
    api_key: Option<String>,
}

impl HttpTransport {
    pub fn new(endpoint: ServiceEndpoint, api_key: Option<String>) -> Result<Self, FigiError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("openfigi-rs/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FigiError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            api_key: api_key.filter(|k| !k.is_empty()),
        })
    }

    pub fn endpoint(&self) -> &ServiceEndpoint {
        &self.endpoint
    }

    /// Whether requests carry an API key (otherwise access is anonymous).
    pub fn is_authenticated(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Transport for HttpTransport {
    fn post_batch(&self, items: &[LookupRequest]) -> Result<Vec<ResponseRecord>, TransportError> {
        let body = serde_json::to_vec(items).map_err(|e| TransportError::Encode(e.to_string()))?;
        debug!(url = self.endpoint.url(), items = items.len(), "posting mapping batch");

        let mut request = self
            .client
            .post(self.endpoint.url())
            .header(CONTENT_TYPE, MAPPING_CONTENT_TYPE)
            .body(body);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let resp = request.send().map_err(|e| {
            error!(error = %e, "mapping request failed before a response arrived");
            TransportError::Network(e.to_string())
        })?;

        let status = resp.status();
        if !status.is_success() {
            let cause = StatusCause::from_status(status.as_u16());
            error!(status = status.as_u16(), "mapping request rejected: {cause}");
            return Err(TransportError::Status {
                status: status.as_u16(),
                cause,
            });
        }

        resp.json::<Vec<ResponseRecord>>().map_err(|e| {
            error!(error = %e, "mapping response could not be parsed");
            TransportError::Decode(e.to_string())
        })
    }
}
