//! OpenFIGI Core — client for the OpenFIGI identifier mapping service.
//!
//! This crate contains:
//! - Identifier kinds and lookup request types
//! - Endpoint selection by API version
//! - The request queue and batcher (FIFO batches of at most 100, paced, reconciled)
//! - The HTTP transport adapter with status classification
//! - TOML/env configuration
//!
//! The library emits `tracing` events but never installs a subscriber.

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod id_type;
pub mod observer;
pub mod request;
pub mod transport;

pub use client::{BatchOutcome, BatchStatus, FetchReport, FigiClient};
pub use config::{api_key_from_env, ClientConfig, DEFAULT_PACING_MS, MAX_BATCH_SIZE};
pub use endpoint::{ApiVersion, ServiceEndpoint};
pub use error::{FigiError, StatusCause, TransportError};
pub use id_type::IdType;
pub use observer::{FetchObserver, Pacer, SilentObserver, ThreadSleep, TracingObserver};
pub use request::{LookupRequest, ResponseRecord};
pub use transport::{HttpTransport, Transport};
