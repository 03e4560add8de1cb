//! Request queue and batcher.
//!
//! [`FigiClient`] accumulates validated lookup requests and drains them in
//! fixed-size batches:
//! - batches are taken from the head of the queue, so output follows enqueue order
//! - consecutive batches are separated by the configured pacing delay
//! - each response item is merged with the request at the same position in its batch
//! - a failed batch contributes nothing and the run carries on with the next one
//!
//! The queue is always empty after a fetch, whatever happened to individual batches.

use crate::config::ClientConfig;
use crate::error::{FigiError, TransportError};
use crate::id_type::IdType;
use crate::observer::{FetchObserver, Pacer, ThreadSleep, TracingObserver};
use crate::request::{is_error_record, merge_request, LookupRequest, ResponseRecord};
use crate::transport::{HttpTransport, Transport};
use std::fmt;
use std::time::Duration;
use tracing::{error, warn};

/// How a single batch turned out.
#[derive(Debug)]
pub enum BatchStatus {
    /// Response length matched; every item carries its request's fields.
    Merged,
    /// Response length differed from the batch; raw items were published unmerged.
    Unmerged { received: usize },
    /// The exchange failed; the batch contributed no records.
    Failed(TransportError),
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchStatus::Merged => write!(f, "merged"),
            BatchStatus::Unmerged { received } => {
                write!(f, "unmerged ({received} response item(s))")
            }
            BatchStatus::Failed(e) => write!(f, "failed ({e})"),
        }
    }
}

/// Outcome of one dispatched batch.
#[derive(Debug)]
pub struct BatchOutcome {
    /// Zero-based position of the batch within the fetch.
    pub index: usize,
    /// Number of requests sent.
    pub size: usize,
    /// Records appended to the result after filtering.
    pub published: usize,
    pub status: BatchStatus,
}

impl BatchOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self.status, BatchStatus::Failed(_))
    }
}

/// Result of draining the queue: the flattened records plus per-batch outcomes.
#[derive(Debug, Default)]
pub struct FetchReport {
    pub records: Vec<ResponseRecord>,
    pub batches: Vec<BatchOutcome>,
}

impl FetchReport {
    /// True when every batch was dispatched and merged.
    pub fn is_complete(&self) -> bool {
        self.batches
            .iter()
            .all(|b| matches!(b.status, BatchStatus::Merged))
    }

    pub fn succeeded_batches(&self) -> usize {
        self.batches.iter().filter(|b| !b.is_failed()).count()
    }

    pub fn failed_batches(&self) -> impl Iterator<Item = &BatchOutcome> {
        self.batches.iter().filter(|b| b.is_failed())
    }

    pub fn into_records(self) -> Vec<ResponseRecord> {
        self.records
    }
}

/// Mapping client owning one request queue.
///
/// Not meant to be shared: each logical session uses its own instance.
pub struct FigiClient<T: Transport = HttpTransport> {
    transport: T,
    queue: Vec<LookupRequest>,
    batch_size: usize,
    pacing: Duration,
    pacer: Box<dyn Pacer>,
    observer: Box<dyn FetchObserver>,
}

impl FigiClient<HttpTransport> {
    /// Build an HTTP-backed client. Fails on an invalid endpoint or batch size.
    pub fn new(config: &ClientConfig) -> Result<Self, FigiError> {
        config.validate()?;
        let transport = HttpTransport::new(config.endpoint()?, config.api_key.clone())?;
        Self::with_transport(transport, config)
    }

    /// Build an HTTP-backed client from an API version token such as `"V1"`.
    pub fn with_api_version(version: &str, api_key: Option<String>) -> Result<Self, FigiError> {
        let config = ClientConfig {
            api_key,
            ..ClientConfig::for_version(version)?
        };
        Self::new(&config)
    }
}

impl<T: Transport> FigiClient<T> {
    /// Build a client over any transport, taking batch size and pacing from `config`.
    pub fn with_transport(transport: T, config: &ClientConfig) -> Result<Self, FigiError> {
        config.validate()?;
        Ok(Self {
            transport,
            queue: Vec::new(),
            batch_size: config.batch_size,
            pacing: config.pacing(),
            pacer: Box::new(ThreadSleep),
            observer: Box::new(TracingObserver),
        })
    }

    pub fn with_pacer(mut self, pacer: impl Pacer + 'static) -> Self {
        self.pacer = Box::new(pacer);
        self
    }

    pub fn with_observer(mut self, observer: impl FetchObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Requests waiting for the next fetch, in enqueue order.
    pub fn pending(&self) -> &[LookupRequest] {
        &self.queue
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Validate and queue a lookup. Empty qualifiers are left out of the request.
    ///
    /// An unknown `id_type` is logged and the queue is left untouched; the error is
    /// returned for callers that care, but ignoring it is safe.
    pub fn enqueue(
        &mut self,
        id_type: &str,
        id_value: &str,
        exchange_code: &str,
        mic_code: &str,
        currency: &str,
    ) -> Result<(), FigiError> {
        let kind = match id_type.parse::<IdType>() {
            Ok(kind) => kind,
            Err(e) => {
                error!(id_type, id_value, "bad id_type, request dropped");
                self.observer.on_rejected(id_type, id_value);
                return Err(e);
            }
        };

        self.enqueue_request(
            LookupRequest::new(kind, id_value)
                .with_exchange_code(exchange_code)
                .with_mic_code(mic_code)
                .with_currency(currency),
        );
        Ok(())
    }

    /// Queue an already-typed request.
    pub fn enqueue_request(&mut self, request: LookupRequest) {
        self.queue.push(request);
    }

    /// Drain the queue and return the flattened records.
    ///
    /// With `remove_missing`, records carrying an `error` key are dropped.
    pub fn fetch_all(&mut self, remove_missing: bool) -> Vec<ResponseRecord> {
        self.fetch_report(remove_missing).into_records()
    }

    /// Drain the queue, returning records together with a per-batch outcome.
    pub fn fetch_report(&mut self, remove_missing: bool) -> FetchReport {
        let queue = std::mem::take(&mut self.queue);
        let total = queue.len().div_ceil(self.batch_size);
        let mut report = FetchReport::default();

        for (index, batch) in queue.chunks(self.batch_size).enumerate() {
            if index > 0 {
                self.pacer.pause(self.pacing);
            }
            self.observer.on_batch_start(index, total, batch.len());

            let (status, mut records) = match self.transport.post_batch(batch) {
                Ok(items) => reconcile(batch, items),
                Err(e) => (BatchStatus::Failed(e), Vec::new()),
            };

            if remove_missing {
                records.retain(|r| !is_error_record(r));
            }

            let outcome = BatchOutcome {
                index,
                size: batch.len(),
                published: records.len(),
                status,
            };
            self.observer.on_batch_complete(&outcome);

            report.records.extend(records);
            report.batches.push(outcome);
        }

        self.observer.on_fetch_complete(&report);
        report
    }
}

/// Merge response items with the batch positionally, or pass them through when the
/// lengths disagree.
fn reconcile(
    batch: &[LookupRequest],
    mut items: Vec<ResponseRecord>,
) -> (BatchStatus, Vec<ResponseRecord>) {
    if items.len() != batch.len() {
        warn!(
            sent = batch.len(),
            received = items.len(),
            "number of request and response items do not match, publishing raw results"
        );
        let received = items.len();
        return (BatchStatus::Unmerged { received }, items);
    }

    for (item, request) in items.iter_mut().zip(batch) {
        merge_request(item, request);
    }
    (BatchStatus::Merged, items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn record(v: Value) -> ResponseRecord {
        v.as_object().unwrap().clone()
    }

    #[test]
    fn reconcile_merges_by_position() {
        let batch = vec![
            LookupRequest::new(IdType::Ticker, "IBM"),
            LookupRequest::new(IdType::Ticker, "NOPE").with_mic_code("XNYS"),
        ];
        let items = vec![
            record(json!({"data": [{"figi": "BBG000BLNNH6"}]})),
            record(json!({"error": "No identifier found."})),
        ];

        let (status, merged) = reconcile(&batch, items);
        assert!(matches!(status, BatchStatus::Merged));
        assert_eq!(merged[0]["idValue"], "IBM");
        assert_eq!(merged[0]["data"][0]["figi"], "BBG000BLNNH6");
        assert_eq!(merged[1]["idValue"], "NOPE");
        assert_eq!(merged[1]["micCode"], "XNYS");
        assert!(merged[1].contains_key("error"));
    }

    #[test]
    fn reconcile_passes_through_on_length_mismatch() {
        let batch = vec![
            LookupRequest::new(IdType::Isin, "A"),
            LookupRequest::new(IdType::Isin, "B"),
        ];
        let items = vec![record(json!({"data": []}))];

        let (status, raw) = reconcile(&batch, items);
        assert!(matches!(status, BatchStatus::Unmerged { received: 1 }));
        assert_eq!(raw, vec![record(json!({"data": []}))]);
    }

    #[test]
    fn report_flags() {
        let report = FetchReport {
            records: Vec::new(),
            batches: vec![
                BatchOutcome {
                    index: 0,
                    size: 2,
                    published: 2,
                    status: BatchStatus::Merged,
                },
                BatchOutcome {
                    index: 1,
                    size: 1,
                    published: 0,
                    status: BatchStatus::Failed(TransportError::Network("down".into())),
                },
            ],
        };
        assert!(!report.is_complete());
        assert_eq!(report.succeeded_batches(), 1);
        assert_eq!(report.failed_batches().count(), 1);
        assert_eq!(
            report.batches[1].status.to_string(),
            "failed (network error: down)"
        );
    }
}
