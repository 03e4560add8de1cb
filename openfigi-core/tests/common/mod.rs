//! Shared test doubles: a scripted transport and a recording pacer.

#![allow(dead_code)]

use openfigi_core::{LookupRequest, Pacer, ResponseRecord, Transport, TransportError};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Responder =
    Box<dyn Fn(usize, &[LookupRequest]) -> Result<Vec<ResponseRecord>, TransportError>>;

/// Transport that records every batch and answers through a closure
/// receiving the call index and the batch.
pub struct MockTransport {
    calls: Mutex<Vec<Vec<LookupRequest>>>,
    responder: Responder,
}

impl MockTransport {
    pub fn new(
        responder: impl Fn(usize, &[LookupRequest]) -> Result<Vec<ResponseRecord>, TransportError>
            + 'static,
    ) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            responder: Box::new(responder),
        }
    }

    /// Answers every item with a single-match `data` list derived from its value.
    pub fn echo() -> Self {
        Self::new(|_, batch| Ok(batch.iter().map(|r| figi_for(&r.id_value)).collect()))
    }

    /// Always returns the same fixed response array.
    pub fn fixed(response: Value) -> Self {
        Self::new(move |_, _| Ok(records(response.clone())))
    }

    pub fn calls(&self) -> Vec<Vec<LookupRequest>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Transport for MockTransport {
    fn post_batch(&self, items: &[LookupRequest]) -> Result<Vec<ResponseRecord>, TransportError> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(items.to_vec());
            calls.len() - 1
        };
        (self.responder)(index, items)
    }
}

/// Pacer that records requested delays instead of sleeping.
#[derive(Clone, Default)]
pub struct RecordingPacer {
    pauses: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingPacer {
    pub fn pauses(&self) -> Vec<Duration> {
        self.pauses.lock().unwrap().clone()
    }
}

impl Pacer for RecordingPacer {
    fn pause(&self, delay: Duration) {
        self.pauses.lock().unwrap().push(delay);
    }
}

pub fn figi_for(value: &str) -> ResponseRecord {
    record(json!({"data": [{"figi": format!("BBG-{value}")}]}))
}

pub fn record(v: Value) -> ResponseRecord {
    v.as_object().expect("test record must be an object").clone()
}

pub fn records(v: Value) -> Vec<ResponseRecord> {
    v.as_array()
        .expect("test response must be an array")
        .iter()
        .map(|item| record(item.clone()))
        .collect()
}
