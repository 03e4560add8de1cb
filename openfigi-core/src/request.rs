//! Lookup requests and the response records they reconcile into.

use crate::id_type::IdType;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One mapping job as sent to the service.
///
/// Optional qualifiers are `None` when empty and are then omitted from the JSON body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupRequest {
    pub id_type: IdType,
    pub id_value: String,
    #[serde(rename = "exchCode", skip_serializing_if = "Option::is_none", default)]
    pub exchange_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub mic_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub currency: Option<String>,
}

impl LookupRequest {
    pub fn new(id_type: IdType, id_value: impl Into<String>) -> Self {
        Self {
            id_type,
            id_value: id_value.into(),
            exchange_code: None,
            mic_code: None,
            currency: None,
        }
    }

    /// Set the exchange code; an empty string leaves it unset.
    pub fn with_exchange_code(mut self, code: &str) -> Self {
        self.exchange_code = non_empty(code);
        self
    }

    /// Set the ISO market identification code; an empty string leaves it unset.
    pub fn with_mic_code(mut self, code: &str) -> Self {
        self.mic_code = non_empty(code);
        self
    }

    /// Set the currency; an empty string leaves it unset.
    pub fn with_currency(mut self, currency: &str) -> Self {
        self.currency = non_empty(currency);
        self
    }

    /// The request's wire fields as a JSON object.
    pub fn to_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("idType".into(), Value::String(self.id_type.as_str().into()));
        fields.insert("idValue".into(), Value::String(self.id_value.clone()));
        if let Some(code) = &self.exchange_code {
            fields.insert("exchCode".into(), Value::String(code.clone()));
        }
        if let Some(code) = &self.mic_code {
            fields.insert("micCode".into(), Value::String(code.clone()));
        }
        if let Some(currency) = &self.currency {
            fields.insert("currency".into(), Value::String(currency.clone()));
        }
        fields
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// A mapping returned by the service, possibly augmented with its request's fields.
///
/// Carries either `data` (a match list, possibly empty) or `error` (a per-item failure).
pub type ResponseRecord = Map<String, Value>;

/// Write the request's fields onto the response record.
pub fn merge_request(record: &mut ResponseRecord, request: &LookupRequest) {
    for (key, value) in request.to_fields() {
        record.insert(key, value);
    }
}

/// True when the service reported a per-item failure for this record.
pub fn is_error_record(record: &ResponseRecord) -> bool {
    record.contains_key("error")
}
