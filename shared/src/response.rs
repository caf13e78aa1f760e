//! API response shapes
//!
//! List endpoints answer either with a bare JSON array or with the
//! paginated envelope `{count, next, previous, results}`. Both decode into
//! [`ListPayload`], which always yields a plain ordered sequence.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Paginated list envelope returned by list endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedEnvelope<T> {
    /// Total number of records on the server
    pub count: u64,
    /// URL of the next page, if any
    #[serde(default)]
    pub next: Option<String>,
    /// URL of the previous page, if any
    #[serde(default)]
    pub previous: Option<String>,
    /// Records of the current page
    pub results: Vec<T>,
}

/// Decoded list response
///
/// Every JSON value maps to exactly one variant, so decoding never fails.
/// Anything that is neither an array of `T` nor an envelope of `T` ends up
/// in `Unrecognized` and normalizes to an empty sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum ListPayload<T> {
    /// `[ ... ]`
    Bare(Vec<T>),
    /// `{count, next, previous, results: [ ... ]}`
    Paginated(PaginatedEnvelope<T>),
    /// Any other shape, kept for diagnostics
    Unrecognized(Value),
}

impl<T: DeserializeOwned> ListPayload<T> {
    /// Classify a raw response body.
    ///
    /// Records that fail to decode are skipped and logged; the rest keep
    /// their order.
    pub fn decode(value: &Value) -> Self {
        match value {
            Value::Array(values) => ListPayload::Bare(decode_records(values)),
            Value::Object(map) => match map.get("results") {
                Some(Value::Array(values)) => {
                    let results = decode_records(values);
                    // `count` missing or malformed: fall back to the page length
                    let count = map
                        .get("count")
                        .and_then(Value::as_u64)
                        .unwrap_or(results.len() as u64);
                    ListPayload::Paginated(PaginatedEnvelope {
                        count,
                        next: link(map.get("next")),
                        previous: link(map.get("previous")),
                        results,
                    })
                }
                _ => ListPayload::Unrecognized(value.clone()),
            },
            _ => ListPayload::Unrecognized(value.clone()),
        }
    }
}

fn decode_records<T: DeserializeOwned>(values: &[Value]) -> Vec<T> {
    values
        .iter()
        .enumerate()
        .filter_map(|(index, value)| match T::deserialize(value) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping malformed list record");
                None
            }
        })
        .collect()
}

fn link(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}

impl<T> ListPayload<T> {
    /// Ordered sequence of records; empty for unrecognized shapes.
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListPayload::Bare(items) => items,
            ListPayload::Paginated(envelope) => envelope.results,
            ListPayload::Unrecognized(_) => Vec::new(),
        }
    }

    /// Server-side total when the response carried one.
    pub fn total(&self) -> Option<u64> {
        match self {
            ListPayload::Bare(items) => Some(items.len() as u64),
            ListPayload::Paginated(envelope) => Some(envelope.count),
            ListPayload::Unrecognized(_) => None,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, ListPayload::Unrecognized(_))
    }
}

/// Normalize any list response body into an ordered sequence.
pub fn normalize_list<T: DeserializeOwned>(value: &Value) -> Vec<T> {
    ListPayload::decode(value).into_items()
}

/// Error body sent by the API on non-2xx responses
///
/// Business errors carry `titulo`/`mensaje`; framework-level errors use
/// `detail` or `error`; serializer validation errors map field names to
/// lists of messages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub titulo: Option<String>,
    #[serde(default)]
    pub mensaje: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    /// Remaining keys, e.g. `{"cantidad": ["Este campo es requerido."]}`
    #[serde(flatten)]
    pub fields: serde_json::Map<String, Value>,
}

impl ErrorBody {
    /// Parse an error body, returning `None` unless it carries at least one
    /// usable text field.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        let body: ErrorBody = serde_json::from_slice(bytes).ok()?;
        if body.message().is_some() || body.title().is_some() || body.first_field_error().is_some()
        {
            Some(body)
        } else {
            None
        }
    }

    pub fn title(&self) -> Option<&str> {
        non_blank(self.titulo.as_deref())
    }

    pub fn message(&self) -> Option<&str> {
        non_blank(self.mensaje.as_deref())
            .or_else(|| non_blank(self.detail.as_deref()))
            .or_else(|| non_blank(self.error.as_deref()))
    }

    /// First serializer validation message, rendered as `campo: mensaje`.
    /// `non_field_errors` is rendered without its key.
    pub fn first_field_error(&self) -> Option<String> {
        self.fields.iter().find_map(|(field, value)| {
            let text = match value {
                Value::Array(messages) => messages.iter().find_map(Value::as_str),
                Value::String(message) => Some(message.as_str()),
                _ => None,
            }?;
            if text.trim().is_empty() {
                None
            } else if field == "non_field_errors" {
                Some(text.to_string())
            } else {
                Some(format!("{field}: {text}"))
            }
        })
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}
