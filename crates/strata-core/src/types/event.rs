use super::category::Category;
use crate::error::{Result, StrataError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Search event identifier - strictly monotonic u64, starting at 0
pub type EventId = u64;

/// One record of an inbound payload.
///
/// The live feed names the fields `browser` and `terms`; both spellings are
/// accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    /// External display label, resolved through the taxonomy
    #[serde(alias = "browser")]
    pub category: String,

    /// Free-text payload, passed through unmodified
    #[serde(alias = "terms")]
    pub text: String,
}

impl RawRecord {
    pub fn new(category: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            text: text.into(),
        }
    }
}

/// Inbound payload: a sequence of records of which only the first is used.
///
/// Records stay loosely typed until extraction so that trailing records that
/// would not decode cannot reject an otherwise valid event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawEvent {
    records: Vec<Value>,
}

impl RawEvent {
    /// Payload carrying exactly one record.
    pub fn single(record: RawRecord) -> Self {
        Self::from_records(vec![record])
    }

    pub fn from_records(records: Vec<RawRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|record| {
                serde_json::json!({ "category": record.category, "text": record.text })
            })
            .collect();
        Self { records }
    }

    /// Parse wire text. Anything but a JSON array is malformed.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| StrataError::MalformedEventPayload(e.to_string()))
    }

    /// Parse a binary frame. Invalid UTF-8 is malformed, never replaced.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| StrataError::MalformedEventPayload(e.to_string()))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Decode the first record; the rest are ignored.
    pub fn first_record(&self) -> Result<RawRecord> {
        let first = self.records.first().ok_or_else(|| {
            StrataError::MalformedEventPayload("payload contains no records".into())
        })?;
        RawRecord::deserialize(first)
            .map_err(|e| StrataError::MalformedEventPayload(format!("first record: {}", e)))
    }
}

/// An accepted event as kept in the event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchEvent {
    pub id: EventId,

    /// `None` marks a seed placeholder; accepted events always resolve.
    pub category: Option<Category>,

    pub text: String,
}

impl SearchEvent {
    pub fn new(id: EventId, category: Category, text: impl Into<String>) -> Self {
        Self {
            id,
            category: Some(category),
            text: text.into(),
        }
    }

    /// Seed placeholder with no category and empty text.
    pub fn placeholder(id: EventId) -> Self {
        Self {
            id,
            category: None,
            text: String::new(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.category.is_none()
    }
}
