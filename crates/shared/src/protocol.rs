use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::{MemoryRecord, Year};

pub const TIMELINE_STATUS_OK: &str = "ok";

/// Envelope returned by `GET /timeline`.
///
/// Items stay untyped until [`TimelineResponse::into_records`] so that one
/// broken entry does not fail the whole batch. A missing or `null` `items`
/// field is an empty timeline; a non-array `items` fails deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimelineResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "items_or_empty")]
    pub items: Vec<Value>,
}

fn items_or_empty<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default())
}

impl TimelineResponse {
    pub fn ok(items: Vec<Value>) -> Self {
        Self {
            status: Some(TIMELINE_STATUS_OK.to_string()),
            items,
        }
    }

    pub fn from_payloads(payloads: impl IntoIterator<Item = MemoryRecordPayload>) -> Self {
        Self::ok(
            payloads
                .into_iter()
                .map(MemoryRecordPayload::into_value)
                .collect(),
        )
    }

    /// Validates every item, keeping fetch order. Rejected items are reported
    /// alongside the accepted records instead of aborting.
    pub fn into_records(self) -> (Vec<MemoryRecord>, Vec<RecordRejection>) {
        let mut records = Vec::with_capacity(self.items.len());
        let mut rejections = Vec::new();
        for (position, item) in self.items.iter().enumerate() {
            match MemoryRecordPayload::from_value(item) {
                Ok(payload) => records.push(payload.into_record(position)),
                Err(reason) => rejections.push(RecordRejection { position, reason }),
            }
        }
        (records, rejections)
    }
}

/// Wire shape of a single memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryRecordPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
    pub year: Year,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl MemoryRecordPayload {
    /// Lenient decoding of one timeline item.
    ///
    /// `year` accepts integers, integral floats and numeric strings. Text
    /// fields that are missing or not strings default to empty/absent.
    pub fn from_value(value: &Value) -> Result<Self, RejectReason> {
        let Value::Object(object) = value else {
            return Err(RejectReason::NotAnObject);
        };
        let year = match object.get("year") {
            None | Some(Value::Null) => return Err(RejectReason::MissingYear),
            Some(raw) => coerce_year(raw).ok_or_else(|| RejectReason::InvalidYear(raw.to_string()))?,
        };

        Ok(Self {
            id: string_field(object, "id").filter(|id| !id.is_empty()),
            title: string_field(object, "title").unwrap_or_default(),
            artist: string_field(object, "artist").unwrap_or_default(),
            year,
            note: string_field(object, "note"),
        })
    }

    /// JSON object in wire shape; absent `id`/`note` are omitted.
    pub fn into_value(self) -> Value {
        let mut object = Map::new();
        if let Some(id) = self.id {
            object.insert("id".to_string(), Value::String(id));
        }
        object.insert("title".to_string(), Value::String(self.title));
        object.insert("artist".to_string(), Value::String(self.artist));
        object.insert("year".to_string(), Value::from(self.year));
        if let Some(note) = self.note {
            object.insert("note".to_string(), Value::String(note));
        }
        Value::Object(object)
    }

    pub fn into_record(self, position: usize) -> MemoryRecord {
        MemoryRecord {
            id: self.id,
            title: self.title,
            artist: self.artist,
            year: self.year,
            note: self.note,
            position,
        }
    }
}

fn string_field(object: &Map<String, Value>, name: &str) -> Option<String> {
    object.get(name).and_then(Value::as_str).map(str::to_owned)
}

pub fn coerce_year(raw: &Value) -> Option<Year> {
    match raw {
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Year::try_from(int).ok();
            }
            let float = number.as_f64()?;
            if float.fract() != 0.0 || float < f64::from(Year::MIN) || float > f64::from(Year::MAX) {
                return None;
            }
            Some(float as Year)
        }
        Value::String(text) => text.trim().parse::<Year>().ok(),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("timeline item is not an object")]
    NotAnObject,
    #[error("timeline item has no year")]
    MissingYear,
    #[error("timeline item year {0} is not an integer")]
    InvalidYear(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("dropped timeline item at position {position}: {reason}")]
pub struct RecordRejection {
    pub position: usize,
    pub reason: RejectReason,
}
