//! Span value object - when a dialog event or token happened.

use crate::core::error::ValidationError;
use crate::core::object::{ObjectReader, WireObject};
use crate::util::duration::{parse_iso_duration, serialize_offset};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

/// A time span, either absolute or relative to the enclosing event.
///
/// Exactly one start (`startTime` or `startOffset`) and at most one end
/// (`endTime` or `endOffset`). Offsets are whole milliseconds and travel as
/// ISO-8601 duration strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Span {
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_time")]
    start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_offset")]
    start_offset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_time")]
    end_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_offset")]
    end_offset: Option<u64>,
}

/// Construction input for [`Span`]
#[derive(Debug, Clone, Default)]
pub struct SpanOptions {
    pub start_time: Option<DateTime<Utc>>,
    pub start_offset: Option<u64>,
    pub end_time: Option<DateTime<Utc>>,
    pub end_offset: Option<u64>,
}

impl Span {
    /// Build a span, defaulting `startTime` to now when no start is given.
    pub fn new(options: SpanOptions) -> Result<Self, ValidationError> {
        let SpanOptions {
            mut start_time,
            start_offset,
            end_time,
            end_offset,
        } = options;

        if let (Some(time), Some(offset)) = (start_time, start_offset) {
            return Err(ValidationError::new(
                "Span.startTime",
                serde_json::json!({ "startTime": format_time(&time), "startOffset": offset }),
                "exactly one of startTime or startOffset",
            ));
        }
        if let (Some(time), Some(offset)) = (end_time, end_offset) {
            return Err(ValidationError::new(
                "Span.endTime",
                serde_json::json!({ "endTime": format_time(&time), "endOffset": offset }),
                "at most one of endTime or endOffset",
            ));
        }
        if start_time.is_none() && start_offset.is_none() {
            start_time = Some(Utc::now());
        }

        Ok(Self {
            start_time,
            start_offset,
            end_time,
            end_offset,
        })
    }

    /// A span starting now.
    pub fn now() -> Self {
        Self::starting_at(Utc::now())
    }

    /// A span starting at an absolute time.
    pub fn starting_at(time: DateTime<Utc>) -> Self {
        Self {
            start_time: Some(time),
            start_offset: None,
            end_time: None,
            end_offset: None,
        }
    }

    /// A span starting `ms` milliseconds into the enclosing event.
    pub fn starting_after(ms: u64) -> Self {
        Self {
            start_time: None,
            start_offset: Some(ms),
            end_time: None,
            end_offset: None,
        }
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }

    pub fn start_offset(&self) -> Option<u64> {
        self.start_offset
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }

    pub fn end_offset(&self) -> Option<u64> {
        self.end_offset
    }

    /// Whether the span is anchored to wall-clock time rather than an offset.
    pub fn is_absolute(&self) -> bool {
        self.start_time.is_some()
    }
}

impl WireObject for Span {
    type Error = ValidationError;

    fn from_object(value: &Value) -> Result<Self, ValidationError> {
        let reader = ObjectReader::new("Span", value)?;
        Span::new(SpanOptions {
            start_time: read_time(&reader, "startTime")?,
            start_offset: read_offset(&reader, "startOffset")?,
            end_time: read_time(&reader, "endTime")?,
            end_offset: read_offset(&reader, "endOffset")?,
        })
    }
}

fn format_time(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn serialize_time<S: serde::Serializer>(
    time: &Option<DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match time {
        Some(t) => serializer.serialize_str(&format_time(t)),
        None => serializer.serialize_none(),
    }
}

fn read_time(reader: &ObjectReader<'_>, key: &str) -> Result<Option<DateTime<Utc>>, ValidationError> {
    reader
        .string(key)?
        .map(|s| {
            DateTime::parse_from_rfc3339(&s)
                .map(|t| t.with_timezone(&Utc))
                .map_err(|_| {
                    ValidationError::new(reader.field(key), Value::String(s), "an ISO-8601 timestamp")
                })
        })
        .transpose()
}

/// Offsets are ISO-8601 duration strings; bare non-negative integers are read as milliseconds.
fn read_offset(reader: &ObjectReader<'_>, key: &str) -> Result<Option<u64>, ValidationError> {
    match reader.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => parse_iso_duration(s).map(Some).map_err(|_| {
            ValidationError::new(reader.field(key), Value::String(s.clone()), "an ISO-8601 duration")
        }),
        Some(Value::Number(n)) if n.as_u64().is_some() => Ok(n.as_u64()),
        Some(other) => Err(ValidationError::new(
            reader.field(key),
            other.clone(),
            "an ISO-8601 duration",
        )),
    }
}
