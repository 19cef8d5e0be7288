use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{SgError, time};

/// The `metadata` object present on every API response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub status_code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub credits: Option<i64>,
    #[serde(default)]
    pub server_timestamp: String,
}

/// One decoded API response: a page of a time series or a whole snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBatch {
    pub metadata: Metadata,
    /// An array of records for time-series endpoints, a single object for snapshots.
    #[serde(default)]
    pub body: Value,
}

impl RawBatch {
    pub fn is_ok(&self) -> bool {
        self.metadata.status_code == 200
    }

    /// The records of a time-series body.
    ///
    /// A `null` body counts as empty.
    ///
    /// # Errors
    ///
    /// Returns `SgError::Data` if the body is neither an array nor `null`.
    pub fn records(&self) -> Result<&[Value], SgError> {
        match &self.body {
            Value::Array(items) => Ok(items.as_slice()),
            Value::Null => Ok(&[][..]),
            other => Err(SgError::Data(format!(
                "expected an array body, got {}",
                kind(other)
            ))),
        }
    }

    /// Timestamp of the first record, or `None` for an empty body.
    ///
    /// # Errors
    ///
    /// Fails if the body is not an array, the first record has no string `timestamp`,
    /// or the timestamp does not parse.
    pub(crate) fn first_timestamp(&self) -> Result<Option<NaiveDateTime>, SgError> {
        let Some(first) = self.records()?.first() else {
            return Ok(None);
        };
        record_timestamp(first).map(Some)
    }
}

/// Parse the `timestamp` field of one record.
pub(crate) fn record_timestamp(record: &Value) -> Result<NaiveDateTime, SgError> {
    let raw = record
        .get("timestamp")
        .and_then(Value::as_str)
        .ok_or_else(|| SgError::Data("record is missing a string `timestamp`".into()))?;
    time::parse_timestamp(raw)
}

const fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
