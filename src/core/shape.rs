//! Reshaping of a `BatchSequence` into tabular form.

use serde_json::Value;
use std::collections::BTreeMap;

use crate::core::{BatchSequence, SgError};

/// Column name → values, one entry per record.
pub type Columns = BTreeMap<String, Vec<Value>>;

/// Concatenate the records of every batch into one chronological list.
///
/// Batches arrive newest window first, so they are read in reverse. The cursor is
/// inclusive, which repeats the boundary record at the start of the newer batch; that
/// copy is skipped.
///
/// # Errors
///
/// Returns `SgError::Data` if a batch body is not an array.
pub fn merge_records(seq: &BatchSequence) -> Result<Vec<Value>, SgError> {
    let mut merged: Vec<Value> = Vec::new();
    for batch in seq.batches.iter().rev() {
        let records = batch.records()?;
        let skip = match (merged.last(), records.first()) {
            (Some(prev), Some(next)) if same_timestamp(prev, next) => 1,
            _ => 0,
        };
        merged.extend(records.iter().skip(skip).cloned());
    }
    Ok(merged)
}

/// Turn records into columns keyed by the first record's fields, without `symbol`.
///
/// A field missing from a later record yields `null` in that row.
pub fn columns(records: &[Value]) -> Columns {
    let Some(Value::Object(first)) = records.first() else {
        return Columns::new();
    };

    first
        .keys()
        .filter(|k| k.as_str() != "symbol")
        .map(|key| {
            let values = records
                .iter()
                .map(|r| r.get(key).cloned().unwrap_or(Value::Null))
                .collect();
            (key.clone(), values)
        })
        .collect()
}

fn same_timestamp(a: &Value, b: &Value) -> bool {
    match (a.get("timestamp"), b.get("timestamp")) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}
