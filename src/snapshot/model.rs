use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

use crate::core::{BatchSequence, Metadata, RawBatch, SgError};
use crate::snapshot::wire::{CreditsBody, SymbolsBody};

/// Symbols covered by the API, grouped by asset class (e.g. `stocks`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolsResponse {
    pub metadata: Metadata,
    pub symbols: BTreeMap<String, Vec<String>>,
}

impl SymbolsResponse {
    /// # Errors
    ///
    /// Returns `SgError::Api` on a failure status and `SgError::Json` if the body does not
    /// hold a `symbols` map of string lists.
    pub fn from_batches(seq: BatchSequence) -> Result<Self, SgError> {
        let batch = single(seq)?;
        let body: SymbolsBody = serde_json::from_value(batch.body)?;
        Ok(Self {
            metadata: batch.metadata,
            symbols: body.symbols,
        })
    }

    /// The `stocks` group, empty if absent.
    pub fn stocks(&self) -> &[String] {
        self.symbols.get("stocks").map_or(&[][..], Vec::as_slice)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.values().any(|group| group.iter().any(|s| s == symbol))
    }
}

/// Fundamental metrics of one symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FundamentalsResponse {
    pub metadata: Metadata,
    pub symbol: Option<String>,
    /// Metric name → value, `symbol` excluded.
    pub data: Map<String, Value>,
}

impl FundamentalsResponse {
    /// # Errors
    ///
    /// Returns `SgError::Api` on a failure status and `SgError::Data` if the body is not
    /// an object.
    pub fn from_batches(seq: BatchSequence) -> Result<Self, SgError> {
        let batch = single(seq)?;
        let Value::Object(mut data) = batch.body else {
            return Err(SgError::Data("fundamentals body is not an object".into()));
        };
        let symbol = data
            .remove("symbol")
            .and_then(|v| v.as_str().map(str::to_string));

        Ok(Self {
            metadata: batch.metadata,
            symbol,
            data,
        })
    }

    pub fn get(&self, metric: &str) -> Option<&Value> {
        self.data.get(metric)
    }

    pub fn metrics(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }
}

impl fmt::Display for FundamentalsResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<fundamentals> endpoint data")?;
        writeln!(f, "  symbol: {}", self.symbol.as_deref().unwrap_or("-"))?;
        if let Some(ts) = self.data.get("timestamp").and_then(Value::as_str) {
            writeln!(f, "  timestamp: {ts}")?;
        }
        write!(f, "  metrics: {}", self.data.len())
    }
}

/// Account credit balance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreditsResponse {
    pub metadata: Metadata,
    pub body: Value,
}

impl CreditsResponse {
    /// # Errors
    ///
    /// Returns `SgError::Api` on a failure status.
    pub fn from_batches(seq: BatchSequence) -> Result<Self, SgError> {
        let batch = single(seq)?;
        Ok(Self {
            metadata: batch.metadata,
            body: batch.body,
        })
    }

    /// Remaining credits, from the metadata or else the body.
    pub fn credits(&self) -> Option<i64> {
        self.metadata.credits.or_else(|| {
            serde_json::from_value::<CreditsBody>(self.body.clone())
                .ok()
                .and_then(|b| b.credits)
        })
    }
}

fn single(seq: BatchSequence) -> Result<RawBatch, SgError> {
    seq.ensure_ok()?;
    seq.batches
        .into_iter()
        .next()
        .ok_or_else(|| SgError::Data("no response batches".into()))
}
