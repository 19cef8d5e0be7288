use chrono::NaiveDateTime;
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;

use crate::core::{
    BatchSequence, Metadata, SeriesEndpoint, SeriesQuery, SgError,
    shape::{self, Columns},
    time, wire,
};
use crate::series::Metric;

/// A fully fetched time series, merged into chronological order.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesResponse<M> {
    /// The query this series was fetched with.
    pub query: SeriesQuery,
    /// Metadata of every page, in request order.
    pub metadata: Vec<Metadata>,
    /// The `end` cursor sent with the last page.
    pub final_end: Option<NaiveDateTime>,
    /// Records oldest first, boundary duplicates removed.
    pub records: Vec<Value>,
    /// Records as columns, without `symbol`.
    pub data: Columns,
    _metric: PhantomData<M>,
}

impl<M: Metric> SeriesResponse<M> {
    /// Shape the batches of one paginated fetch.
    ///
    /// # Errors
    ///
    /// Returns `SgError::Api` with the API's message if any page failed, and
    /// `SgError::Data` if a page body is not an array of records.
    pub fn from_batches(seq: BatchSequence, query: SeriesQuery) -> Result<Self, SgError> {
        seq.ensure_ok()?;
        let records = shape::merge_records(&seq)?;
        let data = shape::columns(&records);

        Ok(Self {
            query,
            metadata: seq.batches.into_iter().map(|b| b.metadata).collect(),
            final_end: seq.final_end,
            records,
            data,
            _metric: PhantomData,
        })
    }

    pub fn endpoint(&self) -> SeriesEndpoint {
        M::ENDPOINT
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn status_codes(&self) -> Vec<u16> {
        self.metadata.iter().map(|m| m.status_code).collect()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.metadata.iter().map(|m| m.message.as_str()).collect()
    }

    /// Remaining credits reported by each page, where present.
    pub fn credits(&self) -> Vec<Option<i64>> {
        self.metadata.iter().map(|m| m.credits).collect()
    }

    pub fn server_timestamps(&self) -> Vec<&str> {
        self.metadata
            .iter()
            .map(|m| m.server_timestamp.as_str())
            .collect()
    }

    /// The values of one field across all records.
    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.data.get(name).map(Vec::as_slice)
    }

    /// Parsed record timestamps, oldest first.
    ///
    /// # Errors
    ///
    /// Fails if a record lacks a parseable `timestamp`.
    pub fn timestamps(&self) -> Result<Vec<NaiveDateTime>, SgError> {
        self.records.iter().map(wire::record_timestamp).collect()
    }

    /// Resolve a `+`-separated metric list, e.g. `"total_count+ma_diff"`, to columns.
    ///
    /// Columns are returned in the order requested.
    ///
    /// # Errors
    ///
    /// Returns `SgError::InvalidMetric` for a name the endpoint does not offer and
    /// `SgError::MetricNotDownloaded` for a metric missing from this response.
    pub fn select(&self, expr: &str) -> Result<Vec<(&str, &[Value])>, SgError> {
        expr.split('+')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| {
                name.parse::<M>()?;
                self.data
                    .get_key_value(name)
                    .map(|(k, v)| (k.as_str(), v.as_slice()))
                    .ok_or_else(|| SgError::MetricNotDownloaded(name.to_string()))
            })
            .collect()
    }
}

impl<M: Metric> fmt::Display for SeriesResponse<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stamp = |r: Option<&Value>| {
            r.and_then(|v| v.get("timestamp"))
                .and_then(Value::as_str)
                .unwrap_or("-")
                .to_string()
        };

        writeln!(f, "<{}> endpoint data", M::ENDPOINT.name())?;
        writeln!(f, "  symbol: {}", self.query.symbol.as_deref().unwrap_or("-"))?;
        writeln!(f, "  timeframe: {}", self.query.timeframe)?;
        writeln!(
            f,
            "  time range: {} -- {}",
            stamp(self.records.first()),
            stamp(self.records.last())
        )?;
        write!(f, "  metrics: {}", self.query.filter.join(", "))?;
        if let Some(end) = self.final_end {
            write!(f, "\n  last cursor: {}", time::format_timestamp(end))?;
        }
        Ok(())
    }
}
