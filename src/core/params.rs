use chrono::NaiveDateTime;
use std::fmt;
use std::str::FromStr;

use crate::core::{
    SgError,
    query::{QueryParams, QueryValue},
    time,
};

/// Time resolution of returned records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Timeframe {
    #[default]
    M5,
    H1,
    D1,
}

impl Timeframe {
    pub const fn as_str(self) -> &'static str {
        match self {
            Timeframe::M5 => "5m",
            Timeframe::H1 => "1h",
            Timeframe::D1 => "1d",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = SgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "5m" => Ok(Timeframe::M5),
            "1h" => Ok(Timeframe::H1),
            "1d" => Ok(Timeframe::D1),
            other => Err(SgError::InvalidTimeframe(other.to_string())),
        }
    }
}

/// Ranking order: `Descending` puts the largest metric value first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    Ascending,
    #[default]
    Descending,
}

impl Direction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::Ascending => "ascending",
            Direction::Descending => "descending",
        }
    }
}

/// Ranking-only options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingOptions {
    /// Message metric the ranking is computed by.
    pub by: String,
    pub direction: Direction,
    /// Number of symbols returned per record.
    pub top: u32,
}

impl Default for RankingOptions {
    fn default() -> Self {
        Self {
            by: "total_count".to_string(),
            direction: Direction::Descending,
            top: 5,
        }
    }
}

/// All parameters of one time-series request.
///
/// `end` is the caller's initial cursor; the paginated fetch never writes to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesQuery {
    pub symbol: Option<String>,
    pub timeframe: Timeframe,
    pub filter: Vec<String>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub ranking: Option<RankingOptions>,
}

impl SeriesQuery {
    pub fn new(symbol: Option<String>, filter: Vec<String>) -> Self {
        Self {
            symbol,
            timeframe: Timeframe::default(),
            filter,
            start: None,
            end: None,
            ranking: None,
        }
    }

    /// Parameters for one page, with `end` replaced by `cursor`.
    pub fn to_params(&self, cursor: Option<NaiveDateTime>) -> QueryParams {
        let mut params = QueryParams::new()
            .with("symbol", self.symbol.clone())
            .with("timeframe", self.timeframe.as_str())
            .with("filter", filter_value(&self.filter))
            .with("start", self.start.map(time::format_timestamp))
            .with("end", cursor.map(time::format_timestamp));

        if let Some(r) = &self.ranking {
            params.set("by", r.by.as_str());
            params.set("direction", r.direction.as_str());
            params.set("top", r.top);
        }
        params
    }
}

/// An empty filter is omitted rather than sent as `filter=`.
pub(crate) fn filter_value(filter: &[String]) -> QueryValue {
    if filter.is_empty() {
        QueryValue::Missing
    } else {
        QueryValue::List(filter.to_vec())
    }
}
