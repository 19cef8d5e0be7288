//! stockgeist-rs: async client for the StockGeist financial-sentiment API.
//!
//! Time-series endpoints cap the number of records per call, so a request spanning a
//! long range is fetched page by page, walking the `end` cursor backwards until `start`
//! is reached. Snapshot endpoints (symbols, fundamentals, credits) are single calls.
//!
//! ```no_run
//! use stockgeist_rs::{MessageMetric, SgClient, Timeframe, time::parse_timestamp};
//!
//! # async fn run() -> Result<(), stockgeist_rs::SgError> {
//! let client = SgClient::builder().token("my-token").build()?;
//! let series = client
//!     .message_metrics("AAPL")
//!     .timeframe(Timeframe::H1)
//!     .filter([MessageMetric::TotalCount, MessageMetric::MaDiff])
//!     .between(
//!         parse_timestamp("2021-06-20T00:00:00")?,
//!         parse_timestamp("2021-06-21T00:00:00")?,
//!     )
//!     .fetch()
//!     .await?;
//! println!("{series}");
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod series;
pub mod snapshot;

pub use crate::core::{
    BatchSequence, Direction, Metadata, QueryParams, QueryValue, RawBatch, SeriesEndpoint,
    SeriesQuery, SgClient, SgClientBuilder, SgError, SnapshotEndpoint, Timeframe, build_query,
    shape, time,
};
pub use series::{
    ArticleMetric, MessageMetric, Metric, PriceMetric, RankingMetric, SeriesBuilder,
    SeriesResponse, TopicMetric,
};
pub use snapshot::{CreditsResponse, FundamentalsBuilder, FundamentalsResponse, SymbolsResponse};
