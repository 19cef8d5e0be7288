mod metrics;
mod model;

pub use metrics::{ArticleMetric, MessageMetric, Metric, PriceMetric, RankingMetric, TopicMetric};
pub use model::SeriesResponse;

use chrono::NaiveDateTime;
use std::marker::PhantomData;

use crate::core::{
    BatchSequence, Direction, RankingOptions, SeriesQuery, SgClient, SgError, Timeframe, time,
};

/// Builder for `message-metrics` requests.
pub type MessageMetricsBuilder = SeriesBuilder<MessageMetric>;
/// Builder for `article-metrics` requests.
pub type ArticleMetricsBuilder = SeriesBuilder<ArticleMetric>;
/// Builder for `price-metrics` requests.
pub type PriceMetricsBuilder = SeriesBuilder<PriceMetric>;
/// Builder for `topic-metrics` requests.
pub type TopicMetricsBuilder = SeriesBuilder<TopicMetric>;
/// Builder for `ranking-metrics` requests.
pub type RankingMetricsBuilder = SeriesBuilder<RankingMetric>;

/// A builder for one time-series request.
///
/// Without a `start` only the most recent page (ending at `end`, or now) is fetched. With
/// a `start` the fetch pages backwards from `end` until `start` is covered.
#[derive(Debug, Clone)]
pub struct SeriesBuilder<M> {
    client: SgClient,
    query: SeriesQuery,
    _metric: PhantomData<M>,
}

impl<M: Metric> SeriesBuilder<M> {
    /// Creates a builder with the endpoint's default filter and a `5m` timeframe.
    pub fn new(client: &SgClient, symbol: Option<String>) -> Self {
        let filter = M::DEFAULT.iter().map(|m| m.as_str().to_string()).collect();
        Self {
            client: client.clone(),
            query: SeriesQuery::new(symbol, filter),
            _metric: PhantomData,
        }
    }

    #[must_use]
    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.query.symbol = Some(symbol.into());
        self
    }

    #[must_use]
    pub fn timeframe(mut self, timeframe: Timeframe) -> Self {
        self.query.timeframe = timeframe;
        self
    }

    /// Sets the metrics to return. An empty list leaves the choice to the API.
    #[must_use]
    pub fn filter(mut self, metrics: impl IntoIterator<Item = M>) -> Self {
        self.query.filter = metrics
            .into_iter()
            .map(|m| m.as_str().to_string())
            .collect();
        self
    }

    /// Requests every metric the endpoint offers.
    #[must_use]
    pub fn all_metrics(self) -> Self {
        self.filter(M::ALL.iter().copied())
    }

    /// Earliest timestamp to fetch (UTC).
    #[must_use]
    pub fn start(mut self, start: NaiveDateTime) -> Self {
        self.query.start = Some(time::truncate_to_second(start));
        self
    }

    /// Latest timestamp to fetch (UTC). Defaults to the most recent data.
    #[must_use]
    pub fn end(mut self, end: NaiveDateTime) -> Self {
        self.query.end = Some(time::truncate_to_second(end));
        self
    }

    #[must_use]
    pub fn between(self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        self.start(start).end(end)
    }

    /// The query as it will be sent.
    pub fn query(&self) -> &SeriesQuery {
        &self.query
    }

    /// Executes the request and returns the raw pages.
    ///
    /// # Errors
    ///
    /// Returns `SgError::Data` if `start` is after `end`, and otherwise whatever
    /// [`SgClient::fetch_time_series`] returns.
    pub async fn fetch_raw(&self) -> Result<BatchSequence, SgError> {
        if let (Some(start), Some(end)) = (self.query.start, self.query.end)
            && start > end
        {
            return Err(SgError::Data(format!(
                "start {} is after end {}",
                time::format_timestamp(start),
                time::format_timestamp(end)
            )));
        }
        self.client.fetch_time_series(M::ENDPOINT, &self.query).await
    }

    /// Executes the request and merges the pages into one series.
    ///
    /// # Errors
    ///
    /// Returns `SgError::Api` if the API reported a failure on any page, plus every error
    /// [`SeriesBuilder::fetch_raw`] can return.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self), err, fields(endpoint = %M::ENDPOINT, symbol = ?self.query.symbol))
    )]
    pub async fn fetch(self) -> Result<SeriesResponse<M>, SgError> {
        let seq = self.fetch_raw().await?;
        SeriesResponse::from_batches(seq, self.query)
    }
}

impl SeriesBuilder<RankingMetric> {
    fn ranking_mut(&mut self) -> &mut RankingOptions {
        self.query.ranking.get_or_insert_with(RankingOptions::default)
    }

    /// Message metric the ranking is computed by. Default: `total_count`.
    #[must_use]
    pub fn by(mut self, metric: MessageMetric) -> Self {
        self.ranking_mut().by = metric.as_str().to_string();
        self
    }

    /// Default: descending.
    #[must_use]
    pub fn direction(mut self, direction: Direction) -> Self {
        self.ranking_mut().direction = direction;
        self
    }

    /// Number of symbols per ranking record. Default: 5.
    #[must_use]
    pub fn top(mut self, top: u32) -> Self {
        self.ranking_mut().top = top;
        self
    }
}

impl SgClient {
    /// Start a `message-metrics` request for `symbol`.
    pub fn message_metrics(&self, symbol: impl Into<String>) -> MessageMetricsBuilder {
        SeriesBuilder::new(self, Some(symbol.into()))
    }

    /// Start an `article-metrics` request for `symbol`.
    pub fn article_metrics(&self, symbol: impl Into<String>) -> ArticleMetricsBuilder {
        SeriesBuilder::new(self, Some(symbol.into()))
    }

    /// Start a `price-metrics` request for `symbol`.
    pub fn price_metrics(&self, symbol: impl Into<String>) -> PriceMetricsBuilder {
        SeriesBuilder::new(self, Some(symbol.into()))
    }

    /// Start a `topic-metrics` request for `symbol`.
    pub fn topic_metrics(&self, symbol: impl Into<String>) -> TopicMetricsBuilder {
        SeriesBuilder::new(self, Some(symbol.into()))
    }

    /// Start a `ranking-metrics` request across all symbols; narrow it with
    /// [`SeriesBuilder::symbol`].
    pub fn ranking_metrics(&self) -> RankingMetricsBuilder {
        let mut builder = SeriesBuilder::new(self, None);
        builder.query.ranking = Some(RankingOptions::default());
        builder
    }
}
