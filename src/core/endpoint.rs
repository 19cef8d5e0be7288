use std::fmt;

/// The paginated time-series endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesEndpoint {
    MessageMetrics,
    ArticleMetrics,
    PriceMetrics,
    TopicMetrics,
    RankingMetrics,
}

impl SeriesEndpoint {
    /// Path relative to the API base.
    pub const fn path(self) -> &'static str {
        match self {
            SeriesEndpoint::MessageMetrics => "time-series/message-metrics",
            SeriesEndpoint::ArticleMetrics => "time-series/article-metrics",
            SeriesEndpoint::PriceMetrics => "time-series/price-metrics",
            SeriesEndpoint::TopicMetrics => "time-series/topic-metrics",
            SeriesEndpoint::RankingMetrics => "time-series/ranking-metrics",
        }
    }

    /// Short name used in summaries, e.g. `message-metrics`.
    pub const fn name(self) -> &'static str {
        match self {
            SeriesEndpoint::MessageMetrics => "message-metrics",
            SeriesEndpoint::ArticleMetrics => "article-metrics",
            SeriesEndpoint::PriceMetrics => "price-metrics",
            SeriesEndpoint::TopicMetrics => "topic-metrics",
            SeriesEndpoint::RankingMetrics => "ranking-metrics",
        }
    }

    /// Market-price bars skip weekends, holidays and closed hours, so the walk must be
    /// able to step over empty windows and stop at the first bar at or before `start`.
    pub(crate) const fn is_market_priced(self) -> bool {
        matches!(self, SeriesEndpoint::PriceMetrics)
    }
}

impl fmt::Display for SeriesEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The single-call snapshot endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapshotEndpoint {
    Symbols,
    Fundamentals,
    Credits,
}

impl SnapshotEndpoint {
    /// Path relative to the API base.
    pub const fn path(self) -> &'static str {
        match self {
            SnapshotEndpoint::Symbols => "snapshot/symbols",
            SnapshotEndpoint::Fundamentals => "snapshot/fundamentals",
            SnapshotEndpoint::Credits => "snapshot/credits",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            SnapshotEndpoint::Symbols => "symbols",
            SnapshotEndpoint::Fundamentals => "fundamentals",
            SnapshotEndpoint::Credits => "credits",
        }
    }
}

impl fmt::Display for SnapshotEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
