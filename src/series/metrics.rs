use std::fmt;
use std::str::FromStr;

use crate::core::{SeriesEndpoint, SgError};

/// A metric that can be requested in the `filter` of a time-series endpoint.
///
/// Each implementing enum is tied to exactly one endpoint, which lets the builders and
/// responses be generic over the endpoint.
pub trait Metric:
    Copy + fmt::Debug + fmt::Display + PartialEq + FromStr<Err = SgError> + Send + Sync + 'static
{
    /// The endpoint serving these metrics.
    const ENDPOINT: SeriesEndpoint;
    /// Every metric the endpoint offers, in documentation order.
    const ALL: &'static [Self];
    /// The filter used when none is set.
    const DEFAULT: &'static [Self];

    /// Wire name of the metric.
    fn as_str(self) -> &'static str;
}

macro_rules! metric_enum {
    (
        $(#[$meta:meta])*
        $name:ident for $endpoint:ident, default [$($default:ident),+] {
            $($variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl Metric for $name {
            const ENDPOINT: SeriesEndpoint = SeriesEndpoint::$endpoint;
            const ALL: &'static [Self] = &[$($name::$variant),+];
            const DEFAULT: &'static [Self] = &[$($name::$default),+];

            fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = SgError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err(SgError::InvalidMetric(other.to_string())),
                }
            }
        }
    };
}

metric_enum! {
    /// Social-media message counts and derived sentiment indicators.
    ///
    /// `inf_*` counts come from influencer accounts, `em_*` from emotional messages.
    MessageMetric for MessageMetrics, default [TotalCount] {
        InfPositiveCount => "inf_positive_count",
        InfNeutralCount => "inf_neutral_count",
        InfNegativeCount => "inf_negative_count",
        InfTotalCount => "inf_total_count",
        EmPositiveCount => "em_positive_count",
        EmNeutralCount => "em_neutral_count",
        EmNegativeCount => "em_negative_count",
        EmTotalCount => "em_total_count",
        TotalCount => "total_count",
        PosIndex => "pos_index",
        MsgRatio => "msg_ratio",
        Ma => "ma",
        MaDiff => "ma_diff",
        StdDev => "std_dev",
        MaCountChange => "ma_count_change",
    }
}

metric_enum! {
    /// News article fields.
    ArticleMetric for ArticleMetrics, default [Titles] {
        Titles => "titles",
        TitleSentiments => "title_sentiments",
        Mentions => "mentions",
        Summaries => "summaries",
        SentimentSpans => "sentiment_spans",
        Urls => "urls",
    }
}

metric_enum! {
    /// OHLCV price bars.
    PriceMetric for PriceMetrics, default [Close] {
        Open => "open",
        High => "high",
        Low => "low",
        Close => "close",
        Volume => "volume",
    }
}

metric_enum! {
    TopicMetric for TopicMetrics, default [Words] {
        Words => "words",
        Scores => "scores",
    }
}

metric_enum! {
    /// Fields of a symbol ranking record.
    RankingMetric for RankingMetrics, default [Symbols] {
        Symbols => "symbols",
        Scores => "scores",
        ScoreChanges => "score_changes",
        Values => "values",
    }
}
