use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum SgError {
    /// An error occurred during an HTTP request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A response body could not be decoded as an API envelope.
    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    /// The server returned a non-2xx status and a body that is not an API envelope.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error, with the token redacted.
        url: String,
    },

    /// The API reported a failure in the `metadata` of a response.
    #[error("StockGeist API error {status_code}: {message}")]
    Api {
        /// The `metadata.status_code` value.
        status_code: u16,
        /// The `metadata.message` text.
        message: String,
    },

    /// The data received from the API was in an unexpected format or was missing a required field.
    #[error("Data format unexpected or missing field: {0}")]
    Data(String),

    /// A timeframe name is not one the API accepts.
    #[error("invalid timeframe: {0} (expected 5m, 1h or 1d)")]
    InvalidTimeframe(String),

    /// A timestamp matched none of the accepted formats.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Pagination stopped making progress towards `start`.
    #[error("pagination did not converge after {pages} page(s) (cursor: {cursor})")]
    NotConverged {
        /// Number of HTTP calls issued before giving up.
        pages: usize,
        /// The cursor in effect when pagination was abandoned.
        cursor: String,
    },

    /// A requested metric is not offered by the endpoint.
    #[error("{0} is not a valid metric")]
    InvalidMetric(String),

    /// A requested metric is valid but was not part of the downloaded filter.
    #[error("{0} metric not downloaded")]
    MetricNotDownloaded(String),

    /// The client was configured with invalid options.
    #[error("invalid client configuration: {0}")]
    Config(String),
}
