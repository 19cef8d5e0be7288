//! Centralized constants for the default endpoint base, UA and client limits.

/// UA sent unless overridden on the builder.
pub(crate) const USER_AGENT: &str = concat!("stockgeist-rs/", env!("CARGO_PKG_VERSION"));

/// StockGeist REST API base (endpoint paths are appended).
pub(crate) const DEFAULT_BASE_URL: &str = "https://api.stockgeist.ai/";

/// Environment variable read by `SgClient::from_env`.
pub(crate) const TOKEN_ENV_VAR: &str = "STOCKGEIST_API_TOKEN";

/// Upper bound on HTTP calls issued by one paginated fetch.
pub(crate) const DEFAULT_MAX_PAGES: usize = 10_000;
