//! Public client surface + builder.
//! Defaults (base URL, UA, page bound) live in `constants`.

mod constants;

use crate::core::SgError;
use constants::{DEFAULT_BASE_URL, DEFAULT_MAX_PAGES, TOKEN_ENV_VAR, USER_AGENT};
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// A configured StockGeist API client.
///
/// Cloning is cheap: the underlying connection pool is shared, so every page of a
/// paginated fetch (and every clone of the client) reuses the same connections.
#[derive(Debug, Clone)]
pub struct SgClient {
    http: Client,
    base_url: Url,
    token: String,
    request_delay: Option<Duration>,
    max_pages: usize,
}

impl SgClient {
    /// Create a new builder.
    pub fn builder() -> SgClientBuilder {
        SgClientBuilder::default()
    }

    /// Build a client with default settings and the token read from `STOCKGEIST_API_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns `SgError::Config` if the variable is unset or empty.
    pub fn from_env() -> Result<Self, SgError> {
        let token = std::env::var(TOKEN_ENV_VAR)
            .map_err(|_| SgError::Config(format!("{TOKEN_ENV_VAR} is not set")))?;
        Self::builder().token(token).build()
    }

    /// The base URL every endpoint path is appended to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Delay inserted between consecutive calls of a paginated fetch, if any.
    pub fn request_delay(&self) -> Option<Duration> {
        self.request_delay
    }

    /// Maximum number of calls one paginated fetch may issue.
    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn token(&self) -> &str {
        &self.token
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct SgClientBuilder {
    token: Option<String>,
    user_agent: Option<String>,
    base_url: Option<Url>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    request_delay: Option<Duration>,
    max_pages: Option<usize>,
}

impl SgClientBuilder {
    /// Set the API token.
    #[must_use]
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Override the User-Agent.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the API base (e.g., `https://api.stockgeist.ai/`).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set a global request timeout (overall). Default: none.
    #[must_use]
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    #[must_use]
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Sleep this long between consecutive calls of a paginated fetch. Default: none.
    #[must_use]
    pub fn request_delay(mut self, dur: Duration) -> Self {
        self.request_delay = Some(dur);
        self
    }

    /// Cap the number of calls one paginated fetch may issue. Default: 10 000.
    #[must_use]
    pub fn max_pages(mut self, pages: usize) -> Self {
        self.max_pages = Some(pages);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns `SgError::Config` if no (or an empty) token was provided or `max_pages` is zero,
    /// `SgError::Url` if the default base fails to parse, and `SgError::Http` if the
    /// HTTP client cannot be constructed.
    pub fn build(self) -> Result<SgClient, SgError> {
        let token = self
            .token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| SgError::Config("an API token is required".into()))?;

        let max_pages = self.max_pages.unwrap_or(DEFAULT_MAX_PAGES);
        if max_pages == 0 {
            return Err(SgError::Config("max_pages must be at least 1".into()));
        }

        let mut base_url = match self.base_url {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };
        // endpoint paths are appended verbatim
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut httpb =
            reqwest::Client::builder().user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT));

        if let Some(t) = self.timeout {
            httpb = httpb.timeout(t);
        }
        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        let http = httpb.build()?;

        Ok(SgClient {
            http,
            base_url,
            token,
            request_delay: self.request_delay,
            max_pages,
        })
    }
}
