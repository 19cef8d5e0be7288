mod model;
mod wire;

pub use model::{CreditsResponse, FundamentalsResponse, SymbolsResponse};

use crate::core::{
    QueryParams, SgClient, SgError, SnapshotEndpoint, params::filter_value,
};

/// A builder for the `fundamentals` snapshot of one symbol.
#[derive(Debug, Clone)]
pub struct FundamentalsBuilder {
    client: SgClient,
    symbol: String,
    filter: Vec<String>,
}

impl FundamentalsBuilder {
    pub fn new(client: &SgClient, symbol: impl Into<String>) -> Self {
        Self {
            client: client.clone(),
            symbol: symbol.into(),
            filter: Vec::new(),
        }
    }

    /// Restrict the returned metrics, e.g. `["market_cap", "p_to_e"]`. Default: all.
    #[must_use]
    pub fn filter<I, S>(mut self, metrics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter = metrics.into_iter().map(Into::into).collect();
        self
    }

    pub fn params(&self) -> QueryParams {
        QueryParams::new()
            .with("symbol", self.symbol.as_str())
            .with("filter", filter_value(&self.filter))
    }

    /// Executes the request.
    ///
    /// # Errors
    ///
    /// Returns `SgError::Api` if the API reported a failure, and transport or decoding
    /// errors otherwise.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(symbol = %self.symbol)))]
    pub async fn fetch(self) -> Result<FundamentalsResponse, SgError> {
        let seq = self
            .client
            .fetch_snapshot(SnapshotEndpoint::Fundamentals, &self.params())
            .await?;
        FundamentalsResponse::from_batches(seq)
    }
}

impl SgClient {
    /// Fetch every symbol the API covers.
    ///
    /// # Errors
    ///
    /// Returns `SgError::Api` if the API reported a failure, and transport or decoding
    /// errors otherwise.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    pub async fn symbols(&self) -> Result<SymbolsResponse, SgError> {
        let seq = self
            .fetch_snapshot(SnapshotEndpoint::Symbols, &QueryParams::new())
            .await?;
        SymbolsResponse::from_batches(seq)
    }

    /// Start a `fundamentals` request for `symbol`.
    pub fn fundamentals(&self, symbol: impl Into<String>) -> FundamentalsBuilder {
        FundamentalsBuilder::new(self, symbol)
    }

    /// Fetch the remaining credit balance of the token.
    ///
    /// # Errors
    ///
    /// Returns `SgError::Api` if the API reported a failure, and transport or decoding
    /// errors otherwise.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    pub async fn credits(&self) -> Result<CreditsResponse, SgError> {
        let seq = self
            .fetch_snapshot(SnapshotEndpoint::Credits, &QueryParams::new())
            .await?;
        CreditsResponse::from_batches(seq)
    }
}
