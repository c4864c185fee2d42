//! Financial Modeling Prep API client.

use super::Endpoint;
use super::wire::{EnterpriseValueEntry, IncomeStatementEntry};
use crate::error::{DataError, Result};
use crate::evaluation::Evaluation;
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// FMP "stable" API base URL
pub const DEFAULT_BASE_URL: &str = "https://financialmodelingprep.com/stable/";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Periods requested per endpoint: the current one and the one before it.
pub const DEFAULT_PERIODS: u32 = 2;

const USER_AGENT: &str = concat!("fundsheet/", env!("CARGO_PKG_VERSION"));

/// Financial Modeling Prep API client
pub struct FmpClient {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl FmpClient {
    /// Create a client against the public API with default settings.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder(api_key).build()
    }

    /// Start building a client with custom settings.
    ///
    /// # Example
    /// ```no_run
    /// use fundsheet_data::fmp::FmpClient;
    /// use std::time::Duration;
    ///
    /// # fn example() -> fundsheet_data::Result<()> {
    /// let client = FmpClient::builder("my-key")
    ///     .timeout(Duration::from_secs(10))
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder(api_key: impl Into<String>) -> FmpClientBuilder {
        FmpClientBuilder::new(api_key.into())
    }

    /// Base URL requests are issued against.
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch up to `limit` periods of `endpoint` for `symbol`, newest first.
    ///
    /// # Errors
    /// * `DataError::InvalidSymbol` if `symbol` is empty (no request is made)
    /// * `DataError::Network` on transport or body read failures
    /// * `DataError::Status` on a non-success HTTP status
    /// * `DataError::Decode` if the body is not a JSON array of `T`
    pub async fn fetch_entries<T>(
        &self,
        endpoint: Endpoint,
        symbol: &str,
        limit: u32,
    ) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        if symbol.is_empty() {
            return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
        }

        let url = self
            .base_url
            .join(endpoint.path())
            .map_err(|e| DataError::InvalidConfig(format!("bad endpoint URL: {}", e)))?;

        let limit = limit.max(1).to_string();
        debug!(%endpoint, symbol, %limit, "requesting financials");

        let response = self
            .client
            .get(url)
            .query(&[
                ("symbol", symbol),
                ("apikey", self.api_key.as_str()),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        debug!(%endpoint, symbol, status = status.as_u16(), "got response");

        if !status.is_success() {
            return Err(DataError::Status {
                endpoint,
                symbol: symbol.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;

        serde_json::from_slice(&body).map_err(|source| DataError::Decode {
            endpoint,
            symbol: symbol.to_string(),
            source,
        })
    }

    /// Fetch enterprise values for `symbol`.
    pub async fn enterprise_values(
        &self,
        symbol: &str,
        limit: u32,
    ) -> Result<Vec<EnterpriseValueEntry>> {
        self.fetch_entries(Endpoint::EnterpriseValues, symbol, limit)
            .await
    }

    /// Fetch income statements for `symbol`.
    pub async fn income_statements(
        &self,
        symbol: &str,
        limit: u32,
    ) -> Result<Vec<IncomeStatementEntry>> {
        self.fetch_entries(Endpoint::IncomeStatement, symbol, limit)
            .await
    }

    /// Fetch both endpoints for `symbol` and merge them into one evaluation.
    ///
    /// With `periods >= 2` the second period of each endpoint fills the
    /// prior-period fields.
    ///
    /// # Errors
    /// Any error from either request, or `DataError::MissingData` when an
    /// endpoint returned no periods at all.
    pub async fn fetch_evaluation(&self, symbol: &str, periods: u32) -> Result<Evaluation> {
        let values = self.enterprise_values(symbol, periods).await?;
        let statements = self.income_statements(symbol, periods).await?;
        Evaluation::from_periods(symbol, &values, &statements)
    }
}

impl std::fmt::Debug for FmpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FmpClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

/// Builder for [`FmpClient`].
#[derive(Debug, Clone)]
pub struct FmpClientBuilder {
    api_key: String,
    base_url: String,
    timeout: Duration,
    user_agent: String,
}

impl FmpClientBuilder {
    fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: USER_AGENT.to_string(),
        }
    }

    /// Override the API base URL (used to point at a mock server).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the per-request timeout.
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build the client.
    ///
    /// # Errors
    /// `DataError::InvalidConfig` for an unparseable base URL, or
    /// `DataError::Network` if the HTTP client cannot be constructed.
    pub fn build(self) -> Result<FmpClient> {
        let mut base = self.base_url.trim().to_string();
        // Url::join replaces the last segment unless the base ends with a slash.
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)
            .map_err(|e| DataError::InvalidConfig(format!("invalid base URL {:?}: {}", base, e)))?;

        let client = reqwest::Client::builder()
            .user_agent(self.user_agent)
            .timeout(self.timeout)
            .build()
            .map_err(DataError::from)?;

        Ok(FmpClient {
            client,
            base_url,
            api_key: self.api_key,
        })
    }
}
