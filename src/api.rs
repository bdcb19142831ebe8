use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::currencies::{Currency, ExchangeRateSet};
use crate::exchange_rates::RateSource;

pub const DEFAULT_RATES_URL: &str = "https://api.exchangerate-api.com/v4/latest/EUR";

/// Client for a "latest rates" endpoint.
pub struct ExchangeRateClient {
    client: Client,
    url: String,
}

impl ExchangeRateClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    /// Like [`ExchangeRateClient::new`] but with a request timeout instead of
    /// the transport default.
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn get_latest_rates(&self) -> Result<LatestRates> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        let text = response.text().await.context("Failed to get response text")?;

        if !status.is_success() {
            anyhow::bail!("Rates request failed with status {}: {}", status, text);
        }

        serde_json::from_str(&text).context("Failed to parse rates response")
    }
}

impl RateSource for ExchangeRateClient {
    async fn fetch_rates(&self) -> Result<ExchangeRateSet> {
        self.get_latest_rates().await?.to_rate_set()
    }
}

/// Response of a latest-rates endpoint: `{"base": "EUR", "rates": {...}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct LatestRates {
    #[serde(default, alias = "base_code")]
    pub base: Option<String>,
    pub rates: HashMap<String, f64>,
}

impl LatestRates {
    /// Rebase onto EUR and keep the supported currencies.
    pub fn to_rate_set(&self) -> Result<ExchangeRateSet> {
        let base = self.base.as_deref().unwrap_or("EUR").to_ascii_uppercase();

        let per_base = |code: &str| -> Result<f64> {
            if code == base {
                return Ok(1.0);
            }
            self.rates
                .get(code)
                .copied()
                .with_context(|| format!("Rates response has no {} entry", code))
        };

        let eur = per_base(Currency::Eur.code())?;
        if !eur.is_finite() || eur <= 0.0 {
            anyhow::bail!("Invalid EUR rate in response: {}", eur);
        }
        let usd = per_base(Currency::Usd.code())? / eur;
        let dzd = per_base(Currency::Dzd.code())? / eur;

        Ok(ExchangeRateSet::new(usd, dzd)?)
    }
}
