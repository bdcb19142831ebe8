// SPDX-FileCopyrightText: 2025 Joost van der Laan
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::future::Future;
use std::sync::{Arc, RwLock};
use tokio::task::JoinHandle;

use crate::currencies::{Currency, ExchangeRateSet, DEFAULT_RATES};

/// Anything that can produce a fresh EUR-based rate set.
pub trait RateSource: Send + Sync {
    fn fetch_rates(&self) -> impl Future<Output = Result<ExchangeRateSet>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RateOrigin {
    Default,
    Fetched,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateSnapshot {
    pub rates: ExchangeRateSet,
    pub origin: RateOrigin,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl Default for RateSnapshot {
    fn default() -> Self {
        Self {
            rates: DEFAULT_RATES,
            origin: RateOrigin::Default,
            fetched_at: None,
        }
    }
}

/// Session-wide rate state. Snapshots are swapped whole.
#[derive(Debug, Clone, Default)]
pub struct RateStore {
    inner: Arc<RwLock<RateSnapshot>>,
}

impl RateStore {
    pub fn with_rates(rates: ExchangeRateSet) -> Self {
        Self {
            inner: Arc::new(RwLock::new(RateSnapshot {
                rates,
                ..RateSnapshot::default()
            })),
        }
    }

    pub fn snapshot(&self) -> RateSnapshot {
        match self.inner.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    pub fn rates(&self) -> ExchangeRateSet {
        self.snapshot().rates
    }

    pub fn replace(&self, snapshot: RateSnapshot) {
        match self.inner.write() {
            Ok(mut guard) => *guard = snapshot,
            Err(poisoned) => *poisoned.into_inner() = snapshot,
        }
    }
}

/// Fetch rates once and install them. A failed fetch keeps whatever the
/// store already holds and is only logged.
pub async fn refresh_rates<S: RateSource>(source: &S, store: &RateStore) -> RateOrigin {
    match source.fetch_rates().await {
        Ok(rates) => {
            store.replace(RateSnapshot {
                rates,
                origin: RateOrigin::Fetched,
                fetched_at: Some(Utc::now()),
            });
            tracing::info!(
                usd = rates.rate(Currency::Usd),
                dzd = rates.rate(Currency::Dzd),
                "exchange rates updated"
            );
            RateOrigin::Fetched
        }
        Err(e) => {
            tracing::warn!("failed to fetch exchange rates, keeping current rates: {e:#}");
            store.snapshot().origin
        }
    }
}

/// Run [`refresh_rates`] in the background. Nothing waits on it.
pub fn spawn_refresh<S: RateSource + 'static>(source: Arc<S>, store: RateStore) -> JoinHandle<()> {
    tokio::spawn(async move {
        refresh_rates(source.as_ref(), &store).await;
    })
}
