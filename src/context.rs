// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

//! The currency state every rendering surface reads from.
//!
//! A [`CurrencyContext`] owns the session's rate state and the display
//! currency preference. It is built explicitly and passed around (cloning is
//! cheap), so tests can hand it fixed rates and an in-memory store.

use crate::currencies::{convert_currency, Currency, CurrencyInfo, ExchangeRateSet};
use crate::exchange_rates::{RateSnapshot, RateStore};
use crate::format::{format_price, PriceType};
use crate::preferences::{Preference, SharedStore};
use crate::utils::RawAmount;

#[derive(Clone)]
pub struct CurrencyContext {
    rates: RateStore,
    currency: Preference<Currency>,
}

impl CurrencyContext {
    pub fn new(rates: RateStore, store: SharedStore) -> Self {
        Self {
            rates,
            currency: Preference::load(store),
        }
    }

    pub fn rate_store(&self) -> &RateStore {
        &self.rates
    }

    pub fn rates(&self) -> RateSnapshot {
        self.rates.snapshot()
    }

    pub fn current_currency(&self) -> Currency {
        self.currency.current()
    }

    pub fn set_currency(&self, currency: Currency) {
        self.currency.set(currency);
    }

    pub fn currency_symbol(&self) -> &'static str {
        self.current_currency().symbol()
    }

    pub fn currency_info(&self) -> CurrencyInfo {
        self.current_currency().info()
    }

    pub fn convert(&self, amount: f64, from: Currency, to: Currency) -> f64 {
        convert_currency(amount, from, to, &self.rates.rates())
    }

    /// Format a stored price in the selected display currency.
    pub fn format_price(
        &self,
        amount: impl Into<RawAmount>,
        price_type: Option<PriceType>,
        source: Option<Currency>,
    ) -> String {
        // One read of each holder per render.
        let display = self.current_currency();
        let rates: ExchangeRateSet = self.rates.rates();
        format_price(&amount.into(), price_type, source, display, &rates)
    }
}
