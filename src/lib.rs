// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

//! Currency conversion and price display for the Holibayt marketplace.

pub mod api;
pub mod config;
pub mod context;
pub mod currencies;
pub mod exchange_rates;
pub mod format;
pub mod i18n;
pub mod preferences;
pub mod utils;
pub mod web;

pub use context::CurrencyContext;
pub use currencies::{convert_currency, Currency, ExchangeRateSet, DEFAULT_RATES};
pub use format::{format_price, PriceType};
