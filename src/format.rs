// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

//! Price display: conversion into the display currency, grouping, symbol
//! placement and the billing-period suffix.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::currencies::{convert_currency, Currency, ExchangeRateSet, SymbolPosition};
use crate::utils::{format_grouped, RawAmount};

/// Billing period a price represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceType {
    Total,
    Monthly,
    Daily,
    Weekly,
}

impl PriceType {
    /// Suffix appended to a formatted price, if any.
    pub fn suffix(self) -> Option<&'static str> {
        match self {
            PriceType::Total => None,
            PriceType::Monthly => Some("/month"),
            PriceType::Daily => Some("/day"),
            PriceType::Weekly => Some("/week"),
        }
    }

    /// Catalog key for the translated suffix.
    pub fn suffix_key(self) -> Option<&'static str> {
        match self {
            PriceType::Total => None,
            PriceType::Monthly => Some("price.per_month"),
            PriceType::Daily => Some("price.per_day"),
            PriceType::Weekly => Some("price.per_week"),
        }
    }
}

impl FromStr for PriceType {
    type Err = ();

    /// Accepts both the bare tag and the listing field name
    /// (`monthly` / `monthlyPrice`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "total" => Ok(PriceType::Total),
            "monthly" | "monthlyPrice" => Ok(PriceType::Monthly),
            "daily" | "dailyPrice" => Ok(PriceType::Daily),
            "weekly" | "weeklyPrice" => Ok(PriceType::Weekly),
            _ => Err(()),
        }
    }
}

/// Parse a loose price-type tag; unknown tags carry no suffix.
pub fn parse_price_type(tag: Option<&str>) -> Option<PriceType> {
    tag.and_then(|t| t.parse().ok())
}

/// Format an already-converted amount in `currency`.
pub fn format_amount(amount: f64, currency: Currency) -> String {
    let info = currency.info();
    let number = format_grouped(amount, info.decimal_places);
    // Rounds to zero: no sign.
    let sign = if amount < 0.0 && number != "0" { "-" } else { "" };

    match info.position {
        SymbolPosition::Before => format!("{sign}{}{number}", info.symbol),
        SymbolPosition::After => format!("{sign}{number} {}", info.symbol),
    }
}

/// Render a stored price in the display currency.
///
/// `source` defaults to EUR. Unparseable amounts render as zero.
pub fn format_price(
    amount: &RawAmount,
    price_type: Option<PriceType>,
    source: Option<Currency>,
    display: Currency,
    rates: &ExchangeRateSet,
) -> String {
    let converted = convert_currency(
        amount.value(),
        source.unwrap_or(Currency::Eur),
        display,
        rates,
    );

    let mut out = format_amount(converted, display);
    if let Some(suffix) = price_type.and_then(PriceType::suffix) {
        out.push_str(suffix);
    }
    out
}
