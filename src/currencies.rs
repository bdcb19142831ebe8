// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

//! Supported currencies, their display policy and the EUR-pivot conversion.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CurrencyError {
    #[error("unsupported currency code: {0:?}")]
    UnknownCurrency(String),
    #[error("invalid exchange rate for {currency}: {rate}")]
    InvalidRate { currency: Currency, rate: f64 },
}

/// A currency prices can be stored in or displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[derive(Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "EUR")]
    Eur,
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "DZD")]
    Dzd,
}

/// Where the symbol sits relative to the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolPosition {
    Before,
    After,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CurrencyInfo {
    pub symbol: &'static str,
    pub position: SymbolPosition,
    pub decimal_places: u32,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::Eur, Currency::Usd, Currency::Dzd];

    pub fn code(self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
            Currency::Dzd => "DZD",
        }
    }

    /// Display policy for the currency. DZD is shown without minor units.
    pub const fn info(self) -> CurrencyInfo {
        match self {
            Currency::Eur => CurrencyInfo {
                symbol: "€",
                position: SymbolPosition::Before,
                decimal_places: 2,
            },
            Currency::Usd => CurrencyInfo {
                symbol: "$",
                position: SymbolPosition::Before,
                decimal_places: 2,
            },
            Currency::Dzd => CurrencyInfo {
                symbol: "DA",
                position: SymbolPosition::After,
                decimal_places: 0,
            },
        }
    }

    pub fn symbol(self) -> &'static str {
        self.info().symbol
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EUR" => Ok(Currency::Eur),
            "USD" => Ok(Currency::Usd),
            "DZD" => Ok(Currency::Dzd),
            _ => Err(CurrencyError::UnknownCurrency(s.to_string())),
        }
    }
}

/// Price of one EUR in each supported currency. EUR itself is always 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExchangeRateSet {
    usd: f64,
    dzd: f64,
}

/// Rates used until (or instead of) a successful fetch.
pub const DEFAULT_RATES: ExchangeRateSet = ExchangeRateSet {
    usd: 1.08,
    dzd: 145.0,
};

impl ExchangeRateSet {
    pub fn new(usd: f64, dzd: f64) -> Result<Self, CurrencyError> {
        for (currency, rate) in [(Currency::Usd, usd), (Currency::Dzd, dzd)] {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(CurrencyError::InvalidRate { currency, rate });
            }
        }
        Ok(Self { usd, dzd })
    }

    pub fn rate(&self, currency: Currency) -> f64 {
        match currency {
            Currency::Eur => 1.0,
            Currency::Usd => self.usd,
            Currency::Dzd => self.dzd,
        }
    }

    pub fn to_map(&self) -> BTreeMap<Currency, f64> {
        Currency::ALL.iter().map(|&c| (c, self.rate(c))).collect()
    }
}

impl Default for ExchangeRateSet {
    fn default() -> Self {
        DEFAULT_RATES
    }
}

impl Serialize for ExchangeRateSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_map().serialize(serializer)
    }
}

/// Convert an amount between currencies, going through EUR.
///
/// Only one rate per currency is needed; any pair composes from the two
/// EUR legs. Non-finite amounts convert to zero.
pub fn convert_currency(
    amount: f64,
    from_currency: Currency,
    to_currency: Currency,
    rates: &ExchangeRateSet,
) -> f64 {
    if !amount.is_finite() {
        return 0.0;
    }

    if from_currency == to_currency {
        return amount;
    }

    let amount_in_eur = match from_currency {
        Currency::Eur => amount,
        other => amount / rates.rate(other),
    };

    match to_currency {
        Currency::Eur => amount_in_eur,
        other => amount_in_eur * rates.rate(other),
    }
}
