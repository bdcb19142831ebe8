// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use crate::context::CurrencyContext;
use crate::i18n::I18nContext;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub currency: CurrencyContext,
    pub i18n: I18nContext,
}

impl AppState {
    pub fn new(currency: CurrencyContext, i18n: I18nContext) -> Self {
        Self { currency, i18n }
    }
}
