// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::preferences::{Preference, PreferenceValue, SharedStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Fr,
    En,
    Ar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ltr,
    Rtl,
}

#[derive(Debug, thiserror::Error, PartialEq)]
#[error("unsupported language code: {0:?}")]
pub struct UnknownLanguage(pub String);

impl Language {
    pub const ALL: [Language; 3] = [Language::Fr, Language::En, Language::Ar];

    pub fn code(self) -> &'static str {
        match self {
            Language::Fr => "fr",
            Language::En => "en",
            Language::Ar => "ar",
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            Language::Ar => Direction::Rtl,
            Language::Fr | Language::En => Direction::Ltr,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = UnknownLanguage;

    /// Accepts bare codes and region-tagged ones (`fr-DZ`, `ar_DZ`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let primary = s
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "fr" => Ok(Language::Fr),
            "en" => Ok(Language::En),
            "ar" => Ok(Language::Ar),
            _ => Err(UnknownLanguage(s.to_string())),
        }
    }
}

impl PreferenceValue for Language {
    const STORAGE_KEY: &'static str = "language";
}

// (key, en, fr, ar)
const CATALOG: &[(&str, &str, &str, &str)] = &[
    ("price.per_month", "/month", "/mois", "/شهر"),
    ("price.per_day", "/day", "/jour", "/يوم"),
    ("price.per_week", "/week", "/semaine", "/أسبوع"),
    ("price.total", "Total price", "Prix total", "السعر الإجمالي"),
    ("currency.label", "Currency", "Devise", "العملة"),
    ("language.label", "Language", "Langue", "اللغة"),
];

/// Look up `key` in `lang`, falling back to English, then to the key.
pub fn translate(lang: Language, key: &str) -> &str {
    let Some(&(_, en, fr, ar)) = CATALOG.iter().find(|(k, ..)| *k == key) else {
        return key;
    };
    let text = match lang {
        Language::En => en,
        Language::Fr => fr,
        Language::Ar => ar,
    };
    if text.is_empty() { en } else { text }
}

/// The UI language preference.
#[derive(Clone)]
pub struct I18nContext {
    language: Preference<Language>,
}

impl I18nContext {
    pub fn new(store: SharedStore) -> Self {
        Self {
            language: Preference::load(store),
        }
    }

    pub fn language(&self) -> Language {
        self.language.current()
    }

    pub fn set_language(&self, lang: Language) {
        self.language.set(lang);
    }

    pub fn direction(&self) -> Direction {
        self.language().direction()
    }

    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        translate(self.language(), key)
    }
}
