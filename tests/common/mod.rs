// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

//! Common test utilities and helpers
//!
//! This module provides reusable test infrastructure for the integration tests:
//! - Standard rate sets for currency conversion testing
//! - Contexts backed by in-memory or temporary-file preference stores
//! - An in-process stub of the exchange-rate provider

#![allow(dead_code)]

use anyhow::Result;
use axum::{Router, http::StatusCode, routing::get};
use holibayt::context::CurrencyContext;
use holibayt::currencies::{DEFAULT_RATES, ExchangeRateSet};
use holibayt::exchange_rates::RateStore;
use holibayt::i18n::I18nContext;
use holibayt::preferences::{JsonFileStore, MemoryStore, SharedStore};
use holibayt::web::AppState;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// The fallback rates: EUR 1, USD 1.08, DZD 145
pub fn standard_rates() -> ExchangeRateSet {
    DEFAULT_RATES
}

pub fn memory_store() -> SharedStore {
    Arc::new(MemoryStore::default())
}

/// A preference file path inside a fresh temporary directory
pub fn temp_preferences() -> Result<(PathBuf, TempDir)> {
    let temp_dir = tempfile::tempdir()?;
    let path = temp_dir.path().join("preferences.json");
    Ok((path, temp_dir))
}

pub fn file_store(path: &Path) -> SharedStore {
    Arc::new(JsonFileStore::new(path))
}

pub fn context_with_rates(rates: ExchangeRateSet, store: SharedStore) -> CurrencyContext {
    CurrencyContext::new(RateStore::with_rates(rates), store)
}

pub fn test_state() -> AppState {
    let store = memory_store();
    AppState::new(
        context_with_rates(standard_rates(), store.clone()),
        I18nContext::new(store),
    )
}

/// Serve `body` with `status` at `/latest` on an ephemeral port and return
/// the URL.
pub async fn spawn_rates_stub(status: StatusCode, body: &'static str) -> Result<String> {
    let app = Router::new().route(
        "/latest",
        get(move || async move {
            (
                status,
                [(axum::http::header::CONTENT_TYPE, "application/json")],
                body,
            )
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(format!("http://{}/latest", addr))
}

/// A URL nothing listens on
pub async fn closed_port_url() -> Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{}/latest", addr))
}
