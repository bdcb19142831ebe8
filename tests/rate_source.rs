// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

//! The HTTP rate source against an in-process provider stub.

mod common;

use approx::assert_relative_eq;
use axum::http::StatusCode;
use common::*;
use holibayt::api::ExchangeRateClient;
use holibayt::currencies::{Currency, DEFAULT_RATES};
use holibayt::exchange_rates::{RateOrigin, RateSource, RateStore, refresh_rates, spawn_refresh};
use std::sync::Arc;
use std::time::Duration;

const GOOD_BODY: &str = r#"{"base":"EUR","date":"2025-03-01","rates":{"EUR":1,"USD":1.1,"DZD":150.5,"GBP":0.84}}"#;

#[tokio::test]
async fn test_fetch_rates_from_provider() -> anyhow::Result<()> {
    let url = spawn_rates_stub(StatusCode::OK, GOOD_BODY).await?;
    let client = ExchangeRateClient::new(url);

    let rates = client.fetch_rates().await?;
    assert_relative_eq!(rates.rate(Currency::Usd), 1.1);
    assert_relative_eq!(rates.rate(Currency::Dzd), 150.5);
    Ok(())
}

#[tokio::test]
async fn test_refresh_installs_fetched_rates() -> anyhow::Result<()> {
    let url = spawn_rates_stub(StatusCode::OK, GOOD_BODY).await?;
    let client = ExchangeRateClient::with_timeout(url, Duration::from_secs(5))?;
    let store = RateStore::default();

    assert_eq!(refresh_rates(&client, &store).await, RateOrigin::Fetched);
    assert_relative_eq!(store.rates().rate(Currency::Dzd), 150.5);
    Ok(())
}

#[tokio::test]
async fn test_server_error_falls_back_to_defaults() -> anyhow::Result<()> {
    let url = spawn_rates_stub(StatusCode::INTERNAL_SERVER_ERROR, r#"{"error":"down"}"#).await?;
    let client = ExchangeRateClient::new(url);
    assert!(client.fetch_rates().await.is_err());

    let store = RateStore::default();
    assert_eq!(refresh_rates(&client, &store).await, RateOrigin::Default);
    assert_eq!(store.rates(), DEFAULT_RATES);
    Ok(())
}

#[tokio::test]
async fn test_malformed_body_falls_back_to_defaults() -> anyhow::Result<()> {
    let url = spawn_rates_stub(StatusCode::OK, "not json at all").await?;
    let store = RateStore::default();

    refresh_rates(&ExchangeRateClient::new(url), &store).await;
    assert_eq!(store.rates(), DEFAULT_RATES);
    Ok(())
}

#[tokio::test]
async fn test_unreachable_provider_falls_back_to_defaults() -> anyhow::Result<()> {
    let url = closed_port_url().await?;
    let store = RateStore::default();
    let context = context_with_rates(standard_rates(), memory_store());

    let handle = spawn_refresh(Arc::new(ExchangeRateClient::new(url)), store.clone());
    handle.await?;

    assert_eq!(store.snapshot().origin, RateOrigin::Default);
    assert_eq!(store.rates(), DEFAULT_RATES);
    assert_eq!(context.format_price(150000.0, None, Some(Currency::Dzd)), "€1,034.48");
    Ok(())
}
