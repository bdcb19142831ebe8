// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::currencies::Currency;
use crate::format::{parse_price_type, PriceType};
use crate::i18n::{translate, Language};
use crate::utils::RawAmount;
use crate::web::state::AppState;

type ApiResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

fn bad_request(message: impl std::fmt::Display) -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": message.to_string() })),
    )
}

fn parse_currency(code: Option<&str>, fallback: Currency) -> Result<Currency, (StatusCode, Json<Value>)> {
    match code {
        Some(code) => code.parse().map_err(bad_request),
        None => Ok(fallback),
    }
}

fn currency_payload(currency: Currency) -> Value {
    let info = currency.info();
    json!({
        "currency": currency,
        "symbol": info.symbol,
        "position": info.position,
        "decimal_places": info.decimal_places,
    })
}

fn language_payload(lang: Language) -> Value {
    let suffixes: serde_json::Map<String, Value> = [PriceType::Monthly, PriceType::Daily, PriceType::Weekly]
        .into_iter()
        .filter_map(|pt| {
            let key = pt.suffix_key()?;
            let name = serde_json::to_value(pt).ok()?.as_str()?.to_string();
            Some((name, Value::from(translate(lang, key))))
        })
        .collect();

    json!({
        "language": lang,
        "direction": lang.direction(),
        "suffixes": suffixes,
    })
}

/// Selected display currency
pub async fn get_currency(State(state): State<AppState>) -> Json<Value> {
    Json(currency_payload(state.currency.current_currency()))
}

#[derive(Debug, Deserialize)]
pub struct SetCurrencyRequest {
    pub currency: String,
}

/// Change the display currency
pub async fn set_currency(
    State(state): State<AppState>,
    Json(request): Json<SetCurrencyRequest>,
) -> ApiResult {
    let currency: Currency = request.currency.parse().map_err(bad_request)?;
    state.currency.set_currency(currency);
    Ok(Json(currency_payload(currency)))
}

/// Rates currently in use
pub async fn get_rates(State(state): State<AppState>) -> Json<Value> {
    Json(json!(state.currency.rates()))
}

#[derive(Debug, Deserialize)]
pub struct ConvertQuery {
    pub amount: String,
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Convert an amount. `from` defaults to EUR, `to` to the display currency.
pub async fn convert(State(state): State<AppState>, Query(query): Query<ConvertQuery>) -> ApiResult {
    let from = parse_currency(query.from.as_deref(), Currency::Eur)?;
    let to = parse_currency(query.to.as_deref(), state.currency.current_currency())?;
    let amount = RawAmount::Text(query.amount).value();
    let converted = state.currency.convert(amount, from, to);
    // JSON has no infinity; it would serialize as null.
    if !converted.is_finite() {
        return Err(bad_request("amount out of range"));
    }

    Ok(Json(json!({
        "from": from,
        "to": to,
        "amount": converted,
    })))
}

#[derive(Debug, Deserialize)]
pub struct PriceQuery {
    pub amount: String,
    pub price_type: Option<String>,
    pub source: Option<String>,
}

/// Format a stored price in the display currency
pub async fn format_price(
    State(state): State<AppState>,
    Query(query): Query<PriceQuery>,
) -> ApiResult {
    let source = parse_currency(query.source.as_deref(), Currency::Eur)?;
    let price_type = parse_price_type(query.price_type.as_deref());

    Ok(Json(json!({
        "formatted": state.currency.format_price(query.amount, price_type, Some(source)),
        "currency": state.currency.current_currency(),
    })))
}

/// Selected UI language
pub async fn get_language(State(state): State<AppState>) -> Json<Value> {
    Json(language_payload(state.i18n.language()))
}

#[derive(Debug, Deserialize)]
pub struct SetLanguageRequest {
    pub language: String,
}

/// Change the UI language
pub async fn set_language(
    State(state): State<AppState>,
    Json(request): Json<SetLanguageRequest>,
) -> ApiResult {
    let lang: Language = request.language.parse().map_err(bad_request)?;
    state.i18n.set_language(lang);
    Ok(Json(language_payload(lang)))
}
