// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use holibayt::api::ExchangeRateClient;
use holibayt::config::{self, Config, DEFAULT_CONFIG_PATH};
use holibayt::context::CurrencyContext;
use holibayt::currencies::Currency;
use holibayt::exchange_rates::{refresh_rates, spawn_refresh, RateOrigin, RateStore};
use holibayt::format::{format_amount, parse_price_type};
use holibayt::i18n::{I18nContext, Language};
use holibayt::preferences::{JsonFileStore, MemoryStore, SharedStore};
use holibayt::web;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, env = "HOLIBAYT_CONFIG", default_value = DEFAULT_CONFIG_PATH, global = true)]
    config: PathBuf,
    /// Skip the startup rate fetch and use the built-in rates
    #[arg(long, global = true)]
    offline: bool,
    /// Keep preferences in memory for this run only
    #[arg(long, global = true)]
    ephemeral: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        /// Port to bind to
        #[arg(long, default_value = "3000")]
        port: u16,
    },
    /// Convert an amount between currencies
    Convert {
        amount: String,
        #[arg(long, default_value = "EUR")]
        from: Currency,
        /// Defaults to the selected display currency
        #[arg(long)]
        to: Option<Currency>,
    },
    /// Format a stored price in the selected display currency
    Format {
        amount: String,
        /// total, monthly, daily or weekly
        #[arg(long)]
        price_type: Option<String>,
        /// Currency the amount is stored in (default EUR)
        #[arg(long)]
        source: Option<Currency>,
    },
    /// Select the display currency (EUR, USD or DZD)
    SetCurrency { currency: Currency },
    /// Show the selected display currency
    ShowCurrency,
    /// Fetch the latest exchange rates and print them
    FetchRates,
    /// Select the UI language (fr, en or ar)
    SetLanguage { language: Language },
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn rate_client(config: &Config) -> Result<ExchangeRateClient> {
    match config.request_timeout() {
        Some(timeout) => ExchangeRateClient::with_timeout(&config.rates_url, timeout),
        None => Ok(ExchangeRateClient::new(&config.rates_url)),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let (config, config_error) = config::load_config_or_default(&cli.config);
    init_tracing(&config);
    if let Some(e) = config_error {
        tracing::error!("{:#}; using default configuration", e);
    }

    let store: SharedStore = if cli.ephemeral {
        Arc::new(MemoryStore::default())
    } else {
        Arc::new(JsonFileStore::new(&config.preferences_path))
    };
    let rates = RateStore::default();
    let currency = CurrencyContext::new(rates.clone(), store.clone());
    let i18n = I18nContext::new(store);
    let client = Arc::new(rate_client(&config)?);

    match cli.command {
        Some(Commands::Serve { port }) => {
            if !cli.offline {
                // Requests use the defaults until this lands.
                spawn_refresh(client, rates);
            }
            let state = web::AppState::new(currency, i18n);
            web::server::start_server(state, port).await?;
        }
        Some(Commands::Convert { amount, from, to }) => {
            if !cli.offline {
                refresh_rates(client.as_ref(), &rates).await;
            }
            let to = to.unwrap_or_else(|| currency.current_currency());
            let amount = holibayt::utils::RawAmount::from(amount).value();
            let converted = currency.convert(amount, from, to);
            println!("{} {} = {} ({})", amount, from, converted, format_amount(converted, to));
        }
        Some(Commands::Format {
            amount,
            price_type,
            source,
        }) => {
            if !cli.offline {
                refresh_rates(client.as_ref(), &rates).await;
            }
            let price_type = parse_price_type(price_type.as_deref());
            println!("{}", currency.format_price(amount, price_type, source));
        }
        Some(Commands::SetCurrency { currency: selected }) => {
            currency.set_currency(selected);
            println!("✅ Display currency set to {} ({})", selected, selected.symbol());
        }
        Some(Commands::FetchRates) => {
            let origin = refresh_rates(client.as_ref(), &rates).await;
            if origin == RateOrigin::Default {
                println!("⚠️  Could not fetch rates from {}, showing defaults", client.url());
            }
            let snapshot = rates.snapshot();
            for (code, rate) in snapshot.rates.to_map() {
                println!("1 EUR = {} {}", rate, code);
            }
            if let Some(fetched_at) = snapshot.fetched_at {
                println!("Fetched at {}", fetched_at.to_rfc3339());
            }
        }
        Some(Commands::SetLanguage { language }) => {
            i18n.set_language(language);
            println!(
                "✅ Language set to {} ({:?})",
                language,
                language.direction()
            );
        }
        Some(Commands::ShowCurrency) | None => {
            let selected = currency.current_currency();
            println!("{} ({})", selected, currency.currency_symbol());
        }
    }

    Ok(())
}
