//! Turns a raw option quote export into the volatility CSV the charts read.
//!
//! Per quote: mid prices, intrinsic and extrinsic value, years to expiration,
//! the Black-Scholes implied volatility of the call and a bid/ask based
//! volatility estimate for the underlying.

pub mod black_scholes;
pub mod expiry;
pub mod quotes;
pub mod volatility;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::data::{self, OptionCsvRow};
use crate::error::VolChartError;

use black_scholes::Bisection;
use quotes::RawQuote;

/// Written in place of a volatility or expiry that could not be computed.
pub const UNAVAILABLE: f64 = -1.0;

/// Configuration for a `compute` run.
pub struct ComputeConfig {
    pub quotes_path: PathBuf,
    pub output: PathBuf,
    pub strike: f64,
    /// Expiration date as `DD/MM/YYYY`.
    pub expiration: String,
    /// Simple annual risk-free rate (1.0 = 100%).
    pub rate: f64,
    pub search: Bisection,
}

/// Market inputs shared by every quote in one run.
#[derive(Debug, Clone, Copy)]
pub struct PricingParams {
    pub strike: f64,
    pub expiration: NaiveDate,
    /// Continuously compounded rate.
    pub rate: f64,
    pub search: Bisection,
}

impl PricingParams {
    pub fn from_config(config: &ComputeConfig) -> Result<Self, VolChartError> {
        let expiration = expiry::parse_expiration(&config.expiration).ok_or_else(|| {
            VolChartError::InvalidExpiration {
                value: config.expiration.clone(),
            }
        })?;
        Ok(Self {
            strike: config.strike,
            expiration,
            rate: continuous_rate(config.rate),
            search: config.search,
        })
    }
}

/// Continuously compounded equivalent of a simple annual rate.
pub fn continuous_rate(simple: f64) -> f64 {
    (1.0 + simple).ln()
}

fn mid(bid: Option<f64>, ask: Option<f64>) -> Option<f64> {
    Some((bid? + ask?) / 2.0)
}

/// Compute the output record for one (already gap-filled) quote.
pub fn price_quote(quote: &RawQuote, params: &PricingParams) -> OptionCsvRow {
    let years = match expiry::parse_created_at(&quote.created_at) {
        Some(created_at) => {
            let years = expiry::years_to_expiration(created_at, params.expiration);
            if years.is_none() {
                warn!(
                    created_at = %quote.created_at,
                    "quote taken after expiration"
                );
            }
            years
        }
        None => {
            warn!(created_at = %quote.created_at, "invalid quote timestamp");
            None
        }
    };

    let price = mid(quote.bid, quote.ask);
    let under_price = mid(quote.under_bid, quote.under_ask);
    let under_volatility = match (quote.under_bid, quote.under_ask) {
        (Some(bid), Some(ask)) => volatility::spread_volatility(bid, ask),
        _ => None,
    };

    let implied_volatility = match (years, price, under_price) {
        (Some(t), Some(p), Some(s)) if t > 0.0 && p > 0.0 && s > 0.0 => {
            let iv = black_scholes::implied_volatility(
                p,
                s,
                params.strike,
                t,
                params.rate,
                &params.search,
            );
            if iv.is_none() {
                debug!(created_at = %quote.created_at, price = p, "implied volatility did not converge");
            }
            iv
        }
        _ => None,
    };

    let intrinsic_value = under_price.map(|s| s - params.strike);
    let extrinsic_value = match (price, intrinsic_value) {
        (Some(p), Some(i)) => Some(p - i),
        _ => None,
    };

    OptionCsvRow {
        description: quote.description.clone(),
        strike: params.strike,
        kind: quote.kind.clone(),
        bid: quote.bid,
        ask: quote.ask,
        under_bid: quote.under_bid,
        under_ask: quote.under_ask,
        created_at: quote.created_at.clone(),
        price,
        intrinsic_value,
        extrinsic_value,
        under_price,
        implied_volatility: implied_volatility.unwrap_or(UNAVAILABLE),
        under_volatility: under_volatility.unwrap_or(UNAVAILABLE),
        years_to_expiration: years.unwrap_or(UNAVAILABLE),
    }
}

/// Fill gaps in `quotes` and price every row, keeping input order.
pub fn compute_records(mut quotes: Vec<RawQuote>, params: &PricingParams) -> Vec<OptionCsvRow> {
    quotes::fill_missing(&mut quotes);
    quotes.iter().map(|q| price_quote(q, params)).collect()
}

/// Entry point for the `compute` command.
pub fn run(config: &ComputeConfig) -> Result<()> {
    let params = PricingParams::from_config(config)?;

    let raw = quotes::load_quotes(&config.quotes_path)
        .with_context(|| format!("reading quotes from {}", config.quotes_path.display()))?;
    info!(
        quotes = raw.len(),
        input = %config.quotes_path.display(),
        expiration = %params.expiration,
        strike = params.strike,
        "pricing quotes"
    );

    let records = compute_records(raw, &params);
    let solved = records
        .iter()
        .filter(|r| r.implied_volatility != UNAVAILABLE)
        .count();

    data::write_csv(&config.output, &records)
        .with_context(|| format!("writing {}", config.output.display()))?;
    info!(
        rows = records.len(),
        solved,
        output = %config.output.display(),
        "saved option records"
    );
    Ok(())
}
