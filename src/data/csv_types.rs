use serde::{Deserialize, Serialize};

/// Columns the chart commands read from the volatility CSV.
pub const REQUIRED_COLUMNS: [&str; 3] = ["Created At", "Implied volatility", "Under volatility"];

/// One row of the volatility CSV. Any other columns in the file are ignored.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct VolatilityCsvRow {
    #[serde(rename = "Created At")]
    pub created_at: String,
    #[serde(rename = "Implied volatility")]
    pub implied_volatility: f64,
    #[serde(rename = "Under volatility")]
    pub under_volatility: f64,
}

/// Row written by `compute`. Empty cells mean the value was unavailable;
/// the volatility and expiry columns use `-1` instead.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct OptionCsvRow {
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Strike")]
    pub strike: f64,
    #[serde(rename = "Kind")]
    pub kind: String,
    #[serde(rename = "Bid")]
    pub bid: Option<f64>,
    #[serde(rename = "Ask")]
    pub ask: Option<f64>,
    #[serde(rename = "Under Bid")]
    pub under_bid: Option<f64>,
    #[serde(rename = "Under Ask")]
    pub under_ask: Option<f64>,
    #[serde(rename = "Created At")]
    pub created_at: String,
    #[serde(rename = "Price")]
    pub price: Option<f64>,
    #[serde(rename = "Intrinsic value")]
    pub intrinsic_value: Option<f64>,
    #[serde(rename = "Extrinsic value")]
    pub extrinsic_value: Option<f64>,
    #[serde(rename = "Under Price")]
    pub under_price: Option<f64>,
    #[serde(rename = "Implied volatility")]
    pub implied_volatility: f64,
    #[serde(rename = "Under volatility")]
    pub under_volatility: f64,
    #[serde(rename = "Years to expiration")]
    pub years_to_expiration: f64,
}
