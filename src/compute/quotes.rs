use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Result, VolChartError};

/// Fields per line in the quote export.
const QUOTE_FIELDS: usize = 8;

/// One line of the semicolon-delimited quote export.
#[derive(Debug, Clone, PartialEq)]
pub struct RawQuote {
    pub description: String,
    pub strike: Option<f64>,
    pub kind: String,
    pub bid: Option<f64>,
    pub ask: Option<f64>,
    pub under_bid: Option<f64>,
    pub under_ask: Option<f64>,
    pub created_at: String,
}

/// Parse a number that may use a decimal comma (`178,999`).
///
/// The whole cell must be consumed; blanks and partial numbers are `None`.
pub fn parse_decimal(cell: &str) -> Option<f64> {
    let normalized = cell.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Read the quote export at `path`, skipping the header and short lines.
pub fn load_quotes(path: &Path) -> Result<Vec<RawQuote>> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| VolChartError::csv(path, e))?;

    let mut quotes = Vec::new();
    for (line, record) in rdr.records().enumerate() {
        let record = record.map_err(|e| VolChartError::csv(path, e))?;
        if record.len() < QUOTE_FIELDS {
            debug!(line = line + 2, fields = record.len(), "skipping short quote line");
            continue;
        }
        quotes.push(RawQuote {
            description: record[0].to_string(),
            strike: parse_decimal(&record[1]),
            kind: record[2].to_string(),
            bid: parse_decimal(&record[3]),
            ask: parse_decimal(&record[4]),
            under_bid: parse_decimal(&record[5]),
            under_ask: parse_decimal(&record[6]),
            created_at: record[7].trim().to_string(),
        });
    }
    Ok(quotes)
}

/// Fill gaps in one column in place.
///
/// The first row takes the next value found below it and the last row the
/// nearest value above it. Interior rows take the mean of their nearest
/// neighbours on both sides and stay empty if either side has none. Rows are
/// filled top to bottom, so an interior fill can feed the next gap.
pub fn fill_column(values: &mut [Option<f64>]) {
    let n = values.len();
    if n < 2 {
        return;
    }

    if values[0].is_none() {
        values[0] = values[1..].iter().find_map(|v| *v);
    }

    for i in 1..n - 1 {
        if values[i].is_some() {
            continue;
        }
        let previous = values[..i].iter().rev().find_map(|v| *v);
        let next = values[i + 1..].iter().find_map(|v| *v);
        if let (Some(previous), Some(next)) = (previous, next) {
            values[i] = Some((previous + next) / 2.0);
        }
    }

    if values[n - 1].is_none() {
        values[n - 1] = values[..n - 1].iter().rev().find_map(|v| *v);
    }
}

/// Fill missing bid, ask, underlying bid and underlying ask values.
pub fn fill_missing(quotes: &mut [RawQuote]) {
    fill_field(quotes, "bid", |q| q.bid, |q, v| q.bid = v);
    fill_field(quotes, "ask", |q| q.ask, |q, v| q.ask = v);
    fill_field(quotes, "under bid", |q| q.under_bid, |q, v| q.under_bid = v);
    fill_field(quotes, "under ask", |q| q.under_ask, |q, v| q.under_ask = v);
}

fn fill_field(
    quotes: &mut [RawQuote],
    name: &str,
    get: impl Fn(&RawQuote) -> Option<f64>,
    set: impl Fn(&mut RawQuote, Option<f64>),
) {
    let mut column: Vec<Option<f64>> = quotes.iter().map(&get).collect();
    let missing = column.iter().filter(|v| v.is_none()).count();
    if missing == 0 {
        return;
    }

    fill_column(&mut column);
    let remaining = column.iter().filter(|v| v.is_none()).count();
    debug!(column = name, missing, remaining, "filled quote gaps");
    if remaining > 0 {
        warn!(column = name, remaining, "quote values still missing after fill");
    }

    for (quote, value) in quotes.iter_mut().zip(column) {
        set(quote, value);
    }
}
