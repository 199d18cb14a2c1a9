/// Trading days per year used to annualize.
pub const TRADING_DAYS_PER_YEAR: f64 = 256.0;
/// Minutes in one 6.5 hour trading session.
pub const MINUTES_PER_SESSION: f64 = 390.0;

/// Annualized volatility of the underlying estimated from one bid/ask pair.
///
/// The quote is treated as the high/low of a one-minute bar:
/// `sqrt(0.5 d^2 - (2 ln 2 - 1) d^2)` with `d = ln(bid) - ln(ask)`, scaled by
/// the number of minutes in a trading year. `None` for non-positive quotes.
pub fn spread_volatility(bid: f64, ask: f64) -> Option<f64> {
    if bid <= 0.0 || ask <= 0.0 {
        return None;
    }
    let log_range = bid.ln() - ask.ln();
    let squared = log_range * log_range;
    let per_minute = (0.5 * squared - (2.0 * 2f64.ln() - 1.0) * squared).sqrt();
    Some(per_minute * (TRADING_DAYS_PER_YEAR * MINUTES_PER_SESSION).sqrt())
}
