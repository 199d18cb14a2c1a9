use chrono::{Datelike, NaiveDate, NaiveDateTime};

const SECONDS_PER_YEAR: f64 = 365.0 * 24.0 * 60.0 * 60.0;

/// Parse a quote timestamp such as `10/18/2023 12:18` (month first, 24h clock).
pub fn parse_created_at(value: &str) -> Option<NaiveDateTime> {
    let parsed = NaiveDateTime::parse_from_str(value.trim(), "%m/%d/%Y %H:%M").ok()?;
    (2000..=2099).contains(&parsed.year()).then_some(parsed)
}

/// Parse an expiration date written as `DD/MM/YYYY`.
pub fn parse_expiration(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes[2] == b'/'
        && bytes[5] == b'/'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 2 || i == 5 || b.is_ascii_digit());
    if !shape_ok {
        return None;
    }
    NaiveDate::parse_from_str(value, "%d/%m/%Y").ok()
}

/// Years from `created_at` to midnight of `expiration`, on a 365-day year.
///
/// `None` when the quote was taken after the expiration date.
pub fn years_to_expiration(created_at: NaiveDateTime, expiration: NaiveDate) -> Option<f64> {
    let expires = expiration.and_hms_opt(0, 0, 0)?;
    let seconds = (expires - created_at).num_seconds();
    if seconds < 0 {
        return None;
    }
    Some(seconds as f64 / SECONDS_PER_YEAR)
}
