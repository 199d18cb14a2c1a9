//! Black-Scholes call pricing and the bisection implied-volatility solver.

use std::f64::consts::SQRT_2;

use statrs::function::erf::erf;

/// Standard normal CDF.
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / SQRT_2))
}

pub fn d1(spot: f64, strike: f64, time: f64, rate: f64, sigma: f64) -> f64 {
    ((spot / strike).ln() + (rate + 0.5 * sigma * sigma) * time) / (sigma * time.sqrt())
}

/// European call price. `rate` is continuously compounded, `time` in years.
pub fn call_price(spot: f64, strike: f64, time: f64, rate: f64, sigma: f64) -> f64 {
    let d1 = d1(spot, strike, time, rate, sigma);
    let d2 = d1 - sigma * time.sqrt();
    spot * norm_cdf(d1) - strike * (-rate * time).exp() * norm_cdf(d2)
}

/// Search bracket and stopping rule for [`implied_volatility`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bisection {
    pub lower: f64,
    pub upper: f64,
    pub tolerance: f64,
    pub max_iterations: u32,
}

impl Default for Bisection {
    fn default() -> Self {
        Self {
            lower: 0.00001,
            upper: 5.0,
            tolerance: 0.00001,
            max_iterations: 500,
        }
    }
}

/// Volatility whose call price is within `tolerance` of `market_price`.
///
/// Returns `None` when the bracket midpoint never gets close enough within
/// `max_iterations` halvings.
pub fn implied_volatility(
    market_price: f64,
    spot: f64,
    strike: f64,
    time: f64,
    rate: f64,
    search: &Bisection,
) -> Option<f64> {
    let (mut lower, mut upper) = (search.lower, search.upper);

    for _ in 0..search.max_iterations {
        let mid = (lower + upper) / 2.0;
        let model = call_price(spot, strike, time, rate, mid);

        if (model - market_price).abs() < search.tolerance {
            return Some(mid);
        }
        if market_price > model {
            lower = mid;
        } else {
            upper = mid;
        }
    }
    None
}
