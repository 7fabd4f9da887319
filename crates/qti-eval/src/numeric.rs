//! Stateless numeric helpers shared by the arithmetic processors

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Greatest common divisor of the absolute values; `gcd(0, 0) = 0`
pub fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Least common multiple; zero if either value is zero
pub fn lcm(a: i64, b: i64) -> i64 {
    if a == 0 || b == 0 {
        return 0;
    }
    (a / gcd(a, b) * b).abs()
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample variance (n - 1 denominator); needs at least two values
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let squares: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some(squares / (values.len() - 1) as f64)
}

/// Population variance (n denominator)
pub fn population_variance(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let squares: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some(squares / values.len() as f64)
}

// The shortest round-trip digits keep 5.055 as 5.055 rather than
// 5.05499999999999971578... Only the mantissa goes through Decimal, so
// magnitudes beyond its 28-digit scale keep every significant digit.
fn decompose(value: f64) -> Option<(Decimal, i64)> {
    let text = format!("{value:e}");
    let (mantissa, exponent) = text.split_once('e')?;
    Some((Decimal::from_str(mantissa).ok()?, exponent.parse().ok()?))
}

fn compose(mantissa: Decimal, exponent: i64) -> Option<f64> {
    format!("{mantissa}e{exponent}").parse().ok()
}

// Round the mantissa of `value` to `digits` places after its leading digit,
// half away from zero. Negative `digits` round above the leading digit.
fn round_mantissa(value: f64, digits: i64) -> Option<f64> {
    if value == 0.0 {
        return Some(0.0);
    }
    let (mantissa, exponent) = decompose(value)?;
    match digits {
        0.. => {
            let places = u32::try_from(digits.min(28)).ok()?;
            let rounded =
                mantissa.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
            compose(rounded, exponent)
        }
        -1 => {
            let rounded = (mantissa / Decimal::from(10))
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
            compose(rounded, exponent + 1)
        }
        _ => Some(0.0),
    }
}

/// Round half away from zero to `places` decimal places
pub fn round_to_decimal_places(value: f64, places: u32) -> Option<f64> {
    if !value.is_finite() {
        return None;
    }
    let (_, exponent) = decompose(value)?;
    round_mantissa(value, i64::from(places) + exponent)
}

/// Round half away from zero to `figures` significant figures
pub fn round_to_significant_figures(value: f64, figures: u32) -> Option<f64> {
    if !value.is_finite() || figures == 0 {
        return None;
    }
    round_mantissa(value, i64::from(figures) - 1)
}

/// Floor division; `None` on division by zero or overflow
pub fn floor_div(x: i32, y: i32) -> Option<i32> {
    let q = x.checked_div(y)?;
    if x % y != 0 && ((x < 0) != (y < 0)) {
        q.checked_sub(1)
    } else {
        Some(q)
    }
}

/// Remainder consistent with [`floor_div`]: `x = floor_div(x, y) * y + r`
pub fn floor_mod(x: i32, y: i32) -> Option<i32> {
    let q = floor_div(x, y)?;
    x.checked_sub(q.checked_mul(y)?)
}

/// Float to integer when finite and within range
pub fn to_i32(value: f64) -> Option<i32> {
    if value.is_finite() && value >= i32::MIN as f64 && value <= i32::MAX as f64 {
        Some(value as i32)
    } else {
        None
    }
}
