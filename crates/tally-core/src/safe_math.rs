//! Numeric guard primitives
//!
//! Everything that can divide by zero, average nothing, or overflow into a
//! non-finite value returns a fallback instead. Results are rendered directly
//! by callers, so `NaN`/`Infinity` must never escape.
//!
//! Operations with a natural default fallback come in two flavours: the short
//! form uses the default, the `_or` form takes one explicitly.

/// Divide `a` by `b`, falling back to `0.0`
pub fn safe_divide(a: f64, b: f64) -> f64 {
    safe_divide_or(a, b, 0.0)
}

/// Divide `a` by `b`, returning `fallback` for a zero divisor, non-finite
/// operands, or a non-finite quotient
pub fn safe_divide_or(a: f64, b: f64, fallback: f64) -> f64 {
    if b == 0.0 || !a.is_finite() || !b.is_finite() {
        return fallback;
    }
    let result = a / b;
    if result.is_finite() {
        result
    } else {
        fallback
    }
}

/// Arithmetic mean of the finite entries, `None` when there are none
pub fn safe_average(values: &[f64]) -> Option<f64> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return None;
    }
    let mean = safe_sum(&finite) / finite.len() as f64;
    mean.is_finite().then_some(mean)
}

/// Arithmetic mean of the finite entries, or `fallback` when there are none
pub fn safe_average_or(values: &[f64], fallback: f64) -> f64 {
    safe_average(values).unwrap_or(fallback)
}

/// `part / total * 100`, falling back to `0.0`
pub fn safe_percentage(part: f64, total: f64) -> f64 {
    safe_percentage_or(part, total, 0.0)
}

/// `safe_divide_or(part, total, fallback) * 100`
///
/// The fallback replaces the quotient and is scaled with it. If the product
/// overflows, the unscaled fallback is returned.
pub fn safe_percentage_or(part: f64, total: f64, fallback: f64) -> f64 {
    let pct = safe_divide_or(part, total, fallback) * 100.0;
    if pct.is_finite() {
        pct
    } else {
        fallback
    }
}

/// Percent change from `previous` to `current`, falling back to `0.0`
pub fn safe_delta(current: f64, previous: f64) -> f64 {
    safe_delta_or(current, previous, 0.0)
}

/// Percent change from `previous` to `current`
///
/// A zero baseline reports `100` for any growth (there is no meaningful
/// ratio) and `fallback` otherwise. The change is measured against
/// `|previous|` so a negative baseline keeps the sign of the movement.
pub fn safe_delta_or(current: f64, previous: f64, fallback: f64) -> f64 {
    if !current.is_finite() || !previous.is_finite() {
        return fallback;
    }
    if previous == 0.0 {
        return if current > 0.0 { 100.0 } else { fallback };
    }
    let delta = safe_divide_or(current - previous, previous.abs(), f64::NAN) * 100.0;
    if delta.is_finite() {
        delta
    } else {
        fallback
    }
}

/// Round to `decimals` places, falling back to `0.0`
pub fn safe_round(value: f64, decimals: u32) -> f64 {
    safe_round_or(value, decimals, 0.0)
}

/// Round half away from zero to `decimals` places
pub fn safe_round_or(value: f64, decimals: u32, fallback: f64) -> f64 {
    if !value.is_finite() {
        return fallback;
    }
    if decimals == 0 {
        return value.round();
    }
    let factor = 10f64.powi(decimals.min(15) as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        // Too large to carry the requested precision; already integral anyway
        return value;
    }
    scaled.round() / factor
}

/// Round to the nearest integer, saturating at the `i64` bounds
///
/// Non-finite input yields `0`.
pub fn round_to_i64(value: f64) -> i64 {
    // `as` saturates for out-of-range floats
    safe_round(value, 0) as i64
}

/// Sum of the entries, counting non-finite ones as zero
pub fn safe_sum(values: &[f64]) -> f64 {
    values.iter().filter(|v| v.is_finite()).sum()
}

/// Bound `value` to `[min, max]`; a non-finite value yields `min`
///
/// Unlike `f64::clamp` this never panics: with `min > max` the lower bound
/// is checked first.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if !value.is_finite() {
        return min;
    }
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}
