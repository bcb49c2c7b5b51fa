//! Evaluation of the arctangent Taylor series
//!
//! atan(x) = x - x³/3 + x⁵/5 - x⁷/7 + ...
//!
//! The series converges on the closed interval [-1, 1] only, slowly near the
//! endpoints. None of the functions here validate their input.

/// The number of terms summed by the loop free head of [`taylor_atan`].
pub const HEAD_TERMS: usize = 3;

/// Sign of term `n` of the series, i.e. `(-1)^n`. Exactly ±1.
#[inline]
fn term_sign(n: usize) -> f64 {
    if n % 2 == 0 {
        1.0
    } else {
        -1.0
    }
}

/// Approximates _atan(x)_ by summing the first `terms` terms of its Taylor series.
///
/// The first three terms are always evaluated loop free as `x - x³/3 + x⁵/5`,
/// so `terms` values below 3 still give the three term result. Use
/// [`taylor_atan_trunc`] for a literal truncation.
///
/// # Arguments
/// * `x` - Evaluate the series at this x value. It is assumed that `-1.0 <= x <= 1.0`.
/// * `terms` - The number of series terms to sum.
pub fn taylor_atan(x: f64, terms: usize) -> f64 {
    let x2 = x * x;
    let x3 = x2 * x;
    let x5 = x3 * x2;
    let mut result = x - x3 / 3.0 + x5 / 5.0;

    if terms > HEAD_TERMS {
        let mut x_power = x5 * x2;
        for n in HEAD_TERMS..terms {
            result += term_sign(n) * x_power / (2 * n + 1) as f64;
            x_power *= x2;
        }
    }

    result
}

/// Sums exactly the first `terms` terms of the arctangent Taylor series.
/// Zero terms gives zero.
///
/// # Arguments
/// * `x` - Evaluate the series at this x value. It is assumed that `-1.0 <= x <= 1.0`.
/// * `terms` - The number of series terms to sum.
pub fn taylor_atan_trunc(x: f64, terms: usize) -> f64 {
    let x2 = x * x;
    let mut x_power = x;
    let mut result = 0.0;
    for n in 0..terms {
        result += term_sign(n) * x_power / (2 * n + 1) as f64;
        x_power *= x2;
    }
    result
}

/// The number of terms [`taylor_atan`] actually sums for a given `terms` argument.
pub fn effective_terms(terms: usize) -> usize {
    terms.max(HEAD_TERMS)
}

/// Upper bound on `|taylor_atan(x, terms) - atan(x)|` for `-1.0 <= x <= 1.0`,
/// given by the magnitude of the first omitted term.
///
/// Holds in exact arithmetic. Rounding adds a few ulps on top.
///
/// # Arguments
/// * `x` - The evaluation point.
/// * `terms` - The `terms` argument passed to [`taylor_atan`].
pub fn remainder_bound(x: f64, terms: usize) -> f64 {
    let k = effective_terms(terms);
    let x_abs = if x < 0.0 { -x } else { x };
    let mut x_power = x_abs;
    for _ in 0..k {
        x_power *= x_abs * x_abs;
    }
    x_power / (2 * k + 1) as f64
}
