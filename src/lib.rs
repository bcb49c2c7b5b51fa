#![cfg_attr(not(any(feature = "std", test)), no_std)]

//! taylor-atan is a crate for approximating the arctangent function with a truncated
//! [Taylor series](https://en.wikipedia.org/wiki/Taylor_series) and for measuring how far the
//! approximation strays from the exact value on [-1, 1]. The series evaluation is `no_std`
//! compatible and allocation free. With the `std` feature (enabled by default) the crate also
//! samples the relative error of an approximation, and with the `plot` feature it renders those
//! samples as an SVG chart.
//!
//! # Installing
//!
//! Add the following line to your Cargo.toml file:
//!
//! ```text
//! taylor-atan = "0.1"
//! ```
//!
//! To use taylor-atan in a `no_std` environment:
//!
//! ```text
//! taylor-atan = { version = "0.1", default-features = false }
//! ```
//!
//! # The arctangent series
//!
//! For `-1 <= x <= 1` the arctangent can be written as the alternating series
//!
//! _atan(x) = x - x³/3 + x⁵/5 - x⁷/7 + ..._
//!
//! The terms shrink quickly for small _|x|_, but at _x = ±1_ they only decay like _1/n_,
//! so many terms are needed near the ends of the interval. Since the series alternates, the
//! error of a truncated sum is bounded by the magnitude of the first omitted term, see
//! [`remainder_bound`]. Outside [-1, 1] the series diverges.
//!
//! # Basic usage
//!
//! ```
//! use taylor_atan::taylor_atan;
//!
//! // Approximate atan(0.5) using 8 terms
//! let value_approx = taylor_atan(0.5, 8);
//! // Get the actual value
//! let value_actual = 0.5_f64.atan();
//! // Compute the approximation error
//! let error = value_actual - value_approx;
//! assert!(error.abs() < 1e-6);
//! ```
//!
//! The first three terms are always summed, so `terms` values of 1 and 2 give the same result
//! as 3. [`taylor_atan_trunc`] sums exactly the requested number of terms.
//!
//! ```
//! use taylor_atan::{taylor_atan, taylor_atan_trunc};
//!
//! assert_eq!(taylor_atan(1.0, 3), 1.0 - 1.0 / 3.0 + 1.0 / 5.0);
//! assert_eq!(taylor_atan(1.0, 1), taylor_atan(1.0, 3));
//! assert_eq!(taylor_atan_trunc(1.0, 1), 1.0);
//! ```
//!
//! # Error sampling
//!
//! `generate_data_points` evaluates the relative error, in percent, at 200 evenly spaced
//! points from -1 to 1. The grid never contains 0, where the relative error is undefined.
//!
//! ```
//! # #[cfg(feature = "std")]
//! # {
//! use taylor_atan::generate_data_points;
//!
//! let samples = generate_data_points(5);
//! assert_eq!(samples.len(), 200);
//! assert_eq!(samples[0].x, -1.0);
//! assert_eq!(samples[199].x, 1.0);
//! // The worst case is at the ends of the interval
//! let peak = samples.iter().map(|s| s.error).fold(0.0, f64::max);
//! assert_eq!(peak, samples[199].error);
//! # }
//! ```

pub mod series;

#[cfg(feature = "std")]
pub mod sample;

#[cfg(feature = "plot")]
pub mod chart;

pub use series::{effective_terms, remainder_bound, taylor_atan, taylor_atan_trunc};

#[cfg(feature = "std")]
pub use sample::{generate_data_points, relative_error, ErrorSeries, Sample, SAMPLE_COUNT};

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    #[test]
    fn test_samples_use_series() {
        for terms in [3, 6, 11] {
            let samples = generate_data_points(terms);
            let s = samples[150];
            let exact = s.x.atan();
            assert!(s.error == relative_error(taylor_atan(s.x, terms), exact));
        }
    }

    #[test]
    fn test_remainder_bounds_sampled_error() {
        for terms in [3, 5, 7, 9, 11] {
            for s in generate_data_points(terms) {
                let exact = s.x.atan();
                let bound = 100.0 * (remainder_bound(s.x, terms) + 1e-15) / exact.abs();
                assert!(s.error <= bound);
            }
        }
    }
}
