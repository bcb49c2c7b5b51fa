//! Relative error sampling of the series approximation against `f64::atan`.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::series::taylor_atan;

/// The number of samples produced by [`generate_data_points`].
pub const SAMPLE_COUNT: usize = 200;

/// The relative error of the series approximation at a single point.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sample {
    /// The evaluation point.
    pub x: f64,
    /// Relative error in percent.
    pub error: f64,
}

impl fmt::Display for Sample {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{},{}", self.x, self.error)
    }
}

/// Relative error of `approx` with respect to `exact`, in percent.
///
/// Not guarded against `exact == 0.0`, which gives `NaN` or infinity.
pub fn relative_error(approx: f64, exact: f64) -> f64 {
    ((approx - exact) / exact).abs() * 100.0
}

/// Samples the relative error of [`taylor_atan`] at [`SAMPLE_COUNT`] evenly spaced
/// points on [-1, 1], both ends included.
///
/// The grid never contains x = 0.
///
/// # Arguments
/// * `terms` - The number of series terms, passed on to [`taylor_atan`].
pub fn generate_data_points(terms: usize) -> Vec<Sample> {
    sample_grid(terms, -1.0, 1.0, SAMPLE_COUNT)
}

/// Samples the relative error of [`taylor_atan`] at `count` evenly spaced points
/// from `x_min` to `x_max`, both ends included.
///
/// A grid containing x = 0 produces a `NaN` error for that sample.
///
/// # Arguments
/// * `terms` - The number of series terms, passed on to [`taylor_atan`].
/// * `x_min` - The first sample point.
/// * `x_max` - The last sample point.
/// * `count` - The number of samples. A count of 1 samples `x_min` only.
pub fn sample_grid(terms: usize, x_min: f64, x_max: f64, count: usize) -> Vec<Sample> {
    let last = count.saturating_sub(1).max(1) as f64;
    (0..count)
        .map(|i| {
            let x = x_min + (i as f64 * (x_max - x_min)) / last;
            let exact = x.atan();
            let approx = taylor_atan(x, terms);
            Sample {
                x,
                error: relative_error(approx, exact),
            }
        })
        .collect()
}

/// The error samples for a single term count.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ErrorSeries {
    terms: usize,
    samples: Vec<Sample>,
}

impl ErrorSeries {
    /// Samples the error of a `terms` term approximation using [`generate_data_points`].
    pub fn new(terms: usize) -> Self {
        ErrorSeries {
            terms,
            samples: generate_data_points(terms),
        }
    }

    /// Creates a series from samples sorted ascending by x.
    pub fn from_samples(terms: usize, samples: Vec<Sample>) -> Self {
        ErrorSeries { terms, samples }
    }

    /// The number of series terms the samples were computed with.
    pub fn terms(&self) -> usize {
        self.terms
    }

    /// The samples, sorted ascending by x.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// The largest error in the series, ignoring `NaN`. `None` if there is none.
    pub fn max_error(&self) -> Option<f64> {
        self.samples
            .iter()
            .map(|s| s.error)
            .filter(|e| !e.is_nan())
            .fold(None, |max, e| match max {
                Some(m) if m >= e => Some(m),
                _ => Some(e),
            })
    }

    /// The first sample with an x value not less than `x`, or the last sample
    /// if `x` lies beyond the end of the series.
    ///
    /// # Arguments
    /// * `x` - The x value to look up.
    pub fn nearest(&self, x: f64) -> Option<&Sample> {
        let idx = self.samples.partition_point(|s| s.x < x);
        self.samples.get(idx).or_else(|| self.samples.last())
    }

    /// Checks if any sample has a `NaN` or infinite error.
    pub fn has_non_finite(&self) -> bool {
        self.samples.iter().any(|s| !s.error.is_finite())
    }
}

/// The largest error over several series, ignoring `NaN`.
pub fn max_error(series: &[ErrorSeries]) -> Option<f64> {
    series
        .iter()
        .filter_map(ErrorSeries::max_error)
        .fold(None, |max, e| match max {
            Some(m) if m >= e => Some(m),
            _ => Some(e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_shape() {
        let samples = generate_data_points(5);
        assert!(samples.len() == SAMPLE_COUNT);
        assert!(samples[0].x == -1.0);
        assert!(samples[SAMPLE_COUNT - 1].x == 1.0);
        for pair in samples.windows(2) {
            assert!(pair[0].x < pair[1].x);
        }
    }

    #[test]
    fn test_grid_skips_zero() {
        for terms in [1, 3, 7, 11] {
            let samples = generate_data_points(terms);
            assert!(samples.iter().all(|s| s.x != 0.0));
            assert!(samples.iter().all(|s| s.error.is_finite() && s.error >= 0.0));
        }
    }

    #[test]
    fn test_error_matches_formula() {
        let samples = generate_data_points(7);
        for (i, s) in samples.iter().enumerate() {
            let x = -1.0 + (i as f64 * 2.0) / 199.0;
            assert!(s.x == x);
            let exact = x.atan();
            let expected = ((taylor_atan(x, 7) - exact) / exact).abs() * 100.0;
            assert!(s.error == expected);
        }
    }

    #[test]
    fn test_endpoint_error() {
        let samples = generate_data_points(3);
        let exact = 1.0_f64.atan();
        let expected = (1.0 - 1.0 / 3.0 + 1.0 / 5.0 - exact) / exact * 100.0;
        assert!((samples[SAMPLE_COUNT - 1].error - expected).abs() < 1e-12);
        // Odd function, so the error profile is symmetric
        assert!((samples[0].error - expected).abs() < 1e-12);
    }

    #[test]
    fn test_more_terms_shrink_peak_error() {
        let peaks: Vec<f64> = [3, 5, 7, 9, 11]
            .iter()
            .map(|&t| ErrorSeries::new(t).max_error().unwrap())
            .collect();
        for pair in peaks.windows(2) {
            assert!(pair[1] < pair[0]);
        }
    }

    #[test]
    fn test_grid_through_zero_is_nan() {
        let samples = sample_grid(5, -1.0, 1.0, 201);
        assert!(samples[100].x == 0.0);
        assert!(samples[100].error.is_nan());
        let series = ErrorSeries::from_samples(5, samples);
        assert!(series.has_non_finite());
        assert!(series.max_error().unwrap().is_finite());
    }

    #[test]
    fn test_degenerate_counts() {
        assert!(sample_grid(5, -1.0, 1.0, 0).is_empty());
        let single = sample_grid(5, 0.5, 1.0, 1);
        assert!(single.len() == 1);
        assert!(single[0].x == 0.5);
    }

    #[test]
    fn test_nearest() {
        let series = ErrorSeries::new(5);
        let first = series.nearest(-2.0).unwrap();
        assert!(first.x == -1.0);
        let last = series.nearest(2.0).unwrap();
        assert!(last.x == 1.0);
        let mid = series.nearest(0.0).unwrap();
        assert!(mid.x > 0.0);
        assert!(mid.x < 0.011);
        let exact = series.samples()[42];
        assert!(*series.nearest(exact.x).unwrap() == exact);
        assert!(ErrorSeries::from_samples(5, vec![]).nearest(0.0).is_none());
    }

    #[test]
    fn test_max_error_over_series() {
        let series: Vec<ErrorSeries> = [3, 11].iter().map(|&t| ErrorSeries::new(t)).collect();
        let max = max_error(&series).unwrap();
        assert!(max == series[0].max_error().unwrap());
        assert!(max_error(&[]).is_none());
    }

    #[test]
    fn test_deterministic() {
        assert!(generate_data_points(9) == generate_data_points(9));
    }
}
