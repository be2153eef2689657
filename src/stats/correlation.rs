//! # Pairwise Correlation
//!
//! $$
//! \rho_{xy} = \frac{\operatorname{cov}(x,y)}{\sigma_x \sigma_y},\qquad
//! \operatorname{cov}(x,y) = \frac{1}{n-1}\sum_{i=1}^{n}(x_i-\bar x)(y_i-\bar y)
//! $$
//!
use statrs::statistics::Statistics;

/// Sample (n - 1) covariance over the common prefix of `x` and `y`.
///
/// Returns `NaN` for fewer than two observations.
pub fn sample_covariance(x: &[f64], y: &[f64]) -> f64 {
  let (x, y) = common_prefix(x, y);
  if x.len() < 2 {
    return f64::NAN;
  }
  x.iter().covariance(y.iter())
}

/// Pearson correlation over the common prefix of `x` and `y`.
///
/// Undefined (`NaN`) when either sample has zero variance or fewer than two
/// observations; never substitutes 0.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
  let (x, y) = common_prefix(x, y);
  let cov = sample_covariance(x, y);
  let denom = x.iter().std_dev() * y.iter().std_dev();

  if !denom.is_finite() || denom == 0.0 {
    return f64::NAN;
  }

  (cov / denom).clamp(-1.0, 1.0)
}

fn common_prefix<'a>(x: &'a [f64], y: &'a [f64]) -> (&'a [f64], &'a [f64]) {
  let n = x.len().min(y.len());
  (&x[..n], &y[..n])
}

/// Round to `decimals` places, half away from zero on the scaled binary value.
///
/// Differs from correctly rounded half-to-even decimal rounding only on exact
/// ties and on values whose scaled product lands on the other side of `.5`.
pub fn round_to(value: f64, decimals: u32) -> f64 {
  let factor = 10f64.powi(decimals as i32);
  (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;

  use super::*;

  #[test]
  fn perfectly_correlated_samples() {
    let x = [0.01, -0.02, 0.015, 0.003, -0.007];
    let y: Vec<f64> = x.iter().map(|v| 2.0 * v).collect();

    assert_abs_diff_eq!(pearson(&x, &y), 1.0, epsilon = 1e-12);
    let neg: Vec<f64> = x.iter().map(|v| -v).collect();
    assert_abs_diff_eq!(pearson(&x, &neg), -1.0, epsilon = 1e-12);
  }

  #[test]
  fn covariance_matches_hand_computation() {
    let x = [1.0, 2.0, 3.0, 4.0];
    let y = [2.0, 4.0, 5.0, 9.0];
    // means 2.5 and 5.0; sum of products 1.5*3 + 0.5*1 + 0 + 1.5*4 = 11
    assert_abs_diff_eq!(sample_covariance(&x, &y), 11.0 / 3.0, epsilon = 1e-12);
  }

  #[test]
  fn zero_variance_is_undefined() {
    let flat = [0.0, 0.0, 0.0, 0.0];
    let moving = [0.01, -0.02, 0.03, 0.0];

    assert!(pearson(&flat, &moving).is_nan());
    assert_abs_diff_eq!(sample_covariance(&flat, &moving), 0.0, epsilon = 1e-15);
  }

  #[test]
  fn short_samples_are_undefined() {
    assert!(sample_covariance(&[1.0], &[2.0]).is_nan());
    assert!(pearson(&[1.0], &[2.0]).is_nan());
  }

  #[test]
  fn unequal_lengths_use_common_prefix() {
    let x = [1.0, 2.0, 3.0, 4.0, 100.0];
    let y = [2.0, 4.0, 5.0, 9.0];

    assert_abs_diff_eq!(sample_covariance(&x, &y), 11.0 / 3.0, epsilon = 1e-12);
    assert_abs_diff_eq!(pearson(&x, &y), pearson(&x[..4], &y), epsilon = 1e-15);
    assert!(pearson(&x, &[]).is_nan());
  }

  #[test]
  fn round_to_decimal_places() {
    assert_eq!(round_to(0.987_654_321, 4), 0.9877);
    assert_eq!(round_to(-0.000_123_456_7, 6), -0.000123);
    assert_eq!(round_to(1.0, 4), 1.0);
    // exact tie: away from zero, not to even
    assert_eq!(round_to(0.125, 2), 0.13);
  }
}
