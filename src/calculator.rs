//! # Correlation Calculator
//!
//! $$
//! \rho = \operatorname{corr}\big(r^{(1)}, r^{(2)}\big),\qquad
//! r^{(k)}_t = \frac{p^{(k)}_t}{p^{(k)}_{t-1}} - 1
//! $$
//!
//! Fetches two adjusted-close series, aligns them on their dates and computes
//! correlation and covariance of the daily returns.

use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::TimeDelta;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::data::AlignedPrices;
use crate::data::PriceFetcher;
use crate::error::CalculationError;
use crate::error::CalculationErrorKind;
use crate::stats::pearson;
use crate::stats::round_to;
use crate::stats::sample_covariance;

/// Runtime configuration for [`CorrelationCalculator`].
#[derive(Clone, Debug)]
pub struct CalculatorConfig {
  /// Days between the default start and the end of the range when no start is given.
  pub lookback_days: i64,
  /// Minimum number of paired return observations.
  pub min_observations: usize,
  /// Decimal places kept on the reported correlation.
  pub correlation_decimals: u32,
  /// Decimal places kept on the reported covariance.
  pub covariance_decimals: u32,
}

impl Default for CalculatorConfig {
  fn default() -> Self {
    Self {
      lookback_days: 365,
      min_observations: 2,
      correlation_decimals: 4,
      covariance_decimals: 6,
    }
  }
}

/// Outcome of a single pairwise calculation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CorrelationResult {
  /// Pearson correlation of daily returns, in `[-1, 1]`.
  pub correlation: f64,
  /// Sample covariance of daily returns.
  pub covariance: f64,
  /// Requested start of the range, as a calendar date.
  pub start_date: NaiveDate,
  /// Requested end of the range, as a calendar date.
  pub end_date: NaiveDate,
  pub ticker1: String,
  pub ticker2: String,
  /// Number of paired return observations used.
  pub data_points: usize,
  /// First date with a valid paired return.
  pub first_date: NaiveDate,
  /// Last date with a valid paired return.
  pub last_date: NaiveDate,
  /// Dates in the joined price table, before returns were taken.
  pub trading_days: usize,
}

/// Pairwise return correlation over a [`PriceFetcher`].
///
/// Holds no mutable state; concurrent calls on a shared calculator are
/// independent of each other.
#[derive(Clone, Debug)]
pub struct CorrelationCalculator<F, C = SystemClock> {
  fetcher: F,
  clock: C,
  config: CalculatorConfig,
}

impl<F: PriceFetcher> CorrelationCalculator<F> {
  /// Calculator reading "now" from the local wall clock.
  pub fn new(fetcher: F) -> Self {
    Self {
      fetcher,
      clock: SystemClock,
      config: CalculatorConfig::default(),
    }
  }
}

impl<F: PriceFetcher, C: Clock> CorrelationCalculator<F, C> {
  pub fn with_clock<C2: Clock>(self, clock: C2) -> CorrelationCalculator<F, C2> {
    CorrelationCalculator {
      fetcher: self.fetcher,
      clock,
      config: self.config,
    }
  }

  pub fn with_config(mut self, config: CalculatorConfig) -> Self {
    self.config = config;
    self
  }

  pub fn config(&self) -> &CalculatorConfig {
    &self.config
  }

  pub fn fetcher(&self) -> &F {
    &self.fetcher
  }

  /// Correlation and covariance of daily returns of `ticker1` and `ticker2`.
  ///
  /// `end` defaults to the clock's current time and `start` to `end` minus the
  /// configured lookback. The un-normalized bounds are handed to the fetcher;
  /// the result reports their calendar dates.
  pub fn calculate(
    &self,
    ticker1: &str,
    ticker2: &str,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
  ) -> Result<CorrelationResult, CalculationError> {
    match self.run(ticker1, ticker2, start, end) {
      Ok(result) => {
        info!(
          ticker1,
          ticker2,
          correlation = result.correlation,
          covariance = result.covariance,
          data_points = result.data_points,
          "correlation calculated"
        );
        Ok(result)
      }
      Err(kind) => {
        let err = CalculationError::from(kind);
        warn!(ticker1, ticker2, error = %err, "correlation failed");
        Err(err)
      }
    }
  }

  fn run(
    &self,
    ticker1: &str,
    ticker2: &str,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
  ) -> Result<CorrelationResult, CalculationErrorKind> {
    let end = end.unwrap_or_else(|| self.clock.now());
    let start = match start {
      Some(start) => start,
      None => TimeDelta::try_days(self.config.lookback_days)
        .and_then(|lookback| end.checked_sub_signed(lookback))
        .ok_or(CalculationErrorKind::LookbackOutOfRange {
          lookback_days: self.config.lookback_days,
        })?,
    };

    let first = self.fetcher.fetch(ticker1, start, end)?;
    let second = self.fetcher.fetch(ticker2, start, end)?;

    let aligned = AlignedPrices::outer_join(&first, &second);
    let returns = aligned.pct_change();
    debug!(
      ticker1,
      ticker2,
      trading_days = aligned.len(),
      complete = aligned.complete_rows(),
      returns = returns.len(),
      "aligned price series"
    );

    let observations = returns.len();
    let (first_date, last_date) = match (returns.first_date(), returns.last_date()) {
      (Some(first), Some(last)) if observations >= self.config.min_observations.max(2) => {
        (first, last)
      }
      _ => return Err(CalculationErrorKind::InsufficientData { observations }),
    };

    let correlation = pearson(returns.first(), returns.second());
    let covariance = sample_covariance(returns.first(), returns.second());
    if !correlation.is_finite() || !covariance.is_finite() {
      return Err(CalculationErrorKind::NaNResult {
        correlation,
        covariance,
      });
    }

    Ok(CorrelationResult {
      correlation: round_to(correlation, self.config.correlation_decimals),
      covariance: round_to(covariance, self.config.covariance_decimals),
      start_date: start.date(),
      end_date: end.date(),
      ticker1: ticker1.to_string(),
      ticker2: ticker2.to_string(),
      data_points: observations,
      first_date,
      last_date,
      trading_days: aligned.len(),
    })
  }
}
