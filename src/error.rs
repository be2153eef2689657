//! # Errors
//!
//! Typed failures of the fetch and calculation pipeline. Every failure inside
//! [`CorrelationCalculator::calculate`](crate::calculator::CorrelationCalculator::calculate)
//! reaches the caller as a single [`CalculationError`].

use thiserror::Error;

/// Failure to obtain a price series for one ticker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
  /// The source returned no rows, or rows without an adjusted close.
  #[error("No data found for ticker {ticker}")]
  DataUnavailable { ticker: String },

  /// Transport or source failure, carrying the source's own message.
  #[error("Error fetching data for {ticker}: {message}")]
  Source { ticker: String, message: String },
}

impl FetchError {
  pub fn data_unavailable(ticker: impl Into<String>) -> Self {
    Self::DataUnavailable {
      ticker: ticker.into(),
    }
  }

  pub fn transport(ticker: impl Into<String>, message: impl ToString) -> Self {
    Self::Source {
      ticker: ticker.into(),
      message: message.to_string(),
    }
  }
}

/// Root cause of a failed calculation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalculationErrorKind {
  #[error(transparent)]
  Fetch(#[from] FetchError),

  #[error("Lookback of {lookback_days} days falls outside the supported date range")]
  LookbackOutOfRange { lookback_days: i64 },

  #[error("Insufficient data points for correlation calculation ({observations} return observations)")]
  InsufficientData { observations: usize },

  #[error("Calculation resulted in NaN values (correlation: {correlation}, covariance: {covariance})")]
  NaNResult { correlation: f64, covariance: f64 },
}

/// Uniform error surfaced by the calculator regardless of where the pipeline failed.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Calculation error: {kind}")]
pub struct CalculationError {
  #[source]
  kind: CalculationErrorKind,
}

impl CalculationError {
  /// Typed cause, for callers that need to branch on it.
  pub fn kind(&self) -> &CalculationErrorKind {
    &self.kind
  }

  pub fn is_data_unavailable(&self) -> bool {
    matches!(
      self.kind,
      CalculationErrorKind::Fetch(FetchError::DataUnavailable { .. })
    )
  }
}

impl From<CalculationErrorKind> for CalculationError {
  fn from(kind: CalculationErrorKind) -> Self {
    Self { kind }
  }
}

impl From<FetchError> for CalculationError {
  fn from(value: FetchError) -> Self {
    Self {
      kind: CalculationErrorKind::Fetch(value),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn calculation_error_prefixes_cause_message() {
    struct TestCase {
      input: CalculationError,
      expected: &'static str,
    }

    let tests = vec![
      TestCase {
        // TC0: fetch failure keeps the source message
        input: CalculationError::from(FetchError::transport("AAA", "connection reset")),
        expected: "Calculation error: Error fetching data for AAA: connection reset",
      },
      TestCase {
        // TC1: missing data names the ticker
        input: CalculationError::from(FetchError::data_unavailable("ZZZ")),
        expected: "Calculation error: No data found for ticker ZZZ",
      },
      TestCase {
        // TC2: insufficient observations
        input: CalculationError::from(CalculationErrorKind::InsufficientData { observations: 1 }),
        expected: "Calculation error: Insufficient data points for correlation calculation (1 return observations)",
      },
      TestCase {
        // TC3: unrepresentable default start
        input: CalculationError::from(CalculationErrorKind::LookbackOutOfRange {
          lookback_days: i64::MAX,
        }),
        expected: "Calculation error: Lookback of 9223372036854775807 days falls outside the supported date range",
      },
    ];

    for (index, test) in tests.into_iter().enumerate() {
      assert_eq!(test.input.to_string(), test.expected, "TC{} failed", index);
    }
  }

  #[test]
  fn data_unavailable_is_detected_through_wrapper() {
    let err = CalculationError::from(FetchError::data_unavailable("ZZZ"));
    assert!(err.is_data_unavailable());
    assert_eq!(
      err.kind(),
      &CalculationErrorKind::Fetch(FetchError::data_unavailable("ZZZ"))
    );

    let err = CalculationError::from(FetchError::transport("ZZZ", "timeout"));
    assert!(!err.is_data_unavailable());
  }
}
