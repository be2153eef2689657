//! # Analysis Request
//!
//! Caller-supplied parameters of a correlation analysis and their validation.

use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::NaiveTime;
use serde::Deserialize;
use serde::Serialize;

use super::ServiceConfig;

/// Request to correlate two tickers, optionally over an explicit date range.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
  pub ticker1: String,
  pub ticker2: String,
  #[serde(default)]
  pub start_date: Option<NaiveDate>,
  #[serde(default)]
  pub end_date: Option<NaiveDate>,
}

/// Validation failure attached to one request field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
  pub field: &'static str,
  pub message: String,
}

impl AnalysisRequest {
  pub fn new(ticker1: impl Into<String>, ticker2: impl Into<String>) -> Self {
    Self {
      ticker1: ticker1.into(),
      ticker2: ticker2.into(),
      start_date: None,
      end_date: None,
    }
  }

  pub fn between(mut self, start_date: NaiveDate, end_date: NaiveDate) -> Self {
    self.start_date = Some(start_date);
    self.end_date = Some(end_date);
    self
  }

  /// Cleaned copy of the request (tickers trimmed), or every field error found.
  pub fn validate(&self, config: &ServiceConfig) -> Result<Self, Vec<FieldError>> {
    let mut errors = Vec::new();
    let ticker1 = clean_ticker("ticker1", &self.ticker1, config, &mut errors);
    let ticker2 = clean_ticker("ticker2", &self.ticker2, config, &mut errors);

    if !errors.is_empty() {
      return Err(errors);
    }

    Ok(Self {
      ticker1,
      ticker2,
      start_date: self.start_date,
      end_date: self.end_date,
    })
  }

  /// Start bound handed to the calculator: midnight of the requested date.
  pub fn start(&self) -> Option<NaiveDateTime> {
    self.start_date.map(|d| d.and_time(NaiveTime::MIN))
  }

  /// End bound handed to the calculator: midnight of the requested date.
  pub fn end(&self) -> Option<NaiveDateTime> {
    self.end_date.map(|d| d.and_time(NaiveTime::MIN))
  }
}

fn clean_ticker(
  field: &'static str,
  raw: &str,
  config: &ServiceConfig,
  errors: &mut Vec<FieldError>,
) -> String {
  let ticker = raw.trim();

  if ticker.is_empty() {
    errors.push(FieldError {
      field,
      message: "This field may not be blank.".to_string(),
    });
  } else if ticker.chars().count() > config.max_ticker_len {
    errors.push(FieldError {
      field,
      message: format!(
        "Ensure this field has no more than {} characters.",
        config.max_ticker_len
      ),
    });
  }

  ticker.to_string()
}
