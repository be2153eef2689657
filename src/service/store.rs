//! # Analysis Store
//!
//! Persistence of completed analyses.

use std::fmt;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use parking_lot::RwLock;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::calculator::CorrelationResult;
use crate::clock::Clock;
use crate::clock::SystemClock;

/// Stored correlation analysis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CorrelationAnalysis {
  pub id: u64,
  pub ticker1: String,
  pub ticker2: String,
  pub correlation: f64,
  pub covariance: f64,
  /// Requested start date for analysis.
  pub start_date: NaiveDate,
  /// Requested end date for analysis.
  pub end_date: NaiveDate,
  /// First date with valid return data.
  pub first_date: NaiveDate,
  /// Last date with valid return data.
  pub last_date: NaiveDate,
  /// Number of data points used in calculation.
  pub data_points: usize,
  /// Total number of trading days in range.
  pub trading_days: usize,
  pub created_at: DateTime<Utc>,
}

impl CorrelationAnalysis {
  fn from_result(id: u64, result: CorrelationResult, created_at: DateTime<Utc>) -> Self {
    Self {
      id,
      ticker1: result.ticker1,
      ticker2: result.ticker2,
      correlation: result.correlation,
      covariance: result.covariance,
      start_date: result.start_date,
      end_date: result.end_date,
      first_date: result.first_date,
      last_date: result.last_date,
      data_points: result.data_points,
      trading_days: result.trading_days,
      created_at,
    }
  }

  fn mentions(&self, needle: &str) -> bool {
    self.ticker1.to_lowercase().contains(needle) || self.ticker2.to_lowercase().contains(needle)
  }
}

impl fmt::Display for CorrelationAnalysis {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "Correlation Analysis: {} vs {} ({})",
      self.ticker1,
      self.ticker2,
      self.created_at.date_naive()
    )
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
  #[error("{field}: {reason}")]
  Constraint { field: &'static str, reason: String },
}

/// Persistence for [`CorrelationAnalysis`] records.
pub trait AnalysisStore {
  /// Persist a result, assigning its id and creation time.
  fn insert(&self, result: CorrelationResult) -> Result<CorrelationAnalysis, StoreError>;

  fn get(&self, id: u64) -> Option<CorrelationAnalysis>;

  /// All records, newest first.
  fn list(&self) -> Vec<CorrelationAnalysis>;

  /// Records whose ticker1 or ticker2 contains `term`, case-insensitively, newest first.
  fn search(&self, term: &str) -> Vec<CorrelationAnalysis>;
}

/// Maximum stored ticker length, matching the request limit.
pub const TICKER_COLUMN_LEN: usize = 10;

/// In-process [`AnalysisStore`] stamping `created_at` from its clock.
#[derive(Debug, Default)]
pub struct MemoryStore<C = SystemClock> {
  records: RwLock<Vec<CorrelationAnalysis>>,
  clock: C,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }
}

impl<C: Clock> MemoryStore<C> {
  pub fn with_clock(clock: C) -> Self {
    Self {
      records: RwLock::new(Vec::new()),
      clock,
    }
  }

  pub fn len(&self) -> usize {
    self.records.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.records.read().is_empty()
  }
}

fn check_ticker(field: &'static str, ticker: &str) -> Result<(), StoreError> {
  if ticker.chars().count() > TICKER_COLUMN_LEN {
    return Err(StoreError::Constraint {
      field,
      reason: format!("value exceeds {TICKER_COLUMN_LEN} characters"),
    });
  }
  Ok(())
}

fn newest_first(mut records: Vec<CorrelationAnalysis>) -> Vec<CorrelationAnalysis> {
  records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
  records
}

impl<C: Clock> AnalysisStore for MemoryStore<C> {
  fn insert(&self, result: CorrelationResult) -> Result<CorrelationAnalysis, StoreError> {
    check_ticker("ticker1", &result.ticker1)?;
    check_ticker("ticker2", &result.ticker2)?;

    let mut records = self.records.write();
    let id = records.last().map_or(1, |r| r.id + 1);
    let record = CorrelationAnalysis::from_result(id, result, self.clock.now_utc());
    records.push(record.clone());

    debug!(id, %record, "stored analysis");
    Ok(record)
  }

  fn get(&self, id: u64) -> Option<CorrelationAnalysis> {
    self.records.read().iter().find(|r| r.id == id).cloned()
  }

  fn list(&self) -> Vec<CorrelationAnalysis> {
    newest_first(self.records.read().clone())
  }

  fn search(&self, term: &str) -> Vec<CorrelationAnalysis> {
    let needle = term.trim().to_lowercase();
    let hits = self
      .records
      .read()
      .iter()
      .filter(|r| r.mentions(&needle))
      .cloned()
      .collect();
    newest_first(hits)
  }
}

impl<S: AnalysisStore + ?Sized> AnalysisStore for &S {
  fn insert(&self, result: CorrelationResult) -> Result<CorrelationAnalysis, StoreError> {
    (**self).insert(result)
  }

  fn get(&self, id: u64) -> Option<CorrelationAnalysis> {
    (**self).get(id)
  }

  fn list(&self) -> Vec<CorrelationAnalysis> {
    (**self).list()
  }

  fn search(&self, term: &str) -> Vec<CorrelationAnalysis> {
    (**self).search(term)
  }
}
