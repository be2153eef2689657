//! # Price Fetcher
//!
//! Single-method capability for obtaining adjusted-close prices, plus an
//! in-memory source for fixture data.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDateTime;
use parking_lot::Mutex;
use tracing::debug;

use super::series::PriceSeries;
use crate::error::FetchError;

/// Market-data source returning adjusted-close prices for one ticker.
pub trait PriceFetcher {
  /// Fetch prices for `ticker` over `[start, end]`; the exact bound semantics are source-defined.
  ///
  /// Fails with [`FetchError::DataUnavailable`] when the source has no rows for
  /// the range, and with [`FetchError::Source`] on any transport error.
  fn fetch(
    &self,
    ticker: &str,
    start: NaiveDateTime,
    end: NaiveDateTime,
  ) -> Result<PriceSeries, FetchError>;
}

impl<F: PriceFetcher + ?Sized> PriceFetcher for &F {
  fn fetch(
    &self,
    ticker: &str,
    start: NaiveDateTime,
    end: NaiveDateTime,
  ) -> Result<PriceSeries, FetchError> {
    (**self).fetch(ticker, start, end)
  }
}

impl<F: PriceFetcher + ?Sized> PriceFetcher for Box<F> {
  fn fetch(
    &self,
    ticker: &str,
    start: NaiveDateTime,
    end: NaiveDateTime,
  ) -> Result<PriceSeries, FetchError> {
    (**self).fetch(ticker, start, end)
  }
}

impl<F: PriceFetcher + ?Sized> PriceFetcher for Arc<F> {
  fn fetch(
    &self,
    ticker: &str,
    start: NaiveDateTime,
    end: NaiveDateTime,
  ) -> Result<PriceSeries, FetchError> {
    (**self).fetch(ticker, start, end)
  }
}

/// Deterministic in-memory price source.
///
/// Ranges are filtered as `start <= date < end`, matching the exclusive end
/// bound of the Yahoo chart API.
#[derive(Debug, Default)]
pub struct MemoryFetcher {
  series: HashMap<String, PriceSeries>,
  failures: HashMap<String, String>,
  requests: Mutex<Vec<String>>,
}

impl MemoryFetcher {
  pub fn new() -> Self {
    Self::default()
  }

  /// Register (or replace) the full price history of a ticker.
  pub fn with_series(mut self, series: PriceSeries) -> Self {
    self.insert(series);
    self
  }

  /// Make every fetch of `ticker` fail with a source error carrying `message`.
  pub fn with_failure(mut self, ticker: impl Into<String>, message: impl Into<String>) -> Self {
    self.failures.insert(ticker.into(), message.into());
    self
  }

  pub fn insert(&mut self, series: PriceSeries) {
    self.series.insert(series.ticker().to_string(), series);
  }

  /// Tickers requested so far, in call order.
  pub fn requests(&self) -> Vec<String> {
    self.requests.lock().clone()
  }
}

impl PriceFetcher for MemoryFetcher {
  fn fetch(
    &self,
    ticker: &str,
    start: NaiveDateTime,
    end: NaiveDateTime,
  ) -> Result<PriceSeries, FetchError> {
    self.requests.lock().push(ticker.to_string());

    if let Some(message) = self.failures.get(ticker) {
      return Err(FetchError::transport(ticker, message));
    }

    let window = self
      .series
      .get(ticker)
      .map(|s| s.between(start, end))
      .filter(|s| !s.is_empty())
      .ok_or_else(|| FetchError::data_unavailable(ticker))?;

    debug!(ticker, %start, %end, rows = window.len(), "fetched fixture prices");
    Ok(window)
  }
}
