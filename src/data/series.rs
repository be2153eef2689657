//! # Price Series
//!
//! $$
//! P = \{(d_i, p_i)\}_{i=1}^{n},\quad d_1 < d_2 < \dots < d_n
//! $$
//!
//! Date-indexed adjusted-close prices for a single ticker.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::NaiveTime;

/// Adjusted-close prices for one ticker, strictly increasing by date.
#[derive(Clone, Debug, PartialEq)]
pub struct PriceSeries {
  ticker: String,
  points: Vec<(NaiveDate, f64)>,
}

impl PriceSeries {
  /// Build a series from unordered points. A repeated date keeps the last price supplied.
  pub fn new<I>(ticker: impl Into<String>, points: I) -> Self
  where
    I: IntoIterator<Item = (NaiveDate, f64)>,
  {
    let by_date: BTreeMap<NaiveDate, f64> = points.into_iter().collect();
    Self {
      ticker: ticker.into(),
      points: by_date.into_iter().collect(),
    }
  }

  pub fn ticker(&self) -> &str {
    &self.ticker
  }

  pub fn len(&self) -> usize {
    self.points.len()
  }

  pub fn is_empty(&self) -> bool {
    self.points.is_empty()
  }

  pub fn points(&self) -> &[(NaiveDate, f64)] {
    &self.points
  }

  pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
    self.points.iter().copied()
  }

  pub fn first_date(&self) -> Option<NaiveDate> {
    self.points.first().map(|(d, _)| *d)
  }

  pub fn last_date(&self) -> Option<NaiveDate> {
    self.points.last().map(|(d, _)| *d)
  }

  /// Sub-series with `start <= date < end`, each date taken at midnight.
  pub fn between(&self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
    let points = self
      .points
      .iter()
      .filter(|(d, _)| {
        let at = d.and_time(NaiveTime::MIN);
        at >= start && at < end
      })
      .copied()
      .collect();

    Self {
      ticker: self.ticker.clone(),
      points,
    }
  }
}

impl<'a> IntoIterator for &'a PriceSeries {
  type Item = (NaiveDate, f64);
  type IntoIter = std::iter::Copied<std::slice::Iter<'a, (NaiveDate, f64)>>;

  fn into_iter(self) -> Self::IntoIter {
    self.points.iter().copied()
  }
}
