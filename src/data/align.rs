//! # Alignment
//!
//! $$
//! r_t = \frac{p_t}{p_{t-1}} - 1
//! $$
//!
//! Outer join of two price series on their dates, followed by per-column
//! percentage change over forward-filled prices and removal of incomplete rows.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::series::PriceSeries;

/// Two price series joined on the union of their dates.
///
/// A cell is `None` where one ticker has no price for a date the other has.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AlignedPrices {
  rows: BTreeMap<NaiveDate, [Option<f64>; 2]>,
}

impl AlignedPrices {
  /// Join `first` and `second` keeping every date present in either.
  pub fn outer_join(first: &PriceSeries, second: &PriceSeries) -> Self {
    let mut rows: BTreeMap<NaiveDate, [Option<f64>; 2]> = BTreeMap::new();

    for (column, series) in [first, second].into_iter().enumerate() {
      for (date, price) in series {
        rows.entry(date).or_default()[column] = Some(price);
      }
    }

    Self { rows }
  }

  /// Number of dates in the joined table, complete or not.
  pub fn len(&self) -> usize {
    self.rows.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }

  /// Dates on which both tickers have a price.
  pub fn complete_rows(&self) -> usize {
    self
      .rows
      .values()
      .filter(|cells| cells.iter().all(Option::is_some))
      .count()
  }

  pub fn rows(&self) -> impl Iterator<Item = (NaiveDate, [Option<f64>; 2])> + '_ {
    self.rows.iter().map(|(d, cells)| (*d, *cells))
  }

  /// Period-over-period percentage change per column, keeping only rows where
  /// both returns are defined.
  ///
  /// A missing price is filled with the last price seen in its column before
  /// the change is taken, so a gap yields a zero return on the gap row. A
  /// return is undefined until the column has a previous price, and where the
  /// ratio is not finite.
  pub fn pct_change(&self) -> ReturnTable {
    let mut table = ReturnTable::default();
    let mut last: [Option<f64>; 2] = [None, None];

    for (date, cells) in self.rows() {
      let mut returns = [None, None];
      for column in 0..2 {
        let price = cells[column].or(last[column]);
        returns[column] = pct(last[column], price);
        last[column] = price;
      }

      if let [Some(r0), Some(r1)] = returns {
        table.dates.push(date);
        table.first.push(r0);
        table.second.push(r1);
      }
    }

    table
  }
}

fn pct(prev: Option<f64>, cur: Option<f64>) -> Option<f64> {
  let r = cur? / prev? - 1.0;
  r.is_finite().then_some(r)
}

/// Paired daily returns with identical date sets.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReturnTable {
  dates: Vec<NaiveDate>,
  first: Vec<f64>,
  second: Vec<f64>,
}

impl ReturnTable {
  pub fn len(&self) -> usize {
    self.dates.len()
  }

  pub fn is_empty(&self) -> bool {
    self.dates.is_empty()
  }

  pub fn dates(&self) -> &[NaiveDate] {
    &self.dates
  }

  /// Returns of the first joined ticker.
  pub fn first(&self) -> &[f64] {
    &self.first
  }

  /// Returns of the second joined ticker.
  pub fn second(&self) -> &[f64] {
    &self.second
  }

  pub fn first_date(&self) -> Option<NaiveDate> {
    self.dates.first().copied()
  }

  pub fn last_date(&self) -> Option<NaiveDate> {
    self.dates.last().copied()
  }
}
