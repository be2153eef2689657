//! # Yahoo Finance
//!
//! Adjusted-close history from the Yahoo Finance chart API.

use chrono::DateTime;
use chrono::NaiveDateTime;
use time::OffsetDateTime;
use tracing::debug;
use yahoo_finance_api as yahoo;

use super::fetcher::PriceFetcher;
use super::series::PriceSeries;
use crate::error::FetchError;

/// [`PriceFetcher`] backed by the Yahoo Finance chart API.
///
/// Each fetch blocks the calling thread until the HTTP round trip completes.
/// The connector applies no retries; the API treats `end` as exclusive.
pub struct YahooFetcher {
  provider: yahoo::YahooConnector,
}

impl YahooFetcher {
  pub fn new() -> Result<Self, yahoo::YahooError> {
    Ok(Self {
      provider: yahoo::YahooConnector::new()?,
    })
  }
}

fn to_offset(ticker: &str, at: NaiveDateTime) -> Result<OffsetDateTime, FetchError> {
  OffsetDateTime::from_unix_timestamp(at.and_utc().timestamp())
    .map_err(|err| FetchError::transport(ticker, err))
}

impl PriceFetcher for YahooFetcher {
  fn fetch(
    &self,
    ticker: &str,
    start: NaiveDateTime,
    end: NaiveDateTime,
  ) -> Result<PriceSeries, FetchError> {
    let response = tokio_test::block_on(self.provider.get_quote_history(
      ticker,
      to_offset(ticker, start)?,
      to_offset(ticker, end)?,
    ))
    .map_err(|err| FetchError::transport(ticker, err))?;

    let quotes = response
      .quotes()
      .map_err(|_| FetchError::data_unavailable(ticker))?;

    let points = quotes.iter().filter_map(|quote| {
      let date = DateTime::from_timestamp(quote.timestamp as i64, 0)?.date_naive();
      quote.adjclose.is_finite().then_some((date, quote.adjclose))
    });
    let series = PriceSeries::new(ticker, points);

    debug!(ticker, %start, %end, quotes = quotes.len(), rows = series.len(), "fetched yahoo prices");

    if series.is_empty() {
      return Err(FetchError::data_unavailable(ticker));
    }

    Ok(series)
  }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;

  #[test]
  fn offsets_are_utc_epoch_seconds() {
    let at = NaiveDate::from_ymd_opt(2024, 1, 2)
      .and_then(|d| d.and_hms_opt(0, 0, 0))
      .unwrap();
    let offset = to_offset("AAA", at).unwrap();
    assert_eq!(offset.unix_timestamp(), 1_704_153_600);
  }
}
