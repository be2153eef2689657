use chrono::Datelike;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::TimeDelta;
use correlation_rs::service::AnalysisRequest;
use correlation_rs::service::AnalysisService;
use correlation_rs::service::AnalysisStore;
use correlation_rs::service::MemoryStore;
use correlation_rs::CalculationErrorKind;
use correlation_rs::CorrelationCalculator;
use correlation_rs::FixedClock;
use correlation_rs::MemoryFetcher;
use correlation_rs::PriceSeries;

fn trading_days(from: NaiveDate, count: usize) -> Vec<NaiveDate> {
  from
    .iter_days()
    .filter(|d| d.weekday().number_from_monday() <= 5)
    .take(count)
    .collect()
}

fn at(date: NaiveDate) -> NaiveDateTime {
  date.and_hms_opt(0, 0, 0).unwrap()
}

fn fetcher() -> MemoryFetcher {
  let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
  let days = trading_days(start, 400);

  let aaa: Vec<(NaiveDate, f64)> = days
    .iter()
    .enumerate()
    .map(|(i, d)| (*d, 100.0 * (1.0 + 0.02 * (i as f64 * 0.37).sin()) + i as f64 * 0.05))
    .collect();
  let bbb = aaa.iter().map(|(d, p)| (*d, 2.0 * p));
  // CCC trades on a different calendar: every fifth AAA day is missing.
  let ccc = aaa
    .iter()
    .enumerate()
    .filter(|(i, _)| i % 5 != 4)
    .map(|(i, (d, _))| (*d, 40.0 + (i as f64 * 1.1).cos()));

  MemoryFetcher::new()
    .with_series(PriceSeries::new("AAA", aaa.clone()))
    .with_series(PriceSeries::new("BBB", bbb))
    .with_series(PriceSeries::new("CCC", ccc))
    .with_series(PriceSeries::new("FLAT", days.iter().map(|d| (*d, 25.0))))
    .with_series(PriceSeries::new("DLST", days.iter().take(10).map(|d| (*d, 5.0))))
}

#[test]
fn synthetic_proportional_pair_over_thirty_days() {
  let calc = CorrelationCalculator::new(fetcher());
  let start = NaiveDate::from_ymd_opt(2023, 3, 1).unwrap();
  let end = start + TimeDelta::days(30);

  let result = calc.calculate("AAA", "BBB", Some(at(start)), Some(at(end))).unwrap();

  assert_eq!(result.correlation, 1.0);
  assert_eq!(result.data_points, result.trading_days - 1);
  assert!(result.first_date >= start && result.last_date <= end);
}

#[test]
fn mismatched_calendars_carry_missing_prices_forward() {
  let calc = CorrelationCalculator::new(fetcher());
  let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
  let end = NaiveDate::from_ymd_opt(2023, 12, 29).unwrap();

  let result = calc.calculate("AAA", "CCC", Some(at(start)), Some(at(end))).unwrap();

  // CCC's missing sessions count as unchanged prices, so only the first row drops.
  assert!((-1.0..=1.0).contains(&result.correlation));
  assert_eq!(result.trading_days, 259);
  assert_eq!(result.data_points, result.trading_days - 1);
  assert_eq!(result.first_date, NaiveDate::from_ymd_opt(2023, 1, 3).unwrap());
}

#[test]
fn defaults_cover_the_year_before_now() {
  let now = NaiveDate::from_ymd_opt(2024, 3, 15)
    .and_then(|d| d.and_hms_opt(16, 0, 0))
    .unwrap();
  let calc = CorrelationCalculator::new(fetcher()).with_clock(FixedClock(now));

  let result = calc.calculate("AAA", "CCC", None, None).unwrap();

  assert_eq!(result.end_date, now.date());
  assert_eq!(result.start_date, (now - TimeDelta::days(365)).date());
}

#[test]
fn delisted_constant_and_sparse_tickers_fail() {
  let calc = CorrelationCalculator::new(fetcher());
  let start = at(NaiveDate::from_ymd_opt(2023, 6, 1).unwrap());
  let end = at(NaiveDate::from_ymd_opt(2023, 9, 1).unwrap());

  let err = calc.calculate("AAA", "DLST", Some(start), Some(end)).unwrap_err();
  assert!(err.is_data_unavailable());

  let err = calc.calculate("FLAT", "AAA", Some(start), Some(end)).unwrap_err();
  assert!(matches!(err.kind(), CalculationErrorKind::NaNResult { .. }));

  // DLST's ten sessions start 2023-01-02; a window holding its last two leaves one return.
  let from = at(NaiveDate::from_ymd_opt(2023, 1, 12).unwrap());
  let to = at(NaiveDate::from_ymd_opt(2023, 1, 14).unwrap());
  let err = calc.calculate("AAA", "DLST", Some(from), Some(to)).unwrap_err();
  assert_eq!(
    err.kind(),
    &CalculationErrorKind::InsufficientData { observations: 1 }
  );
}

#[test]
fn service_round_trip_persists_newest_first() {
  let store = MemoryStore::new();
  let service = AnalysisService::new(CorrelationCalculator::new(fetcher()), &store);
  let start = NaiveDate::from_ymd_opt(2023, 2, 1).unwrap();
  let end = NaiveDate::from_ymd_opt(2023, 5, 1).unwrap();

  let first = service
    .submit(&AnalysisRequest::new("AAA", "BBB").between(start, end))
    .unwrap();
  let second = service
    .submit(&AnalysisRequest::new("AAA", "CCC").between(start, end))
    .unwrap();
  let failed = service.handle_json(r#"{"ticker1": "FLAT", "ticker2": "AAA", "start_date": "2023-02-01", "end_date": "2023-05-01"}"#);

  assert_eq!(failed.status, 400);
  assert_eq!(store.list(), vec![second.clone(), first]);
  assert_eq!(store.search("ccc"), vec![second]);
}
