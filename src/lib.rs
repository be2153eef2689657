//! # correlation-rs
//!
//! $$
//! \rho_{12} = \frac{\operatorname{cov}\big(r^{(1)}, r^{(2)}\big)}{\sigma_{r^{(1)}}\,\sigma_{r^{(2)}}}
//! $$
//!
//! Correlation and covariance between the daily returns of two instruments.
//! A [`CorrelationCalculator`] pulls adjusted-close prices through a
//! [`PriceFetcher`], joins them on their dates and reports a
//! [`CorrelationResult`]; the [`service`] module wraps it with request
//! validation and persistence.

pub mod calculator;
pub mod clock;
pub mod data;
pub mod error;
pub mod service;
pub mod stats;

pub use calculator::CalculatorConfig;
pub use calculator::CorrelationCalculator;
pub use calculator::CorrelationResult;
pub use clock::Clock;
pub use clock::FixedClock;
pub use clock::SystemClock;
pub use data::MemoryFetcher;
pub use data::PriceFetcher;
pub use data::PriceSeries;
#[cfg(feature = "yahoo")]
pub use data::YahooFetcher;
pub use error::CalculationError;
pub use error::CalculationErrorKind;
pub use error::FetchError;
