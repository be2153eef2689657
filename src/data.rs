//! # Data
//!
//! Price series, the sources they are fetched from, and their alignment.

pub mod align;
pub mod fetcher;
pub mod series;
#[cfg(feature = "yahoo")]
pub mod yahoo;

pub use align::AlignedPrices;
pub use align::ReturnTable;
pub use fetcher::MemoryFetcher;
pub use fetcher::PriceFetcher;
pub use series::PriceSeries;
#[cfg(feature = "yahoo")]
pub use yahoo::YahooFetcher;
