use anyhow::Context;
use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use correlation_rs::service::AnalysisRequest;
use correlation_rs::service::AnalysisService;
use correlation_rs::service::MemoryStore;
use correlation_rs::CalculatorConfig;
use correlation_rs::CorrelationCalculator;
use correlation_rs::YahooFetcher;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Correlation and covariance of two tickers' daily returns")]
struct Args {
  /// First ticker symbol
  ticker1: String,

  /// Second ticker symbol
  ticker2: String,

  /// Start of the range (YYYY-MM-DD); defaults to end minus the lookback
  #[arg(long)]
  start: Option<NaiveDate>,

  /// End of the range (YYYY-MM-DD); defaults to now
  #[arg(long)]
  end: Option<NaiveDate>,

  /// Days of history used when no start date is given
  #[arg(long, default_value = "365", value_parser = clap::value_parser!(i64).range(1..=36_500))]
  lookback_days: i64,
}

fn main() -> Result<()> {
  init_logging();
  let args = Args::parse();

  let fetcher = YahooFetcher::new().context("failed to build Yahoo Finance connector")?;
  let calculator = CorrelationCalculator::new(fetcher).with_config(CalculatorConfig {
    lookback_days: args.lookback_days,
    ..CalculatorConfig::default()
  });
  let service = AnalysisService::new(calculator, MemoryStore::new());

  let request = AnalysisRequest {
    ticker1: args.ticker1,
    ticker2: args.ticker2,
    start_date: args.start,
    end_date: args.end,
  };
  info!(ticker1 = %request.ticker1, ticker2 = %request.ticker2, "running correlation analysis");

  match service.submit(&request) {
    Ok(record) => {
      println!("{}", serde_json::to_string_pretty(&record)?);
      Ok(())
    }
    Err(err) => {
      let status = err.status_code();
      println!("{}", serde_json::to_string_pretty(&err.body())?);
      Err(err).with_context(|| {
        format!(
          "analysis of {} vs {} failed with status {status}",
          request.ticker1, request.ticker2
        )
      })
    }
  }
}

fn init_logging() {
  tracing_subscriber::fmt()
    .with_env_filter(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
    )
    .with_writer(std::io::stderr)
    .init();
}
