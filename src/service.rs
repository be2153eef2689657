//! # Analysis Service
//!
//! Request/response surface over [`CorrelationCalculator`]: validates the
//! request, runs the calculation and persists the outcome. Transport-agnostic;
//! responses carry an HTTP status code and a JSON body.

pub mod request;
pub mod store;

use serde_json::json;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

pub use request::AnalysisRequest;
pub use request::FieldError;
pub use store::AnalysisStore;
pub use store::CorrelationAnalysis;
pub use store::MemoryStore;
pub use store::StoreError;

use crate::calculator::CorrelationCalculator;
use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::data::PriceFetcher;
use crate::error::CalculationError;

/// Runtime configuration for [`AnalysisService`].
#[derive(Clone, Debug)]
pub struct ServiceConfig {
  /// Longest accepted ticker symbol, in characters.
  pub max_ticker_len: usize,
}

impl Default for ServiceConfig {
  fn default() -> Self {
    Self {
      max_ticker_len: store::TICKER_COLUMN_LEN,
    }
  }
}

/// Why a submitted analysis produced no record.
#[derive(Debug, Error)]
pub enum ServiceError {
  #[error("JSON parse error - {0}")]
  Malformed(String),

  #[error("invalid request: {}", summarize(.0))]
  Validation(Vec<FieldError>),

  #[error(transparent)]
  Calculation(#[from] CalculationError),

  #[error("An unexpected error occurred: {0}")]
  Storage(#[from] StoreError),

  #[error("An unexpected error occurred: {0}")]
  Encoding(#[from] serde_json::Error),
}

fn summarize(errors: &[FieldError]) -> String {
  errors
    .iter()
    .map(|e| format!("{}: {}", e.field, e.message))
    .collect::<Vec<_>>()
    .join("; ")
}

impl ServiceError {
  pub fn status_code(&self) -> u16 {
    match self {
      Self::Malformed(_) | Self::Validation(_) | Self::Calculation(_) => 400,
      Self::Storage(_) | Self::Encoding(_) => 500,
    }
  }

  /// JSON body reported to the caller.
  pub fn body(&self) -> Value {
    match self {
      Self::Malformed(_) => json!({ "detail": self.to_string() }),
      Self::Validation(errors) => {
        let mut fields = serde_json::Map::new();
        for error in errors {
          let messages = fields
            .entry(error.field)
            .or_insert_with(|| Value::Array(Vec::new()));
          if let Value::Array(list) = messages {
            list.push(Value::String(error.message.clone()));
          }
        }
        Value::Object(fields)
      }
      Self::Calculation(_) | Self::Storage(_) | Self::Encoding(_) => {
        json!({ "error": self.to_string() })
      }
    }
  }
}

/// Status code and JSON body of a handled request.
#[derive(Clone, Debug, PartialEq)]
pub struct Response {
  pub status: u16,
  pub body: Value,
}

impl From<ServiceError> for Response {
  fn from(err: ServiceError) -> Self {
    Self {
      status: err.status_code(),
      body: err.body(),
    }
  }
}

/// Validates, calculates and persists correlation analyses.
pub struct AnalysisService<F, S, C = SystemClock> {
  calculator: CorrelationCalculator<F, C>,
  store: S,
  config: ServiceConfig,
}

impl<F, S, C> AnalysisService<F, S, C>
where
  F: PriceFetcher,
  S: AnalysisStore,
  C: Clock,
{
  pub fn new(calculator: CorrelationCalculator<F, C>, store: S) -> Self {
    Self {
      calculator,
      store,
      config: ServiceConfig::default(),
    }
  }

  pub fn with_config(mut self, config: ServiceConfig) -> Self {
    self.config = config;
    self
  }

  pub fn calculator(&self) -> &CorrelationCalculator<F, C> {
    &self.calculator
  }

  pub fn store(&self) -> &S {
    &self.store
  }

  /// Run and persist one analysis.
  pub fn submit(&self, request: &AnalysisRequest) -> Result<CorrelationAnalysis, ServiceError> {
    let request = request.validate(&self.config).map_err(|errors| {
      warn!(errors = %summarize(&errors), "rejected analysis request");
      ServiceError::Validation(errors)
    })?;

    let result = self.calculator.calculate(
      &request.ticker1,
      &request.ticker2,
      request.start(),
      request.end(),
    )?;

    Ok(self.store.insert(result)?)
  }

  /// Handle a JSON request body, answering 201 with the stored record on success.
  pub fn handle_json(&self, body: &str) -> Response {
    let outcome = serde_json::from_str::<AnalysisRequest>(body)
      .map_err(|err| ServiceError::Malformed(err.to_string()))
      .and_then(|request| self.submit(&request))
      .and_then(|record| Ok(serde_json::to_value(&record)?));

    match outcome {
      Ok(body) => Response { status: 201, body },
      Err(err) => err.into(),
    }
  }
}
