//! # Clock
//!
//! Source of "now" for date defaulting and record timestamps.

use chrono::DateTime;
use chrono::Local;
use chrono::NaiveDateTime;
use chrono::Utc;

/// Reads the current wall-clock time.
pub trait Clock {
  fn now(&self) -> NaiveDateTime;

  /// Current instant in UTC. Naive readings are taken to be UTC.
  fn now_utc(&self) -> DateTime<Utc> {
    self.now().and_utc()
  }
}

/// Local wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> NaiveDateTime {
    Local::now().naive_local()
  }

  fn now_utc(&self) -> DateTime<Utc> {
    Utc::now()
  }
}

/// Clock frozen at a single instant.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
  fn now(&self) -> NaiveDateTime {
    self.0
  }
}

impl<C: Clock + ?Sized> Clock for &C {
  fn now(&self) -> NaiveDateTime {
    (**self).now()
  }

  fn now_utc(&self) -> DateTime<Utc> {
    (**self).now_utc()
  }
}
