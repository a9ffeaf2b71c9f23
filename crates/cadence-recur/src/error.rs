//! Error types for the cadence-recur resolver.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  #[error("recurrence description and time of day must both be non-empty")]
  EmptyInput,

  #[error("unrecognized recurrence pattern: {0:?}")]
  InvalidRecurrence(String),

  #[error("invalid time of day: {0:?}")]
  InvalidTime(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
