//! Error type for `cadence-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// Attempted to save a slot for a routine that does not exist in scope.
  #[error("slot references routine {0}, which does not exist in this scope")]
  OrphanSlot(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
