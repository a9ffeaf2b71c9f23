//! Routine — a user-defined recurring activity scoped to a community+channel.
//!
//! A routine is mutable in place: an update replaces only the supplied
//! fields. Its occurrence slots are materialised once at creation and are
//! never regenerated by an update (see [`crate::slot`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scope::Scope;

/// A persisted routine definition.
///
/// `routine_id` is store-assigned and unique within the scope. `timezone` is
/// an IANA zone name; callers upstream guarantee it resolved to a valid zone
/// (falling back to `"UTC"`) before the routine was saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Routine {
  pub routine_id: i64,
  #[serde(flatten)]
  pub scope:      Scope,
  /// Free-text recurrence description, e.g. `"weekdays"` or `"MWF"`.
  pub recurrence: String,
  /// Hour of day, 0–23, in `timezone`.
  pub hour:       u8,
  /// Minute past the hour, 0–59.
  pub minute:     u8,
  pub timezone:   String,
  pub role:       Option<String>,
  pub context:    Option<String>,
  /// Identity of the member who created (or last rescheduled) the routine.
  pub scheduler:  String,
  /// Store-assigned; never changes after creation.
  pub created_at: DateTime<Utc>,
}

/// Input to [`crate::store::RoutineStore::save_routine`].
/// `routine_id` and `created_at` are always assigned by the store.
#[derive(Debug, Clone)]
pub struct NewRoutine {
  pub scope:      Scope,
  pub recurrence: String,
  pub hour:       u8,
  pub minute:     u8,
  pub timezone:   String,
  pub role:       Option<String>,
  pub context:    Option<String>,
  pub scheduler:  String,
}

/// Partial-field patch for [`crate::store::RoutineStore::update_routine`].
/// Only `Some` fields overwrite the stored values.
#[derive(Debug, Clone, Default)]
pub struct RoutineUpdate {
  pub recurrence: Option<String>,
  pub hour:       Option<u8>,
  pub minute:     Option<u8>,
  pub timezone:   Option<String>,
  pub role:       Option<String>,
  pub context:    Option<String>,
  pub scheduler:  Option<String>,
}

impl RoutineUpdate {
  /// `true` when the patch carries no fields at all.
  pub fn is_empty(&self) -> bool {
    self.recurrence.is_none()
      && self.hour.is_none()
      && self.minute.is_none()
      && self.timezone.is_none()
      && self.role.is_none()
      && self.context.is_none()
      && self.scheduler.is_none()
  }
}
