//! RoutineSlot — one concrete future occurrence derived from a routine.
//!
//! Slots carry a *copy* of the routine fields they need for independent
//! rendering, not a live reference. Deleting or updating a routine does not
//! touch already-materialised slots.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scope::Scope;

/// A calendar instant, pre-normalised to UTC at generation time so
/// downstream consumers never repeat timezone math.
///
/// `day` is the ordinal day of `year` (1–366).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotDate {
  pub day:    u32,
  pub year:   i32,
  pub hour:   u8,
  pub minute: u8,
}

/// Opaque back-reference to the request that created the slot. Persisted
/// verbatim and never reinterpreted by core logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestOrigin {
  /// Community display name as the platform delivered it.
  pub guild:      String,
  pub server_id:  String,
  pub channel_id: String,
  /// Locator for the triggering message or thread (e.g. a message URL).
  pub message:    String,
}

/// A persisted occurrence slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutineSlot {
  pub slot_id:        Uuid,
  pub routine_id:     i64,
  #[serde(flatten)]
  pub scope:          Scope,
  /// Derived display name, e.g. `"Monday Async Daily"`.
  pub name:           String,
  pub date:           SlotDate,
  pub role:           Option<String>,
  pub scheduler:      String,
  pub thread_content: Option<String>,
  pub origin:         RequestOrigin,
}

/// Input to [`crate::store::RoutineStore::save_slot`].
/// `slot_id` is always assigned by the store.
#[derive(Debug, Clone)]
pub struct NewRoutineSlot {
  pub routine_id:     i64,
  pub scope:          Scope,
  pub name:           String,
  pub date:           SlotDate,
  pub role:           Option<String>,
  pub scheduler:      String,
  pub thread_content: Option<String>,
  pub origin:         RequestOrigin,
}
