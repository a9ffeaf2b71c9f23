//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, slot UUIDs as hyphenated
//! lowercase strings, and the opaque request origin as compact JSON.

use cadence_core::{
  routine::Routine,
  scope::Scope,
  slot::{RequestOrigin, RoutineSlot, SlotDate},
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── RequestOrigin ───────────────────────────────────────────────────────────

pub fn encode_origin(origin: &RequestOrigin) -> Result<String> {
  Ok(serde_json::to_string(origin)?)
}

pub fn decode_origin(s: &str) -> Result<RequestOrigin> {
  Ok(serde_json::from_str(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `routines` row.
pub struct RawRoutine {
  pub routine_id: i64,
  pub community:  String,
  pub channel:    String,
  pub recurrence: String,
  pub hour:       i64,
  pub minute:     i64,
  pub timezone:   String,
  pub role:       Option<String>,
  pub context:    Option<String>,
  pub scheduler:  String,
  pub created_at: String,
}

impl RawRoutine {
  pub fn into_routine(self) -> Result<Routine> {
    Ok(Routine {
      routine_id: self.routine_id,
      scope:      Scope::new(self.community, self.channel),
      recurrence: self.recurrence,
      hour:       self.hour as u8,
      minute:     self.minute as u8,
      timezone:   self.timezone,
      role:       self.role,
      context:    self.context,
      scheduler:  self.scheduler,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

/// Raw values read directly from a `routine_slots` row.
pub struct RawSlot {
  pub slot_id:        String,
  pub routine_id:     i64,
  pub community:      String,
  pub channel:        String,
  pub name:           String,
  pub day:            i64,
  pub year:           i64,
  pub hour:           i64,
  pub minute:         i64,
  pub role:           Option<String>,
  pub scheduler:      String,
  pub thread_content: Option<String>,
  pub origin:         String,
}

impl RawSlot {
  pub fn into_slot(self) -> Result<RoutineSlot> {
    Ok(RoutineSlot {
      slot_id:        decode_uuid(&self.slot_id)?,
      routine_id:     self.routine_id,
      scope:          Scope::new(self.community, self.channel),
      name:           self.name,
      date:           SlotDate {
        day:    self.day as u32,
        year:   self.year as i32,
        hour:   self.hour as u8,
        minute: self.minute as u8,
      },
      role:           self.role,
      scheduler:      self.scheduler,
      thread_content: self.thread_content,
      origin:         decode_origin(&self.origin)?,
    })
  }
}
