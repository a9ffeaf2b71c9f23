//! The `RoutineStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `cadence-store-sqlite`). Higher layers (`cadence-bot`) depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  routine::{NewRoutine, Routine, RoutineUpdate},
  scope::Scope,
  slot::{NewRoutineSlot, RoutineSlot},
};

/// Abstraction over a Cadence routine store backend.
///
/// Every operation is scoped to a `(community, channel)` pair; routines in
/// one channel are invisible to operations issued against another. Each
/// logical operation owns its connection access for its full duration — the
/// backend guarantees release on every exit path.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait RoutineStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new routine, assigning a fresh `routine_id` unique within
  /// the scope and a creation timestamp.
  fn save_routine(
    &self,
    input: NewRoutine,
  ) -> impl Future<Output = Result<Routine, Self::Error>> + Send + '_;

  /// Persist one occurrence slot for an existing routine.
  ///
  /// Fails when `input.routine_id` does not reference a routine in the same
  /// scope — slots are never allowed to exist without a parent.
  fn save_slot(
    &self,
    input: NewRoutineSlot,
  ) -> impl Future<Output = Result<RoutineSlot, Self::Error>> + Send + '_;

  /// All routines in the scope, in insertion order. An empty channel yields
  /// an empty `Vec`, not an error.
  fn routines_by_channel(
    &self,
    scope: Scope,
  ) -> impl Future<Output = Result<Vec<Routine>, Self::Error>> + Send + '_;

  /// All slots belonging to one routine in the scope, in chronological
  /// order.
  fn slots_by_routine(
    &self,
    scope: Scope,
    routine_id: i64,
  ) -> impl Future<Output = Result<Vec<RoutineSlot>, Self::Error>> + Send + '_;

  /// Remove a routine. Returns `true` iff a matching routine existed and
  /// was removed; `false` signals "not found" and is not an error.
  ///
  /// Already-materialised slots are left in place — they carry copies of
  /// everything they need and are managed independently.
  fn delete_routine(
    &self,
    scope: Scope,
    routine_id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Apply a partial-field patch to a routine. Only `Some` fields are
  /// written. Returns the number of routines actually modified — `0` means
  /// "not found or no-op" (every supplied value already matched), while a
  /// returned error means a persistence fault.
  fn update_routine(
    &self,
    scope: Scope,
    routine_id: i64,
    patch: RoutineUpdate,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;
}
