//! Integration tests for `SqliteStore` against an in-memory database.

use cadence_core::{
  routine::{NewRoutine, RoutineUpdate},
  scope::Scope,
  slot::{NewRoutineSlot, RequestOrigin, SlotDate},
  store::RoutineStore,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn scope() -> Scope {
  Scope::new("acme-corp", "chan-1")
}

fn new_routine(scope: Scope) -> NewRoutine {
  NewRoutine {
    scope,
    recurrence: "MWF".into(),
    hour: 9,
    minute: 30,
    timezone: "America/New_York".into(),
    role: Some("@standup".into()),
    context: Some("daily sync".into()),
    scheduler: "member-42".into(),
  }
}

fn new_slot(scope: Scope, routine_id: i64) -> NewRoutineSlot {
  NewRoutineSlot {
    routine_id,
    scope,
    name: "Monday Async Daily".into(),
    date: SlotDate { day: 157, year: 2024, hour: 13, minute: 0 },
    role: Some("@standup".into()),
    scheduler: "member-42".into(),
    thread_content: Some("daily sync".into()),
    origin: RequestOrigin {
      guild:      "Acme Corp".into(),
      server_id:  "g-1".into(),
      channel_id: "chan-1".into(),
      message:    "https://chat.example/m/123".into(),
    },
  }
}

// ─── Routines ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn save_and_list_routine() {
  let s = store().await;

  let routine = s.save_routine(new_routine(scope())).await.unwrap();
  assert_eq!(routine.scope, scope());
  assert_eq!(routine.recurrence, "MWF");
  assert_eq!(routine.hour, 9);

  let listed = s.routines_by_channel(scope()).await.unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].routine_id, routine.routine_id);
  assert_eq!(listed[0].minute, 30);
  assert_eq!(listed[0].timezone, "America/New_York");
  assert_eq!(listed[0].role.as_deref(), Some("@standup"));
  assert_eq!(listed[0].created_at, routine.created_at);
}

#[tokio::test]
async fn routine_ids_are_fresh_and_listing_is_insertion_ordered() {
  let s = store().await;

  let a = s.save_routine(new_routine(scope())).await.unwrap();
  let b = s.save_routine(new_routine(scope())).await.unwrap();
  let c = s.save_routine(new_routine(scope())).await.unwrap();
  assert!(a.routine_id < b.routine_id && b.routine_id < c.routine_id);

  let listed = s.routines_by_channel(scope()).await.unwrap();
  let ids: Vec<i64> = listed.iter().map(|r| r.routine_id).collect();
  assert_eq!(ids, vec![a.routine_id, b.routine_id, c.routine_id]);
}

#[tokio::test]
async fn empty_channel_lists_nothing() {
  let s = store().await;
  assert!(s.routines_by_channel(scope()).await.unwrap().is_empty());
}

#[tokio::test]
async fn scope_isolation_between_channels() {
  let s = store().await;
  let other = Scope::new("acme-corp", "chan-2");

  let routine = s.save_routine(new_routine(scope())).await.unwrap();

  assert!(s.routines_by_channel(other.clone()).await.unwrap().is_empty());
  assert!(
    !s.delete_routine(other.clone(), routine.routine_id)
      .await
      .unwrap()
  );
  let modified = s
    .update_routine(other, routine.routine_id, RoutineUpdate {
      hour: Some(10),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(modified, 0);

  // The routine is untouched in its own scope.
  let listed = s.routines_by_channel(scope()).await.unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].hour, 9);
}

// ─── Slots ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn save_slot_and_read_back() {
  let s = store().await;
  let routine = s.save_routine(new_routine(scope())).await.unwrap();

  let slot = s
    .save_slot(new_slot(scope(), routine.routine_id))
    .await
    .unwrap();
  assert_eq!(slot.routine_id, routine.routine_id);

  let slots = s
    .slots_by_routine(scope(), routine.routine_id)
    .await
    .unwrap();
  assert_eq!(slots.len(), 1);
  assert_eq!(slots[0].slot_id, slot.slot_id);
  assert_eq!(slots[0].date, SlotDate { day: 157, year: 2024, hour: 13, minute: 0 });
  assert_eq!(slots[0].origin.message, "https://chat.example/m/123");
}

#[tokio::test]
async fn slots_come_back_in_chronological_order() {
  let s = store().await;
  let routine = s.save_routine(new_routine(scope())).await.unwrap();

  for (day, year) in [(160, 2024), (3, 2025), (157, 2024)] {
    let mut input = new_slot(scope(), routine.routine_id);
    input.date = SlotDate { day, year, hour: 13, minute: 0 };
    s.save_slot(input).await.unwrap();
  }

  let slots = s
    .slots_by_routine(scope(), routine.routine_id)
    .await
    .unwrap();
  let dates: Vec<(i32, u32)> =
    slots.iter().map(|sl| (sl.date.year, sl.date.day)).collect();
  assert_eq!(dates, vec![(2024, 157), (2024, 160), (2025, 3)]);
}

#[tokio::test]
async fn orphan_slot_is_rejected() {
  let s = store().await;
  let err = s.save_slot(new_slot(scope(), 999)).await.unwrap_err();
  assert!(matches!(err, crate::Error::OrphanSlot(999)));
}

#[tokio::test]
async fn slot_scope_must_match_parent_scope() {
  let s = store().await;
  let routine = s.save_routine(new_routine(scope())).await.unwrap();

  let err = s
    .save_slot(new_slot(Scope::new("acme-corp", "chan-2"), routine.routine_id))
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::OrphanSlot(_)));
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_then_delete_again() {
  let s = store().await;
  let routine = s.save_routine(new_routine(scope())).await.unwrap();

  assert!(s.delete_routine(scope(), routine.routine_id).await.unwrap());
  assert!(!s.delete_routine(scope(), routine.routine_id).await.unwrap());
}

#[tokio::test]
async fn delete_missing_routine_is_not_an_error() {
  let s = store().await;
  assert!(!s.delete_routine(scope(), 12345).await.unwrap());
}

#[tokio::test]
async fn delete_leaves_materialised_slots_in_place() {
  let s = store().await;
  let routine = s.save_routine(new_routine(scope())).await.unwrap();
  s.save_slot(new_slot(scope(), routine.routine_id))
    .await
    .unwrap();

  assert!(s.delete_routine(scope(), routine.routine_id).await.unwrap());

  let slots = s
    .slots_by_routine(scope(), routine.routine_id)
    .await
    .unwrap();
  assert_eq!(slots.len(), 1);
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_applies_only_supplied_fields() {
  let s = store().await;
  let routine = s.save_routine(new_routine(scope())).await.unwrap();

  let modified = s
    .update_routine(scope(), routine.routine_id, RoutineUpdate {
      hour: Some(14),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(modified, 1);

  let listed = s.routines_by_channel(scope()).await.unwrap();
  assert_eq!(listed[0].hour, 14);
  assert_eq!(listed[0].minute, 30);
  assert_eq!(listed[0].recurrence, "MWF");
  assert_eq!(listed[0].timezone, "America/New_York");
  assert_eq!(listed[0].role.as_deref(), Some("@standup"));
  assert_eq!(listed[0].context.as_deref(), Some("daily sync"));
}

#[tokio::test]
async fn update_with_identical_values_modifies_nothing() {
  let s = store().await;
  let routine = s.save_routine(new_routine(scope())).await.unwrap();

  let modified = s
    .update_routine(scope(), routine.routine_id, RoutineUpdate {
      recurrence: Some("MWF".into()),
      hour:       Some(9),
      minute:     Some(30),
      timezone:   Some("America/New_York".into()),
      role:       Some("@standup".into()),
      context:    Some("daily sync".into()),
      scheduler:  Some("member-42".into()),
    })
    .await
    .unwrap();
  assert_eq!(modified, 0);
}

#[tokio::test]
async fn update_missing_routine_modifies_nothing() {
  let s = store().await;
  let modified = s
    .update_routine(scope(), 777, RoutineUpdate {
      hour: Some(8),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(modified, 0);
}

#[tokio::test]
async fn empty_patch_modifies_nothing() {
  let s = store().await;
  let routine = s.save_routine(new_routine(scope())).await.unwrap();

  let modified = s
    .update_routine(scope(), routine.routine_id, RoutineUpdate::default())
    .await
    .unwrap();
  assert_eq!(modified, 0);
}
