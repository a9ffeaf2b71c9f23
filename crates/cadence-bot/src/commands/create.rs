//! Create handler — resolve a recurrence description into slots and persist
//! the routine with its full slot batch.

use cadence_core::{
  routine::NewRoutine,
  slot::{NewRoutineSlot, RequestOrigin, SlotDate},
  store::RoutineStore,
};

use super::{CreateRequest, Reply, community_context, non_empty};
use crate::format;

/// Returns `None` when the invocation carries no response locator — the
/// whole operation is a silent no-op in that case.
pub async fn create<S>(store: &S, req: CreateRequest) -> Option<Reply>
where
  S: RoutineStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let response_url = non_empty(req.response_url)?;

  let (scope, community) = match community_context(&req.invocation) {
    Ok(v) => v,
    Err(reply) => return Some(reply),
  };

  let (Some(recurrence), Some(time)) =
    (non_empty(req.recurrence), non_empty(req.time))
  else {
    return Some(Reply::ephemeral(
      "Please ensure all required fields are provided.",
    ));
  };

  let timezone =
    cadence_recur::normalize_zone(req.timezone.as_deref().unwrap_or(""));

  let schedule_failed =
    |e: &dyn std::fmt::Display| {
      Reply::ephemeral(format!(
        "There was an issue scheduling your routine. {e}"
      ))
    };

  let (hour, minute) = match cadence_recur::parse_time(&time) {
    Ok(v) => v,
    Err(e) => return Some(schedule_failed(&e)),
  };
  let occurrences =
    match cadence_recur::resolve(&recurrence, &time, &timezone) {
      Ok(o) => o,
      Err(e) => return Some(schedule_failed(&e)),
    };
  let summary = cadence_recur::describe(&recurrence)
    .unwrap_or_else(|_| recurrence.clone());

  let role = non_empty(req.role);
  let context_text = non_empty(req.context);
  let thread_content =
    format::thread_content(context_text.as_deref(), role.as_deref());

  let routine = match store
    .save_routine(NewRoutine {
      scope: scope.clone(),
      recurrence,
      hour,
      minute,
      timezone: timezone.clone(),
      role: role.clone(),
      context: context_text.clone(),
      scheduler: req.invocation.caller_id.clone(),
    })
    .await
  {
    Ok(r) => r,
    Err(e) => {
      tracing::error!(error = %e, "failed to save routine");
      return Some(schedule_failed(&e));
    }
  };

  for occurrence in &occurrences {
    let slot = NewRoutineSlot {
      routine_id:     routine.routine_id,
      scope:          scope.clone(),
      name:           format::slot_name(occurrence.weekday),
      date:           SlotDate {
        day:    occurrence.day,
        year:   occurrence.year,
        hour:   occurrence.hour,
        minute: occurrence.minute,
      },
      role:           role.clone(),
      scheduler:      req.invocation.caller_id.clone(),
      thread_content: thread_content.clone(),
      origin:         RequestOrigin {
        guild:      community.name.clone(),
        server_id:  community.id.clone(),
        channel_id: req.invocation.channel_id.clone(),
        message:    response_url.clone(),
      },
    };

    if let Err(e) = store.save_slot(slot).await {
      tracing::error!(
        error = %e,
        routine_id = routine.routine_id,
        "failed to save slot; removing partially-created routine"
      );
      // Compensating delete: no partial batch stays observable. Best
      // effort — the failure reply stands either way.
      let _ = store.delete_routine(scope.clone(), routine.routine_id).await;
      return Some(schedule_failed(&e));
    }
  }

  Some(Reply::ephemeral(format!(
    "Routine scheduled successfully:\nID: {}\n{} at {} {}",
    routine.routine_id,
    summary,
    format::clock(hour, minute),
    timezone,
  )))
}
