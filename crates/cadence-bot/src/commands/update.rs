//! Update handler — apply a partial-field patch to an existing routine.
//!
//! Slots materialised at creation are left as they are; an update changes
//! the routine definition only.

use cadence_core::{routine::RoutineUpdate, store::RoutineStore};

use super::{Reply, UpdateRequest, community_context, non_empty, parse_routine_id};

pub async fn update<S>(store: &S, req: UpdateRequest) -> Reply
where
  S: RoutineStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let (scope, _) = match community_context(&req.invocation) {
    Ok(v) => v,
    Err(reply) => return reply,
  };

  let routine_id = match parse_routine_id(&req.routine_id) {
    Ok(id) => id,
    Err(reply) => return reply,
  };

  // Validate supplied fields before the store is touched.
  let mut patch = RoutineUpdate::default();

  if let Some(recurrence) = non_empty(req.recurrence) {
    if let Err(e) = cadence_recur::weekdays(&recurrence) {
      return Reply::ephemeral(format!("Error updating routine: {e}"));
    }
    patch.recurrence = Some(recurrence);
  }
  if let Some(time) = non_empty(req.time) {
    match cadence_recur::parse_time(&time) {
      Ok((hour, minute)) => {
        patch.hour = Some(hour);
        patch.minute = Some(minute);
      }
      Err(e) => {
        return Reply::ephemeral(format!("Error updating routine: {e}"));
      }
    }
  }
  if let Some(timezone) = non_empty(req.timezone) {
    patch.timezone = Some(cadence_recur::normalize_zone(&timezone));
  }
  patch.role = non_empty(req.role);
  patch.context = non_empty(req.context);
  patch.scheduler = Some(req.invocation.caller_id.clone());

  match store.update_routine(scope, routine_id, patch).await {
    Ok(modified) if modified > 0 => {
      Reply::ephemeral("Routine updated successfully.")
    }
    Ok(_) => Reply::ephemeral(format!(
      "No routines found with ID {routine_id} or no update needed."
    )),
    Err(e) => {
      tracing::error!(error = %e, routine_id, "failed to update routine");
      Reply::ephemeral(format!("Error updating routine: {e}"))
    }
  }
}
