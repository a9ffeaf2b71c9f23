//! List handler — render every routine in the invoking channel with its
//! upcoming-slot count.

use cadence_core::store::RoutineStore;

use super::{ListRequest, Reply, community_context};
use crate::format;

pub async fn list<S>(store: &S, req: ListRequest) -> Reply
where
  S: RoutineStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let (scope, _) = match community_context(&req.invocation) {
    Ok(v) => v,
    Err(reply) => return reply,
  };

  let routines = match store.routines_by_channel(scope.clone()).await {
    Ok(r) => r,
    Err(e) => {
      tracing::error!(error = %e, "failed to list routines");
      return Reply::ephemeral(format!("An error occurred: {e}"));
    }
  };

  if routines.is_empty() {
    return Reply::ephemeral("No routine found in this channel.");
  }

  let mut lines = Vec::with_capacity(routines.len());
  for routine in &routines {
    let slots = match store
      .slots_by_routine(scope.clone(), routine.routine_id)
      .await
    {
      Ok(s) => s,
      Err(e) => {
        tracing::error!(error = %e, "failed to read slots");
        return Reply::ephemeral(format!("An error occurred: {e}"));
      }
    };
    let summary = cadence_recur::describe(&routine.recurrence)
      .unwrap_or_else(|_| routine.recurrence.clone());
    lines.push(format!(
      "ID {}: {} at {} {} ({} upcoming)",
      routine.routine_id,
      summary,
      format::clock(routine.hour, routine.minute),
      routine.timezone,
      slots.len(),
    ));
  }

  Reply::ephemeral(lines.join("\n"))
}
