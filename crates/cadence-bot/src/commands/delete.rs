//! Delete handler — remove a routine by id within the invoking scope.

use cadence_core::store::RoutineStore;

use super::{DeleteRequest, Reply, community_context, parse_routine_id};

pub async fn delete<S>(store: &S, req: DeleteRequest) -> Reply
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

  match store.delete_routine(scope, routine_id).await {
    Ok(true) => Reply::ephemeral(format!(
      "The routine with ID {routine_id} has been deleted."
    )),
    Ok(false) => {
      Reply::ephemeral("No routines found in this channel for this ID.")
    }
    Err(e) => {
      tracing::error!(error = %e, routine_id, "failed to delete routine");
      Reply::ephemeral(format!("An error occurred: {e}"))
    }
  }
}
