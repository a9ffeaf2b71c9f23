//! Command layer for Cadence.
//!
//! Exposes the routine lifecycle handlers (create, list, delete, update)
//! generic over any [`cadence_core::store::RoutineStore`], plus a thin axum
//! [`Router`] that adapts JSON command invocations onto them. Transport and
//! platform concerns stay out here — the handlers consume typed requests and
//! produce exactly one [`commands::Reply`] each.

pub mod commands;
pub mod format;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Json, Router,
  extract::State,
  http::StatusCode,
  response::{IntoResponse, Response},
  routing::post,
};
use cadence_core::store::RoutineStore;
use serde::Deserialize;

use commands::{CreateRequest, DeleteRequest, ListRequest, UpdateRequest};

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised command router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn command_router<S>(store: Arc<S>) -> Router<()>
where
  S: RoutineStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .route("/commands/routine/create", post(create_route::<S>))
    .route("/commands/routine/list", post(list_route::<S>))
    .route("/commands/routine/delete", post(delete_route::<S>))
    .route("/commands/routine/update", post(update_route::<S>))
    .with_state(store)
}

// ─── Route adapters ──────────────────────────────────────────────────────────

/// `POST /commands/routine/create`
///
/// Responds `204 No Content` on the silent no-op path (missing response
/// locator), `200` with the reply otherwise.
async fn create_route<S>(
  State(store): State<Arc<S>>,
  Json(req): Json<CreateRequest>,
) -> Response
where
  S: RoutineStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  match commands::create(store.as_ref(), req).await {
    Some(reply) => Json(reply).into_response(),
    None => StatusCode::NO_CONTENT.into_response(),
  }
}

/// `POST /commands/routine/list`
async fn list_route<S>(
  State(store): State<Arc<S>>,
  Json(req): Json<ListRequest>,
) -> Response
where
  S: RoutineStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Json(commands::list(store.as_ref(), req).await).into_response()
}

/// `POST /commands/routine/delete`
async fn delete_route<S>(
  State(store): State<Arc<S>>,
  Json(req): Json<DeleteRequest>,
) -> Response
where
  S: RoutineStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Json(commands::delete(store.as_ref(), req).await).into_response()
}

/// `POST /commands/routine/update`
async fn update_route<S>(
  State(store): State<Arc<S>>,
  Json(req): Json<UpdateRequest>,
) -> Response
where
  S: RoutineStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Json(commands::update(store.as_ref(), req).await).into_response()
}
