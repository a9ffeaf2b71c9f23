//! Routine lifecycle handlers.
//!
//! | Handler | States |
//! |---------|--------|
//! | [`create`] | Validating → Resolving → Persisting → Completed/Failed |
//! | [`list`]   | Validating → Querying → Completed/Failed |
//! | [`delete`] | Validating → Deleting → Completed/Failed |
//! | [`update`] | Validating → Updating → Completed/Failed |
//!
//! Each invocation is an independent unit of work and funnels its terminal
//! state into exactly one [`Reply`]. Every failure is caught here and
//! converted to a user-facing message; nothing propagates past this module.

mod create;
mod delete;
mod list;
mod update;

pub use create::create;
pub use delete::delete;
pub use list::list;
pub use update::update;

use cadence_core::scope::Scope;
use serde::{Deserialize, Serialize};

use crate::format;

// ─── Inbound types ───────────────────────────────────────────────────────────

/// The community a command was invoked from, as the platform delivered it.
#[derive(Debug, Clone, Deserialize)]
pub struct CommunityRef {
  pub id:   String,
  pub name: String,
}

/// Fields common to every command invocation. `community` is `None` for a
/// direct message, which every handler rejects.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandContext {
  pub community:  Option<CommunityRef>,
  pub channel_id: String,
  pub caller_id:  String,
}

#[derive(Debug, Deserialize)]
pub struct CreateRequest {
  pub invocation:   CommandContext,
  /// Locator for the reply message/thread the platform created before
  /// dispatch. Absent means the invocation is a no-op.
  pub response_url: Option<String>,
  /// The recurrence description; the platform names this option `routine`.
  #[serde(rename = "routine")]
  pub recurrence:   Option<String>,
  pub time:         Option<String>,
  pub timezone:     Option<String>,
  pub role:         Option<String>,
  pub context:      Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListRequest {
  pub invocation: CommandContext,
}

#[derive(Debug, Deserialize)]
pub struct DeleteRequest {
  pub invocation: CommandContext,
  /// Numeric string; validated before any store access.
  pub routine_id: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
  pub invocation: CommandContext,
  pub routine_id: String,
  #[serde(rename = "routine")]
  pub recurrence: Option<String>,
  pub time:       Option<String>,
  pub timezone:   Option<String>,
  pub role:       Option<String>,
  pub context:    Option<String>,
}

// ─── Outbound type ───────────────────────────────────────────────────────────

/// The single reply produced per invocation, always private to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
  pub content:   String,
  pub ephemeral: bool,
}

impl Reply {
  pub fn ephemeral(content: impl Into<String>) -> Self {
    Self {
      content:   content.into(),
      ephemeral: true,
    }
  }
}

// ─── Shared validation ───────────────────────────────────────────────────────

/// Resolve the invocation's scope, rejecting direct messages.
fn community_context(
  ctx: &CommandContext,
) -> Result<(Scope, CommunityRef), Reply> {
  match &ctx.community {
    Some(community) => {
      let scope = Scope::new(
        format::community_slug(&community.name),
        ctx.channel_id.clone(),
      );
      Ok((scope, community.clone()))
    }
    None => Err(Reply::ephemeral(
      "This command can't be used in direct messages.",
    )),
  }
}

/// Validate a caller-supplied routine id. A non-numeric id gets its own
/// message rather than being folded into "not found".
fn parse_routine_id(raw: &str) -> Result<i64, Reply> {
  raw.trim().parse().map_err(|_| {
    Reply::ephemeral(format!("Routine IDs are numeric; {raw:?} is not one."))
  })
}

/// Treat blank option values the same as absent ones.
fn non_empty(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.trim().is_empty())
}
