//! Scope — the `(community, channel)` pair under which routine identifiers
//! are unique.
//!
//! The community value is a slug (spaces replaced with `-`, lowercased) so
//! store comparisons are exact. Slugging happens once at the request-adapter
//! boundary; everything below it treats both fields as opaque strings.

use serde::{Deserialize, Serialize};

/// The community + channel pair every store operation is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
  pub community: String,
  pub channel:   String,
}

impl Scope {
  pub fn new(community: impl Into<String>, channel: impl Into<String>) -> Self {
    Self {
      community: community.into(),
      channel:   channel.into(),
    }
  }
}
