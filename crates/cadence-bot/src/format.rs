//! Presentation helpers: community slugs, slot display names, thread content.

use cadence_recur::day_name;
use chrono::Weekday;

/// Slug a community display name for use as a scope key: spaces become `-`,
/// everything lowercased. Applied once at the adapter boundary so every
/// store comparison is exact.
pub fn community_slug(name: &str) -> String {
  name.trim().replace(' ', "-").to_lowercase()
}

/// Display name for one occurrence slot.
pub fn slot_name(weekday: Weekday) -> String {
  format!("{} Async Daily", day_name(weekday))
}

/// Render a time of day for confirmations and listings, e.g. `9:00`, `9:30`.
pub fn clock(hour: u8, minute: u8) -> String {
  format!("{hour}:{minute:02}")
}

/// Assemble the thread body copied onto each slot from the optional context
/// text and role reference.
pub fn thread_content(
  context: Option<&str>,
  role: Option<&str>,
) -> Option<String> {
  match (context, role) {
    (None, None) => None,
    (Some(c), None) => Some(c.to_string()),
    (None, Some(r)) => Some(r.to_string()),
    (Some(c), Some(r)) => Some(format!("{c}\n\n{r}")),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn slug_lowercases_and_dashes() {
    assert_eq!(community_slug("Acme Corp HQ"), "acme-corp-hq");
    assert_eq!(community_slug("  spaced  "), "spaced");
  }

  #[test]
  fn slot_names_carry_the_weekday() {
    assert_eq!(slot_name(Weekday::Mon), "Monday Async Daily");
  }

  #[test]
  fn clock_zero_pads_minutes() {
    assert_eq!(clock(9, 0), "9:00");
    assert_eq!(clock(9, 30), "9:30");
    assert_eq!(clock(14, 5), "14:05");
  }

  #[test]
  fn thread_content_combines_what_is_present() {
    assert_eq!(thread_content(None, None), None);
    assert_eq!(thread_content(Some("notes"), None).as_deref(), Some("notes"));
    assert_eq!(
      thread_content(Some("notes"), Some("@team")).as_deref(),
      Some("notes\n\n@team")
    );
  }
}
