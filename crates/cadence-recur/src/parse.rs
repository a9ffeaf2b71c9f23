//! Recurrence-description and time-of-day parsers.
//!
//! Pipeline:
//!   raw &str
//!     └─ parse_days()  → ordered weekday set (Mon → Sun)
//!     └─ parse_time()  → (hour, minute)

use chrono::Weekday;

use crate::error::{Error, Result};

/// All weekdays in Mon → Sun order; the canonical output ordering.
const WEEK: [Weekday; 7] = [
  Weekday::Mon,
  Weekday::Tue,
  Weekday::Wed,
  Weekday::Thu,
  Weekday::Fri,
  Weekday::Sat,
  Weekday::Sun,
];

// ─── Day-set parser ──────────────────────────────────────────────────────────

/// Parse a recurrence description into its weekday set, deduplicated and in
/// Mon → Sun order.
///
/// Recognised forms (case-insensitive):
/// - `daily` / `everyday` / `every day` — all seven days
/// - `weekday[s]` — Mon–Fri; `weekend[s]` — Sat–Sun
/// - full or abbreviated day names, separated by whitespace, commas, or
///   slashes: `monday`, `mon`, `tues`, `wed, fri`, …
/// - compact letter runs with digraphs: `MWF`, `TTh`, `MTWThF`
pub fn parse_days(description: &str) -> Result<Vec<Weekday>> {
  let normalized = description.trim().to_lowercase();
  if normalized.is_empty() {
    return Err(Error::EmptyInput);
  }

  let mut set = [false; 7];

  // Whole-string forms first, so "every day" survives tokenisation.
  if matches!(normalized.as_str(), "daily" | "everyday" | "every day") {
    set = [true; 7];
  } else {
    for token in normalized.split([' ', '\t', ',', '/']) {
      if token.is_empty() {
        continue;
      }
      match token_days(token) {
        Some(days) => {
          for d in days {
            set[d.num_days_from_monday() as usize] = true;
          }
        }
        None => {
          return Err(Error::InvalidRecurrence(description.to_string()));
        }
      }
    }
  }

  let days: Vec<Weekday> = WEEK
    .iter()
    .copied()
    .filter(|d| set[d.num_days_from_monday() as usize])
    .collect();

  if days.is_empty() {
    return Err(Error::InvalidRecurrence(description.to_string()));
  }
  Ok(days)
}

/// The weekday set named by a single lowercase token, or `None` if the token
/// is unrecognisable.
fn token_days(token: &str) -> Option<Vec<Weekday>> {
  let days = match token {
    "daily" | "everyday" => WEEK.to_vec(),
    "weekday" | "weekdays" => WEEK[..5].to_vec(),
    "weekend" | "weekends" => WEEK[5..].to_vec(),
    "monday" | "mon" => vec![Weekday::Mon],
    "tuesday" | "tues" | "tue" => vec![Weekday::Tue],
    "wednesday" | "wed" => vec![Weekday::Wed],
    "thursday" | "thurs" | "thur" | "thu" => vec![Weekday::Thu],
    "friday" | "fri" => vec![Weekday::Fri],
    "saturday" | "sat" => vec![Weekday::Sat],
    "sunday" | "sun" => vec![Weekday::Sun],
    _ => return compact_days(token),
  };
  Some(days)
}

/// Scan a compact letter run like `mwf` or `tth`. Digraphs are consumed
/// before single letters so `th` is Thursday, not Tuesday + something.
fn compact_days(token: &str) -> Option<Vec<Weekday>> {
  let mut days = Vec::new();
  let mut rest = token;

  while !rest.is_empty() {
    let (day, len) = if rest.starts_with("th") {
      (Weekday::Thu, 2)
    } else if rest.starts_with("tu") {
      (Weekday::Tue, 2)
    } else if rest.starts_with("sa") {
      (Weekday::Sat, 2)
    } else if rest.starts_with("su") {
      (Weekday::Sun, 2)
    } else {
      let day = match rest.as_bytes()[0] {
        b'm' => Weekday::Mon,
        b't' => Weekday::Tue,
        b'w' => Weekday::Wed,
        b'r' => Weekday::Thu,
        b'f' => Weekday::Fri,
        b's' => Weekday::Sat,
        b'u' => Weekday::Sun,
        _ => return None,
      };
      (day, 1)
    };
    days.push(day);
    rest = &rest[len..];
  }

  Some(days)
}

// ─── Time-of-day parser ──────────────────────────────────────────────────────

/// Parse a time-of-day string: `"9"`, `"09"`, or `"9:30"`.
pub fn parse_time(time_of_day: &str) -> Result<(u8, u8)> {
  let trimmed = time_of_day.trim();
  if trimmed.is_empty() {
    return Err(Error::EmptyInput);
  }

  let invalid = || Error::InvalidTime(time_of_day.to_string());

  let (hour_str, minute_str) = match trimmed.split_once(':') {
    Some((h, m)) => (h, m),
    None => (trimmed, "0"),
  };

  let hour: u8 = hour_str.parse().map_err(|_| invalid())?;
  let minute: u8 = minute_str.parse().map_err(|_| invalid())?;
  if hour > 23 || minute > 59 {
    return Err(invalid());
  }
  Ok((hour, minute))
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn daily_covers_all_seven_days() {
    for input in ["daily", "everyday", "every day", "DAILY"] {
      assert_eq!(parse_days(input).unwrap(), WEEK.to_vec(), "{input}");
    }
  }

  #[test]
  fn weekdays_and_weekends() {
    assert_eq!(parse_days("weekdays").unwrap(), WEEK[..5].to_vec());
    assert_eq!(
      parse_days("weekend").unwrap(),
      vec![Weekday::Sat, Weekday::Sun]
    );
  }

  #[test]
  fn named_days_with_separators() {
    assert_eq!(
      parse_days("mon, wed / friday").unwrap(),
      vec![Weekday::Mon, Weekday::Wed, Weekday::Fri]
    );
  }

  #[test]
  fn compact_mwf() {
    assert_eq!(
      parse_days("MWF").unwrap(),
      vec![Weekday::Mon, Weekday::Wed, Weekday::Fri]
    );
  }

  #[test]
  fn compact_digraphs_win_over_single_letters() {
    assert_eq!(
      parse_days("TTh").unwrap(),
      vec![Weekday::Tue, Weekday::Thu]
    );
    assert_eq!(
      parse_days("MTWThF").unwrap(),
      WEEK[..5].to_vec()
    );
  }

  #[test]
  fn duplicates_collapse() {
    assert_eq!(
      parse_days("mon monday m").unwrap(),
      vec![Weekday::Mon]
    );
  }

  #[test]
  fn unknown_pattern_is_rejected() {
    assert!(matches!(
      parse_days("not-a-real-pattern"),
      Err(Error::InvalidRecurrence(_))
    ));
    assert!(matches!(
      parse_days("mon xyz"),
      Err(Error::InvalidRecurrence(_))
    ));
  }

  #[test]
  fn empty_description_is_rejected() {
    assert_eq!(parse_days("   "), Err(Error::EmptyInput));
  }

  #[test]
  fn time_hour_only() {
    assert_eq!(parse_time("9").unwrap(), (9, 0));
    assert_eq!(parse_time("09").unwrap(), (9, 0));
    assert_eq!(parse_time("23").unwrap(), (23, 0));
  }

  #[test]
  fn time_hour_minute() {
    assert_eq!(parse_time("9:30").unwrap(), (9, 30));
  }

  #[test]
  fn time_out_of_range_is_rejected() {
    assert!(matches!(parse_time("24"), Err(Error::InvalidTime(_))));
    assert!(matches!(parse_time("9:60"), Err(Error::InvalidTime(_))));
    assert!(matches!(parse_time("noon"), Err(Error::InvalidTime(_))));
  }

  #[test]
  fn empty_time_is_rejected() {
    assert_eq!(parse_time(""), Err(Error::EmptyInput));
  }
}
