//! Recurrence resolver for Cadence.
//!
//! Turns a free-text recurrence description plus a time-of-day and an IANA
//! timezone into concrete occurrence slots, pre-normalised to UTC. Pure
//! synchronous; no HTTP or database dependencies.
//!
//! # Quick start
//!
//! ```no_run
//! let slots = cadence_recur::resolve("MWF", "9", "America/New_York").unwrap();
//! assert_eq!(slots.len(), 3);
//! ```

pub mod error;
mod parse;

use std::str::FromStr;

use chrono::{
  DateTime, Datelike, Duration, NaiveDate, TimeZone, Timelike, Utc, Weekday,
};
use chrono_tz::Tz;

pub use error::{Error, Result};
pub use parse::{parse_days, parse_time};

// ─── Public types ────────────────────────────────────────────────────────────

/// One concrete future occurrence, in UTC.
///
/// `day` is the ordinal day of `year` (1–366). `weekday` is the weekday of
/// the occurrence *in the requested timezone* — the calendar meaning of the
/// recurrence token — which can differ from the UTC weekday when the
/// normalised instant crosses midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
  pub weekday: Weekday,
  pub day:     u32,
  pub year:    i32,
  pub hour:    u8,
  pub minute:  u8,
}

// ─── Public API ──────────────────────────────────────────────────────────────

/// Resolve a recurrence description into its next occurrence per matched
/// weekday, at `time_of_day` in `timezone`, normalised to UTC.
///
/// `timezone` falls back to UTC when empty or unrecognised. The result is
/// ordered chronologically and is deterministic given the same inputs and
/// wall-clock instant.
pub fn resolve(
  description: &str,
  time_of_day: &str,
  timezone: &str,
) -> Result<Vec<Occurrence>> {
  resolve_at(description, time_of_day, timezone, Utc::now())
}

/// [`resolve`] with an explicit "now" — the seam used by tests.
pub fn resolve_at(
  description: &str,
  time_of_day: &str,
  timezone: &str,
  now: DateTime<Utc>,
) -> Result<Vec<Occurrence>> {
  let days = parse::parse_days(description)?;
  let (hour, minute) = parse::parse_time(time_of_day)?;
  let tz = zone_or_utc(timezone);

  let local_now = now.with_timezone(&tz);

  let mut occurrences: Vec<Occurrence> = days
    .into_iter()
    .map(|weekday| {
      let local_date = next_local_date(local_now.date_naive(), weekday);
      let mut instant = local_instant(tz, local_date, hour, minute);
      // Today only counts while the occurrence time is still ahead.
      if instant <= now {
        instant = local_instant(tz, local_date + Duration::days(7), hour, minute);
      }
      Occurrence {
        weekday,
        day:    instant.ordinal(),
        year:   instant.year(),
        hour:   instant.hour() as u8,
        minute: instant.minute() as u8,
      }
    })
    .collect();

  occurrences.sort_by_key(|o| (o.year, o.day, o.hour, o.minute));
  Ok(occurrences)
}

/// The weekday set named by a recurrence description, Mon → Sun order.
pub fn weekdays(description: &str) -> Result<Vec<Weekday>> {
  parse::parse_days(description)
}

/// Canonical IANA name for a timezone string, `"UTC"` for anything empty or
/// unrecognised. This is the name persisted with a routine, so stored
/// timezones always resolve to a valid zone.
pub fn normalize_zone(timezone: &str) -> String {
  zone_or_utc(timezone).name().to_string()
}

/// Human-readable summary of a recurrence description, for confirmations.
pub fn describe(description: &str) -> Result<String> {
  let days = parse::parse_days(description)?;
  let text = match days.len() {
    7 => "every day".to_string(),
    5 if days[0] == Weekday::Mon && days[4] == Weekday::Fri => {
      "every weekday".to_string()
    }
    2 if days == [Weekday::Sat, Weekday::Sun] => "weekends".to_string(),
    _ => {
      let names: Vec<&str> = days.iter().map(|d| day_name(*d)).collect();
      names.join(", ")
    }
  };
  Ok(text)
}

/// Full English name of a weekday.
pub fn day_name(day: Weekday) -> &'static str {
  match day {
    Weekday::Mon => "Monday",
    Weekday::Tue => "Tuesday",
    Weekday::Wed => "Wednesday",
    Weekday::Thu => "Thursday",
    Weekday::Fri => "Friday",
    Weekday::Sat => "Saturday",
    Weekday::Sun => "Sunday",
  }
}

// ─── Calendar helpers ────────────────────────────────────────────────────────

/// Parse an IANA zone name, falling back to UTC for empty or unknown input.
fn zone_or_utc(timezone: &str) -> Tz {
  let name = timezone.trim();
  if name.is_empty() {
    return Tz::UTC;
  }
  Tz::from_str(name).unwrap_or(Tz::UTC)
}

/// The next date on or after `from` that falls on `weekday`.
fn next_local_date(from: NaiveDate, weekday: Weekday) -> NaiveDate {
  let ahead = (weekday.num_days_from_monday() + 7
    - from.weekday().num_days_from_monday())
    % 7;
  from + Duration::days(i64::from(ahead))
}

/// Map a local wall-clock time in `tz` to a UTC instant.
///
/// Ambiguous times (fall-back transitions) take the earlier instant; times
/// inside a spring-forward gap slide forward an hour at a time until they
/// exist.
fn local_instant(tz: Tz, date: NaiveDate, hour: u8, minute: u8) -> DateTime<Utc> {
  let mut naive = date
    .and_hms_opt(u32::from(hour), u32::from(minute), 0)
    .unwrap_or_else(|| date.and_time(chrono::NaiveTime::MIN));

  loop {
    if let Some(instant) = tz.from_local_datetime(&naive).earliest() {
      return instant.with_timezone(&Utc);
    }
    naive += Duration::hours(1);
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  /// Wednesday 2024-06-05, 12:00 UTC (08:00 in New York, EDT).
  fn summer_noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 5, 12, 0, 0).unwrap()
  }

  fn at(year: i32, day: u32, hour: u8, minute: u8, weekday: Weekday) -> Occurrence {
    Occurrence { weekday, day, year, hour, minute }
  }

  #[test]
  fn mwf_in_new_york_normalises_to_utc() {
    let slots = resolve_at("MWF", "9", "America/New_York", summer_noon()).unwrap();

    // EDT is UTC-4, so 09:00 local is 13:00 UTC. 2024-06-05 is day 157 of a
    // leap year; Friday follows on day 159, Monday on day 162.
    assert_eq!(slots, vec![
      at(2024, 157, 13, 0, Weekday::Wed),
      at(2024, 159, 13, 0, Weekday::Fri),
      at(2024, 162, 13, 0, Weekday::Mon),
    ]);
  }

  #[test]
  fn winter_offset_differs_from_summer() {
    // Wednesday 2024-01-10, 12:00 UTC (07:00 in New York, EST = UTC-5).
    let winter = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
    let slots = resolve_at("wed", "9", "America/New_York", winter).unwrap();
    assert_eq!(slots, vec![at(2024, 10, 14, 0, Weekday::Wed)]);
  }

  #[test]
  fn spring_forward_gap_slides_to_the_next_valid_hour() {
    // US DST starts Sunday 2024-03-10: 02:00 EST jumps to 03:00 EDT, so
    // 02:30 local never happens. The occurrence slides an hour forward to
    // 03:30 EDT = 07:30 UTC on day 70.
    let now = Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap();
    let slots = resolve_at("sunday", "2:30", "America/New_York", now).unwrap();
    assert_eq!(slots, vec![at(2024, 70, 7, 30, Weekday::Sun)]);
  }

  #[test]
  fn fall_back_ambiguity_takes_the_earlier_instant() {
    // US DST ends Sunday 2024-11-03: 01:30 local happens twice. The earlier
    // reading wins: 01:30 EDT = 05:30 UTC on day 308, not 01:30 EST = 06:30.
    let now = Utc.with_ymd_and_hms(2024, 11, 2, 12, 0, 0).unwrap();
    let slots = resolve_at("sunday", "1:30", "America/New_York", now).unwrap();
    assert_eq!(slots, vec![at(2024, 308, 5, 30, Weekday::Sun)]);
  }

  #[test]
  fn today_is_skipped_once_the_time_has_passed() {
    // 18:00 UTC is 14:00 EDT — past a 9 o'clock routine.
    let late = Utc.with_ymd_and_hms(2024, 6, 5, 18, 0, 0).unwrap();
    let slots = resolve_at("wed", "9", "America/New_York", late).unwrap();
    assert_eq!(slots, vec![at(2024, 164, 13, 0, Weekday::Wed)]);
  }

  #[test]
  fn positive_offset_can_cross_into_the_previous_utc_day() {
    // 2024-06-05 00:00 UTC is already Wednesday noon in Auckland (NZST,
    // UTC+12), so a 9 o'clock Wednesday routine lands a week out: Wednesday
    // June 12 local = Tuesday June 11, 21:00 UTC (day 163).
    let now = Utc.with_ymd_and_hms(2024, 6, 5, 0, 0, 0).unwrap();
    let slots = resolve_at("wednesday", "9", "Pacific/Auckland", now).unwrap();
    assert_eq!(slots, vec![at(2024, 163, 21, 0, Weekday::Wed)]);
  }

  #[test]
  fn unknown_timezone_falls_back_to_utc() {
    let slots =
      resolve_at("wed", "9", "Mars/Olympus_Mons", summer_noon()).unwrap();
    let utc = resolve_at("wed", "9", "UTC", summer_noon()).unwrap();
    assert_eq!(slots, utc);
    assert_eq!(slots[0].hour, 9);
  }

  #[test]
  fn empty_timezone_falls_back_to_utc() {
    let slots = resolve_at("fri", "23", "", summer_noon()).unwrap();
    assert_eq!(slots, vec![at(2024, 159, 23, 0, Weekday::Fri)]);
  }

  #[test]
  fn deterministic_for_fixed_inputs() {
    let a = resolve_at("weekdays", "9:30", "Europe/Berlin", summer_noon());
    let b = resolve_at("weekdays", "9:30", "Europe/Berlin", summer_noon());
    assert_eq!(a, b);
  }

  #[test]
  fn daily_yields_seven_chronological_slots() {
    let slots = resolve_at("daily", "12", "UTC", summer_noon()).unwrap();
    assert_eq!(slots.len(), 7);
    // `instant <= now` is inclusive, so today's noon is pushed a week out
    // and the run starts Thursday.
    assert_eq!(slots[0].day, 158);
    assert!(slots.windows(2).all(|w| w[0].day < w[1].day));
  }

  #[test]
  fn each_slot_matches_its_token_weekday() {
    let slots = resolve_at("TTh", "9", "UTC", summer_noon()).unwrap();
    let days: Vec<Weekday> = slots.iter().map(|s| s.weekday).collect();
    assert_eq!(days, vec![Weekday::Thu, Weekday::Tue]);
  }

  #[test]
  fn invalid_pattern_is_rejected() {
    assert!(matches!(
      resolve_at("not-a-real-pattern", "9", "UTC", summer_noon()),
      Err(Error::InvalidRecurrence(_))
    ));
  }

  #[test]
  fn describe_summaries() {
    assert_eq!(describe("daily").unwrap(), "every day");
    assert_eq!(describe("weekdays").unwrap(), "every weekday");
    assert_eq!(describe("MTWThF").unwrap(), "every weekday");
    assert_eq!(describe("weekend").unwrap(), "weekends");
    assert_eq!(describe("MWF").unwrap(), "Monday, Wednesday, Friday");
  }
}
