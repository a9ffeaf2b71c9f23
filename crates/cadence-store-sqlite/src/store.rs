//! [`SqliteStore`] — the SQLite implementation of [`RoutineStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::{OptionalExtension as _, types::ToSql};
use uuid::Uuid;

use cadence_core::{
  routine::{NewRoutine, Routine, RoutineUpdate},
  scope::Scope,
  slot::{NewRoutineSlot, RoutineSlot},
  store::RoutineStore,
};

use crate::{
  Error, Result,
  encode::{RawRoutine, RawSlot, encode_dt, encode_origin, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Cadence routine store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. Every
/// logical operation runs inside a single `call`, so connection access is
/// scoped and released on every exit path.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

const ROUTINE_COLUMNS: &str = "routine_id, community, channel, recurrence, \
                               hour, minute, timezone, role, context, \
                               scheduler, created_at";

const SLOT_COLUMNS: &str = "slot_id, routine_id, community, channel, name, \
                            day, year, hour, minute, role, scheduler, \
                            thread_content, origin";

fn routine_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawRoutine> {
  Ok(RawRoutine {
    routine_id: row.get(0)?,
    community:  row.get(1)?,
    channel:    row.get(2)?,
    recurrence: row.get(3)?,
    hour:       row.get(4)?,
    minute:     row.get(5)?,
    timezone:   row.get(6)?,
    role:       row.get(7)?,
    context:    row.get(8)?,
    scheduler:  row.get(9)?,
    created_at: row.get(10)?,
  })
}

fn slot_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawSlot> {
  Ok(RawSlot {
    slot_id:        row.get(0)?,
    routine_id:     row.get(1)?,
    community:      row.get(2)?,
    channel:        row.get(3)?,
    name:           row.get(4)?,
    day:            row.get(5)?,
    year:           row.get(6)?,
    hour:           row.get(7)?,
    minute:         row.get(8)?,
    role:           row.get(9)?,
    scheduler:      row.get(10)?,
    thread_content: row.get(11)?,
    origin:         row.get(12)?,
  })
}

// ─── RoutineStore impl ───────────────────────────────────────────────────────

impl RoutineStore for SqliteStore {
  type Error = Error;

  async fn save_routine(&self, input: NewRoutine) -> Result<Routine> {
    let created_at = Utc::now();
    let at_str = encode_dt(created_at);

    let community = input.scope.community.clone();
    let channel = input.scope.channel.clone();
    let recurrence = input.recurrence.clone();
    let hour = input.hour;
    let minute = input.minute;
    let timezone = input.timezone.clone();
    let role = input.role.clone();
    let context = input.context.clone();
    let scheduler = input.scheduler.clone();

    let routine_id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO routines (
             community, channel, recurrence, hour, minute, timezone,
             role, context, scheduler, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          rusqlite::params![
            community,
            channel,
            recurrence,
            i64::from(hour),
            i64::from(minute),
            timezone,
            role,
            context,
            scheduler,
            at_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Routine {
      routine_id,
      scope: input.scope,
      recurrence: input.recurrence,
      hour: input.hour,
      minute: input.minute,
      timezone: input.timezone,
      role: input.role,
      context: input.context,
      scheduler: input.scheduler,
      created_at,
    })
  }

  async fn save_slot(&self, input: NewRoutineSlot) -> Result<RoutineSlot> {
    let slot_id = Uuid::new_v4();
    let slot = RoutineSlot {
      slot_id,
      routine_id:     input.routine_id,
      scope:          input.scope,
      name:           input.name,
      date:           input.date,
      role:           input.role,
      scheduler:      input.scheduler,
      thread_content: input.thread_content,
      origin:         input.origin,
    };

    let id_str = encode_uuid(slot_id);
    let routine_id = slot.routine_id;
    let community = slot.scope.community.clone();
    let channel = slot.scope.channel.clone();
    let name = slot.name.clone();
    let date = slot.date;
    let role = slot.role.clone();
    let scheduler = slot.scheduler.clone();
    let thread_content = slot.thread_content.clone();
    let origin_str = encode_origin(&slot.origin)?;

    // Existence check and insert share one call so no delete can interleave.
    let parent_exists: bool = self
      .conn
      .call(move |conn| {
        let exists: bool = conn
          .query_row(
            "SELECT 1 FROM routines
             WHERE routine_id = ?1 AND community = ?2 AND channel = ?3",
            rusqlite::params![routine_id, community, channel],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);

        if !exists {
          return Ok(false);
        }

        conn.execute(
          "INSERT INTO routine_slots (
             slot_id, routine_id, community, channel, name,
             day, year, hour, minute, role, scheduler, thread_content, origin
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
          rusqlite::params![
            id_str,
            routine_id,
            community,
            channel,
            name,
            i64::from(date.day),
            i64::from(date.year),
            i64::from(date.hour),
            i64::from(date.minute),
            role,
            scheduler,
            thread_content,
            origin_str,
          ],
        )?;
        Ok(true)
      })
      .await?;

    if !parent_exists {
      return Err(Error::OrphanSlot(slot.routine_id));
    }
    Ok(slot)
  }

  async fn routines_by_channel(&self, scope: Scope) -> Result<Vec<Routine>> {
    let raws: Vec<RawRoutine> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {ROUTINE_COLUMNS} FROM routines
           WHERE community = ?1 AND channel = ?2
           ORDER BY routine_id"
        ))?;
        let rows = stmt
          .query_map(
            rusqlite::params![scope.community, scope.channel],
            routine_from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRoutine::into_routine).collect()
  }

  async fn slots_by_routine(
    &self,
    scope: Scope,
    routine_id: i64,
  ) -> Result<Vec<RoutineSlot>> {
    let raws: Vec<RawSlot> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {SLOT_COLUMNS} FROM routine_slots
           WHERE community = ?1 AND channel = ?2 AND routine_id = ?3
           ORDER BY year, day, hour, minute"
        ))?;
        let rows = stmt
          .query_map(
            rusqlite::params![scope.community, scope.channel, routine_id],
            slot_from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSlot::into_slot).collect()
  }

  async fn delete_routine(&self, scope: Scope, routine_id: i64) -> Result<bool> {
    let removed: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM routines
           WHERE routine_id = ?1 AND community = ?2 AND channel = ?3",
          rusqlite::params![routine_id, scope.community, scope.channel],
        )?)
      })
      .await?;

    Ok(removed > 0)
  }

  async fn update_routine(
    &self,
    scope: Scope,
    routine_id: i64,
    patch: RoutineUpdate,
  ) -> Result<u64> {
    if patch.is_empty() {
      return Ok(0);
    }

    // Build SET and change-detection clauses from the supplied fields only.
    // The `IS NOT` guard keeps a value-identical update at zero modified
    // rows, matching the store contract.
    struct Patch {
      sets:    Vec<String>,
      changed: Vec<String>,
      values:  Vec<Box<dyn ToSql + Send + Sync>>,
    }

    impl Patch {
      fn field(&mut self, column: &str, value: Box<dyn ToSql + Send + Sync>) {
        self.values.push(value);
        let n = self.values.len();
        self.sets.push(format!("{column} = ?{n}"));
        self.changed.push(format!("{column} IS NOT ?{n}"));
      }
    }

    let mut p = Patch {
      sets:    Vec::new(),
      changed: Vec::new(),
      values:  Vec::new(),
    };

    if let Some(v) = patch.recurrence {
      p.field("recurrence", Box::new(v));
    }
    if let Some(v) = patch.hour {
      p.field("hour", Box::new(i64::from(v)));
    }
    if let Some(v) = patch.minute {
      p.field("minute", Box::new(i64::from(v)));
    }
    if let Some(v) = patch.timezone {
      p.field("timezone", Box::new(v));
    }
    if let Some(v) = patch.role {
      p.field("role", Box::new(v));
    }
    if let Some(v) = patch.context {
      p.field("context", Box::new(v));
    }
    if let Some(v) = patch.scheduler {
      p.field("scheduler", Box::new(v));
    }

    let Patch { sets, changed, mut values } = p;

    let base = values.len();
    let sql = format!(
      "UPDATE routines SET {} \
       WHERE routine_id = ?{} AND community = ?{} AND channel = ?{} \
       AND ({})",
      sets.join(", "),
      base + 1,
      base + 2,
      base + 3,
      changed.join(" OR "),
    );
    values.push(Box::new(routine_id));
    values.push(Box::new(scope.community));
    values.push(Box::new(scope.channel));

    let modified: usize = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        Ok(stmt.execute(rusqlite::params_from_iter(
          values.iter().map(|v| v.as_ref() as &dyn ToSql),
        ))?)
      })
      .await?;

    Ok(modified as u64)
  }
}
