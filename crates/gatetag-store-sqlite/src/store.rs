//! [`SqliteStore`] — the SQLite implementation of [`RegistrationStore`] and
//! [`LogStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use gatetag_core::{
  log::{LogEntry, LogStatus},
  registration::Registration,
  store::{InsertOutcome, LogStore, RegistrationStore},
};

use crate::{Error, Result, schema::SCHEMA};

/// Registration and log stores backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
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

/// `1 | 0 | NULL` in the `logs.status` column.
fn status_from_column(value: Option<i64>) -> LogStatus {
  match value {
    Some(v) => LogStatus::from_bool(v != 0),
    None => LogStatus::Unknown,
  }
}

// ─── RegistrationStore impl ──────────────────────────────────────────────────

impl RegistrationStore for SqliteStore {
  type Error = Error;

  async fn find(&self, tag_id: &str) -> Result<Option<Registration>> {
    let tag = tag_id.to_owned();

    let row: Option<(String, bool)> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT tag_id, status FROM registrations WHERE tag_id = ?1",
              rusqlite::params![tag],
              |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?,
        )
      })
      .await?;

    Ok(row.map(|(tag_id, status)| Registration { tag_id, status }))
  }

  async fn insert_if_absent(
    &self,
    tag_id: &str,
    status: bool,
  ) -> Result<InsertOutcome> {
    let tag = tag_id.to_owned();

    let inserted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "INSERT INTO registrations (tag_id, status) VALUES (?1, ?2)
           ON CONFLICT (tag_id) DO NOTHING",
          rusqlite::params![tag, status],
        )?)
      })
      .await?;

    Ok(if inserted == 1 {
      InsertOutcome::Created
    } else {
      InsertOutcome::AlreadyExists
    })
  }

  async fn update_if_present(
    &self,
    tag_id: &str,
    status: bool,
  ) -> Result<Option<bool>> {
    let tag = tag_id.to_owned();

    // SELECT and UPDATE run back to back inside one `call`, on the store's
    // single connection thread, so no other caller can interleave.
    let previous: Option<bool> = self
      .conn
      .call(move |conn| {
        let previous: Option<bool> = conn
          .query_row(
            "SELECT status FROM registrations WHERE tag_id = ?1",
            rusqlite::params![tag],
            |row| row.get(0),
          )
          .optional()?;

        if previous.is_some() {
          conn.execute(
            "UPDATE registrations SET status = ?2 WHERE tag_id = ?1",
            rusqlite::params![tag, status],
          )?;
        }

        Ok(previous)
      })
      .await?;

    Ok(previous)
  }

  async fn list_all(&self) -> Result<Vec<Registration>> {
    let rows = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT tag_id, status FROM registrations")?;
        let rows = stmt
          .query_map([], |row| {
            Ok(Registration {
              tag_id: row.get(0)?,
              status: row.get(1)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(rows)
  }

  async fn list_by_status(&self, status: bool) -> Result<Vec<Registration>> {
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn
          .prepare("SELECT tag_id, status FROM registrations WHERE status = ?1")?;
        let rows = stmt
          .query_map(rusqlite::params![status], |row| {
            Ok(Registration {
              tag_id: row.get(0)?,
              status: row.get(1)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(rows)
  }
}

// ─── LogStore impl ───────────────────────────────────────────────────────────

impl LogStore for SqliteStore {
  type Error = Error;

  async fn append(&self, entry: LogEntry) -> Result<()> {
    let status = entry.status.as_bool();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO logs (tag_id, status, logged_at) VALUES (?1, ?2, ?3)",
          rusqlite::params![entry.tag_id, status, entry.logged_at],
        )?;
        Ok(())
      })
      .await?;

    Ok(())
  }

  async fn list_all(&self) -> Result<Vec<LogEntry>> {
    let rows = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT tag_id, status, logged_at FROM logs
           ORDER BY logged_at DESC, entry_id DESC",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(LogEntry {
              tag_id:    row.get(0)?,
              status:    status_from_column(row.get(1)?),
              logged_at: row.get(2)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(rows)
  }
}
