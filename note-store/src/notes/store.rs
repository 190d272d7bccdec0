use std::{path::Path, sync::Arc};

use rusqlite::{params, OptionalExtension};

use crate::{
    clock::{self, Clock, SystemClock},
    db::{self, DB},
    Error, Result,
};

use super::{Note, NoteId, NoteRow};

/// What a call to [`NoteStore::create_or_update`] wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Saved {
    Inserted(NoteId),
    Updated(NoteId),
    /// The row was deleted underneath the caller. Nothing was written.
    Missing(NoteId),
    /// A brand-new note with nothing in it. Nothing was written.
    Skipped,
}

impl Saved {
    pub fn id(self) -> Option<NoteId> {
        match self {
            Self::Inserted(id) | Self::Updated(id) | Self::Missing(id) => Some(id),
            Self::Skipped => None,
        }
    }
}

/// Handle to the `notes` table.
///
/// Clones share one connection; statements from every clone run one at a
/// time on its worker thread.
#[derive(Clone)]
pub struct NoteStore {
    conn: DB,
    clock: Arc<dyn Clock>,
}

impl NoteStore {
    /// Opens (or creates) the database file and makes sure the schema exists.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_clock(path, Arc::new(SystemClock)).await
    }

    pub async fn open_with_clock(path: impl AsRef<Path>, clock: Arc<dyn Clock>) -> Result<Self> {
        let path = path.as_ref();
        let conn = db::open_db(path).await.map_err(Error::unavailable)?;

        tracing::debug!(path = %path.display(), "note store opened");
        Ok(Self { conn, clock })
    }

    pub async fn open_in_memory() -> Result<Self> {
        Self::open_in_memory_with_clock(Arc::new(SystemClock)).await
    }

    pub async fn open_in_memory_with_clock(clock: Arc<dyn Clock>) -> Result<Self> {
        let conn = db::open_in_memory_db().await.map_err(Error::unavailable)?;

        Ok(Self { conn, clock })
    }

    /// Closes the shared connection. Every clone fails afterwards.
    pub async fn close(self) -> Result<()> {
        self.conn.close().await.map_err(Error::persistence)
    }

    /// Inserts a new note when `id` is `None`, otherwise rewrites the note
    /// with that id.
    ///
    /// A new note whose title and body are both blank is not written. An
    /// update for an id that no longer exists writes nothing and does not
    /// bring the row back.
    pub async fn create_or_update(
        &self,
        id: Option<NoteId>,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Result<Saved> {
        let (title, body) = (title.into(), body.into());

        match id {
            Some(id) => self.update(id, title, body).await,
            None if is_blank(&title) && is_blank(&body) => {
                tracing::debug!("blank new note, nothing to save");
                Ok(Saved::Skipped)
            }
            None => self.insert(title, body).await,
        }
    }

    async fn insert(&self, title: String, body: String) -> Result<Saved> {
        let now = clock::format_timestamp(clock::timestamp(&*self.clock));

        let id = self
            .conn
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO notes (title, body, created_at, updated_at) VALUES (?1, ?2, ?3, ?3)",
                    params![title, body, now],
                )?;
                let rowid = conn.last_insert_rowid();
                NoteId::new(rowid).ok_or_else(|| db::Error::InvalidRowId(rowid).into())
            })
            .await
            .map_err(Error::persistence)
            .inspect_err(|e| tracing::error!(error = %e, "failed to insert note"))?;

        tracing::debug!(note_id = %id, "note inserted");
        Ok(Saved::Inserted(id))
    }

    async fn update(&self, id: NoteId, title: String, body: String) -> Result<Saved> {
        let now = clock::timestamp(&*self.clock);

        let found = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                let previous: Option<Option<String>> = tx
                    .query_row("SELECT updated_at FROM notes WHERE id = ?1", params![id], |row| row.get(0))
                    .optional()?;
                let Some(previous) = previous else {
                    return Ok(false);
                };

                let updated_at = clock::format_timestamp(clock::next_update(now, previous.as_deref()));
                tx.execute(
                    "UPDATE notes SET title = ?1, body = ?2, updated_at = ?3 WHERE id = ?4",
                    params![title, body, updated_at, id],
                )?;
                tx.commit()?;
                Ok(true)
            })
            .await
            .map_err(Error::persistence)
            .inspect_err(|e| tracing::error!(note_id = %id, error = %e, "failed to update note"))?;

        if found {
            tracing::debug!(note_id = %id, "note updated");
            Ok(Saved::Updated(id))
        } else {
            tracing::debug!(note_id = %id, "note no longer exists, update skipped");
            Ok(Saved::Missing(id))
        }
    }

    /// Every note, most recently updated first.
    ///
    /// Rows that cannot be read back are logged and left out.
    pub async fn list_all(&self) -> Result<Vec<Note>> {
        let rows = self
            .conn
            .call(|conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM notes ORDER BY updated_at DESC",
                    NoteRow::COLUMNS
                ))?;
                let mut rows = Vec::new();
                for row in stmt.query_map([], |row| NoteRow::try_from(row))? {
                    match row {
                        Ok(row) => rows.push(Ok(row)),
                        Err(err) if is_conversion_error(&err) => rows.push(Err(Error::CorruptRecord {
                            id: None,
                            reason: err.to_string(),
                        })),
                        Err(err) => return Err(err.into()),
                    }
                }
                Ok(rows)
            })
            .await
            .map_err(Error::persistence)?;

        let notes = rows
            .into_iter()
            .filter_map(|row| match row.and_then(Note::try_from) {
                Ok(note) => Some(note),
                Err(err) => {
                    tracing::warn!(error = %err, "skipping unreadable note");
                    None
                }
            })
            .collect::<Vec<_>>();

        tracing::debug!(count = notes.len(), "notes listed");
        Ok(notes)
    }

    /// Looks up one note. A row that exists but cannot be read back is a
    /// [`Error::CorruptRecord`].
    pub async fn get(&self, id: NoteId) -> Result<Option<Note>> {
        let row = self
            .conn
            .call(move |conn| {
                let row = conn
                    .query_row(
                        &format!("SELECT {} FROM notes WHERE id = ?1", NoteRow::COLUMNS),
                        params![id],
                        |row| NoteRow::try_from(row),
                    )
                    .optional();

                match row {
                    Ok(row) => Ok(Ok(row)),
                    Err(err) if is_conversion_error(&err) => Ok(Err(Error::CorruptRecord {
                        id: Some(id),
                        reason: err.to_string(),
                    })),
                    Err(err) => Err(err.into()),
                }
            })
            .await
            .map_err(Error::persistence)??;

        row.map(Note::try_from).transpose()
    }

    pub async fn count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .call(|conn| {
                conn.query_row("SELECT count(*) FROM notes", [], |r| r.get(0))
                    .map_err(|e| e.into())
            })
            .await
            .map_err(Error::persistence)?;

        Ok(count.max(0) as u64)
    }

    /// Removes the note. Deleting a note that is already gone is not an error.
    pub async fn delete(&self, id: NoteId) -> Result<()> {
        let deleted = self
            .conn
            .call(move |conn| Ok(conn.execute("DELETE FROM notes WHERE id = ?1", params![id])?))
            .await
            .map_err(Error::persistence)
            .inspect_err(|e| tracing::error!(note_id = %id, error = %e, "failed to delete note"))?;

        tracing::debug!(note_id = %id, deleted, "note delete");
        Ok(())
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn is_conversion_error(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::FromSqlConversionFailure(..)
            | rusqlite::Error::InvalidColumnType(..)
            | rusqlite::Error::IntegralValueOutOfRange(..)
            | rusqlite::Error::Utf8Error(..)
    )
}
