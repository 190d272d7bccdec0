use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use rusqlite::{
    types::{FromSql, FromSqlResult, ToSqlOutput, ValueRef},
    Row, ToSql,
};
use serde::{Deserialize, Serialize};

use crate::{clock::parse_timestamp, Error};

/// Row id assigned by SQLite. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(i64);

impl NoteId {
    pub fn new(raw: i64) -> Option<Self> {
        (raw > 0).then_some(Self(raw))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for NoteId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim().parse::<i64>().map_err(|e| format!("invalid note id {s:?}: {e}"))?;
        Self::new(raw).ok_or_else(|| format!("invalid note id {s:?}: must be positive"))
    }
}

impl ToSql for NoteId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        self.0.to_sql()
    }
}

impl FromSql for NoteId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        i64::column_result(value).map(Self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: Option<String>,
    pub body: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A `notes` row as stored, timestamps still unparsed.
#[derive(Debug)]
pub(crate) struct NoteRow {
    pub id: NoteId,
    pub title: Option<String>,
    pub body: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl NoteRow {
    pub const COLUMNS: &'static str = "id, title, body, created_at, updated_at";
}

impl<'a> TryFrom<&Row<'a>> for NoteRow {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'a>) -> std::result::Result<Self, Self::Error> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            body: row.get(2)?,
            created_at: row.get(3)?,
            updated_at: row.get(4)?,
        })
    }
}

impl TryFrom<NoteRow> for Note {
    type Error = Error;

    fn try_from(row: NoteRow) -> std::result::Result<Self, Self::Error> {
        let id = row.id;
        let timestamp = |column: &str, value: Option<String>| -> Result<DateTime<Utc>, Error> {
            let value = value.ok_or_else(|| Error::CorruptRecord {
                id: Some(id),
                reason: format!("{column} is null"),
            })?;
            parse_timestamp(&value).map_err(|e| Error::CorruptRecord {
                id: Some(id),
                reason: format!("{column} {value:?}: {e}"),
            })
        };

        let created_at = timestamp("created_at", row.created_at)?;
        let updated_at = timestamp("updated_at", row.updated_at)?;

        Ok(Self {
            id,
            title: row.title,
            body: row.body,
            created_at,
            updated_at,
        })
    }
}
