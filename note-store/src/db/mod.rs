mod migrations;

use std::path::Path;

use tokio_rusqlite::Connection;

use migrations::MIGRATIONS;

pub use rusqlite;
pub use tokio_rusqlite;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("insert returned invalid row id {0}")]
    InvalidRowId(i64),
    #[error("store open aborted: {0}")]
    OpenAborted(String),
    #[error(transparent)]
    Migration(rusqlite_migration::Error),
    #[error(transparent)]
    TokioRusqlite(tokio_rusqlite::Error),
    #[error(transparent)]
    Rusqlite(rusqlite::Error),
}

/// db::Error <--> tokio_rusqlite::Error
///
/// Typed errors raised inside `Connection::call` travel through
/// `tokio_rusqlite::Error::Other` and are unwrapped again on the way out.
impl From<tokio_rusqlite::Error> for Error {
    fn from(error: tokio_rusqlite::Error) -> Self {
        match error {
            tokio_rusqlite::Error::Other(err) => match err.downcast::<Error>() {
                Ok(err) => *err,
                Err(err) => Self::TokioRusqlite(tokio_rusqlite::Error::Other(err)),
            },
            error => Self::TokioRusqlite(error),
        }
    }
}

impl From<Error> for tokio_rusqlite::Error {
    fn from(error: Error) -> Self {
        tokio_rusqlite::Error::Other(Box::new(error))
    }
}

impl From<rusqlite::Error> for Error {
    fn from(error: rusqlite::Error) -> Self {
        Self::Rusqlite(error)
    }
}

impl From<rusqlite_migration::Error> for Error {
    fn from(error: rusqlite_migration::Error) -> Self {
        Self::Migration(error)
    }
}

pub type DB = Connection;

pub async fn open_db(path: impl AsRef<Path>) -> Result<DB> {
    let conn = Connection::open(path.as_ref().to_path_buf()).await?;

    conn.call(|conn| {
        let journal_mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        tracing::debug!(journal_mode = %journal_mode, "journal mode set");

        migrate(conn)
    })
    .await?;

    Ok(conn)
}

pub async fn open_in_memory_db() -> Result<DB> {
    let conn = Connection::open_in_memory().await?;

    conn.call(migrate).await?;

    Ok(conn)
}

#[cfg(test)]
pub async fn init_test_db() -> Result<DB> {
    open_in_memory_db().await
}

fn migrate(conn: &mut rusqlite::Connection) -> tokio_rusqlite::Result<()> {
    MIGRATIONS
        .to_latest(conn)
        .map_err(|e| tokio_rusqlite::Error::from(Error::from(e)))
}
