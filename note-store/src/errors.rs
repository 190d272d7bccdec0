use std::sync::Arc;

use crate::{db, notes::NoteId};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("store unavailable: {0}")]
    StoreUnavailable(Arc<db::Error>),

    #[error("persistence: {0}")]
    Persistence(db::Error),

    #[error("corrupt record{}: {reason}", .id.map(|id| format!(" {id}")).unwrap_or_default())]
    CorruptRecord { id: Option<NoteId>, reason: String },

    #[error("session closed")]
    SessionClosed,

    // other
    #[error("config: {0}")]
    Config(#[from] envy::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn unavailable(error: impl Into<db::Error>) -> Self {
        Self::StoreUnavailable(Arc::new(error.into()))
    }

    pub fn persistence(error: impl Into<db::Error>) -> Self {
        Self::Persistence(error.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrupt_record_names_the_row() {
        let err = Error::CorruptRecord {
            id: NoteId::new(3),
            reason: "updated_at is null".into(),
        };

        assert_eq!(err.to_string(), "corrupt record 3: updated_at is null");
    }

    #[test]
    fn unavailable_wraps_db_errors() {
        let err = Error::unavailable(db::Error::OpenAborted("cancelled".into()));

        assert!(matches!(err, Error::StoreUnavailable(_)));
        assert_eq!(err.to_string(), "store unavailable: store open aborted: cancelled");
    }
}
