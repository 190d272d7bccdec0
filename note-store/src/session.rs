//! Editing sessions for the composer and editor screens.
//!
//! Edits stay in memory. They reach the store when a field loses focus
//! ([`NoteSession::commit`]) and, unconditionally, before the screen goes away
//! ([`NoteSession::dismiss`]). Dismissal waits for the store to finish
//! opening, so a screen closed right after it appeared cannot drop the note.

use std::{future::Future, path::PathBuf, sync::Arc};

use tokio::task::JoinHandle;

use crate::{
    db,
    notes::{NoteId, NoteStore, Saved},
    Error, Result,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// The store is still opening.
    Uninitialized,
    /// The store could not be opened. Nothing can be saved.
    Degraded,
    /// A new note that has not been written yet.
    ReadyNoId,
    /// A note that exists in the store; saves update it in place.
    ReadyWithId(NoteId),
    Closed,
}

/// A store handed to a session, either already open or still opening in
/// the background.
pub enum StoreOpening {
    Pending(JoinHandle<Result<NoteStore>>),
    Ready(NoteStore),
}

impl StoreOpening {
    /// Starts opening the store file on the runtime.
    pub fn spawn(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::spawn_with(async move { NoteStore::open(path).await })
    }

    pub fn spawn_with<F>(opening: F) -> Self
    where
        F: Future<Output = Result<NoteStore>> + Send + 'static,
    {
        Self::Pending(tokio::spawn(opening))
    }
}

impl From<NoteStore> for StoreOpening {
    fn from(store: NoteStore) -> Self {
        Self::Ready(store)
    }
}

enum Backend {
    Opening(JoinHandle<Result<NoteStore>>),
    Ready(NoteStore),
    Unavailable(Arc<db::Error>),
}

pub struct NoteSession {
    backend: Backend,
    id: Option<NoteId>,
    title: String,
    body: String,
    dirty: bool,
    closed: bool,
}

impl NoteSession {
    /// Session for a brand-new note.
    pub fn compose(opening: impl Into<StoreOpening>) -> Self {
        Self::new(opening.into(), None, String::new(), String::new())
    }

    /// Session for a note that already exists.
    pub fn edit(opening: impl Into<StoreOpening>, id: NoteId, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(opening.into(), Some(id), title.into(), body.into())
    }

    fn new(opening: StoreOpening, id: Option<NoteId>, title: String, body: String) -> Self {
        let backend = match opening {
            StoreOpening::Pending(handle) => Backend::Opening(handle),
            StoreOpening::Ready(store) => Backend::Ready(store),
        };

        Self {
            backend,
            id,
            title,
            body,
            dirty: false,
            closed: false,
        }
    }

    /// The state as of the last time the session looked at the opening
    /// store. [`NoteSession::ready`] and [`NoteSession::commit`] pick up an
    /// open that has finished in the meantime.
    pub fn state(&self) -> SessionState {
        if self.closed {
            return SessionState::Closed;
        }
        match (&self.backend, self.id) {
            (Backend::Opening(_), _) => SessionState::Uninitialized,
            (Backend::Unavailable(_), _) => SessionState::Degraded,
            (Backend::Ready(_), None) => SessionState::ReadyNoId,
            (Backend::Ready(_), Some(id)) => SessionState::ReadyWithId(id),
        }
    }

    pub fn id(&self) -> Option<NoteId> {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Whether the store has finished opening, successfully or not.
    pub fn is_ready(&self) -> bool {
        match &self.backend {
            Backend::Opening(handle) => handle.is_finished(),
            Backend::Ready(_) | Backend::Unavailable(_) => true,
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<()> {
        self.ensure_open()?;
        let title = title.into();
        if title != self.title {
            self.title = title;
            self.dirty = true;
        }
        Ok(())
    }

    pub fn set_body(&mut self, body: impl Into<String>) -> Result<()> {
        self.ensure_open()?;
        let body = body.into();
        if body != self.body {
            self.body = body;
            self.dirty = true;
        }
        Ok(())
    }

    /// Waits until the store has opened.
    pub async fn ready(&mut self) -> Result<()> {
        self.store().await.map(|_| ())
    }

    /// Field-level save, fired when an input loses focus.
    ///
    /// Never waits for an opening store; the dismissal save covers that
    /// case. Writes only when something changed since the last save.
    pub async fn commit(&mut self) -> Result<Saved> {
        self.ensure_open()?;
        if self.is_ready() {
            self.resolve().await;
        }
        if !self.dirty {
            return Ok(Saved::Skipped);
        }
        if !self.is_ready() {
            tracing::debug!("store still opening, commit left to dismissal");
            return Ok(Saved::Skipped);
        }
        self.save().await
    }

    /// Saves and closes the session.
    ///
    /// Blocks until the store is open and the save has resolved. On failure
    /// the session stays open with its edits intact.
    pub async fn dismiss(&mut self) -> Result<Option<NoteId>> {
        self.ensure_open()?;
        self.save()
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "dismissal blocked, note kept in memory"))?;

        self.closed = true;
        tracing::debug!(note_id = ?self.id, "session closed");
        Ok(self.id)
    }

    /// Closes the session without saving.
    pub fn abandon(&mut self) {
        if self.dirty && !self.closed {
            tracing::warn!(note_id = ?self.id, "closing session with unsaved edits");
        }
        self.closed = true;
    }

    async fn save(&mut self) -> Result<Saved> {
        let store = self.store().await?;

        let saved = store
            .create_or_update(self.id, self.title.clone(), self.body.clone())
            .await?;

        if let Some(id) = saved.id() {
            self.id = Some(id);
        }
        if let Saved::Missing(id) = saved {
            tracing::warn!(note_id = %id, "note was deleted while being edited");
        }
        self.dirty = false;
        Ok(saved)
    }

    async fn store(&mut self) -> Result<NoteStore> {
        self.resolve().await;

        match &self.backend {
            Backend::Ready(store) => Ok(store.clone()),
            Backend::Unavailable(err) => Err(Error::StoreUnavailable(err.clone())),
            Backend::Opening(_) => Err(Error::unavailable(db::Error::OpenAborted("store is still opening".into()))),
        }
    }

    /// Waits for a pending open and records how it ended.
    async fn resolve(&mut self) {
        if let Backend::Opening(handle) = &mut self.backend {
            let resolved = match handle.await {
                Ok(Ok(store)) => Backend::Ready(store),
                Ok(Err(Error::StoreUnavailable(err))) => Backend::Unavailable(err),
                Ok(Err(err)) => Backend::Unavailable(Arc::new(db::Error::OpenAborted(err.to_string()))),
                Err(err) => Backend::Unavailable(Arc::new(db::Error::OpenAborted(err.to_string()))),
            };
            if let Backend::Unavailable(err) = &resolved {
                tracing::error!(error = %err, "note store failed to open");
            }
            self.backend = resolved;
        }
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(Error::SessionClosed);
        }
        Ok(())
    }
}
