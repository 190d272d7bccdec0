use crate::{
    notes::{filter, Note, NoteId, NoteStore},
    Result,
};

/// State behind the list screen: the last loaded snapshot, the search query
/// and what that query leaves visible.
///
/// The snapshot is only reloaded by [`NoteList::refresh`]; writes made
/// elsewhere show up on the next refresh.
pub struct NoteList {
    store: NoteStore,
    snapshot: Vec<Note>,
    query: String,
    visible: Vec<Note>,
}

impl NoteList {
    pub fn new(store: NoteStore) -> Self {
        Self {
            store,
            snapshot: Vec::new(),
            query: String::new(),
            visible: Vec::new(),
        }
    }

    /// Reloads the snapshot and re-applies the current query.
    pub async fn refresh(&mut self) -> Result<()> {
        self.snapshot = self.store.list_all().await?;
        self.apply();
        Ok(())
    }

    pub fn search(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.apply();
    }

    /// Deletes a note the user has already confirmed. The lists only change
    /// if the store accepted the delete.
    pub async fn delete(&mut self, id: NoteId) -> Result<()> {
        self.store.delete(id).await?;

        self.snapshot.retain(|note| note.id != id);
        self.visible.retain(|note| note.id != id);
        Ok(())
    }

    pub fn find(&self, id: NoteId) -> Option<&Note> {
        self.snapshot.iter().find(|note| note.id == id)
    }

    pub fn visible(&self) -> &[Note] {
        &self.visible
    }

    pub fn snapshot(&self) -> &[Note] {
        &self.snapshot
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    fn apply(&mut self) {
        self.visible = filter(&self.snapshot, &self.query);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, TimeZone, Utc};

    use super::*;
    use crate::{clock::ManualClock, Error};

    fn id(raw: i64) -> NoteId {
        NoteId::new(raw).unwrap()
    }

    fn titles(notes: &[Note]) -> Vec<&str> {
        notes.iter().map(|n| n.title.as_deref().unwrap_or_default()).collect()
    }

    async fn seeded() -> Result<(NoteStore, NoteList)> {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap());
        let ticking = clock.clone();
        let store = NoteStore::open_in_memory_with_clock(Arc::new(clock)).await?;
        for title in ["Groceries", "Work", "Grocery run"] {
            store.create_or_update(None, title, "").await?;
            ticking.advance(Duration::seconds(1));
        }
        let mut list = NoteList::new(store.clone());
        list.refresh().await?;
        Ok((store, list))
    }

    #[tokio::test]
    async fn refresh_loads_most_recent_first() -> Result<()> {
        let (_, list) = seeded().await?;

        assert_eq!(titles(list.visible()), ["Grocery run", "Work", "Groceries"]);
        assert_eq!(list.snapshot().len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn search_filters_snapshot_without_reading_store() -> Result<()> {
        let (store, mut list) = seeded().await?;
        store.create_or_update(None, "Groceries again", "").await?;

        list.search("GROC");
        assert_eq!(titles(list.visible()), ["Grocery run", "Groceries"]);

        list.search("");
        assert_eq!(list.visible().len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn refresh_keeps_the_query() -> Result<()> {
        let (store, mut list) = seeded().await?;
        list.search("groc");

        store.create_or_update(None, "groceries for sunday", "").await?;
        list.refresh().await?;

        assert_eq!(list.query(), "groc");
        assert_eq!(list.visible().len(), 3);
        assert_eq!(list.snapshot().len(), 4);
        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_from_both_lists() -> Result<()> {
        let (store, mut list) = seeded().await?;
        list.search("groc");

        list.delete(id(1)).await?;

        assert_eq!(titles(list.visible()), ["Grocery run"]);
        assert!(list.find(id(1)).is_none());
        assert_eq!(store.count().await?, 2);
        Ok(())
    }

    #[tokio::test]
    async fn failed_delete_leaves_lists_alone() -> Result<()> {
        let (store, mut list) = seeded().await?;
        store.close().await?;

        assert!(matches!(list.delete(id(1)).await, Err(Error::Persistence(_))));
        assert_eq!(list.snapshot().len(), 3);
        assert_eq!(list.visible().len(), 3);
        Ok(())
    }
}
