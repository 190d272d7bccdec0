use super::Note;

/// Notes whose title contains `query`, ignoring case.
///
/// Works on an already loaded snapshot and never touches the store. A blank
/// query returns every note in its original order; a note without a title
/// only shows up for a blank query.
pub fn filter(notes: &[Note], query: &str) -> Vec<Note> {
    if query.trim().is_empty() {
        return notes.to_vec();
    }

    let needle = query.to_lowercase();
    notes
        .iter()
        .filter(|note| title_contains(note, &needle))
        .cloned()
        .collect()
}

pub fn matches_title(note: &Note, query: &str) -> bool {
    query.trim().is_empty() || title_contains(note, &query.to_lowercase())
}

fn title_contains(note: &Note, needle: &str) -> bool {
    note.title
        .as_deref()
        .is_some_and(|title| title.to_lowercase().contains(needle))
}
