use lazy_static::lazy_static;
use regex::Regex;

use super::Note;

pub const PREVIEW_LENGTH: usize = 45;

lazy_static! {
    static ref LINE_BREAKS: Regex = Regex::new(r"[\r\n]+").expect("invalid line break regex");
}

/// Collapses every run of line breaks into a single space.
pub fn to_single_line(text: &str) -> String {
    LINE_BREAKS.replace_all(text, " ").into_owned()
}

/// Keeps the first `max` characters and marks the cut with `...`.
pub fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_owned(),
    }
}

impl Note {
    pub fn preview_title(&self) -> String {
        truncate(self.title.as_deref().unwrap_or_default(), PREVIEW_LENGTH)
    }

    pub fn preview_body(&self) -> String {
        truncate(&to_single_line(self.body.as_deref().unwrap_or_default()), PREVIEW_LENGTH)
    }

    /// Title and body on separate lines, for sharing or copying.
    pub fn share_text(&self) -> String {
        format!(
            "{}\n{}",
            self.title.as_deref().unwrap_or_default(),
            self.body.as_deref().unwrap_or_default()
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::notes::NoteId;

    fn note(title: Option<&str>, body: Option<&str>) -> Note {
        let now = Utc::now();
        Note {
            id: NoteId::new(1).unwrap(),
            title: title.map(Into::into),
            body: body.map(Into::into),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn single_line_collapses_break_runs() {
        assert_eq!(to_single_line("a\r\nb\n\n\nc"), "a b c");
        assert_eq!(to_single_line("\nlead"), " lead");
        assert_eq!(to_single_line("plain"), "plain");
        assert_eq!(to_single_line("tail\r\n\r\n"), "tail ");
        assert_eq!(to_single_line("naïve\nrésumé"), "naïve résumé");
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("hello", 5), "hello");
        assert_eq!(truncate("hello!", 5), "hello...");
        assert_eq!(truncate("héllo wörld", 4), "héll...");
        assert_eq!(truncate("日本語のノート", 3), "日本語...");
        assert_eq!(truncate("", 3), "");
    }

    #[test]
    fn previews_handle_missing_fields() {
        let long = "x".repeat(PREVIEW_LENGTH + 10);
        let note = note(Some(&long), None);

        assert_eq!(note.preview_title().chars().count(), PREVIEW_LENGTH + 3);
        assert!(note.preview_title().ends_with("..."));
        assert_eq!(note.preview_body(), "");
    }

    #[test]
    fn preview_body_is_single_line() {
        let note = note(None, Some("first\nsecond"));

        assert_eq!(note.preview_title(), "");
        assert_eq!(note.preview_body(), "first second");
    }

    #[test]
    fn share_text_joins_title_and_body() {
        assert_eq!(note(Some("Groceries"), Some("milk")).share_text(), "Groceries\nmilk");
        assert_eq!(note(None, Some("milk")).share_text(), "\nmilk");
    }
}
