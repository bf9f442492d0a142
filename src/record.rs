//! Bookmark record data model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

/// A single bookmark record.
///
/// The collection owns the canonical copy of every record; UI widgets work
/// on copies and hand edits back through the save callback, keyed by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "Utc::now")]
    pub added_at: DateTime<Utc>,
}

impl Record {
    /// Create a new record with a fresh id and the current timestamp
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        topic: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            url: url.into(),
            topic: topic.into(),
            description: description.into(),
            added_at: Utc::now(),
        }
    }

    /// Whether the url field parses as an absolute URL.
    ///
    /// Advisory only: an invalid URL is decorated in the UI and reported by
    /// `marcador check`, but never blocks editing or saving.
    pub fn has_valid_url(&self) -> bool {
        Url::parse(&self.url).is_ok()
    }

    /// Host part of the url, for compact display in the list pane
    pub fn url_host(&self) -> Option<String> {
        Url::parse(&self.url)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.to_string()))
    }

    /// Built-in sample records used when no collection file is available
    pub fn sample_set() -> Vec<Record> {
        vec![
            Record::new(
                "The Rust Programming Language",
                "https://doc.rust-lang.org/book/",
                "rust",
                "The official book. Start here for ownership, borrowing and the rest of the language.",
            ),
            Record::new(
                "Ratatui documentation",
                "https://docs.rs/ratatui/latest/ratatui/",
                "tui",
                "Widget and layout reference for the terminal UI framework.",
            ),
            Record::new(
                "Crossterm repository",
                "https://github.com/crossterm-rs/crossterm",
                "tui",
                "Cross-platform terminal manipulation: raw mode, key events, alternate screen.",
            ),
            Record::new(
                "Tokio tutorial",
                "https://tokio.rs/tokio/tutorial",
                "async",
                "Walkthrough of the async runtime, from spawning tasks to select! and channels.",
            ),
            Record::new(
                "serde.rs",
                "https://serde.rs/",
                "serialization",
                "Attribute reference and examples for deriving Serialize/Deserialize.",
            ),
            Record::new(
                "This Week in Rust",
                "https://this-week-in-rust.org/",
                "news",
                "Weekly newsletter. Good way to keep up with crate releases and RFCs.",
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_records_get_unique_ids() {
        let a = Record::new("A", "https://a.example", "t", "");
        let b = Record::new("B", "https://b.example", "t", "");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn url_validity_is_advisory() {
        let good = Record::new("Docs", "https://docs.rs/", "rust", "");
        assert!(good.has_valid_url());
        assert_eq!(good.url_host(), Some("docs.rs".to_string()));

        let bad = Record::new("Broken", "not a url at all", "rust", "");
        assert!(!bad.has_valid_url());
        assert_eq!(bad.url_host(), None);
    }

    #[test]
    fn minimal_json_fills_defaults() {
        // Hand-written collection files only need title and url
        let record: Record =
            serde_json::from_str(r#"{"title":"Lobsters","url":"https://lobste.rs/"}"#)
                .expect("minimal record should deserialize");

        assert_eq!(record.title, "Lobsters");
        assert_eq!(record.url, "https://lobste.rs/");
        assert!(record.topic.is_empty());
        assert!(record.description.is_empty());
        assert!(!record.id.is_nil());
    }

    #[test]
    fn sample_set_is_well_formed() {
        let samples = Record::sample_set();
        assert!(!samples.is_empty());
        for record in &samples {
            assert!(!record.title.is_empty());
            assert!(record.has_valid_url());
        }
    }
}
