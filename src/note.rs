use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error;

pub const TITLE_MAX_CHARS: usize = 100;
pub const BODY_MAX_CHARS: usize = 5000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub body: String,
    pub pinned: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// User input for the add and edit flows, checked by [`NoteDraft::validate`]
/// before anything touches storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title is required")]
    TitleRequired,
    #[error("Title too long (max 100)")]
    TitleTooLong,
    #[error("Body too long (max 5000)")]
    BodyTooLong,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self { title: title.into(), body: body.into() }
    }

    /// Length limits apply to the title as typed; emptiness to the trimmed
    /// title.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::TitleRequired);
        }
        if self.title.chars().count() > TITLE_MAX_CHARS {
            return Err(ValidationError::TitleTooLong);
        }
        if self.body.chars().count() > BODY_MAX_CHARS {
            return Err(ValidationError::BodyTooLong);
        }
        Ok(())
    }
}

impl Note {
    /// Build a fresh unpinned note. Callers validate the draft first.
    pub fn create(draft: NoteDraft) -> Self {
        let now = timestamp_string();
        Self {
            id: new_id(),
            title: draft.title.trim().to_string(),
            body: draft.body,
            pinned: false,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    pub fn apply(&mut self, draft: NoteDraft) {
        self.title = draft.title.trim().to_string();
        self.body = draft.body;
        self.touch();
    }

    pub fn toggle_pin(&mut self) {
        self.pinned = !self.pinned;
        self.touch();
    }

    /// Refresh `updated_at`, never letting it fall behind `created_at`.
    pub fn touch(&mut self) {
        let now = timestamp_string();
        self.updated_at = if cmp_timestamps(&now, &self.created_at) == Ordering::Less {
            self.created_at.clone()
        } else {
            now
        };
    }

    pub fn matches(&self, query_lower: &str) -> bool {
        query_lower.is_empty()
            || self.title.to_lowercase().contains(query_lower)
            || self.body.to_lowercase().contains(query_lower)
    }
}

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2025-12-09T09:05:00.000Z`.
pub fn timestamp_string() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_timestamp(ts: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(ts.trim()).ok()
}

/// Malformed timestamps sort before every well-formed one.
pub fn cmp_timestamps(a: &str, b: &str) -> Ordering {
    match (parse_timestamp(a), parse_timestamp(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_trims_title_and_starts_unpinned() {
        let note = Note::create(NoteDraft::new("  Milk  ", "buy milk"));
        assert_eq!(note.title, "Milk");
        assert_eq!(note.body, "buy milk");
        assert!(!note.pinned);
        assert_eq!(note.created_at, note.updated_at);
        assert!(parse_timestamp(&note.created_at).is_some());
    }

    #[test]
    fn ids_are_unique() {
        let a = Note::create(NoteDraft::new("a", ""));
        let b = Note::create(NoteDraft::new("a", ""));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn validation_rejects_blank_and_oversized_input() {
        assert_eq!(
            NoteDraft::new("   ", "body").validate(),
            Err(ValidationError::TitleRequired)
        );
        assert_eq!(
            NoteDraft::new("x".repeat(101), "").validate(),
            Err(ValidationError::TitleTooLong)
        );
        assert!(NoteDraft::new("x".repeat(100), "").validate().is_ok());
        assert_eq!(
            NoteDraft::new("ok", "y".repeat(5001)).validate(),
            Err(ValidationError::BodyTooLong)
        );
        assert!(NoteDraft::new("ok", "y".repeat(5000)).validate().is_ok());
    }

    #[test]
    fn title_limit_counts_characters_not_bytes() {
        let title = "é".repeat(100);
        assert!(title.len() > 100);
        assert!(NoteDraft::new(title, "").validate().is_ok());
    }

    #[test]
    fn touch_never_moves_before_created() {
        let mut note = Note::create(NoteDraft::new("t", ""));
        note.created_at = "2999-01-01T00:00:00.000Z".to_string();
        note.touch();
        assert_eq!(note.updated_at, note.created_at);
    }

    #[test]
    fn toggle_pin_flips_and_refreshes() {
        let mut note = Note::create(NoteDraft::new("t", ""));
        note.updated_at = "2000-01-01T00:00:00.000Z".to_string();
        note.created_at = note.updated_at.clone();
        note.toggle_pin();
        assert!(note.pinned);
        assert_eq!(
            cmp_timestamps(&note.updated_at, "2000-01-01T00:00:00.000Z"),
            Ordering::Greater
        );
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let note = Note::create(NoteDraft::new("t", "b"));
        let json = serde_json::to_string(&note).unwrap();
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"updatedAt\""));
        assert!(json.contains("\"pinned\":false"));
    }

    #[test]
    fn cmp_timestamps_orders_malformed_first() {
        assert_eq!(cmp_timestamps("garbage", "2024-01-01T00:00:00Z"), Ordering::Less);
        assert_eq!(
            cmp_timestamps("2024-01-02T00:00:00Z", "2024-01-01T23:00:00+02:00"),
            Ordering::Greater
        );
        assert_eq!(cmp_timestamps("", "nope"), Ordering::Equal);
    }
}
