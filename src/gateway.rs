//! Whole-collection persistence over a [`KeyValueStore`].
//!
//! Three entries live in the store: the notes array as JSON, a seeded flag
//! (`"1"`), and the theme override (`"light"`, `"dark"` or `"null"`). Every
//! save rewrites the full collection; there is no partial update.

use crate::note::{Note, timestamp_string};
use crate::store::{KeyValueStore, StoreError};
use crate::theme::ThemeOverride;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const NOTES_KEY: &str = "@pocket_notes_notes_v1";
pub const SEEDED_KEY: &str = "@pocket_notes_seeded_v1";
pub const THEME_OVERRIDE_KEY: &str = "@pocket_notes_theme_override_v1";

const SEEDED_VALUE: &str = "1";
const NULL_LITERAL: &str = "null";

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("could not encode notes: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result of reading the notes entry without masking corruption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Missing,
    Loaded(Vec<Note>),
    Corrupt { reason: String },
}

impl LoadOutcome {
    pub fn into_notes(self) -> Vec<Note> {
        match self {
            LoadOutcome::Loaded(notes) => notes,
            LoadOutcome::Missing | LoadOutcome::Corrupt { .. } => Vec::new(),
        }
    }
}

pub struct Gateway<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Gateway<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn save(&mut self, notes: &[Note]) -> Result<(), GatewayError> {
        let raw = serde_json::to_string(notes)?;
        if let Err(err) = self.store.set(NOTES_KEY, &raw) {
            warn!(error = %err, count = notes.len(), "saving notes failed");
            return Err(err.into());
        }
        debug!(count = notes.len(), bytes = raw.len(), "saved notes");
        Ok(())
    }

    /// Missing and unparseable data come back as an empty collection; use
    /// [`Gateway::load_checked`] to tell them apart. A failed read is an error.
    pub fn load(&self) -> Result<Vec<Note>, StoreError> {
        match self.load_checked()? {
            LoadOutcome::Corrupt { reason } => {
                warn!(%reason, "stored notes are corrupt; treating as empty");
                Ok(Vec::new())
            }
            outcome => Ok(outcome.into_notes()),
        }
    }

    pub fn load_checked(&self) -> Result<LoadOutcome, StoreError> {
        let Some(raw) = self.store.get(NOTES_KEY)? else {
            debug!("no stored notes");
            return Ok(LoadOutcome::Missing);
        };
        match serde_json::from_str::<Vec<Note>>(&raw) {
            Ok(notes) => {
                debug!(count = notes.len(), "loaded notes");
                Ok(LoadOutcome::Loaded(notes))
            }
            Err(err) => Ok(LoadOutcome::Corrupt { reason: err.to_string() }),
        }
    }

    pub fn clear(&mut self) -> Result<(), GatewayError> {
        self.store.remove(NOTES_KEY)?;
        info!("cleared stored notes");
        Ok(())
    }

    pub fn theme_override(&self) -> Result<Option<ThemeOverride>, StoreError> {
        let raw = self.store.get(THEME_OVERRIDE_KEY)?;
        Ok(match raw.as_deref() {
            None | Some(NULL_LITERAL) => None,
            Some(value) => value.parse().ok(),
        })
    }

    pub fn set_theme_override(&mut self, value: Option<ThemeOverride>) -> Result<(), StoreError> {
        let raw = value.map_or(NULL_LITERAL, ThemeOverride::as_str);
        self.store.set(THEME_OVERRIDE_KEY, raw)
    }

    pub fn has_seeded(&self) -> Result<bool, StoreError> {
        Ok(self.store.get(SEEDED_KEY)?.as_deref() == Some(SEEDED_VALUE))
    }

    pub fn mark_seeded(&mut self) -> Result<(), StoreError> {
        self.store.set(SEEDED_KEY, SEEDED_VALUE)
    }

    /// First-run seeding: write the sample notes once, then read the real
    /// collection on every later call.
    pub fn load_or_seed(&mut self) -> Result<Vec<Note>, GatewayError> {
        if self.has_seeded()? {
            return Ok(self.load()?);
        }
        let samples = sample_notes();
        self.save(&samples)?;
        self.mark_seeded()?;
        info!(count = samples.len(), "seeded sample notes");
        Ok(samples)
    }
}

pub fn sample_notes() -> Vec<Note> {
    let now = timestamp_string();
    let sample = |id: &str, title: &str, body: &str, pinned: bool| Note {
        id: id.to_string(),
        title: title.to_string(),
        body: body.to_string(),
        pinned,
        created_at: now.clone(),
        updated_at: now.clone(),
    };
    vec![
        sample(
            "seed-1",
            "Welcome to Pocket Notes",
            "This is a sample note. Use `add` to create a new note. You can pin, search, edit, and delete notes.",
            true,
        ),
        sample(
            "seed-2",
            "Sorting",
            "List notes pinned-first, newest, oldest, A-Z or Z-A with --sort.",
            false,
        ),
        sample(
            "seed-3",
            "Search is live",
            "In browse mode, type a query and results update once you stop typing (debounced).",
            false,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::NoteDraft;
    use crate::store::MemoryStore;

    fn gateway() -> Gateway<MemoryStore> {
        Gateway::new(MemoryStore::new())
    }

    #[test]
    fn save_then_load_preserves_collection_and_order() {
        let mut gw = gateway();
        let mut pinned = Note::create(NoteDraft::new("b", "second"));
        pinned.pinned = true;
        let notes = vec![
            Note::create(NoteDraft::new("z", "first")),
            pinned,
            Note::create(NoteDraft::new("a", "")),
        ];
        gw.save(&notes).unwrap();
        assert_eq!(gw.load().unwrap(), notes);
        assert_eq!(gw.load_checked().unwrap(), LoadOutcome::Loaded(notes));
    }

    #[test]
    fn missing_and_corrupt_load_as_empty() {
        let mut gw = gateway();
        assert!(gw.load().unwrap().is_empty());
        assert_eq!(gw.load_checked().unwrap(), LoadOutcome::Missing);

        gw.store_mut().set(NOTES_KEY, "{not json").unwrap();
        assert!(gw.load().unwrap().is_empty());
        assert!(matches!(gw.load_checked().unwrap(), LoadOutcome::Corrupt { .. }));

        gw.store_mut().set(NOTES_KEY, "  \n").unwrap();
        assert!(gw.load().unwrap().is_empty());
        assert!(matches!(gw.load_checked().unwrap(), LoadOutcome::Corrupt { .. }));
    }

    #[test]
    fn read_failure_is_an_error_not_an_empty_collection() {
        let mut gw = gateway();
        gw.save(&[Note::create(NoteDraft::new("kept", ""))]).unwrap();
        gw.mark_seeded().unwrap();
        gw.store_mut().set_fail_reads(true);
        assert!(matches!(gw.load(), Err(StoreError::Io(_))));
        assert!(gw.load_checked().is_err());
        assert!(matches!(gw.load_or_seed(), Err(GatewayError::Store(StoreError::Io(_)))));
    }

    #[test]
    fn save_failure_is_reported() {
        let mut gw = gateway();
        gw.store_mut().set_fail_writes(true);
        let err = gw.save(&[Note::create(NoteDraft::new("t", ""))]).unwrap_err();
        assert!(matches!(err, GatewayError::Store(StoreError::Unavailable)));
    }

    #[test]
    fn clear_removes_only_notes() {
        let mut gw = gateway();
        gw.load_or_seed().unwrap();
        gw.clear().unwrap();
        assert!(gw.load().unwrap().is_empty());
        assert!(gw.has_seeded().unwrap());
        assert!(gw.load_or_seed().unwrap().is_empty());
    }

    #[test]
    fn theme_override_null_reads_back_as_none() {
        let mut gw = gateway();
        assert_eq!(gw.theme_override().unwrap(), None);
        gw.set_theme_override(Some(ThemeOverride::Dark)).unwrap();
        assert_eq!(gw.store().raw(THEME_OVERRIDE_KEY), Some("dark"));
        assert_eq!(gw.theme_override().unwrap(), Some(ThemeOverride::Dark));
        gw.set_theme_override(None).unwrap();
        assert_eq!(gw.store().raw(THEME_OVERRIDE_KEY), Some("null"));
        assert_eq!(gw.theme_override().unwrap(), None);
    }

    #[test]
    fn unknown_theme_value_reads_as_none() {
        let mut gw = gateway();
        gw.store_mut().set(THEME_OVERRIDE_KEY, "sepia").unwrap();
        assert_eq!(gw.theme_override().unwrap(), None);
    }

    #[test]
    fn seeds_only_on_first_run() {
        let mut gw = gateway();
        assert!(!gw.has_seeded().unwrap());
        let first = gw.load_or_seed().unwrap();
        assert_eq!(first.len(), 3);
        assert!(first[0].pinned);
        assert_eq!(gw.store().raw(SEEDED_KEY), Some("1"));

        gw.save(&first[1..]).unwrap();
        let second = gw.load_or_seed().unwrap();
        assert_eq!(second, first[1..].to_vec());
    }
}
