//! In-memory note collection for the active screen, written through to the
//! gateway after every mutation.
//!
//! Mutations land in memory first and are then saved. A failed save is
//! returned to the caller but memory is not rolled back, so the two can
//! diverge until the next successful save. Concurrent writers are not
//! coordinated: the last save wins.

use crate::gateway::{Gateway, GatewayError};
use crate::list::{SortMode, derive};
use crate::note::{Note, NoteDraft, ValidationError};
use crate::store::KeyValueStore;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("Note {0} not found")]
    NotFound(String),
    #[error("Failed to load notes: {0}")]
    Load(#[source] GatewayError),
    #[error("Failed to save notes: {0}")]
    Persist(#[from] GatewayError),
}

#[derive(Debug, Clone)]
struct Deleted {
    note: Note,
    index: usize,
}

pub struct NotesSession<S: KeyValueStore> {
    gateway: Gateway<S>,
    notes: Vec<Note>,
    deleted: Option<Deleted>,
}

impl<S: KeyValueStore> NotesSession<S> {
    /// Load the collection, writing the sample notes first on a fresh store
    /// when `seed` is set. A store that cannot be read is an error, so stored
    /// notes are never replaced by an empty collection.
    pub fn open(mut gateway: Gateway<S>, seed: bool) -> Result<Self, SessionError> {
        let notes = if seed {
            gateway.load_or_seed()
        } else {
            gateway.load().map_err(GatewayError::from)
        }
        .map_err(SessionError::Load)?;
        debug!(count = notes.len(), "opened notes session");
        Ok(Self { gateway, notes, deleted: None })
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn gateway(&self) -> &Gateway<S> {
        &self.gateway
    }

    pub fn gateway_mut(&mut self) -> &mut Gateway<S> {
        &mut self.gateway
    }

    pub fn find(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn visible(&self, query: &str, sort: SortMode) -> Vec<Note> {
        derive(&self.notes, query, sort)
    }

    pub fn can_undo(&self) -> bool {
        self.deleted.is_some()
    }

    pub fn add(&mut self, draft: NoteDraft) -> Result<Note, SessionError> {
        draft.validate()?;
        self.deleted = None;
        let note = Note::create(draft);
        self.notes.insert(0, note.clone());
        self.persist()?;
        info!(id = %note.id, "added note");
        Ok(note)
    }

    pub fn edit(&mut self, id: &str, draft: NoteDraft) -> Result<Note, SessionError> {
        draft.validate()?;
        let idx = self.position(id)?;
        self.deleted = None;
        self.notes[idx].apply(draft);
        let note = self.notes[idx].clone();
        self.persist()?;
        Ok(note)
    }

    pub fn toggle_pin(&mut self, id: &str) -> Result<Note, SessionError> {
        let idx = self.position(id)?;
        self.deleted = None;
        self.notes[idx].toggle_pin();
        let note = self.notes[idx].clone();
        self.persist()?;
        Ok(note)
    }

    /// Remove a note and hold it for a single [`NotesSession::undo_delete`].
    pub fn delete(&mut self, id: &str) -> Result<Note, SessionError> {
        let index = self.position(id)?;
        let note = self.notes.remove(index);
        self.deleted = Some(Deleted { note: note.clone(), index });
        self.persist()?;
        info!(id = %note.id, "deleted note");
        Ok(note)
    }

    /// Put the last deleted note back where it was. Returns `None` when there
    /// is nothing to undo.
    pub fn undo_delete(&mut self) -> Result<Option<Note>, SessionError> {
        let Some(Deleted { note, index }) = self.deleted.take() else {
            return Ok(None);
        };
        let index = index.min(self.notes.len());
        self.notes.insert(index, note.clone());
        self.persist()?;
        Ok(Some(note))
    }

    /// Reload from the store. On a failed read the current notes stay.
    pub fn refresh(&mut self) -> Result<(), SessionError> {
        let notes = self.gateway.load().map_err(|err| SessionError::Load(err.into()))?;
        self.deleted = None;
        self.notes = notes;
        Ok(())
    }

    pub fn clear_all(&mut self) -> Result<(), SessionError> {
        self.deleted = None;
        self.notes.clear();
        self.gateway.clear()?;
        Ok(())
    }

    fn position(&self, id: &str) -> Result<usize, SessionError> {
        self.notes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    fn persist(&mut self) -> Result<(), SessionError> {
        self.gateway.save(&self.notes)?;
        Ok(())
    }
}
