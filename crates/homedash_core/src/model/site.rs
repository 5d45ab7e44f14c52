//! Site data domain model.
//!
//! # Responsibility
//! - Define `SiteData` and its note/todo entries.
//! - Validate id shape before any persistence write.
//!
//! # Invariants
//! - Serialized names are camelCase (`shortcutData`, `noteList`, `todoList`)
//!   to stay readable against blobs written by earlier application versions.
//! - Every entry id is non-blank and unique within its own list.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// One sticky note shown on the start page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Stable entry id in string form.
    pub id: String,
    pub title: String,
    pub content: String,
}

impl Note {
    /// Creates a note with a generated v4 id.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            content: content.into(),
        }
    }
}

/// One to-do entry shown on the start page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Stable entry id in string form.
    pub id: String,
    pub text: String,
    pub completed: bool,
}

impl Todo {
    /// Creates an open to-do with a generated v4 id.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            completed: false,
        }
    }
}

/// Canonical persisted application state.
///
/// `shortcut_data` is an opaque JSON value owned by the UI layer; core stores
/// and restores it without interpreting its shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteData {
    pub shortcut_data: Value,
    pub note_list: Vec<Note>,
    pub todo_list: Vec<Todo>,
}

impl SiteData {
    /// Creates the initial state around a caller-supplied shortcut default.
    pub fn with_default_shortcut(shortcut_data: Value) -> Self {
        Self {
            shortcut_data,
            note_list: Vec::new(),
            todo_list: Vec::new(),
        }
    }

    /// Checks id shape across both lists.
    ///
    /// # Errors
    /// - `BlankNoteId` / `BlankTodoId` for empty or whitespace-only ids.
    /// - `DuplicateNoteId` / `DuplicateTodoId` when an id repeats in its list.
    pub fn validate(&self) -> Result<(), SiteValidationError> {
        let mut note_ids = BTreeSet::new();
        for note in &self.note_list {
            if note.id.trim().is_empty() {
                return Err(SiteValidationError::BlankNoteId);
            }
            if !note_ids.insert(note.id.as_str()) {
                return Err(SiteValidationError::DuplicateNoteId(note.id.clone()));
            }
        }

        let mut todo_ids = BTreeSet::new();
        for todo in &self.todo_list {
            if todo.id.trim().is_empty() {
                return Err(SiteValidationError::BlankTodoId);
            }
            if !todo_ids.insert(todo.id.as_str()) {
                return Err(SiteValidationError::DuplicateTodoId(todo.id.clone()));
            }
        }

        Ok(())
    }
}

/// Shape violations detected before persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteValidationError {
    BlankNoteId,
    BlankTodoId,
    DuplicateNoteId(String),
    DuplicateTodoId(String),
}

impl Display for SiteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankNoteId => write!(f, "note id must not be blank"),
            Self::BlankTodoId => write!(f, "todo id must not be blank"),
            Self::DuplicateNoteId(id) => write!(f, "duplicate note id: {id}"),
            Self::DuplicateTodoId(id) => write!(f, "duplicate todo id: {id}"),
        }
    }
}

impl Error for SiteValidationError {}
