//! Site data store service.
//!
//! # Responsibility
//! - Load the persisted site state (or defaults) at startup.
//! - Apply shortcut/note/todo mutations with automatic persistence.
//! - Run the validated bulk-recovery reducer used by backup restore.
//!
//! # Invariants
//! - All state lives under the single storage key `"siteData"`.
//! - Mutations persist before the in-memory swap; state and storage never
//!   disagree on return, success or failure.
//! - Recovery is atomic: a payload either applies fully or not at all.

use crate::model::site::{Note, SiteData, SiteValidationError, Todo};
use crate::repo::kv_repo::{KvError, KvRepository};
use log::{error, info, warn};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed storage key for the persisted site state blob.
///
/// Kept verbatim from earlier application versions so existing persisted
/// state remains readable.
pub const SITE_DATA_KEY: &str = "siteData";

pub type SiteResult<T> = Result<T, SiteServiceError>;

/// Service error for site store use-cases.
#[derive(Debug)]
pub enum SiteServiceError {
    /// State failed shape validation before persistence.
    Validation(SiteValidationError),
    /// Storage-layer failure.
    Storage(KvError),
    /// State blob could not be serialized.
    Serialize(serde_json::Error),
    /// Target note does not exist.
    NoteNotFound(String),
    /// Target todo does not exist.
    TodoNotFound(String),
}

impl Display for SiteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "site state serialization failed: {err}"),
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::TodoNotFound(id) => write!(f, "todo not found: {id}"),
        }
    }
}

impl Error for SiteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::NoteNotFound(_) | Self::TodoNotFound(_) => None,
        }
    }
}

impl From<SiteValidationError> for SiteServiceError {
    fn from(value: SiteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<KvError> for SiteServiceError {
    fn from(value: KvError) -> Self {
        Self::Storage(value)
    }
}

/// Known top-level state fields accepted by recovery payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SiteField {
    ShortcutData,
    NoteList,
    TodoList,
}

impl SiteField {
    /// Serialized payload key for this field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ShortcutData => "shortcutData",
            Self::NoteList => "noteList",
            Self::TodoList => "todoList",
        }
    }
}

/// Recovery failure, naming the offending field where one exists.
#[derive(Debug)]
pub enum RecoverError {
    /// Payload root is not a JSON object.
    NotAnObject,
    /// Payload carries a key the state does not define.
    UnknownField(String),
    /// A known field failed deserialization or validation.
    InvalidField { field: SiteField, reason: String },
    /// Persisting the recovered state failed; nothing was applied.
    Storage(KvError),
    /// Recovered state could not be serialized; nothing was applied.
    Serialize(serde_json::Error),
}

impl Display for RecoverError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnObject => write!(f, "recovery payload must be a JSON object"),
            Self::UnknownField(key) => write!(f, "recovery payload has unknown field: {key}"),
            Self::InvalidField { field, reason } => {
                write!(f, "recovery field {} is invalid: {reason}", field.as_str())
            }
            Self::Storage(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "recovered state serialization failed: {err}"),
        }
    }
}

impl Error for RecoverError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Serialize(err) => Some(err),
            _ => None,
        }
    }
}

/// Successful recovery summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoverReport {
    /// Fields the payload carried and the reducer applied, in canonical
    /// field order.
    pub applied: Vec<SiteField>,
}

/// Persisted site state store over an injected storage capability.
pub struct SiteDataService<R: KvRepository> {
    repo: R,
    state: SiteData,
}

impl<R: KvRepository> SiteDataService<R> {
    /// Loads persisted state, falling back to defaults.
    ///
    /// A missing value yields the default state. A present but corrupt or
    /// invalid blob is logged and replaced by the default state rather than
    /// failing startup; storage transport errors still propagate.
    pub fn load(repo: R, default_shortcut: Value) -> SiteResult<Self> {
        let raw = repo.get(SITE_DATA_KEY)?;
        let state = match raw {
            Some(blob) => match parse_state(&blob) {
                Ok(state) => {
                    info!("event=site_load module=service status=ok source=storage");
                    state
                }
                Err(reason) => {
                    warn!(
                        "event=site_load module=service status=warn error_code=corrupt_state error={reason}"
                    );
                    SiteData::with_default_shortcut(default_shortcut)
                }
            },
            None => {
                info!("event=site_load module=service status=ok source=default");
                SiteData::with_default_shortcut(default_shortcut)
            }
        };

        Ok(Self { repo, state })
    }

    /// Current in-memory state.
    pub fn state(&self) -> &SiteData {
        &self.state
    }

    /// Replaces the shortcut configuration unconditionally and persists.
    pub fn set_shortcut_data(&mut self, value: Value) -> SiteResult<()> {
        let mut next = self.state.clone();
        next.shortcut_data = value;
        self.commit(next)
    }

    /// Appends a new note and persists. Returns the created entry.
    pub fn add_note(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> SiteResult<Note> {
        let note = Note::new(title, content);
        let mut next = self.state.clone();
        next.note_list.push(note.clone());
        self.commit(next)?;
        Ok(note)
    }

    /// Removes one note by id and persists.
    pub fn remove_note(&mut self, id: &str) -> SiteResult<()> {
        let mut next = self.state.clone();
        let before = next.note_list.len();
        next.note_list.retain(|note| note.id != id);
        if next.note_list.len() == before {
            return Err(SiteServiceError::NoteNotFound(id.to_string()));
        }
        self.commit(next)
    }

    /// Replaces the whole note list and persists.
    pub fn replace_note_list(&mut self, notes: Vec<Note>) -> SiteResult<()> {
        let mut next = self.state.clone();
        next.note_list = notes;
        self.commit(next)
    }

    /// Appends a new open to-do and persists. Returns the created entry.
    pub fn add_todo(&mut self, text: impl Into<String>) -> SiteResult<Todo> {
        let todo = Todo::new(text);
        let mut next = self.state.clone();
        next.todo_list.push(todo.clone());
        self.commit(next)?;
        Ok(todo)
    }

    /// Sets one to-do's completion flag and persists.
    pub fn set_todo_completed(&mut self, id: &str, completed: bool) -> SiteResult<()> {
        let mut next = self.state.clone();
        let Some(todo) = next.todo_list.iter_mut().find(|todo| todo.id == id) else {
            return Err(SiteServiceError::TodoNotFound(id.to_string()));
        };
        todo.completed = completed;
        self.commit(next)
    }

    /// Removes one to-do by id and persists.
    pub fn remove_todo(&mut self, id: &str) -> SiteResult<()> {
        let mut next = self.state.clone();
        let before = next.todo_list.len();
        next.todo_list.retain(|todo| todo.id != id);
        if next.todo_list.len() == before {
            return Err(SiteServiceError::TodoNotFound(id.to_string()));
        }
        self.commit(next)
    }

    /// Replaces the whole to-do list and persists.
    pub fn replace_todo_list(&mut self, todos: Vec<Todo>) -> SiteResult<()> {
        let mut next = self.state.clone();
        next.todo_list = todos;
        self.commit(next)
    }

    /// Applies a backup payload onto the state as one atomic step.
    ///
    /// Each known top-level field present in the payload replaces its state
    /// field wholesale. Unknown keys, malformed fields, and persistence
    /// failures abort the whole recovery with memory and storage untouched.
    ///
    /// # Contract
    /// - Payload root must be a JSON object.
    /// - Accepted keys: `shortcutData`, `noteList`, `todoList`.
    /// - Returns the applied fields in canonical order.
    pub fn recover_site_data(&mut self, payload: &Value) -> Result<RecoverReport, RecoverError> {
        let result = self.apply_recovery(payload);
        match &result {
            Ok(report) => {
                let fields = report
                    .applied
                    .iter()
                    .map(|field| field.as_str())
                    .collect::<Vec<_>>()
                    .join(",");
                info!("event=site_recover module=service status=ok fields={fields}");
            }
            Err(err) => {
                error!("event=site_recover module=service status=error error={err}");
            }
        }
        result
    }

    fn apply_recovery(&mut self, payload: &Value) -> Result<RecoverReport, RecoverError> {
        let object = payload.as_object().ok_or(RecoverError::NotAnObject)?;

        let mut candidate = self.state.clone();
        let mut applied = Vec::new();
        for (key, value) in object {
            match key.as_str() {
                "shortcutData" => {
                    candidate.shortcut_data = value.clone();
                    applied.push(SiteField::ShortcutData);
                }
                "noteList" => {
                    candidate.note_list = serde_json::from_value(value.clone()).map_err(|err| {
                        RecoverError::InvalidField {
                            field: SiteField::NoteList,
                            reason: err.to_string(),
                        }
                    })?;
                    applied.push(SiteField::NoteList);
                }
                "todoList" => {
                    candidate.todo_list = serde_json::from_value(value.clone()).map_err(|err| {
                        RecoverError::InvalidField {
                            field: SiteField::TodoList,
                            reason: err.to_string(),
                        }
                    })?;
                    applied.push(SiteField::TodoList);
                }
                other => return Err(RecoverError::UnknownField(other.to_string())),
            }
        }

        candidate.validate().map_err(|err| {
            let field = match err {
                SiteValidationError::BlankNoteId | SiteValidationError::DuplicateNoteId(_) => {
                    SiteField::NoteList
                }
                SiteValidationError::BlankTodoId | SiteValidationError::DuplicateTodoId(_) => {
                    SiteField::TodoList
                }
            };
            RecoverError::InvalidField {
                field,
                reason: err.to_string(),
            }
        })?;

        let blob = serde_json::to_string(&candidate).map_err(RecoverError::Serialize)?;
        self.repo
            .set(SITE_DATA_KEY, &blob)
            .map_err(RecoverError::Storage)?;
        self.state = candidate;

        applied.sort();
        Ok(RecoverReport { applied })
    }

    fn commit(&mut self, next: SiteData) -> SiteResult<()> {
        next.validate()?;
        let blob = serde_json::to_string(&next).map_err(SiteServiceError::Serialize)?;
        self.repo.set(SITE_DATA_KEY, &blob)?;
        self.state = next;
        Ok(())
    }
}

fn parse_state(blob: &str) -> Result<SiteData, String> {
    let state: SiteData = serde_json::from_str(blob).map_err(|err| err.to_string())?;
    state.validate().map_err(|err| err.to_string())?;
    Ok(state)
}
