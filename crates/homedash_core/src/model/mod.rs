//! Persisted site state model.
//!
//! # Responsibility
//! - Define the canonical state shape the start page persists and restores.
//! - Keep serialized field names compatible with previously written blobs.
//!
//! # Invariants
//! - Note/todo ids are non-blank and unique within their list.
//! - `shortcut_data` stays opaque to core; the UI owns its shape.

pub mod site;
