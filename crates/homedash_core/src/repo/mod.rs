//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the key-value storage contract the site store persists through.
//! - Isolate SQLite details from service orchestration.
//!
//! # Invariants
//! - Repository keys are trimmed; blank keys are rejected.
//! - The SQLite implementation refuses unmigrated connections instead of
//!   failing later mid-write.

pub mod kv_repo;
