//! Use-case services over repository implementations.
//!
//! # Responsibility
//! - Own the in-memory site state and its persistence discipline.
//! - Keep storage-format details out of caller code.
//!
//! # Invariants
//! - Services never bypass repository persistence contracts.
//! - On return from any mutator, in-memory state equals persisted state.

pub mod site_service;
