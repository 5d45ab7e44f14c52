//! Memorial-day lookup and its UI effect orchestration.
//!
//! # Responsibility
//! - Keep the compiled-in memorial calendar and its date-key rules.
//! - Drive page-grayscale and notification effects through an injected seam.
//!
//! # Invariants
//! - Date keys are literal un-padded `"{month}.{day}"` strings.
//! - The lookup itself is pure; all side effects go through `UiEffects`.

pub mod calendar;
pub mod checker;
pub mod effects;
