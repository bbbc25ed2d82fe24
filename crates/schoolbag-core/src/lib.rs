//! # schoolbag-core
//!
//! Shared domain library for the School Bag desktop shell.
//!
//! This crate owns the two pieces of the shell that carry real rules:
//!
//! - **`domain::settings`** – The validated in-memory settings record
//!   ([`SettingsModel`]) and the fixed-shape decode step
//!   ([`SettingsDocument`]) that turns a parsed JSON object into it.
//!
//! - **`domain::lifecycle`** – The startup state machine
//!   ([`LifecycleState`]) that decides whether the main window may be shown.
//!
//! It has no dependencies on the file system, threads, or UI code, so every
//! rule here can be tested in isolation.

pub mod domain;

// Re-export the most-used types at the crate root so callers can write
// `schoolbag_core::SettingsModel` instead of the full module path.
pub use domain::lifecycle::{LifecycleError, LifecycleState};
pub use domain::settings::{
    FieldError, SettingsDocument, SettingsField, SettingsModel, BIRTHDAY_FORMAT,
};
