//! Domain entities for the School Bag shell.
//!
//! Domain code holds the rules that make the shell what it is and nothing
//! else: no file handles, no threads, no widgets. Outer layers (the
//! `schoolbag-shell` application and infrastructure modules) depend on these
//! types; the dependency never points the other way.

/// Startup state machine gating presentation of the main window.
pub mod lifecycle;

/// Settings record and its schema-validated decode step.
///
/// See [`settings::SettingsModel`] for the main type.
pub mod settings;
