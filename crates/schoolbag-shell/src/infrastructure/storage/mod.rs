//! Storage infrastructure: settings file access.
//!
//! This module is the only place the shell touches the file system. The
//! `settings_file` sub-module reads the JSON settings file named on the
//! command line and turns it into a validated `SettingsModel`.
//!
//! Settings are read-only: nothing here writes back to disk.

pub mod settings_file;
