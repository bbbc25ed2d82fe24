//! Application layer use cases for the School Bag shell.
//!
//! Use cases here orchestrate the domain types from `schoolbag-core` and talk
//! to the outside world only through traits (`SettingsSource`, `UiDispatcher`,
//! `ViewComposer`), so the file system and the UI thread can be replaced by
//! test doubles.
//!
//! # Sub-modules
//!
//! - **`load_settings`** – The `SettingsSource` seam and the classified
//!   `SettingsError` every loader reports.
//!
//! - **`bootstrap`** – Decides the run mode from the launch arguments, drives
//!   the lifecycle state machine, and hands the result to the UI thread.
//!
//! - **`present`** – The presentation contract: the `ViewComposer` trait, the
//!   single owned `MainWindow` handle and its three tabs, and the
//!   `UiDispatcher` used to reach the UI thread.

pub mod bootstrap;
pub mod load_settings;
pub mod present;
