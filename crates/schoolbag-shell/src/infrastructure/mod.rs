//! Infrastructure layer for the School Bag shell.
//!
//! Contains OS-facing adapters: the settings file loader and the UI bridge
//! (the dedicated UI event thread plus the console window composer).
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `schoolbag_core`, but MUST NOT be imported by the `application` or domain
//! layers.

pub mod storage;
pub mod ui_bridge;
