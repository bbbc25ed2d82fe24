//! UI bridge: the dedicated UI thread and the window composer.
//!
//! - **`event_loop`** – Spawns the single `ui-event-loop` thread and
//!   implements `UiDispatcher` for it. Every window object is created there.
//! - **`console`** – `ConsoleComposer`, the shipped `ViewComposer`: builds the
//!   Pack / Trim / Manage window and renders it as text.
//!
//! The application layer only sees the `UiDispatcher` and `ViewComposer`
//! traits; it must NOT import this module.

pub mod console;
pub mod event_loop;

pub use console::ConsoleComposer;
pub use event_loop::{UiEventLoop, UI_THREAD_NAME};
