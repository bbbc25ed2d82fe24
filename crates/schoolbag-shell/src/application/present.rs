//! Presentation contract between the bootstrap and the UI.
//!
//! The main window is one explicitly owned [`MainWindow`] value. It is built
//! by a [`ViewComposer`] on the UI thread and handed to the [`UiContext`] that
//! the UI thread owns; nothing else in the process holds a reference to it.
//!
//! ```text
//! bootstrap thread                     UI thread
//! ────────────────                     ─────────
//! present(title)   ──invoke_later──►  task(&mut UiContext)
//!                                       └─ composer.compose(title, settings)
//!                                            └─ UiContext::install_window
//!   waits for reply ◄── Result ───────┘
//! ```
//!
//! The window always has three tabs in this order: "Pack", "Trim", "Manage".
//! Only "Manage" receives data: a read-only [`ManageView`] of the three
//! settings fields, with empty strings when no settings were loaded.

use std::fmt;

use schoolbag_core::{SettingsModel, BIRTHDAY_FORMAT};
use thiserror::Error;

// ── Window model ──────────────────────────────────────────────────────────────

/// Read-only view of the settings shown on the "Manage" tab.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManageView {
    height: String,
    weight: String,
    birthday: String,
}

impl ManageView {
    /// Builds the view from the loaded settings, or an empty view when none
    /// were loaded.
    pub fn from_settings(settings: Option<&SettingsModel>) -> Self {
        match settings {
            Some(model) => Self {
                height: model.height().to_string(),
                weight: model.weight().to_string(),
                birthday: model.birthday().format(BIRTHDAY_FORMAT).to_string(),
            },
            None => Self::default(),
        }
    }

    pub fn height(&self) -> &str {
        &self.height
    }

    pub fn weight(&self) -> &str {
        &self.weight
    }

    pub fn birthday(&self) -> &str {
        &self.birthday
    }

    /// `false` when the shell started without settings.
    pub fn has_settings(&self) -> bool {
        !(self.height.is_empty() && self.weight.is_empty() && self.birthday.is_empty())
    }
}

/// One section of the main window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tab {
    /// Packing assistant (placeholder).
    Pack,
    /// Trimming assistant (placeholder).
    Trim,
    /// Settings overview.
    Manage(ManageView),
}

impl Tab {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pack => "Pack",
            Self::Trim => "Trim",
            Self::Manage(_) => "Manage",
        }
    }
}

/// The single top-level window of the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainWindow {
    title: String,
    tabs: Vec<Tab>,
}

impl MainWindow {
    /// Builds the standard three-tab window.
    pub fn standard(title: &str, settings: Option<&SettingsModel>) -> Self {
        Self {
            title: title.to_string(),
            tabs: vec![
                Tab::Pack,
                Tab::Trim,
                Tab::Manage(ManageView::from_settings(settings)),
            ],
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn tab_labels(&self) -> Vec<&'static str> {
        self.tabs.iter().map(Tab::label).collect()
    }

    /// Returns the "Manage" tab's view, if the window has one.
    pub fn manage(&self) -> Option<&ManageView> {
        self.tabs.iter().find_map(|tab| match tab {
            Tab::Manage(view) => Some(view),
            _ => None,
        })
    }
}

// ── Composer contract ─────────────────────────────────────────────────────────

/// Error type for window composition.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// Writing the window to its output failed.
    #[error("failed to render main window: {0}")]
    Render(#[from] std::io::Error),

    /// A main window has already been installed in this UI context.
    #[error("main window is already open")]
    WindowAlreadyOpen,
}

/// Builds the main window from a title and the (optional) settings.
///
/// `compose` is only ever called on the UI thread, exactly once per run.
pub trait ViewComposer: Send + 'static {
    fn compose(
        &mut self,
        title: &str,
        settings: Option<&SettingsModel>,
    ) -> Result<MainWindow, ComposeError>;
}

// ── UI thread access ──────────────────────────────────────────────────────────

/// State owned by the UI thread.
///
/// Holds at most one [`MainWindow`]. Constructed by the UI event loop on its
/// own thread and passed by `&mut` to every queued task.
#[derive(Debug, Default)]
pub struct UiContext {
    window: Option<MainWindow>,
}

impl UiContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the main window.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::WindowAlreadyOpen`] if a window is already
    /// installed; the existing window is kept.
    pub fn install_window(&mut self, window: MainWindow) -> Result<(), ComposeError> {
        if self.window.is_some() {
            return Err(ComposeError::WindowAlreadyOpen);
        }
        self.window = Some(window);
        Ok(())
    }

    pub fn window(&self) -> Option<&MainWindow> {
        self.window.as_ref()
    }

    /// Removes and returns the window (used when the UI thread shuts down).
    pub fn take_window(&mut self) -> Option<MainWindow> {
        self.window.take()
    }
}

/// A unit of work that must run on the UI thread.
pub type UiTask = Box<dyn FnOnce(&mut UiContext) + Send + 'static>;

/// Error type for UI dispatch.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The UI event loop has stopped and accepts no more tasks.
    #[error("UI event loop has stopped")]
    Closed,

    /// The UI thread could not be started.
    #[error("failed to start UI event loop: {0}")]
    Spawn(#[source] std::io::Error),

    /// A task panicked and took the UI thread down with it.
    #[error("UI event loop thread panicked")]
    Panicked,
}

/// Trait abstracting access to the UI thread.
///
/// The production implementation is
/// `infrastructure::ui_bridge::event_loop::UiEventLoop`.
pub trait UiDispatcher {
    /// Queues `task` to run on the UI thread after all previously queued tasks.
    fn invoke_later(&self, task: UiTask) -> Result<(), DispatchError>;
}

impl fmt::Display for MainWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.title, self.tab_labels().join(" | "))
    }
}
