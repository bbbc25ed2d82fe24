//! Headless console composer.
//!
//! Builds the standard three-tab [`MainWindow`] and renders it as plain text
//! to any [`Write`] sink (stdout in the shipped binary). Used when the shell
//! runs without a graphical toolkit, and by tests that need to see what the
//! user would see.
//!
//! Example output:
//!
//! ```text
//! ==== Intelligente Schultasche ====
//! [ Pack | Trim | Manage ]
//!
//! -- Pack --
//!   (nothing to show yet)
//! -- Trim --
//!   (nothing to show yet)
//! -- Manage --
//!   Manage your data
//!   height:   170
//!   weight:   60
//!   birthday: 2000-01-01
//! ```

use std::io::{self, Write};

use schoolbag_core::SettingsModel;

use crate::application::present::{ComposeError, MainWindow, Tab, ViewComposer};

/// [`ViewComposer`] that renders the window as text.
pub struct ConsoleComposer<W: Write + Send + 'static> {
    out: W,
}

impl ConsoleComposer<io::Stdout> {
    /// Composer writing to the process's standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send + 'static> ConsoleComposer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send + 'static> ViewComposer for ConsoleComposer<W> {
    fn compose(
        &mut self,
        title: &str,
        settings: Option<&SettingsModel>,
    ) -> Result<MainWindow, ComposeError> {
        let window = MainWindow::standard(title, settings);
        render(&window, &mut self.out)?;
        Ok(window)
    }
}

/// Writes a text rendering of `window` to `out`.
pub fn render<W: Write>(window: &MainWindow, out: &mut W) -> io::Result<()> {
    writeln!(out, "==== {} ====", window.title())?;
    writeln!(out, "[ {} ]", window.tab_labels().join(" | "))?;
    writeln!(out)?;

    for tab in window.tabs() {
        writeln!(out, "-- {} --", tab.label())?;
        match tab {
            Tab::Pack | Tab::Trim => writeln!(out, "  (nothing to show yet)")?,
            Tab::Manage(view) => {
                writeln!(out, "  Manage your data")?;
                writeln!(out, "  height:   {}", view.height())?;
                writeln!(out, "  weight:   {}", view.weight())?;
                writeln!(out, "  birthday: {}", view.birthday())?;
                if !view.has_settings() {
                    writeln!(out, "  (no settings loaded)")?;
                }
            }
        }
    }
    out.flush()
}
