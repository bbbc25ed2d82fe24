//! ApplicationBootstrap: decides the run mode and drives startup to completion.
//!
//! # Run modes
//!
//! | Launch arguments                      | Load result          | Outcome                  |
//! |---------------------------------------|----------------------|--------------------------|
//! | no settings path                      | (loader not called)  | `StartedWithoutSettings` |
//! | empty path / not a regular file       | (loader not called)  | `Aborted(InvalidArgument)` |
//! | existing file                         | `Ok(model)`          | `Started(model)`         |
//! | existing file, `Lenient`              | `Err(FileNotFound)`  | `StartedWithoutSettings` |
//! | existing file, any other combination  | `Err(e)`             | `Aborted(e)`             |
//!
//! The `FileNotFound` row covers the race where the file passes the
//! pre-check and disappears before it is read.
//!
//! # Presentation
//!
//! After `run`, [`ApplicationBootstrap::present`] moves the composer and the
//! settings loaded by that run into one task on the UI thread, then waits for
//! the task to report whether the window was installed. An aborted run never
//! reaches the dispatcher, so no partial window can appear.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

use schoolbag_core::{LifecycleError, LifecycleState, SettingsModel};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::application::load_settings::{ErrorKind, SettingsError, SettingsSource};
use crate::application::present::{
    ComposeError, DispatchError, UiContext, UiDispatcher, ViewComposer,
};

/// Default main window title.
pub const DEFAULT_TITLE: &str = "Intelligente Schultasche";

/// How load failures after a successful path pre-check are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPolicy {
    /// Any load failure aborts the run.
    Strict,
    /// A `FileNotFound` at load time degrades to a run without settings;
    /// every other failure still aborts.
    #[default]
    Lenient,
}

impl LoadPolicy {
    /// Returns `true` if `err` should be absorbed rather than abort the run.
    pub fn tolerates(self, err: &SettingsError) -> bool {
        matches!(
            (self, err),
            (LoadPolicy::Lenient, SettingsError::FileNotFound { .. })
        )
    }
}

/// Arguments the shell was launched with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchArgs {
    /// Settings file to load, if one was supplied.
    pub settings_path: Option<PathBuf>,
}

impl LaunchArgs {
    pub fn without_settings() -> Self {
        Self::default()
    }

    pub fn with_settings(path: impl Into<PathBuf>) -> Self {
        Self {
            settings_path: Some(path.into()),
        }
    }
}

/// Complete runtime configuration of the shell.
///
/// Built once at startup from the command line (see `main.rs`); the
/// application layer never reads the environment itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub launch: LaunchArgs,
    pub policy: LoadPolicy,
    pub title: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            launch: LaunchArgs::default(),
            policy: LoadPolicy::default(),
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

/// Fatal startup error.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The settings path argument was rejected before any load was attempted.
    #[error("invalid settings path argument {}: {reason}", .path.display())]
    InvalidArgument { path: PathBuf, reason: String },

    /// The settings loader failed and the policy treats it as fatal.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// The bootstrap was driven out of order (e.g. `run` called twice).
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

impl BootstrapError {
    /// Returns the operator-facing classification, or `None` for misuse of
    /// the bootstrap itself.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::InvalidArgument { .. } => Some(ErrorKind::InvalidArgument),
            Self::Settings(err) => Some(err.kind()),
            Self::Lifecycle(_) => None,
        }
    }

    /// One-line message naming the failure kind and the offending path.
    pub fn diagnostic(&self) -> String {
        match self.kind() {
            Some(kind) => format!("{kind}: {self}"),
            None => self.to_string(),
        }
    }
}

/// Result of [`ApplicationBootstrap::run`].
#[derive(Debug)]
pub enum Outcome {
    /// Settings loaded; the window is seeded with them.
    Started(SettingsModel),
    /// No settings available; the window shows empty fields.
    StartedWithoutSettings,
    /// Startup failed; no window may be shown.
    Aborted(BootstrapError),
}

impl Outcome {
    pub fn settings(&self) -> Option<&SettingsModel> {
        match self {
            Outcome::Started(model) => Some(model),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&BootstrapError> {
        match self {
            Outcome::Aborted(err) => Some(err),
            _ => None,
        }
    }
}

/// Error type for [`ApplicationBootstrap::present`].
#[derive(Debug, Error)]
pub enum PresentError {
    /// The run did not reach `Ready`.
    #[error("main window cannot be presented in lifecycle state {state:?}")]
    NotPresentable { state: LifecycleState },

    #[error("main window has already been presented")]
    AlreadyPresented,

    /// The composer or the window installation failed on the UI thread.
    #[error(transparent)]
    Compose(#[from] ComposeError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// Orchestrates argument handling, settings loading, and the hand-off to the
/// UI thread.
pub struct ApplicationBootstrap<S: SettingsSource> {
    source: S,
    policy: LoadPolicy,
    state: LifecycleState,
    settings: Option<SettingsModel>,
    presented: bool,
}

impl<S: SettingsSource> ApplicationBootstrap<S> {
    pub fn new(source: S, policy: LoadPolicy) -> Self {
        Self {
            source,
            policy,
            state: LifecycleState::Uninitialized,
            settings: None,
            presented: false,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Resolves the settings path, loads it, and decides the run mode.
    ///
    /// Loading is synchronous and completes before this returns.
    pub fn run(&mut self, args: &LaunchArgs) -> Outcome {
        match self.drive(args) {
            Ok(outcome) => outcome,
            Err(err) => {
                if self.state.can_transition_to(LifecycleState::Failed) {
                    self.state = LifecycleState::Failed;
                }
                error!(kind = ?err.kind(), "startup aborted: {err}");
                Outcome::Aborted(err)
            }
        }
    }

    fn drive(&mut self, args: &LaunchArgs) -> Result<Outcome, BootstrapError> {
        self.advance(LifecycleState::ResolvingPath)?;

        let Some(path) = args.settings_path.as_deref() else {
            info!("no settings path supplied; starting without settings");
            self.advance(LifecycleState::Ready)?;
            return Ok(Outcome::StartedWithoutSettings);
        };

        check_settings_path(path)?;
        self.advance(LifecycleState::Loading)?;

        match self.source.load(path) {
            Ok(model) => {
                info!(path = %path.display(), "settings loaded");
                self.advance(LifecycleState::Ready)?;
                self.settings = Some(model.clone());
                Ok(Outcome::Started(model))
            }
            Err(err) if self.policy.tolerates(&err) => {
                warn!("{err}; starting without settings");
                self.advance(LifecycleState::Ready)?;
                Ok(Outcome::StartedWithoutSettings)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn advance(&mut self, next: LifecycleState) -> Result<(), LifecycleError> {
        self.state = self.state.transition(next)?;
        debug!(state = ?self.state, "lifecycle advanced");
        Ok(())
    }

    /// Hands the main window to the UI thread and waits until it is built.
    ///
    /// The composer and the settings loaded by [`run`](Self::run) (if any)
    /// are moved into a single task queued on `dispatcher`; the window is
    /// built and installed there. Must not be called from the UI thread.
    ///
    /// # Errors
    ///
    /// - [`PresentError::NotPresentable`] if the lifecycle is not `Ready`.
    ///   The dispatcher is not touched.
    /// - [`PresentError::AlreadyPresented`] on a second call.
    /// - [`PresentError::Compose`] if the composer or the window installation
    ///   failed on the UI thread.
    /// - [`PresentError::Dispatch`] if the UI thread is gone, or stopped
    ///   before the task reported back.
    pub fn present<D, C>(
        &mut self,
        title: impl Into<String>,
        dispatcher: &D,
        composer: C,
    ) -> Result<(), PresentError>
    where
        D: UiDispatcher + ?Sized,
        C: ViewComposer,
    {
        if self.presented {
            return Err(PresentError::AlreadyPresented);
        }
        if !self.state.can_present() {
            return Err(PresentError::NotPresentable { state: self.state });
        }

        let title = title.into();
        let settings = self.settings.clone();
        let mut composer = composer;
        let (reply_tx, reply_rx) = mpsc::sync_channel::<Result<String, ComposeError>>(1);
        dispatcher.invoke_later(Box::new(move |ctx: &mut UiContext| {
            let installed = composer
                .compose(&title, settings.as_ref())
                .and_then(|window| ctx.install_window(window))
                .map(|()| title);
            // The receiver only disappears if the caller has already given up.
            let _ = reply_tx.send(installed);
        }))?;
        self.presented = true;

        match reply_rx.recv() {
            Ok(Ok(title)) => {
                info!(title = %title, "main window presented");
                Ok(())
            }
            Ok(Err(err)) => {
                error!("failed to present main window: {err}");
                Err(err.into())
            }
            Err(mpsc::RecvError) => Err(DispatchError::Closed.into()),
        }
    }
}

/// Rejects an empty path or one that does not name an existing regular file.
fn check_settings_path(path: &Path) -> Result<(), BootstrapError> {
    let invalid = |reason: String| BootstrapError::InvalidArgument {
        path: path.to_path_buf(),
        reason,
    };

    if path.as_os_str().is_empty() {
        return Err(invalid("path is empty".to_string()));
    }
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(()),
        Ok(_) => Err(invalid("not a regular file".to_string())),
        Err(e) => Err(invalid(e.to_string())),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
