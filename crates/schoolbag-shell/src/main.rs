//! School Bag shell entry point.
//!
//! Parses the command line, loads the settings file (if one was named), and
//! presents the three-tab main window on the dedicated UI thread.
//!
//! # Usage
//!
//! ```text
//! schoolbag [OPTIONS] [SETTINGS]
//!
//! Arguments:
//!   [SETTINGS]          Path to the JSON settings file
//!
//! Options:
//!   --policy <POLICY>   strict | lenient [default: lenient]
//!   --title  <TITLE>    Main window title [default: Intelligente Schultasche]
//! ```
//!
//! # Environment variable overrides
//!
//! CLI args take precedence when both are present.
//!
//! | Variable             | Default                    | Description          |
//! |----------------------|----------------------------|----------------------|
//! | `SCHOOLBAG_SETTINGS` | (none)                     | Settings file path   |
//! | `SCHOOLBAG_POLICY`   | `lenient`                  | Load failure policy  |
//! | `SCHOOLBAG_TITLE`    | `Intelligente Schultasche` | Main window title    |
//! | `RUST_LOG`           | `info`                     | Log filter           |
//!
//! # Startup
//!
//! ```text
//! main()
//!  └─ ApplicationBootstrap::run()      -- synchronous: resolve path, load, decide
//!       ├─ Aborted  -> exit non-zero with a diagnostic, no window
//!       └─ Started* -> UiEventLoop::spawn()
//!                       └─ present()   -- ConsoleComposer runs on ui-event-loop,
//!                                         result reported back (error -> exit non-zero)
//!  └─ wait for Ctrl-C, then close the window
//! ```

use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use schoolbag_shell::application::bootstrap::{
    ApplicationBootstrap, LaunchArgs, LoadPolicy, Outcome, ShellConfig, DEFAULT_TITLE,
};
use schoolbag_shell::infrastructure::storage::settings_file::SettingsFileLoader;
use schoolbag_shell::infrastructure::ui_bridge::{ConsoleComposer, UiEventLoop};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// School Bag desktop shell.
///
/// Loads the equipment settings file and shows the Pack / Trim / Manage window.
#[derive(Debug, Parser)]
#[command(
    name = "schoolbag",
    about = "Desktop shell for the smart school bag",
    version
)]
struct Cli {
    /// Path to the JSON settings file.
    ///
    /// When omitted the window starts without settings and the Manage tab
    /// shows empty fields.
    #[arg(env = "SCHOOLBAG_SETTINGS")]
    settings: Option<PathBuf>,

    /// What to do when the settings file disappears between the path check
    /// and the read.
    ///
    /// `strict` aborts; `lenient` starts without settings. Every other load
    /// failure aborts under both policies.
    #[arg(long, value_enum, default_value_t = PolicyArg::Lenient, env = "SCHOOLBAG_POLICY")]
    policy: PolicyArg,

    /// Main window title.
    #[arg(long, default_value = DEFAULT_TITLE, env = "SCHOOLBAG_TITLE")]
    title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    Strict,
    Lenient,
}

impl From<PolicyArg> for LoadPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Strict => LoadPolicy::Strict,
            PolicyArg::Lenient => LoadPolicy::Lenient,
        }
    }
}

impl Cli {
    /// Converts the parsed CLI arguments into a [`ShellConfig`].
    fn into_shell_config(self) -> ShellConfig {
        ShellConfig {
            launch: LaunchArgs {
                settings_path: self.settings,
            },
            policy: self.policy.into(),
            title: self.title,
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Cli::parse().into_shell_config();
    info!(policy = ?config.policy, "School Bag shell starting");

    // Loading runs to completion on this thread before the UI thread exists.
    let mut bootstrap = ApplicationBootstrap::new(SettingsFileLoader::new(), config.policy);
    if let Outcome::Aborted(err) = bootstrap.run(&config.launch) {
        let diagnostic = err.diagnostic();
        error!("{diagnostic}");
        return Err(anyhow!(diagnostic));
    }

    // Returns once the window is installed on the UI thread, or with its error.
    let ui = UiEventLoop::spawn().context("failed to start the UI event loop")?;
    bootstrap
        .present(config.title, &ui, ConsoleComposer::stdout())
        .context("failed to present the main window")?;
    info!("School Bag shell ready. Press Ctrl-C to exit.");

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl-C")?;
    info!("shutdown signal received");

    tokio::task::spawn_blocking(move || ui.shutdown())
        .await
        .context("UI event loop join task failed")?
        .context("UI event loop did not shut down cleanly")?;

    info!("School Bag shell stopped");
    Ok(())
}
