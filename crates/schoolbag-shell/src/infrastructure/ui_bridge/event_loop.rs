//! Dedicated UI event thread.
//!
//! All window work happens on one thread named [`UI_THREAD_NAME`]. Other
//! threads reach it only by queueing [`UiTask`]s through
//! [`UiDispatcher::invoke_later`]; tasks run in FIFO order, each with
//! exclusive `&mut` access to the thread-owned [`UiContext`].
//!
//! The loop exits when a close request is queued (see
//! [`UiEventLoop::shutdown`]) or when every sender is dropped. On exit it
//! returns the window that was presented, if any.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use tracing::{debug, info};

use crate::application::present::{DispatchError, MainWindow, UiContext, UiDispatcher, UiTask};

/// Name of the UI thread.
pub const UI_THREAD_NAME: &str = "ui-event-loop";

enum UiMessage {
    Run(UiTask),
    Close,
}

/// Handle to the running UI thread.
///
/// Dropping the handle closes the loop and joins the thread.
pub struct UiEventLoop {
    sender: Sender<UiMessage>,
    handle: Option<JoinHandle<Option<MainWindow>>>,
}

impl UiEventLoop {
    /// Starts the UI thread.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Spawn`] if the OS refuses to create the thread.
    pub fn spawn() -> Result<Self, DispatchError> {
        let (sender, receiver) = mpsc::channel::<UiMessage>();

        let handle = thread::Builder::new()
            .name(UI_THREAD_NAME.to_string())
            .spawn(move || run_event_loop(receiver))
            .map_err(DispatchError::Spawn)?;

        Ok(Self {
            sender,
            handle: Some(handle),
        })
    }

    /// Queues a close request behind all pending tasks, waits for the thread
    /// to finish, and returns the presented window.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Panicked`] if a task panicked on the UI thread.
    pub fn shutdown(mut self) -> Result<Option<MainWindow>, DispatchError> {
        self.close()
    }

    fn close(&mut self) -> Result<Option<MainWindow>, DispatchError> {
        // The receiver may already be gone if a task panicked; join reports that.
        let _ = self.sender.send(UiMessage::Close);
        match self.handle.take() {
            Some(handle) => handle.join().map_err(|_| DispatchError::Panicked),
            None => Ok(None),
        }
    }
}

impl UiDispatcher for UiEventLoop {
    fn invoke_later(&self, task: UiTask) -> Result<(), DispatchError> {
        self.sender
            .send(UiMessage::Run(task))
            .map_err(|_| DispatchError::Closed)
    }
}

impl Drop for UiEventLoop {
    fn drop(&mut self) {
        if self.handle.is_some() {
            let _ = self.close();
        }
    }
}

/// Entry point for the UI thread.
fn run_event_loop(receiver: Receiver<UiMessage>) -> Option<MainWindow> {
    let mut ctx = UiContext::new();
    debug!("UI event loop started");

    while let Ok(message) = receiver.recv() {
        match message {
            UiMessage::Run(task) => task(&mut ctx),
            UiMessage::Close => break,
        }
    }

    let window = ctx.take_window();
    if let Some(ref w) = window {
        info!(title = w.title(), "main window closed");
    }
    debug!("UI event loop stopped");
    window
}
