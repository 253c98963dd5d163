//! Task-dialog capability interface.
//!
//! The host chat client owns the real dialog lifecycle. The core only sees
//! [`TaskDialog`]: something that can be closed with a result and that
//! notifies registered handlers when it closes.

use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use tracing::debug;

/// Outcome reported when a dialog closes.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DialogResult {
    /// The operator confirmed sending the notification.
    Submitted {
        /// Notification that was dispatched.
        notification_id: String,
    },
    /// The operator dismissed the dialog.
    Cancelled,
}

/// Callback invoked with the dialog result.
pub type CloseHandler = Box<dyn FnOnce(&DialogResult) + Send>;

/// Host-provided dialog capability.
pub trait TaskDialog: Send + Sync {
    /// Close the dialog, reporting `result` to the host.
    fn close(&self, result: DialogResult);

    /// Register a handler to run when the dialog closes.
    fn on_close(&self, handler: CloseHandler);
}

#[derive(Default)]
struct DialogState {
    result: Option<DialogResult>,
    handlers: Vec<CloseHandler>,
}

/// In-process [`TaskDialog`] used by the CLI and tests.
///
/// Handlers run exactly once. The first `close` wins; later calls are ignored.
#[derive(Default)]
pub struct LocalDialog {
    state: Mutex<DialogState>,
}

impl LocalDialog {
    /// Create an open dialog with no handlers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Result the dialog closed with, if it has closed.
    #[must_use]
    pub fn result(&self) -> Option<DialogResult> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .result
            .clone()
    }
}

impl TaskDialog for LocalDialog {
    fn close(&self, result: DialogResult) {
        let handlers = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if state.result.is_some() {
                debug!(?result, "dialog already closed; ignoring close");
                return;
            }
            state.result = Some(result.clone());
            std::mem::take(&mut state.handlers)
        };

        // Handlers run outside the lock so they may query the dialog.
        for handler in handlers {
            handler(&result);
        }
    }

    fn on_close(&self, handler: CloseHandler) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(result) = state.result.clone() {
            drop(state);
            handler(&result);
            return;
        }
        state.handlers.push(handler);
    }
}
