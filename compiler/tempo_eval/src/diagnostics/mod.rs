//! Host notification for aborted evaluations.
//!
//! When a top-level evaluation (script body, callback, host function call)
//! fails, the engine hands the located error to an [`ErrorReporter`] exactly
//! once and returns it to the caller. The reporter decides what the user
//! sees; the engine itself never prints.

use std::sync::Arc;

use parking_lot::Mutex;
use tempo_value::EvalError;

/// Sink for script errors.
pub enum ErrorReporter {
    /// Emit through `tracing::error!`.
    Log,
    /// Keep the formatted messages for the host to drain.
    Buffer(Mutex<Vec<String>>),
    /// Drop reports; the caller still receives the `Err`.
    Silent,
}

impl ErrorReporter {
    pub fn report(&self, error: &EvalError) {
        match self {
            Self::Log => tracing::error!(
                kind = ?error.kind,
                location = ?error.location,
                "script evaluation error: {error}"
            ),
            Self::Buffer(reports) => reports.lock().push(error.to_string()),
            Self::Silent => {}
        }
    }

    /// Reports collected so far, oldest first.
    pub fn reports(&self) -> Vec<String> {
        match self {
            Self::Buffer(reports) => reports.lock().clone(),
            Self::Log | Self::Silent => Vec::new(),
        }
    }

    /// Remove and return collected reports.
    pub fn drain(&self) -> Vec<String> {
        match self {
            Self::Buffer(reports) => std::mem::take(&mut *reports.lock()),
            Self::Log | Self::Silent => Vec::new(),
        }
    }
}

pub type SharedErrorReporter = Arc<ErrorReporter>;

pub fn log_reporter() -> SharedErrorReporter {
    Arc::new(ErrorReporter::Log)
}

pub fn buffer_reporter() -> SharedErrorReporter {
    Arc::new(ErrorReporter::Buffer(Mutex::new(Vec::new())))
}

pub fn silent_reporter() -> SharedErrorReporter {
    Arc::new(ErrorReporter::Silent)
}
