//! Destination for script output (`Console.print`).
//!
//! Enum dispatch over the three destinations the engine needs:
//! - `Stdout`: plugin development builds and command-line hosts
//! - `Buffer`: embedding hosts that forward output to their own console, and tests
//! - `Silent`: headless rendering

use std::sync::Arc;

use parking_lot::Mutex;

/// Where printed lines go.
pub enum PrintHandler {
    Stdout,
    Buffer(Mutex<String>),
    Silent,
}

impl PrintHandler {
    /// Print one line.
    pub fn println(&self, msg: &str) {
        match self {
            Self::Stdout => println!("{msg}"),
            Self::Buffer(buffer) => {
                let mut buffer = buffer.lock();
                buffer.push_str(msg);
                buffer.push('\n');
            }
            Self::Silent => {}
        }
    }

    /// Captured output. Empty for handlers that don't capture.
    pub fn output(&self) -> String {
        match self {
            Self::Buffer(buffer) => buffer.lock().clone(),
            Self::Stdout | Self::Silent => String::new(),
        }
    }

    pub fn clear(&self) {
        if let Self::Buffer(buffer) = self {
            buffer.lock().clear();
        }
    }
}

/// Print handler shared between the engine and its `Console` class.
pub type SharedPrintHandler = Arc<PrintHandler>;

pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Stdout)
}

pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Buffer(Mutex::new(String::new())))
}

pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandler::Silent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_captures_lines() {
        let handler = buffer_handler();
        handler.println("a");
        handler.println("b");
        assert_eq!(handler.output(), "a\nb\n");
        handler.clear();
        assert_eq!(handler.output(), "");
    }

    #[test]
    fn non_capturing_handlers_report_nothing() {
        silent_handler().println("dropped");
        assert_eq!(silent_handler().output(), "");
        assert_eq!(stdout_handler().output(), "");
    }
}
