//! Statement completion signals.

/// Result code of performing a statement.
///
/// Carries no payload: a `return` writes its value into the out-parameter
/// handed to `perform`, and the signal only says which way control left.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum ControlSignal {
    /// Statement completed; continue with the next sibling.
    #[default]
    Normal,
    /// A `return` was hit; unwind to the nearest function or callback.
    Return,
    /// A `break` was hit; unwind to the nearest loop.
    Break,
    /// A `continue` was hit; skip to the nearest loop's next iteration.
    Continue,
}

impl ControlSignal {
    /// Whether siblings after this statement still run.
    #[inline]
    pub fn is_normal(self) -> bool {
        matches!(self, ControlSignal::Normal)
    }
}
