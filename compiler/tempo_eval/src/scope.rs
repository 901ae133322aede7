//! Execution context threaded through every evaluation call.

use tempo_value::{recursion_limit, EvalError};

use crate::callback::CallbackInstance;
use crate::function::FunctionInstance;
use crate::root::Root;

/// The call frame a scope evaluates in.
#[derive(Copy, Clone, Debug)]
pub enum Frame<'a> {
    /// Top-level script code.
    Root,
    Function(&'a FunctionInstance),
    Callback(&'a CallbackInstance),
}

/// Root object plus the active frame.
///
/// Scopes are cheap `Copy` values. Entering a function or callback creates
/// a new scope one level deeper; nothing is shared between sibling scopes
/// except what lives on the root.
#[derive(Copy, Clone, Debug)]
pub struct Scope<'a> {
    root: &'a Root,
    frame: Frame<'a>,
    depth: usize,
}

impl<'a> Scope<'a> {
    /// Top-level scope of `root`.
    pub fn new(root: &'a Root) -> Self {
        Scope {
            root,
            frame: Frame::Root,
            depth: 0,
        }
    }

    #[inline]
    pub fn root(&self) -> &'a Root {
        self.root
    }

    #[inline]
    pub fn frame(&self) -> Frame<'a> {
        self.frame
    }

    /// Number of function/callback frames between this scope and the root.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Scope for a body running in `frame`, one level deeper.
    pub(crate) fn enter<'b>(&self, frame: Frame<'b>) -> Result<Scope<'b>, EvalError>
    where
        'a: 'b,
    {
        let limit = self.root.max_call_depth();
        if self.depth >= limit {
            return Err(recursion_limit(limit));
        }
        Ok(Scope {
            root: self.root,
            frame,
            depth: self.depth + 1,
        })
    }
}
