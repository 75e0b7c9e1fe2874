//! Per-parse binder stack: resolves a symbol occurrence to a de Bruijn
//! index against the names currently in lexical scope.
//!
//! Owned by the [`omnilisp_engine::PikaState`] running a given parse
//! (its `aux` field) rather than kept as process-wide mutable state —
//! this is the per-parse context the engine's `W` type parameter exists
//! for. Binding forms live downstream of this grammar; the grammar only
//! ever reads the stack via [`BinderStack::lookup`].

use omnilisp_base::{OmniError, Result, Span};

/// Matches the reference implementation's fixed capacity; exceeding it
/// is reported as [`OmniError::BindStackOverflow`] rather than aborting
/// the process.
pub const BIND_MAX: usize = 16_384;

#[derive(Debug, Default)]
pub struct BinderStack {
    names: Vec<u32>,
}

impl BinderStack {
    pub fn new() -> Self {
        BinderStack::default()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Pushes a nick onto the stack, or reports overflow past [`BIND_MAX`].
    pub fn push(&mut self, nick: u32) -> Result<()> {
        if self.names.len() >= BIND_MAX {
            return Err(OmniError::BindStackOverflow {
                span: Span::default(),
                depth: self.names.len(),
            });
        }
        self.names.push(nick);
        Ok(())
    }

    /// Pops up to `count` entries, stopping early if the stack empties.
    pub fn pop(&mut self, count: usize) {
        let n = count.min(self.names.len());
        self.names.truncate(self.names.len() - n);
    }

    /// The de Bruijn index of the innermost occurrence of `nick`, or
    /// `None` if it is not in scope.
    pub fn lookup(&self, nick: u32) -> Option<u32> {
        self.names
            .iter()
            .rposition(|&n| n == nick)
            .map(|i| (self.names.len() - 1 - i) as u32)
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }
}
