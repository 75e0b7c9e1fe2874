//! Error types shared across the omnilisp crates.
//!
//! Parse failure itself is never reported through this type — an
//! unmatched top-level parse returns the `Err` sentinel term, not a
//! `Result::Err`. This type covers internal faults that would otherwise
//! have to abort the process: a binder stack that outgrew its bound, or
//! a pattern the cache cannot compile.

use crate::span::Span;
use std::fmt;

/// An error annotated with its source location, where one is known.
#[derive(Debug, Clone)]
pub enum OmniError {
    /// The binder stack exceeded its configured depth during a parse.
    BindStackOverflow { span: Span, depth: usize },
    /// A pattern could not be compiled into a parser state.
    InvalidPattern(String),
}

impl fmt::Display for OmniError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OmniError::BindStackOverflow { span, depth } => write!(
                f,
                "binder stack overflow at {}..{} (depth {})",
                span.start, span.end, depth
            ),
            OmniError::InvalidPattern(msg) => write!(f, "invalid pattern: {}", msg),
        }
    }
}

impl std::error::Error for OmniError {}

/// Alias for `std::result::Result<T, OmniError>`.
pub type Result<T> = std::result::Result<T, OmniError>;
