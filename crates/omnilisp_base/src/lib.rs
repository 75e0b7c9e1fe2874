#![cfg_attr(docsrs, feature(doc_cfg))]

//! # omnilisp-base
//!
//! Pure structural atoms for the omnilisp reader: arena allocation, source
//! spans, 24-bit nick encoding, and the shared error type.
//!
//! This crate has **no knowledge of the OmniLisp grammar or the parser
//! engine**. It provides only generic, reusable infrastructure that the
//! higher-level crates build upon.

pub mod arena;
pub mod error;
pub mod nick;
pub mod span;

pub use arena::Arena;
pub use error::{OmniError, Result};
pub use nick::{nick, nick_bytes};
pub use span::Span;
