#![cfg_attr(docsrs, feature(doc_cfg))]

//! # omnilisp-term
//!
//! The immutable term representation emitted by the omnilisp reader: a
//! natural-number leaf, or a constructor node carrying a 24-bit tag and
//! ordered children. This crate knows nothing about nick encoding, the
//! grammar, or which tags are reserved — those live in `omnilisp-grammar`.

pub mod term;

pub use term::{Tag, Term, TAG_MASK};
