//! Semantic actions, grouped by the kind of form they build.

pub mod atoms;
pub mod compounds;
pub mod readers;
