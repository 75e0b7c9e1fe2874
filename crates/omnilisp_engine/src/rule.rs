//! PEG rule definitions.
//!
//! A grammar is a flat array of [`Rule`]s addressed by [`RuleId`]. Forward
//! and mutually-recursive references are expressed as plain integer IDs
//! resolved through the table, so there is no lifetime tangle between a
//! rule and the rules it refers to.

use omnilisp_term::Term;

use crate::state::{PikaMatch, PikaState};

/// Index into a rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleId(pub usize);

impl RuleId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for RuleId {
    fn from(value: usize) -> Self {
        RuleId(value)
    }
}

/// A semantic action: reads the engine state (including sibling matches
/// via [`PikaState::get_match`]) and returns the term this match produces.
///
/// Plain function pointers, not closures — grammar-specific context is
/// threaded through the auxiliary `W` state on [`PikaState`], not
/// captured.
pub type ActionFn<W> = fn(&PikaState<W>, pos: usize, this_match: PikaMatch) -> Term;

/// The PEG operator a rule implements.
#[derive(Debug, Clone)]
pub enum RuleKind {
    /// Exact byte match.
    Terminal(&'static [u8]),
    /// Inclusive single-byte range match.
    Range(u8, u8),
    /// Any one byte.
    Any,
    /// All children must match, consuming concatenated lengths.
    Seq(Vec<RuleId>),
    /// Prioritised choice: first matching child wins.
    Alt(Vec<RuleId>),
    /// Zero-or-more of the single child.
    Rep(RuleId),
    /// One-or-more of the single child.
    Pos(RuleId),
    /// Zero-or-one of the single child.
    Opt(RuleId),
    /// Negative lookahead; consumes zero bytes.
    Not(RuleId),
    /// Positive lookahead; consumes zero bytes.
    And(RuleId),
    /// Indirection to another rule.
    Ref(RuleId),
}

/// One entry in a rule table: its PEG shape plus an optional action.
pub struct Rule<W> {
    pub kind: RuleKind,
    pub action: Option<ActionFn<W>>,
    /// Name used only in diagnostics; never consulted by the engine.
    pub name: &'static str,
}

impl<W> Rule<W> {
    pub fn new(name: &'static str, kind: RuleKind) -> Self {
        Rule {
            kind,
            action: None,
            name,
        }
    }

    pub fn with_action(name: &'static str, kind: RuleKind, action: ActionFn<W>) -> Self {
        Rule {
            kind,
            action: Some(action),
            name,
        }
    }
}
