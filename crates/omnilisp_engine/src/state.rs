//! Parser state: the memoization table and its accessors.

use std::cell::RefCell;

use omnilisp_term::Term;

use crate::rule::{Rule, RuleId};

/// Constructor tags the engine falls back to on its own, independent of
/// any grammar action: the character cons-list built for `STRING` mode
/// and the `AST`-mode fallback symbol, and the sentinel returned when the
/// root rule never matches.
///
/// Grammars are free to reuse these tags for their own `Nil`/`Con`/`Sym`/
/// `Chr` constructors, since the fallback path and a grammar's own actions
/// both build the same shapes (a cons-list of characters, a one-child
/// `Sym` node) and must agree on what a downstream consumer sees.
#[derive(Debug, Clone, Copy)]
pub struct EngineTags {
    pub nil: u32,
    pub cons: u32,
    pub sym: u32,
    pub chr: u32,
    pub err: u32,
}

impl Default for EngineTags {
    fn default() -> Self {
        EngineTags {
            nil: omnilisp_base::nick("Nil"),
            cons: omnilisp_base::nick("Con"),
            sym: omnilisp_base::nick("Sym"),
            chr: omnilisp_base::nick("Chr"),
            err: omnilisp_base::nick("Err"),
        }
    }
}

/// Whether a completed parse reports semantic-action terms or raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Run semantic actions and propagate child values through
    /// action-less wrapper rules. The default.
    Ast,
    /// Suppress actions; the root match reports the matched bytes as a
    /// character cons-list instead.
    String,
}

/// One memoization table cell: whether a rule matched at a position, how
/// many bytes it consumed, and (AST mode) the term its action produced.
#[derive(Debug, Clone, Default)]
pub struct PikaMatch {
    pub matched: bool,
    pub len: usize,
    pub val: Option<Term>,
}

impl PikaMatch {
    pub fn fail() -> Self {
        PikaMatch::default()
    }

    pub fn matched(len: usize) -> Self {
        PikaMatch {
            matched: true,
            len,
            val: None,
        }
    }
}

/// Parser state: input bytes, a borrowed rule table, output mode, the
/// memoization table, and caller-supplied auxiliary context `W` (the
/// binder stack, in the OmniLisp grammar).
///
/// The table lives behind a [`RefCell`] so semantic actions — which only
/// ever need read access to sibling cells via [`PikaState::get_match`] —
/// can be invoked with a shared `&PikaState` while [`crate::engine::run`]
/// holds the writing end for the cell currently being settled. Actions
/// return an owned [`Term`]; the write into the table happens only after
/// the action call has returned, so the runtime borrows never overlap.
pub struct PikaState<'r, W> {
    pub(crate) input: Vec<u8>,
    pub(crate) rules: &'r [Rule<W>],
    pub(crate) output_mode: RefCell<OutputMode>,
    pub(crate) table: RefCell<Vec<PikaMatch>>,
    /// Auxiliary context shared read-write across actions during one parse.
    pub aux: RefCell<W>,
    pub tags: EngineTags,
}

impl<'r, W: Default> PikaState<'r, W> {
    /// Allocates a memoization table of size `(N+1) * rules.len()`, all
    /// cells zero-initialised (unmatched).
    pub fn new(input: &[u8], rules: &'r [Rule<W>]) -> Self {
        Self::with_aux(input, rules, W::default())
    }
}

impl<'r, W> PikaState<'r, W> {
    /// Like [`PikaState::new`] but with caller-supplied auxiliary context.
    pub fn with_aux(input: &[u8], rules: &'r [Rule<W>], aux: W) -> Self {
        let table_size = (input.len() + 1) * rules.len();
        PikaState {
            input: input.to_vec(),
            rules,
            output_mode: RefCell::new(OutputMode::Ast),
            table: RefCell::new(vec![PikaMatch::default(); table_size]),
            aux: RefCell::new(aux),
            tags: EngineTags::default(),
        }
    }

    /// Overrides the fallback constructor tags (default: nicks of
    /// `Nil`/`Con`/`Sym`/`Err`).
    pub fn with_tags(mut self, tags: EngineTags) -> Self {
        self.tags = tags;
        self
    }

    pub fn input(&self) -> &[u8] {
        &self.input
    }

    pub fn num_rules(&self) -> usize {
        self.rules.len()
    }

    pub fn rules(&self) -> &'r [Rule<W>] {
        self.rules
    }

    pub fn output_mode(&self) -> OutputMode {
        *self.output_mode.borrow()
    }

    pub fn set_output_mode(&self, mode: OutputMode) {
        *self.output_mode.borrow_mut() = mode;
    }

    fn cell_index(&self, pos: usize, rule_id: RuleId) -> Option<usize> {
        if pos > self.input.len() || rule_id.index() >= self.rules.len() {
            return None;
        }
        Some(pos * self.rules.len() + rule_id.index())
    }

    /// Read-only accessor for a memoization cell, for use inside semantic
    /// actions assembling children from sibling matches. Returns a clone
    /// since [`Term`] clones are `Rc`-cheap; out-of-range cells report a
    /// non-matched entry rather than panicking.
    pub fn get_match(&self, pos: usize, rule_id: RuleId) -> PikaMatch {
        match self.cell_index(pos, rule_id) {
            Some(idx) => self.table.borrow()[idx].clone(),
            None => PikaMatch::fail(),
        }
    }

    pub(crate) fn set_match(&self, pos: usize, rule_id: RuleId, value: PikaMatch) {
        if let Some(idx) = self.cell_index(pos, rule_id) {
            self.table.borrow_mut()[idx] = value;
        }
    }
}
