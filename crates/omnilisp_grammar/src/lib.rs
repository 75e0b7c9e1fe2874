//! OmniLisp's reader grammar: a packrat PEG rule table, its semantic
//! actions, and the `read`/`read_expr` entry points built on top of
//! [`omnilisp_engine`].
//!
//! Binding forms (`let`, `fn`, pattern destructuring) live downstream of
//! this crate; the grammar itself only ever *reads* the binder stack
//! (via `Sym`'s lookup in [`actions::atoms::act_sym`]), it never pushes
//! onto it. [`read_expr_with_bindings`] exists so an embedding host can
//! thread its own binder stack through a parse when it already knows
//! which names are in lexical scope.

pub mod actions;
pub mod binder;
pub mod helpers;
pub mod ids;
pub mod nicks;
pub mod table;

pub use binder::BinderStack;
pub use ids::Id;
pub use nicks::NICKS;
pub use table::build_rules;

use once_cell::sync::Lazy;
use omnilisp_engine::{run, OutputMode, PikaState, Rule};
use omnilisp_term::Term;

/// The OmniLisp rule table, built once and shared across every parse in
/// the process — rule tables are immutable once constructed, so there is
/// nothing gained by rebuilding it per call.
static GRAMMAR: Lazy<Vec<Rule<BinderStack>>> = Lazy::new(build_rules);

/// Parses `input` as a complete program: leading whitespace/comments,
/// then a cons-list of every top-level expression.
pub fn read(input: &[u8]) -> Term {
    let state: PikaState<BinderStack> = PikaState::new(input, &GRAMMAR);
    run(&state, ids::r(Id::Program))
}

/// Parses `input` as a single expression.
pub fn read_expr(input: &[u8]) -> Term {
    let state: PikaState<BinderStack> = PikaState::new(input, &GRAMMAR);
    run(&state, ids::r(Id::Expr))
}

/// Parses `input` as a single expression against a caller-supplied
/// binder stack, returning the parsed term and the (possibly adjusted)
/// stack for reuse in a subsequent call.
pub fn read_expr_with_bindings(input: &[u8], bindings: BinderStack) -> (Term, BinderStack) {
    let state = PikaState::with_aux(input, &GRAMMAR, bindings);
    let term = run(&state, ids::r(Id::Expr));
    (term, state.aux.into_inner())
}

/// Clears `bindings` back to empty, for reuse across unrelated parses.
pub fn reset_bindings(bindings: &mut BinderStack) {
    bindings.clear();
}

/// Parses `input` in STRING output mode: semantic actions are
/// suppressed and the result is the matched program text as a character
/// cons-list rather than a built term tree.
pub fn read_as_string(input: &[u8]) -> Term {
    let state: PikaState<BinderStack> = PikaState::new(input, &GRAMMAR);
    state.set_output_mode(OutputMode::String);
    run(&state, ids::r(Id::Program))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_expr_parses_bare_integer() {
        let t = read_expr(b"42");
        assert_eq!(t.tag(), Some(NICKS.lit));
        assert_eq!(t.children()[0].as_nat(), Some(42));
    }

    #[test]
    fn read_collects_multiple_top_level_forms() {
        let t = read(b"1 2");
        assert_eq!(t.tag(), Some(NICKS.con));
    }

    #[test]
    fn read_as_string_returns_matched_text_not_a_built_term() {
        let t = read_as_string(b"42");
        assert_eq!(t.tag(), Some(NICKS.con));
        assert_eq!(t.children()[0].tag(), Some(NICKS.chr));
    }

    #[test]
    fn malformed_input_reports_err_sentinel() {
        let t = read_expr(b"(");
        assert!(t.is_ctor0(NICKS.err));
    }

    #[test]
    fn bindings_round_trip_across_calls() {
        let mut bindings = BinderStack::new();
        bindings.push(omnilisp_base::nick("x")).unwrap();
        let (t, bindings) = read_expr_with_bindings(b"x", bindings);
        assert_eq!(t.tag(), Some(NICKS.var));
        let mut bindings = bindings;
        reset_bindings(&mut bindings);
        assert!(bindings.is_empty());
    }
}
