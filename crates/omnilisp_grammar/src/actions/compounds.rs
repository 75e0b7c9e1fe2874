//! Actions for the bracketed compound forms: lists, slots, type
//! annotations, dicts, sets, kind splices, metadata, guards, and spread.

use omnilisp_engine::{PikaMatch, PikaState, RuleId};
use omnilisp_term::Term;

use crate::binder::BinderStack;
use crate::helpers;
use crate::ids::{self, Id};
use crate::nicks::NICKS;

/// Shared recursive-cons-list builder for `*_inner` rules: one `Expr`,
/// optional whitespace, then a nested match of the same rule.
pub(crate) fn collect_inner(state: &PikaState<BinderStack>, pos: usize, len: usize, self_rule: RuleId) -> Term {
    if len == 0 {
        return helpers::nil();
    }
    let expr = state.get_match(pos, ids::r(Id::Expr));
    if !expr.matched {
        return helpers::nil();
    }
    let head = expr.val.clone().unwrap_or_else(helpers::nil);
    let mut current = pos + expr.len;
    let ws = state.get_match(current, ids::r(Id::Skip));
    if ws.matched {
        current += ws.len;
    }
    let rest = state.get_match(current, self_rule);
    let tail = rest.val.unwrap_or_else(helpers::nil);
    helpers::cons(head, tail)
}

pub fn act_list_inner(state: &PikaState<BinderStack>, pos: usize, m: PikaMatch) -> Term {
    collect_inner(state, pos, m.len, ids::r(Id::ListInner))
}

pub fn act_slot_inner(state: &PikaState<BinderStack>, pos: usize, m: PikaMatch) -> Term {
    collect_inner(state, pos, m.len, ids::r(Id::SlotInner))
}

pub fn act_type_inner(state: &PikaState<BinderStack>, pos: usize, m: PikaMatch) -> Term {
    collect_inner(state, pos, m.len, ids::r(Id::TypeInner))
}

pub fn act_dict_inner(state: &PikaState<BinderStack>, pos: usize, m: PikaMatch) -> Term {
    collect_inner(state, pos, m.len, ids::r(Id::DictInner))
}

/// Skips `open_len` delimiter bytes and optional whitespace, then reads
/// `inner_rule`'s value (or `Nil` if it produced nothing).
fn inner_value(state: &PikaState<BinderStack>, pos: usize, open_len: usize, inner_rule: RuleId) -> Term {
    let mut current = pos + open_len;
    let ws = state.get_match(current, ids::r(Id::Skip));
    if ws.matched {
        current += ws.len;
    }
    let inner = state.get_match(current, inner_rule);
    inner.val.unwrap_or_else(helpers::nil)
}

/// `( ... )` — a bare cons-list, the execution context.
pub fn act_list(state: &PikaState<BinderStack>, pos: usize, _m: PikaMatch) -> Term {
    inner_value(state, pos, 1, ids::r(Id::ListInner))
}

/// `[ ... ]` — `Slot(list)`, the data context.
pub fn act_slot(state: &PikaState<BinderStack>, pos: usize, _m: PikaMatch) -> Term {
    Term::ctor1(NICKS.slot, inner_value(state, pos, 1, ids::r(Id::SlotInner)))
}

/// `{ ... }` — `TAnn(list)`.
pub fn act_type(state: &PikaState<BinderStack>, pos: usize, _m: PikaMatch) -> Term {
    Term::ctor1(NICKS.tann, inner_value(state, pos, 1, ids::r(Id::TypeInner)))
}

/// `#{ ... }` — `Dict(list)`.
pub fn act_dict(state: &PikaState<BinderStack>, pos: usize, _m: PikaMatch) -> Term {
    Term::ctor1(NICKS.dict, inner_value(state, pos, 2, ids::r(Id::DictInner)))
}

/// `#set{ ... }` — `(set a b c)`, reusing the slot-style element list.
pub fn act_set(state: &PikaState<BinderStack>, pos: usize, _m: PikaMatch) -> Term {
    let inner = inner_value(state, pos, 5, ids::r(Id::SlotInner));
    helpers::cons(helpers::sym_lit(NICKS.set), inner)
}

/// `{#kind expr}` — `KindSplice(expr)`.
pub fn act_kind_splice(state: &PikaState<BinderStack>, pos: usize, _m: PikaMatch) -> Term {
    let mut current = pos + 1;
    let ws = state.get_match(current, ids::r(Id::Skip));
    if ws.matched {
        current += ws.len;
    }
    current += 5; // "#kind"
    let ws = state.get_match(current, ids::r(Id::Skip));
    if ws.matched {
        current += ws.len;
    }
    let expr = state.get_match(current, ids::r(Id::Expr));
    match expr.val {
        Some(v) => Term::ctor1(NICKS.kind_splice, v),
        None => helpers::nil(),
    }
}

/// `^:key` — a metadata marker wrapping the colon-quote's desugared form.
pub fn act_meta(state: &PikaState<BinderStack>, pos: usize, _m: PikaMatch) -> Term {
    let inner = state.get_match(pos + 1, ids::r(Id::ColonSym));
    match inner.val {
        Some(v) => Term::ctor1(NICKS.meta, v),
        None => Term::ctor1(NICKS.meta, helpers::nil()),
    }
}

/// `:when expr` — `Guard(expr)`.
pub fn act_guard(state: &PikaState<BinderStack>, pos: usize, _m: PikaMatch) -> Term {
    let mut current = pos + 5; // ":when"
    let ws = state.get_match(current, ids::r(Id::Skip));
    if ws.matched {
        current += ws.len;
    }
    let expr = state.get_match(current, ids::r(Id::Expr));
    match expr.val {
        Some(v) => Term::ctor1(NICKS.guard, v),
        None => helpers::nil(),
    }
}

/// `.. name` — `Spread(name)`, or `Spread(Nil)` if no name follows.
pub fn act_spread(state: &PikaState<BinderStack>, pos: usize, _m: PikaMatch) -> Term {
    let mut current = pos + 2; // ".."
    let ws = state.get_match(current, ids::r(Id::Skip));
    if ws.matched {
        current += ws.len;
    }
    let sym = state.get_match(current, ids::r(Id::Sym));
    match sym.val {
        Some(v) => Term::ctor1(NICKS.spread, v),
        None => Term::ctor1(NICKS.spread, helpers::nil()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::build_rules;
    use omnilisp_engine::run;

    #[test]
    fn list_of_sym_and_ints_builds_cons_chain() {
        let rules = build_rules();
        let state = PikaState::new(b"(+ 1 2)", &rules);
        let t = run(&state, ids::r(Id::List));
        assert_eq!(t.tag(), Some(NICKS.con));
        assert_eq!(t.children()[0].tag(), Some(NICKS.sym));
    }

    #[test]
    fn set_literal_desugars_to_headed_set_form() {
        let rules = build_rules();
        let state = PikaState::new(b"#set{1 2 3}", &rules);
        let t = run(&state, ids::r(Id::Set));
        assert_eq!(t.children()[0].tag(), Some(NICKS.sym));
        assert_eq!(t.children()[0].children()[0].as_nat(), Some(omnilisp_base::nick("set")));
    }

    #[test]
    fn slot_wraps_elements_in_slot_constructor() {
        let rules = build_rules();
        let state = PikaState::new(b"[1 2]", &rules);
        let t = run(&state, ids::r(Id::Slot));
        assert_eq!(t.tag(), Some(NICKS.slot));
    }
}
