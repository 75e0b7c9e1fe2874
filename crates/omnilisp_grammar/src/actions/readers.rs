//! Actions for reader-level forms that need to look past their own
//! matched span: quoting, path expressions, format-string wrappers, the
//! `#val` reader, and the program root.
//!
//! Each of these peeks at a sibling cell via [`PikaState::get_match`]
//! rather than folding the lookahead into the grammar itself — the same
//! shape the reference grammar uses for these particular forms. It is a
//! known wart (parsing and interpretation end up mixed in one action)
//! but changing it would mean redesigning the grammar rules themselves,
//! not just porting their actions.

use omnilisp_engine::{PikaMatch, PikaState};
use omnilisp_term::Term;

use crate::actions::compounds::collect_inner;
use crate::binder::BinderStack;
use crate::helpers;
use crate::ids::{self, Id};
use crate::nicks::NICKS;

/// `'x`, `` `x ``, `,x`, `,@x` — each desugars to a two-element cons-list
/// headed by the matching quote symbol.
pub fn act_quoted(state: &PikaState<BinderStack>, pos: usize, m: PikaMatch) -> Term {
    let prefix_len = m.len;
    let mut current = pos + prefix_len;
    let ws = state.get_match(current, ids::r(Id::Skip));
    if ws.matched {
        current += ws.len;
    }
    let expr = state.get_match(current, ids::r(Id::Expr));
    let expr_val = match expr.val {
        Some(v) => v,
        None => return helpers::nil(),
    };
    let head_nick = if prefix_len == 2 {
        NICKS.unquote_splicing
    } else {
        match state.input()[pos] {
            b'\'' => NICKS.quote,
            b'`' => NICKS.quasiquote,
            b',' => NICKS.unquote,
            _ => NICKS.quote,
        }
    };
    helpers::headed_list(head_nick, vec![expr_val])
}

/// `foo.bar.3` — `(path root seg1 seg2 ...)`, segments left to right.
pub fn act_path(state: &PikaState<BinderStack>, pos: usize, _m: PikaMatch) -> Term {
    let root = state.get_match(pos, ids::r(Id::PathRoot));
    let root_val = match root.val {
        Some(v) => v,
        None => return helpers::nil(),
    };
    let mut current = pos + root.len;
    let tail = state.get_match(current, ids::r(Id::PathTail));
    let tail_end = current + tail.len;
    let mut segments = vec![root_val];
    while current < tail_end {
        let dot = state.get_match(current, ids::r(Id::Dot));
        if !dot.matched {
            break;
        }
        current += dot.len;
        let seg = state.get_match(current, ids::r(Id::PathSegment));
        if !seg.matched {
            break;
        }
        if let Some(v) = seg.val.clone() {
            segments.push(v);
        }
        current += seg.len;
    }
    helpers::headed_list(NICKS.path, segments)
}

/// `#fmt"..."` — `(fmt content)`, reusing the already-parsed `String`
/// match four bytes in rather than re-running escape decoding.
pub fn act_fmt_string(state: &PikaState<BinderStack>, pos: usize, _m: PikaMatch) -> Term {
    let s = state.get_match(pos + 4, ids::r(Id::String));
    let content = s.val.unwrap_or_else(helpers::nil);
    helpers::headed_list(NICKS.fmt, vec![content])
}

/// `#clf"..."` — `(clf content)`.
pub fn act_clf_string(state: &PikaState<BinderStack>, pos: usize, _m: PikaMatch) -> Term {
    let s = state.get_match(pos + 4, ids::r(Id::String));
    let content = s.val.unwrap_or_else(helpers::nil);
    helpers::headed_list(NICKS.clf, vec![content])
}

/// `#val <atom>` — `(v2ty atom)`.
pub fn act_hash_val(state: &PikaState<BinderStack>, pos: usize, _m: PikaMatch) -> Term {
    let mut current = pos + 4; // "#val"
    let ws = state.get_match(current, ids::r(Id::Skip));
    if ws.matched {
        current += ws.len;
    }
    let atom = state.get_match(current, ids::r(Id::Atom));
    match atom.val {
        Some(v) => helpers::headed_list(NICKS.value_to_type, vec![v]),
        None => helpers::nil(),
    }
}

/// The program root: leading whitespace/comments, then the top-level
/// expression list.
pub fn act_program(state: &PikaState<BinderStack>, pos: usize, _m: PikaMatch) -> Term {
    let mut current = pos;
    let ws = state.get_match(current, ids::r(Id::Skip));
    if ws.matched {
        current += ws.len;
    }
    let inner = state.get_match(current, ids::r(Id::ProgramInner));
    inner.val.unwrap_or_else(helpers::nil)
}

/// Top-level expression list: identical shape to a list's inner content.
pub fn act_program_inner(state: &PikaState<BinderStack>, pos: usize, m: PikaMatch) -> Term {
    collect_inner(state, pos, m.len, ids::r(Id::ProgramInner))
}
