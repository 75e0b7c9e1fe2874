//! The packrat engine: per-rule evaluation and the right-to-left fixpoint.

use omnilisp_term::Term;

use crate::rule::{RuleId, RuleKind};
use crate::state::{OutputMode, PikaMatch, PikaState};

/// Evaluates a single rule at a single position from its children's
/// already-memoized entries. Does not invoke semantic actions — that
/// happens in [`run`] once a rule's match is known to have changed.
pub fn evaluate_rule<W>(state: &PikaState<W>, pos: usize, rule_id: RuleId) -> PikaMatch {
    let rule = &state.rules()[rule_id.index()];
    match &rule.kind {
        RuleKind::Terminal(bytes) => {
            let input = state.input();
            if pos + bytes.len() <= input.len() && &input[pos..pos + bytes.len()] == *bytes {
                PikaMatch::matched(bytes.len())
            } else {
                PikaMatch::fail()
            }
        }
        RuleKind::Range(min, max) => {
            let input = state.input();
            if pos < input.len() && input[pos] >= *min && input[pos] <= *max {
                PikaMatch::matched(1)
            } else {
                PikaMatch::fail()
            }
        }
        RuleKind::Any => {
            if pos < state.input().len() {
                PikaMatch::matched(1)
            } else {
                PikaMatch::fail()
            }
        }
        RuleKind::Seq(children) => {
            let mut current = pos;
            for &child in children {
                let sub = state.get_match(current, child);
                if !sub.matched {
                    return PikaMatch::fail();
                }
                current += sub.len;
            }
            PikaMatch::matched(current - pos)
        }
        RuleKind::Alt(children) => {
            for &child in children {
                let sub = state.get_match(pos, child);
                if sub.matched {
                    return sub;
                }
            }
            PikaMatch::fail()
        }
        RuleKind::Rep(child) => {
            let first = state.get_match(pos, *child);
            if first.matched && first.len > 0 {
                let rest = state.get_match(pos + first.len, rule_id);
                if rest.matched {
                    PikaMatch::matched(first.len + rest.len)
                } else {
                    first
                }
            } else {
                PikaMatch::matched(0)
            }
        }
        RuleKind::Pos(child) => {
            let first = state.get_match(pos, *child);
            if !first.matched {
                return PikaMatch::fail();
            }
            let mut len = first.len;
            if pos + first.len <= state.input().len() {
                let more = state.get_match(pos + first.len, rule_id);
                if more.matched {
                    len += more.len;
                }
            }
            PikaMatch::matched(len)
        }
        RuleKind::Opt(child) => {
            let sub = state.get_match(pos, *child);
            if sub.matched {
                sub
            } else {
                PikaMatch::matched(0)
            }
        }
        RuleKind::Not(child) => {
            let sub = state.get_match(pos, *child);
            if sub.matched {
                PikaMatch::fail()
            } else {
                PikaMatch::matched(0)
            }
        }
        RuleKind::And(child) => {
            let sub = state.get_match(pos, *child);
            if sub.matched {
                PikaMatch::matched(0)
            } else {
                PikaMatch::fail()
            }
        }
        RuleKind::Ref(target) => state.get_match(pos, *target),
    }
}

/// Fills the memoization table via the right-to-left fixpoint, then
/// returns the term at `root` for position 0.
///
/// The outer loop walks positions from `N` down to `0`; at each position
/// an inner fixpoint (capped at `2 * num_rules` iterations) resolves
/// same-position dependencies among `Alt` siblings and `Ref` chains.
/// `Seq`/`Pos`/`Rep` tail lookups at `pos + len` are already settled by
/// the time a later (smaller) position is evaluated, since the outer
/// walk moves right to left.
pub fn run<W>(state: &PikaState<W>, root: RuleId) -> Term {
    let n = state.input().len();
    let num_rules = state.num_rules();

    for pos in (0..=n).rev() {
        let mut changed = true;
        let limit = num_rules * 2;
        let mut iters = 0;
        while changed && iters < limit {
            changed = false;
            iters += 1;
            for r in 0..num_rules {
                let rule_id = RuleId(r);
                let mut result = evaluate_rule(state, pos, rule_id);
                let existing = state.get_match(pos, rule_id);

                let val_changed = state.output_mode() == OutputMode::Ast
                    && result.matched
                    && state.rules()[r].action.is_none()
                    && result.val != existing.val;

                if result.matched != existing.matched || result.len != existing.len || val_changed {
                    if result.matched && state.output_mode() == OutputMode::Ast {
                        if let Some(action) = state.rules()[r].action {
                            result.val = Some(action(state, pos, result.clone()));
                        }
                    }
                    state.set_match(pos, rule_id, result);
                    changed = true;
                }
            }
        }
        log::trace!("position {} settled after {} iterations", pos, iters);
    }

    // Stabilisation pass: re-invoke every matched action once more,
    // bottom-up, so actions depending on a child's final value see it.
    if state.output_mode() == OutputMode::Ast {
        for pos in (0..=n).rev() {
            for r in 0..num_rules {
                let rule_id = RuleId(r);
                let m = state.get_match(pos, rule_id);
                if !m.matched {
                    continue;
                }
                if let Some(action) = state.rules()[r].action {
                    let val = action(state, pos, m.clone());
                    state.set_match(
                        pos,
                        rule_id,
                        PikaMatch {
                            val: Some(val),
                            ..m
                        },
                    );
                }
            }
        }
    }

    let root_match = state.get_match(0, root);
    if !root_match.matched {
        return Term::ctor0(state.tags.err);
    }

    match state.output_mode() {
        OutputMode::String => string_mode_result(state, root_match.len),
        OutputMode::Ast => root_match
            .val
            .unwrap_or_else(|| fallback_symbol(state, root_match.len)),
    }
}

fn string_mode_result<W>(state: &PikaState<W>, len: usize) -> Term {
    let bytes = &state.input()[0..len];
    Term::cons_list(
        state.tags.nil,
        state.tags.cons,
        bytes
            .iter()
            .map(|&b| Term::ctor1(state.tags.chr, Term::nat(b as u32)))
            .collect::<Vec<_>>()
            .into_iter(),
    )
}

fn fallback_symbol<W>(state: &PikaState<W>, len: usize) -> Term {
    let code = omnilisp_base::nick_bytes(&state.input()[0..len]);
    Term::ctor1(state.tags.sym, Term::nat(code))
}

/// One-shot wrapper: allocates a state, runs the parser, discards the
/// table.
pub fn pika_match<W: Default>(input: &[u8], rules: &[crate::rule::Rule<W>], root: RuleId) -> Term {
    let state = PikaState::new(input, rules);
    run(&state, root)
}

/// Looks up `pattern` against `rules`' structural shape in
/// [`crate::cache::PATTERN_CACHE`], running [`pika_match`] and caching
/// the result on a miss.
///
/// Caches the computed [`Term`], not a live [`PikaState`]: a
/// `PikaState<'r, W>` borrows its rule table and is parameterized over a
/// grammar-specific `W`, so a single process-wide cache keyed only on
/// bytes and rule shape has no non-generic type it could store a state
/// as. The root term is everything a cache hit can usefully return.
pub fn compile_pattern<W: Default>(pattern: &[u8], rules: &[crate::rule::Rule<W>], root: RuleId) -> Term {
    if let Some(cached) = crate::cache::PATTERN_CACHE.lock().unwrap().get(pattern, rules) {
        return cached;
    }
    let result = pika_match(pattern, rules, root);
    crate::cache::PATTERN_CACHE.lock().unwrap().insert(pattern, rules, result.clone());
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Rule;

    #[derive(Default)]
    struct NoAux;

    fn digit_rules() -> Vec<Rule<NoAux>> {
        vec![Rule::new("digit", RuleKind::Range(b'0', b'9'))]
    }

    #[test]
    fn terminal_matches_exact_bytes() {
        let rules: Vec<Rule<NoAux>> = vec![Rule::new("ab", RuleKind::Terminal(b"ab"))];
        let state = PikaState::new(b"ab", &rules);
        let t = run(&state, RuleId(0));
        assert_eq!(t.tag(), Some(state.tags.sym));
    }

    #[test]
    fn range_rejects_out_of_bounds() {
        let rules = digit_rules();
        let state = PikaState::new(b"x", &rules);
        let t = run(&state, RuleId(0));
        assert_eq!(t.tag(), Some(state.tags.err));
    }

    #[test]
    fn alt_picks_first_matching_child() {
        let rules: Vec<Rule<NoAux>> = vec![
            Rule::new("a_or_b", RuleKind::Alt(vec![RuleId(1), RuleId(2)])),
            Rule::new("a", RuleKind::Terminal(b"a")),
            Rule::new("b", RuleKind::Terminal(b"b")),
        ];
        let state = PikaState::new(b"a", &rules);
        let t = run(&state, RuleId(0));
        assert_eq!(t.tag(), Some(state.tags.sym));
    }

    #[test]
    fn rep_matches_zero_or_more() {
        let rules: Vec<Rule<NoAux>> =
            vec![Rule::new("digits", RuleKind::Rep(RuleId(1))), Rule::new("digit", RuleKind::Range(b'0', b'9'))];
        let state = PikaState::new(b"123", &rules);
        state.set_output_mode(OutputMode::String);
        let t = run(&state, RuleId(0));
        assert_eq!(t.children().len(), 3);
    }

    #[test]
    fn string_mode_round_trips_matched_bytes() {
        let rules: Vec<Rule<NoAux>> = vec![Rule::new("ab", RuleKind::Terminal(b"ab"))];
        let state = PikaState::new(b"ab", &rules);
        state.set_output_mode(OutputMode::String);
        let t = run(&state, RuleId(0));
        let codes: Vec<u32> = t
            .children()
            .first()
            .map(|_| ())
            .iter()
            .flat_map(|_| {
                let mut out = vec![];
                let mut cur = t.clone();
                while let Some(tag) = cur.tag() {
                    if tag == state.tags.nil {
                        break;
                    }
                    let head = &cur.children()[0];
                    out.push(head.children()[0].as_nat().unwrap());
                    cur = cur.children()[1].clone();
                }
                out
            })
            .collect();
        assert_eq!(codes, vec![b'a' as u32, b'b' as u32]);
    }

    #[test]
    fn unmatched_root_returns_err_sentinel() {
        let rules: Vec<Rule<NoAux>> = vec![Rule::new("ab", RuleKind::Terminal(b"ab"))];
        let state = PikaState::new(b"xy", &rules);
        let t = run(&state, RuleId(0));
        assert!(t.is_ctor0(state.tags.err));
    }

    #[test]
    fn compile_pattern_is_idempotent_across_calls() {
        crate::cache::pattern_cache_clear();
        let rules: Vec<Rule<NoAux>> = vec![Rule::new("ab", RuleKind::Terminal(b"ab"))];
        let first = compile_pattern(b"ab", &rules, RuleId(0));
        let second = compile_pattern(b"ab", &rules, RuleId(0));
        assert_eq!(first, second);
        let (hits, _, _) = crate::cache::pattern_cache_stats();
        assert!(hits >= 1);
    }
}
