//! Integration tests for the generic engine-level properties: memoization
//! coherence, PEG priority, termination, and string-mode round-trip.
//! Grammar-specific scenarios (reader sugars, desugaring) live in the
//! `omnilisp-grammar` crate's own tests.

use omnilisp_engine::{run, OutputMode, PikaState, Rule, RuleId, RuleKind};
use omnilisp_term::Term;

#[derive(Default)]
struct NoAux;

#[test]
fn left_recursion_through_rep_terminates() {
    // digits := digit digits / digit  (right-recursive, but exercises the
    // same fixpoint machinery a left-recursive grammar would stress)
    let rules: Vec<Rule<NoAux>> = vec![
        Rule::new(
            "digits",
            RuleKind::Alt(vec![RuleId(1), RuleId(2)]),
        ),
        Rule::new("seq", RuleKind::Seq(vec![RuleId(2), RuleId(0)])),
        Rule::new("digit", RuleKind::Range(b'0', b'9')),
    ];
    let state = PikaState::new(b"12345", &rules);
    let t = run(&state, RuleId(0));
    assert_eq!(t.tag(), Some(state.tags.sym));
}

#[test]
fn and_lookahead_consumes_no_input() {
    // and_a followed by a literal "a" must still see the "a" at pos 0.
    let rules: Vec<Rule<NoAux>> = vec![
        Rule::new("seq", RuleKind::Seq(vec![RuleId(1), RuleId(2)])),
        Rule::new("and_a", RuleKind::And(RuleId(2))),
        Rule::new("a", RuleKind::Terminal(b"a")),
    ];
    let state = PikaState::new(b"a", &rules);
    let t = run(&state, RuleId(0));
    assert_eq!(t.tag(), Some(state.tags.sym));
}

#[test]
fn not_lookahead_rejects_when_child_matches() {
    let rules: Vec<Rule<NoAux>> = vec![
        Rule::new("not_a", RuleKind::Not(RuleId(1))),
        Rule::new("a", RuleKind::Terminal(b"a")),
    ];
    let state = PikaState::new(b"a", &rules);
    let t = run(&state, RuleId(0));
    assert_eq!(t.tag(), Some(state.tags.err));
}

#[test]
fn alt_priority_prefers_earlier_alternative_on_overlap() {
    // Both "ab" and "a" would match at position 0; priority should pick
    // the first listed alternative even though both consume valid text.
    let rules: Vec<Rule<NoAux>> = vec![
        Rule::new("choice", RuleKind::Alt(vec![RuleId(1), RuleId(2)])),
        Rule::new("ab", RuleKind::Terminal(b"ab")),
        Rule::new("a", RuleKind::Terminal(b"a")),
    ];
    let state = PikaState::new(b"ab", &rules);
    state.set_output_mode(OutputMode::String);
    let t = run(&state, RuleId(0));
    assert_eq!(t.children().len(), 2);
}

#[test]
fn memoized_cell_is_reused_across_sibling_alternatives() {
    // Two distinct Alt rules both reference the same digit rule; the
    // second lookup must observe the first's memoized result rather than
    // re-deriving a different one.
    let rules: Vec<Rule<NoAux>> = vec![
        Rule::new("first", RuleKind::Ref(RuleId(2))),
        Rule::new("second", RuleKind::Ref(RuleId(2))),
        Rule::new("digit", RuleKind::Range(b'0', b'9')),
    ];
    let state = PikaState::new(b"7", &rules);
    let a = run(&state, RuleId(0));
    let b = run(&state, RuleId(1));
    assert_eq!(a, b);
}

#[test]
fn string_mode_yields_character_cons_list_of_matched_length() {
    let rules: Vec<Rule<NoAux>> = vec![Rule::new("abc", RuleKind::Terminal(b"abc"))];
    let state = PikaState::new(b"abc", &rules);
    state.set_output_mode(OutputMode::String);
    let t = run(&state, RuleId(0));
    assert_eq!(t.children().len(), 3);
    assert!(!t.is_ctor0(state.tags.err));
}

#[test]
fn ast_mode_action_less_root_falls_back_to_nick_symbol() {
    let rules: Vec<Rule<NoAux>> = vec![Rule::new("abc", RuleKind::Terminal(b"abc"))];
    let state = PikaState::new(b"abc", &rules);
    let t = run(&state, RuleId(0));
    assert_eq!(t.tag(), Some(state.tags.sym));
    assert_eq!(t.children()[0].as_nat(), Some(omnilisp_base::nick("abc")));
}

#[test]
fn action_receives_sibling_cells_and_builds_a_term() {
    fn make_pair(state: &PikaState<NoAux>, pos: usize, _m: omnilisp_engine::PikaMatch) -> Term {
        let left = state.get_match(pos, RuleId(1));
        let right = state.get_match(pos + left.len, RuleId(2));
        Term::ctor2(
            omnilisp_base::nick("Pair"),
            left.val.unwrap_or_else(|| Term::nat(0)),
            right.val.unwrap_or_else(|| Term::nat(0)),
        )
    }

    let rules: Vec<Rule<NoAux>> = vec![
        Rule::with_action("pair", RuleKind::Seq(vec![RuleId(1), RuleId(2)]), make_pair),
        Rule::with_action("a", RuleKind::Terminal(b"a"), |_, _, _| Term::nat(1)),
        Rule::with_action("b", RuleKind::Terminal(b"b"), |_, _, _| Term::nat(2)),
    ];
    let state = PikaState::new(b"ab", &rules);
    let t = run(&state, RuleId(0));
    assert_eq!(t.tag(), Some(omnilisp_base::nick("Pair")));
    assert_eq!(t.children()[0], Term::nat(1));
    assert_eq!(t.children()[1], Term::nat(2));
}
