//! Small term-construction helpers shared across action modules.

use omnilisp_term::Term;

use crate::nicks::NICKS;

pub fn nil() -> Term {
    Term::ctor0(NICKS.nil)
}

pub fn cons(head: Term, tail: Term) -> Term {
    Term::ctor2(NICKS.con, head, tail)
}

/// Builds a right-nested cons-list terminated by `Nil` from `items`.
pub fn list(items: Vec<Term>) -> Term {
    Term::cons_list(NICKS.nil, NICKS.con, items.into_iter())
}

pub fn sym_lit(nick: u32) -> Term {
    Term::ctor1(NICKS.sym, Term::nat(nick))
}

pub fn var(index: u32) -> Term {
    Term::ctor1(NICKS.var, Term::nat(index))
}

pub fn int_lit(n: i64) -> Term {
    match u32::try_from(n) {
        Ok(small) => Term::ctor1(NICKS.lit, Term::nat(small)),
        Err(_) => fixed_point(n, 0),
    }
}

/// `Fix(hi, lo, scale)`: the 64-bit value split into its high/low
/// 32-bit halves plus a decimal scale (0 for plain integers).
pub fn fixed_point(value: i64, scale: u32) -> Term {
    let bits = value as u64;
    let hi = (bits >> 32) as u32;
    let lo = (bits & 0xFFFF_FFFF) as u32;
    Term::ctor(NICKS.fix, vec![Term::nat(hi), Term::nat(lo), Term::nat(scale)])
}

pub fn chr(code: u32) -> Term {
    Term::ctor1(NICKS.chr, Term::nat(code))
}

/// `(head . tail-items)` — a two-element-or-more cons-list headed by a
/// nick symbol, used by every reader-sugar desugaring.
pub fn headed_list(head_nick: u32, items: Vec<Term>) -> Term {
    let mut full = vec![sym_lit(head_nick)];
    full.extend(items);
    list(full)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_lit_fits_in_32_bits_as_lit() {
        let t = int_lit(42);
        assert_eq!(t.tag(), Some(NICKS.lit));
        assert_eq!(t.children()[0].as_nat(), Some(42));
    }

    #[test]
    fn int_lit_beyond_32_bits_becomes_fix() {
        let t = int_lit((u32::MAX as i64) + 1);
        assert_eq!(t.tag(), Some(NICKS.fix));
    }

    #[test]
    fn negative_int_lit_becomes_fix() {
        let t = int_lit(-1);
        assert_eq!(t.tag(), Some(NICKS.fix));
    }

    #[test]
    fn list_builds_cons_chain_terminated_by_nil() {
        let t = list(vec![Term::nat(1), Term::nat(2)]);
        assert_eq!(t.tag(), Some(NICKS.con));
        assert_eq!(t.children()[0], Term::nat(1));
        assert!(t.children()[1].children()[1].is_ctor0(NICKS.nil));
    }
}
