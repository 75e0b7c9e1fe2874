//! Actions for the primitive atoms: integers, floats, symbols, strings,
//! and character literals.

use omnilisp_base::nick_bytes;
use omnilisp_engine::{PikaMatch, PikaState};
use omnilisp_term::Term;

use crate::binder::BinderStack;
use crate::helpers;

fn matched_text<'a>(state: &'a PikaState<BinderStack>, pos: usize, len: usize) -> &'a [u8] {
    &state.input()[pos..pos + len]
}

fn parse_i64(bytes: &[u8]) -> i64 {
    std::str::from_utf8(bytes)
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .unwrap_or(0)
}

pub fn act_int(state: &PikaState<BinderStack>, pos: usize, m: PikaMatch) -> Term {
    helpers::int_lit(parse_i64(matched_text(state, pos, m.len)))
}

pub fn act_signed_int(state: &PikaState<BinderStack>, pos: usize, m: PikaMatch) -> Term {
    helpers::int_lit(parse_i64(matched_text(state, pos, m.len)))
}

/// Splits the matched text at its decimal point into a digit run and a
/// fractional-digit count, then emits `Fix(hi, lo, scale)`. Works for
/// `FLOAT`, `FLOAT_FULL`, `FLOAT_LEAD`, and `FLOAT_TRAIL` alike since all
/// four shapes differ only in where the digits fall relative to `.`.
pub fn act_float(state: &PikaState<BinderStack>, pos: usize, m: PikaMatch) -> Term {
    let text = matched_text(state, pos, m.len);
    let dot = text.iter().position(|&b| b == b'.').unwrap_or(text.len());
    let scale = (text.len() - dot).saturating_sub(1) as u32;
    let mut digits = Vec::with_capacity(text.len());
    digits.extend_from_slice(&text[..dot]);
    if dot < text.len() {
        digits.extend_from_slice(&text[dot + 1..]);
    }
    helpers::fixed_point(parse_i64(&digits), scale)
}

pub fn act_sym(state: &PikaState<BinderStack>, pos: usize, m: PikaMatch) -> Term {
    let nick = nick_bytes(matched_text(state, pos, m.len));
    match state.aux.borrow().lookup(nick) {
        Some(idx) => helpers::var(idx),
        None => helpers::sym_lit(nick),
    }
}

/// `:name` desugars to `(quote name)`.
pub fn act_colon_quoted(state: &PikaState<BinderStack>, pos: usize, m: PikaMatch) -> Term {
    let nick = nick_bytes(matched_text(state, pos + 1, m.len - 1));
    helpers::headed_list(crate::nicks::NICKS.quote, vec![helpers::sym_lit(nick)])
}

fn decode_escape(b: u8) -> u8 {
    match b {
        b'n' => b'\n',
        b't' => b'\t',
        b'r' => b'\r',
        b'"' => b'"',
        b'\\' => b'\\',
        other => other,
    }
}

/// Builds a `Chr` cons-list from the quoted text between the opening and
/// closing `"`, decoding backslash escapes byte-wise.
pub fn act_string(state: &PikaState<BinderStack>, pos: usize, m: PikaMatch) -> Term {
    let inner = &state.input()[pos + 1..pos + m.len - 1];
    let mut chars = Vec::new();
    let mut i = 0;
    while i < inner.len() {
        if inner[i] == b'\\' && i + 1 < inner.len() {
            chars.push(helpers::chr(decode_escape(inner[i + 1]) as u32));
            i += 2;
        } else {
            chars.push(helpers::chr(inner[i] as u32));
            i += 1;
        }
    }
    helpers::list(chars)
}

fn named_char_code(name: &[u8]) -> Option<u32> {
    match name {
        b"newline" => Some(10),
        b"tab" => Some(9),
        b"space" => Some(32),
        b"return" => Some(13),
        b"nul" => Some(0),
        b"bell" => Some(7),
        b"backspace" => Some(8),
        b"escape" => Some(27),
        b"delete" => Some(127),
        _ if name.len() == 3 && name[0] == b'x' => {
            let hex = std::str::from_utf8(&name[1..3]).ok()?;
            u32::from_str_radix(hex, 16).ok()
        }
        _ => None,
    }
}

/// `#\<name>` (a known name or `xNN` hex escape) or `#\<char>` (single
/// byte fallback).
pub fn act_named_char(state: &PikaState<BinderStack>, pos: usize, m: PikaMatch) -> Term {
    let name = &state.input()[pos + 2..pos + m.len];
    if let Some(code) = named_char_code(name) {
        return helpers::chr(code);
    }
    if name.len() == 1 {
        return helpers::chr(name[0] as u32);
    }
    helpers::nil()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::build_rules;
    use crate::ids::{self, Id};
    use omnilisp_engine::run;

    #[test]
    fn act_float_splits_at_decimal_point() {
        let rules = build_rules();
        let state = PikaState::new(b"3.14", &rules);
        let t = run(&state, ids::r(Id::AnyFloat));
        assert_eq!(t.tag(), Some(crate::nicks::NICKS.fix));
        assert_eq!(t.children()[2].as_nat(), Some(2));
    }

    #[test]
    fn act_string_decodes_escapes() {
        let rules = build_rules();
        let state = PikaState::new(b"\"ab\\nc\"", &rules);
        let t = run(&state, ids::r(Id::String));
        let codes: Vec<u32> = collect_chars(&t);
        assert_eq!(codes, vec![97, 98, 10, 99]);
    }

    fn collect_chars(t: &Term) -> Vec<u32> {
        let mut out = vec![];
        let mut cur = t.clone();
        while cur.tag() == Some(crate::nicks::NICKS.con) {
            out.push(cur.children()[0].children()[0].as_nat().unwrap());
            cur = cur.children()[1].clone();
        }
        out
    }

    #[test]
    fn named_char_newline_decodes_to_code_10() {
        let rules = build_rules();
        let state = PikaState::new(b"#\\newline", &rules);
        let t = run(&state, ids::r(Id::NamedChar));
        assert_eq!(t.tag(), Some(crate::nicks::NICKS.chr));
        assert_eq!(t.children()[0].as_nat(), Some(10));
    }

    #[test]
    fn named_char_hex_decodes_ascii_value() {
        let rules = build_rules();
        let state = PikaState::new(b"#\\x41", &rules);
        let t = run(&state, ids::r(Id::NamedChar));
        assert_eq!(t.children()[0].as_nat(), Some(65));
    }

    #[test]
    fn colon_sym_desugars_to_quote_form() {
        let rules = build_rules();
        let state = PikaState::new(b":foo", &rules);
        let t = run(&state, ids::r(Id::ColonSym));
        assert_eq!(t.tag(), Some(crate::nicks::NICKS.con));
        assert_eq!(t.children()[0].children()[0].as_nat(), Some(crate::nicks::NICKS.quote));
        let second = &t.children()[1];
        assert_eq!(second.children()[0].children()[0].as_nat(), Some(omnilisp_base::nick("foo")));
    }
}
