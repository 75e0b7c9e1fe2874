//! 24-bit "nick" encoding of short symbol spellings.
//!
//! Packs up to the first four significant bytes of a name into a 24-bit
//! value, six bits per byte: `a`-`z` to 0-25, `A`-`Z` to 26-51, `0`-`9` to
//! 52-61. The two remaining 6-bit codes are assigned to the punctuation
//! characters OmniLisp identifiers actually use as parts of a name, `_`
//! and `-`; every other byte (including the rest of the reserved special
//! symbol-character set `+ * / = < > ! ? @ % &`) maps to the same
//! fallback code as `-`. This is a deliberate, documented collision: the
//! grammar's own reserved names never collide under it, and distinguishing
//! bare punctuation symbols from each other by nick is not required
//! anywhere actions inspect a nick's bits.
//!
//! The encoding is total but not injective — a string longer than four
//! characters is truncated to its first four, and out-of-alphabet bytes
//! collapse to the fallback code. Avoiding nick collisions within a
//! grammar's own symbol set is the caller's responsibility.

const FALLBACK_CODE: u32 = 63;
const MASK: u32 = 0x00FF_FFFF;

fn letter_to_code(b: u8) -> u32 {
    match b {
        b'a'..=b'z' => (b - b'a') as u32,
        b'A'..=b'Z' => (b - b'A') as u32 + 26,
        b'0'..=b'9' => (b - b'0') as u32 + 52,
        b'_' => 62,
        b'-' => 63,
        _ => FALLBACK_CODE,
    }
}

/// Encodes the first four significant bytes of `name` into a 24-bit nick.
pub fn nick(name: &str) -> u32 {
    let mut k: u32 = 0;
    for &b in name.as_bytes().iter().take(4) {
        k = ((k << 6) + letter_to_code(b)) & MASK;
    }
    k
}

/// Encodes the first four significant bytes of a raw byte slice.
pub fn nick_bytes(bytes: &[u8]) -> u32 {
    let mut k: u32 = 0;
    for &b in bytes.iter().take(4) {
        k = ((k << 6) + letter_to_code(b)) & MASK;
    }
    k
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nick_is_deterministic() {
        assert_eq!(nick("quote"), nick("quote"));
    }

    #[test]
    fn nick_truncates_to_four_significant_characters() {
        assert_eq!(nick("quote"), nick("quot"));
    }

    #[test]
    fn nick_distinguishes_case() {
        assert_ne!(nick("Sym"), nick("sym"));
    }

    #[test]
    fn nick_fits_in_24_bits() {
        assert_eq!(nick("ZZZZ") & !MASK, 0);
    }

    #[test]
    fn nick_bytes_matches_nick_for_ascii() {
        assert_eq!(nick("path"), nick_bytes(b"path"));
    }

    #[test]
    fn punctuation_outside_underscore_and_hyphen_collapses_to_fallback() {
        assert_eq!(nick("+"), nick("-"));
        assert_eq!(nick("*"), nick("-"));
    }
}
