//! Process-wide pattern cache.
//!
//! Keyed by a combination of the input pattern's bytes and the rule
//! table's structural shape, so two parses against the same grammar and
//! the same literal pattern text can reuse a previously-computed root
//! term instead of re-running the fixpoint. A fixed 32-bucket chained
//! hash table, matching the size the reference engine allocates for this
//! purpose: pattern reuse within a single grammar's lifetime is expected
//! to be small and bursty (e.g. repeatedly re-parsing the same literal
//! inside a macro-expansion loop), not a large working set.

use std::sync::Mutex;

use omnilisp_term::Term;
use once_cell::sync::Lazy;

use crate::rule::{Rule, RuleKind};

const NUM_BUCKETS: usize = 32;

/// djb2, matching the reference implementation's string hash.
fn hash_string(bytes: &[u8]) -> u64 {
    let mut h: u64 = 5381;
    for &b in bytes {
        h = h.wrapping_mul(33).wrapping_add(b as u64);
    }
    h
}

/// Structural hash of a rule table: covers `Terminal` payloads, `Range`
/// bounds, `Seq`/`Alt` child counts, and `Ref` targets. Does not cover
/// `Rep`/`Pos`/`Opt`/`Not`/`And` payloads, matching the reference
/// engine's coverage — those operators never change a rule's hash
/// contribution beyond their discriminant.
fn hash_rules<W>(rules: &[Rule<W>]) -> u64 {
    let mut h: u64 = 5381;
    let mut mix = |v: u64| h = h.wrapping_mul(33).wrapping_add(v);
    for rule in rules {
        match &rule.kind {
            RuleKind::Terminal(bytes) => {
                mix(1);
                for &b in *bytes {
                    mix(b as u64);
                }
            }
            RuleKind::Range(lo, hi) => {
                mix(2);
                mix(*lo as u64);
                mix(*hi as u64);
            }
            RuleKind::Any => mix(3),
            RuleKind::Seq(children) => {
                mix(4);
                mix(children.len() as u64);
            }
            RuleKind::Alt(children) => {
                mix(5);
                mix(children.len() as u64);
            }
            RuleKind::Rep(_) => mix(6),
            RuleKind::Pos(_) => mix(7),
            RuleKind::Opt(_) => mix(8),
            RuleKind::Not(_) => mix(9),
            RuleKind::And(_) => mix(10),
            RuleKind::Ref(target) => {
                mix(11);
                mix(target.index() as u64);
            }
        }
    }
    h
}

fn combined_hash<W>(pattern: &[u8], rules: &[Rule<W>]) -> u64 {
    hash_string(pattern) ^ hash_rules(rules)
}

#[derive(Clone)]
struct Entry {
    key: u64,
    pattern: Vec<u8>,
    result: Term,
}

/// A fixed-bucket-count chained hash table from `(pattern, rule shape)`
/// to a previously-computed root term.
pub struct PatternCache {
    buckets: Vec<Vec<Entry>>,
    hits: u64,
    misses: u64,
}

impl PatternCache {
    fn new() -> Self {
        PatternCache {
            buckets: (0..NUM_BUCKETS).map(|_| Vec::new()).collect(),
            hits: 0,
            misses: 0,
        }
    }

    fn bucket_for(&self, key: u64) -> usize {
        (key as usize) % NUM_BUCKETS
    }

    /// Looks up a cached result, recording a hit or miss for
    /// [`PatternCache::stats`].
    pub fn get<W>(&mut self, pattern: &[u8], rules: &[Rule<W>]) -> Option<Term> {
        let key = combined_hash(pattern, rules);
        let bucket = self.bucket_for(key);
        let found = self.buckets[bucket]
            .iter()
            .find(|e| e.key == key && e.pattern == pattern)
            .map(|e| e.result.clone());
        if found.is_some() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        found
    }

    /// Inserts a freshly-computed result, replacing any existing entry
    /// for the same key and pattern.
    pub fn insert<W>(&mut self, pattern: &[u8], rules: &[Rule<W>], result: Term) {
        let key = combined_hash(pattern, rules);
        let bucket = self.bucket_for(key);
        if let Some(existing) = self.buckets[bucket]
            .iter_mut()
            .find(|e| e.key == key && e.pattern == pattern)
        {
            existing.result = result;
            return;
        }
        self.buckets[bucket].push(Entry {
            key,
            pattern: pattern.to_vec(),
            result,
        });
    }

    /// Drops every cached entry and resets hit/miss counters.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.hits = 0;
        self.misses = 0;
    }

    /// `(hits, misses, entries)` since the last [`PatternCache::clear`].
    pub fn stats(&self) -> (u64, u64, usize) {
        let entries = self.buckets.iter().map(Vec::len).sum();
        (self.hits, self.misses, entries)
    }
}

impl Default for PatternCache {
    fn default() -> Self {
        PatternCache::new()
    }
}

/// Process-wide pattern cache singleton. One table is shared across every
/// grammar instantiated in the process; the combined hash already
/// distinguishes parses against different rule tables.
pub static PATTERN_CACHE: Lazy<Mutex<PatternCache>> = Lazy::new(|| Mutex::new(PatternCache::new()));

/// Clears [`PATTERN_CACHE`]. Exposed for tests and for the CLI's
/// `--cache-stats` command, which reports a fresh count after clearing.
pub fn pattern_cache_clear() {
    PATTERN_CACHE.lock().unwrap().clear();
}

/// `(hits, misses, entries)` for [`PATTERN_CACHE`].
pub fn pattern_cache_stats() -> (u64, u64, usize) {
    PATTERN_CACHE.lock().unwrap().stats()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::Rule;

    #[derive(Default)]
    struct NoAux;

    fn rules() -> Vec<Rule<NoAux>> {
        vec![Rule::new("ab", RuleKind::Terminal(b"ab"))]
    }

    #[test]
    fn miss_then_hit() {
        let mut cache = PatternCache::new();
        let r = rules();
        assert!(cache.get(b"ab", &r).is_none());
        cache.insert(b"ab", &r, Term::nat(1));
        assert_eq!(cache.get(b"ab", &r), Some(Term::nat(1)));
        let (hits, misses, entries) = cache.stats();
        assert_eq!(hits, 1);
        assert_eq!(misses, 2);
        assert_eq!(entries, 1);
    }

    #[test]
    fn different_pattern_is_a_distinct_entry() {
        let mut cache = PatternCache::new();
        let r = rules();
        cache.insert(b"ab", &r, Term::nat(1));
        assert!(cache.get(b"cd", &r).is_none());
    }

    #[test]
    fn clear_drops_entries_and_resets_counters() {
        let mut cache = PatternCache::new();
        let r = rules();
        cache.insert(b"ab", &r, Term::nat(1));
        cache.clear();
        assert_eq!(cache.stats(), (0, 0, 0));
        assert!(cache.get(b"ab", &r).is_none());
    }

    #[test]
    fn insert_overwrites_existing_entry_for_same_key() {
        let mut cache = PatternCache::new();
        let r = rules();
        cache.insert(b"ab", &r, Term::nat(1));
        cache.insert(b"ab", &r, Term::nat(2));
        assert_eq!(cache.get(b"ab", &r), Some(Term::nat(2)));
        let (_, _, entries) = cache.stats();
        assert_eq!(entries, 1);
    }
}
