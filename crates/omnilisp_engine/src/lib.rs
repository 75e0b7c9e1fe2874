//! The packrat parsing engine: rule tables, parser state, the
//! right-to-left fixpoint, and the process-wide pattern cache.
//!
//! This crate knows nothing about OmniLisp's actual grammar — it is the
//! generic machinery a grammar crate builds its rule table and semantic
//! actions against.

pub mod cache;
pub mod engine;
pub mod rule;
pub mod state;

pub use cache::{pattern_cache_clear, pattern_cache_stats, PatternCache};
pub use engine::{compile_pattern, evaluate_rule, pika_match, run};
pub use rule::{ActionFn, Rule, RuleId, RuleKind};
pub use state::{EngineTags, OutputMode, PikaMatch, PikaState};
