//! Constructor and symbol nicks the grammar's actions build terms with.
//!
//! Centralised so every action module refers to the same tag for a given
//! constructor name rather than re-encoding `nick("Sym")` at each call
//! site.

use once_cell::sync::Lazy;
use omnilisp_base::nick;

pub struct Nicks {
    pub nil: u32,
    pub con: u32,
    pub sym: u32,
    pub var: u32,
    pub lit: u32,
    pub fix: u32,
    pub chr: u32,
    pub slot: u32,
    pub dict: u32,
    pub tann: u32,
    pub guard: u32,
    pub spread: u32,
    pub meta: u32,
    pub err: u32,
    pub quote: u32,
    pub quasiquote: u32,
    pub unquote: u32,
    pub unquote_splicing: u32,
    pub path: u32,
    pub set: u32,
    pub fmt: u32,
    pub clf: u32,
    pub value_to_type: u32,
    pub kind_splice: u32,
}

pub static NICKS: Lazy<Nicks> = Lazy::new(|| Nicks {
    nil: nick("Nil"),
    con: nick("Con"),
    sym: nick("Sym"),
    var: nick("Var"),
    lit: nick("Lit"),
    fix: nick("Fix"),
    chr: nick("Chr"),
    slot: nick("Slot"),
    dict: nick("Dict"),
    tann: nick("TAnn"),
    guard: nick("Guar"),
    spread: nick("Sprd"),
    meta: nick("Meta"),
    err: nick("Err"),
    quote: nick("quot"),
    quasiquote: nick("quas"),
    unquote: nick("unqu"),
    unquote_splicing: nick("uqsp"),
    path: nick("path"),
    set: nick("set"),
    fmt: nick("fmt"),
    clf: nick("clf"),
    value_to_type: nick("v2ty"),
    kind_splice: nick("kspl"),
});
