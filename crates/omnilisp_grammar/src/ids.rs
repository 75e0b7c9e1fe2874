//! Rule IDs for the OmniLisp grammar, in table-construction order.
//!
//! Unlike the reference grammar, which re-assigns several rule slots
//! during initialization (only the last assignment sticks — see
//! `build_rules`'s doc comment), every [`Id`] here is given exactly one
//! definition in [`crate::table::build_rules`]. `Id as usize` is the
//! rule's index into the table that function builds.

use omnilisp_engine::RuleId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum Id {
    Epsilon,

    // Whitespace & comments
    CharSpace,
    CharTab,
    CharNl,
    CharCr,
    Space,
    Ws,
    Semicolon,
    NotNl,
    AnyChar,
    CommentChar,
    CommentInner,
    Comment,
    WsOrComment,
    Skip,

    // Digits & plain integers
    Digit,
    Digits,
    Dot,
    Int,

    // Symbols
    AlphaLower,
    AlphaUpper,
    Alpha,
    SymPlus,
    SymMinus,
    SymStar,
    SymSlash,
    SymEq,
    SymLt,
    SymGt,
    SymBang,
    SymQmark,
    SymUnder,
    SymAt,
    SymPercent,
    SymAmp,
    SymSpecial,
    SymInit,
    SymChar,
    SymCont,
    Sym,
    Colon,
    ColonSym,

    // Delimiters
    Lparen,
    Rparen,
    Lbracket,
    Rbracket,
    Lbrace,
    Rbrace,
    Hashbrace,
    Caret,
    Dotdot,
    Colonwhen,

    // Strings
    Dquote,
    Backslash,
    EscN,
    EscT,
    EscR,
    EscQuote,
    EscBslash,
    EscChar,
    EscapeSeq,
    NotDquote,
    NotBackslash,
    StringRegular,
    StringChar,
    StringInner,
    String,

    // Character literals
    NameChar,
    NameRun,
    NamedCharBody,
    NamedChar,

    // Signed integers and the three float shapes
    OptSign,
    SignedInt,
    FloatFull,
    FloatLead,
    FloatTrail,
    AnyFloat,

    // Quote / quasiquote / unquote / unquote-splicing
    QuoteChar,
    QuasiquoteChar,
    UnquoteChar,
    UnquoteSplice,
    Quoted,

    // Path expressions
    PathSegment,
    PathTailItem,
    PathTail,
    PathRoot,
    Path,

    // Set literal
    Hashset,
    Set,

    // Named-char hash prefix
    Hash,

    // Format strings
    HashFmt,
    FmtString,
    HashClf,
    ClfString,

    // #val reader
    HashValKw,
    HashVal,

    // Kind splice
    Hashkind,
    KindSplice,

    // Expression / atom dispatch
    Expr,
    Atom,

    // Lists (execution context)
    ListInnerCont,
    ListInner,
    List,

    // Slots (data context)
    SlotInnerCont,
    SlotInner,
    Slot,

    // Type annotations
    TypeInnerCont,
    TypeInner,
    Type,

    // Dicts
    DictInnerCont,
    DictInner,
    Dict,

    // Metadata
    Meta,

    // Guard / spread
    Guard,
    Spread,

    // Program root
    ProgramInnerCont,
    ProgramInner,
    Program,

    NumRules,
}

pub const NUM_RULES: usize = Id::NumRules as usize;

/// Converts a grammar rule ID into the engine's [`RuleId`].
pub fn r(id: Id) -> RuleId {
    RuleId(id as usize)
}
