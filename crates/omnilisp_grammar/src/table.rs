//! Builds the OmniLisp rule table.
//!
//! The reference grammar initializes several slots more than once during
//! setup — only the final assignment to `R_SIGN`/`R_META`/`R_EXPR`/
//! `R_OPT_SIGN` actually takes effect, the earlier ones are dead stores.
//! [`RuleSlots`] makes that a hard error instead of a silent overwrite:
//! every [`Id`] is set exactly once, and `finish` panics (at grammar
//! construction time, not per-parse) if any slot was never assigned.
//!
//! `LIST_INNER`/`SLOT_INNER`/`TYPE_INNER`/`DICT_INNER`/`PROGRAM_INNER`
//! also depart from the reference shape. There, each is a bare
//! `ALT(EXPR, EPSILON)`, which only spans a single leading element's
//! length — fine for the semantic action (it walks positions directly
//! and only consults `len` for the empty-content check), but wrong for
//! the enclosing `SEQ` that has to find the closing delimiter after
//! *all* elements. Here each inner rule is `ALT(SEQ(EXPR, SKIP, inner),
//! EPSILON)` so its reported length covers the whole remaining content.

use omnilisp_engine::{Rule, RuleKind};

use crate::actions::{atoms, compounds, readers};
use crate::binder::BinderStack;
use crate::ids::{self, Id, NUM_RULES};

struct RuleSlots {
    slots: Vec<Option<Rule<BinderStack>>>,
}

impl RuleSlots {
    fn new() -> Self {
        let mut slots = Vec::with_capacity(NUM_RULES);
        slots.resize_with(NUM_RULES, || None);
        RuleSlots { slots }
    }

    fn set(&mut self, id: Id, rule: Rule<BinderStack>) {
        let idx = id as usize;
        if self.slots[idx].is_some() {
            panic!("rule slot {:?} assigned more than once", idx);
        }
        self.slots[idx] = Some(rule);
    }

    fn finish(self) -> Vec<Rule<BinderStack>> {
        self.slots
            .into_iter()
            .enumerate()
            .map(|(i, slot)| slot.unwrap_or_else(|| panic!("rule slot {} was never assigned", i)))
            .collect()
    }
}

fn rid(id: Id) -> omnilisp_engine::RuleId {
    ids::r(id)
}

fn seq(ids_list: &[Id]) -> RuleKind {
    RuleKind::Seq(ids_list.iter().map(|&i| rid(i)).collect())
}

fn alt(ids_list: &[Id]) -> RuleKind {
    RuleKind::Alt(ids_list.iter().map(|&i| rid(i)).collect())
}

/// Builds the complete OmniLisp grammar, one [`Id`] variant to one table
/// slot, in rule-construction order (not declaration order — forward
/// references through [`Id`] are just integers, so there is no ordering
/// constraint between a rule and the rules it names).
pub fn build_rules() -> Vec<Rule<BinderStack>> {
    let mut t = RuleSlots::new();

    t.set(Id::Epsilon, Rule::new("Epsilon", RuleKind::Terminal(b"")));

    // Whitespace & comments
    t.set(Id::CharSpace, Rule::new("CharSpace", RuleKind::Terminal(b" ")));
    t.set(Id::CharTab, Rule::new("CharTab", RuleKind::Terminal(b"\t")));
    t.set(Id::CharNl, Rule::new("CharNl", RuleKind::Terminal(b"\n")));
    t.set(Id::CharCr, Rule::new("CharCr", RuleKind::Terminal(b"\r")));
    t.set(Id::Space, Rule::new("Space", alt(&[Id::CharSpace, Id::CharTab, Id::CharNl, Id::CharCr])));
    t.set(Id::Ws, Rule::new("Ws", RuleKind::Rep(rid(Id::Space))));
    t.set(Id::Semicolon, Rule::new("Semicolon", RuleKind::Terminal(b";")));
    t.set(Id::NotNl, Rule::new("NotNl", RuleKind::Not(rid(Id::CharNl))));
    t.set(Id::AnyChar, Rule::new("AnyChar", RuleKind::Any));
    t.set(Id::CommentChar, Rule::new("CommentChar", seq(&[Id::NotNl, Id::AnyChar])));
    t.set(Id::CommentInner, Rule::new("CommentInner", RuleKind::Rep(rid(Id::CommentChar))));
    t.set(Id::Comment, Rule::new("Comment", seq(&[Id::Semicolon, Id::CommentInner])));
    t.set(Id::WsOrComment, Rule::new("WsOrComment", alt(&[Id::Space, Id::Comment])));
    t.set(Id::Skip, Rule::new("Skip", RuleKind::Rep(rid(Id::WsOrComment))));

    // Digits & plain integers
    t.set(Id::Digit, Rule::new("Digit", RuleKind::Range(b'0', b'9')));
    t.set(Id::Digits, Rule::new("Digits", RuleKind::Pos(rid(Id::Digit))));
    t.set(Id::Dot, Rule::new("Dot", RuleKind::Terminal(b".")));
    t.set(Id::Int, Rule::with_action("Int", RuleKind::Pos(rid(Id::Digit)), atoms::act_int));

    // Symbols
    t.set(Id::AlphaLower, Rule::new("AlphaLower", RuleKind::Range(b'a', b'z')));
    t.set(Id::AlphaUpper, Rule::new("AlphaUpper", RuleKind::Range(b'A', b'Z')));
    t.set(Id::Alpha, Rule::new("Alpha", alt(&[Id::AlphaLower, Id::AlphaUpper])));
    t.set(Id::SymPlus, Rule::new("SymPlus", RuleKind::Terminal(b"+")));
    t.set(Id::SymMinus, Rule::new("SymMinus", RuleKind::Terminal(b"-")));
    t.set(Id::SymStar, Rule::new("SymStar", RuleKind::Terminal(b"*")));
    t.set(Id::SymSlash, Rule::new("SymSlash", RuleKind::Terminal(b"/")));
    t.set(Id::SymEq, Rule::new("SymEq", RuleKind::Terminal(b"=")));
    t.set(Id::SymLt, Rule::new("SymLt", RuleKind::Terminal(b"<")));
    t.set(Id::SymGt, Rule::new("SymGt", RuleKind::Terminal(b">")));
    t.set(Id::SymBang, Rule::new("SymBang", RuleKind::Terminal(b"!")));
    t.set(Id::SymQmark, Rule::new("SymQmark", RuleKind::Terminal(b"?")));
    t.set(Id::SymUnder, Rule::new("SymUnder", RuleKind::Terminal(b"_")));
    t.set(Id::SymAt, Rule::new("SymAt", RuleKind::Terminal(b"@")));
    t.set(Id::SymPercent, Rule::new("SymPercent", RuleKind::Terminal(b"%")));
    t.set(Id::SymAmp, Rule::new("SymAmp", RuleKind::Terminal(b"&")));
    t.set(
        Id::SymSpecial,
        Rule::new(
            "SymSpecial",
            alt(&[
                Id::SymPlus,
                Id::SymMinus,
                Id::SymStar,
                Id::SymSlash,
                Id::SymEq,
                Id::SymLt,
                Id::SymGt,
                Id::SymBang,
                Id::SymQmark,
                Id::SymUnder,
                Id::SymAt,
                Id::SymPercent,
                Id::SymAmp,
            ]),
        ),
    );
    t.set(Id::SymInit, Rule::new("SymInit", alt(&[Id::Alpha, Id::SymSpecial])));
    t.set(Id::SymChar, Rule::new("SymChar", alt(&[Id::Alpha, Id::Digit, Id::SymSpecial])));
    t.set(Id::SymCont, Rule::new("SymCont", RuleKind::Rep(rid(Id::SymChar))));
    t.set(Id::Sym, Rule::with_action("Sym", seq(&[Id::SymInit, Id::SymCont]), atoms::act_sym));
    t.set(Id::Colon, Rule::new("Colon", RuleKind::Terminal(b":")));
    t.set(Id::ColonSym, Rule::with_action("ColonSym", seq(&[Id::Colon, Id::Sym]), atoms::act_colon_quoted));

    // Delimiters
    t.set(Id::Lparen, Rule::new("Lparen", RuleKind::Terminal(b"(")));
    t.set(Id::Rparen, Rule::new("Rparen", RuleKind::Terminal(b")")));
    t.set(Id::Lbracket, Rule::new("Lbracket", RuleKind::Terminal(b"[")));
    t.set(Id::Rbracket, Rule::new("Rbracket", RuleKind::Terminal(b"]")));
    t.set(Id::Lbrace, Rule::new("Lbrace", RuleKind::Terminal(b"{")));
    t.set(Id::Rbrace, Rule::new("Rbrace", RuleKind::Terminal(b"}")));
    t.set(Id::Hashbrace, Rule::new("Hashbrace", RuleKind::Terminal(b"#{")));
    t.set(Id::Caret, Rule::new("Caret", RuleKind::Terminal(b"^")));
    t.set(Id::Dotdot, Rule::new("Dotdot", RuleKind::Terminal(b"..")));
    t.set(Id::Colonwhen, Rule::new("Colonwhen", RuleKind::Terminal(b":when")));

    // Strings
    t.set(Id::Dquote, Rule::new("Dquote", RuleKind::Terminal(b"\"")));
    t.set(Id::Backslash, Rule::new("Backslash", RuleKind::Terminal(b"\\")));
    t.set(Id::EscN, Rule::new("EscN", RuleKind::Terminal(b"n")));
    t.set(Id::EscT, Rule::new("EscT", RuleKind::Terminal(b"t")));
    t.set(Id::EscR, Rule::new("EscR", RuleKind::Terminal(b"r")));
    t.set(Id::EscQuote, Rule::new("EscQuote", RuleKind::Terminal(b"\"")));
    t.set(Id::EscBslash, Rule::new("EscBslash", RuleKind::Terminal(b"\\")));
    t.set(Id::EscChar, Rule::new("EscChar", alt(&[Id::EscN, Id::EscT, Id::EscR, Id::EscQuote, Id::EscBslash])));
    t.set(Id::EscapeSeq, Rule::new("EscapeSeq", seq(&[Id::Backslash, Id::EscChar])));
    t.set(Id::NotDquote, Rule::new("NotDquote", RuleKind::Not(rid(Id::Dquote))));
    t.set(Id::NotBackslash, Rule::new("NotBackslash", RuleKind::Not(rid(Id::Backslash))));
    t.set(Id::StringRegular, Rule::new("StringRegular", seq(&[Id::NotDquote, Id::NotBackslash, Id::AnyChar])));
    t.set(Id::StringChar, Rule::new("StringChar", alt(&[Id::EscapeSeq, Id::StringRegular])));
    t.set(Id::StringInner, Rule::new("StringInner", RuleKind::Rep(rid(Id::StringChar))));
    t.set(Id::String, Rule::with_action("String", seq(&[Id::Dquote, Id::StringInner, Id::Dquote]), atoms::act_string));

    // Character literals
    t.set(Id::NameChar, Rule::new("NameChar", alt(&[Id::Alpha, Id::Digit])));
    t.set(Id::NameRun, Rule::new("NameRun", RuleKind::Pos(rid(Id::NameChar))));
    t.set(Id::NamedCharBody, Rule::new("NamedCharBody", alt(&[Id::NameRun, Id::AnyChar])));
    t.set(
        Id::NamedChar,
        Rule::with_action("NamedChar", seq(&[Id::Hash, Id::Backslash, Id::NamedCharBody]), atoms::act_named_char),
    );

    // Signed integers and the three float shapes
    t.set(Id::OptSign, Rule::new("OptSign", alt(&[Id::SymPlus, Id::SymMinus])));
    t.set(Id::SignedInt, Rule::with_action("SignedInt", seq(&[Id::OptSign, Id::Digits]), atoms::act_signed_int));
    t.set(Id::FloatFull, Rule::with_action("FloatFull", seq(&[Id::OptSign, Id::Digits, Id::Dot, Id::Digits]), atoms::act_float));
    t.set(Id::FloatLead, Rule::with_action("FloatLead", seq(&[Id::OptSign, Id::Dot, Id::Digits]), atoms::act_float));
    t.set(Id::FloatTrail, Rule::with_action("FloatTrail", seq(&[Id::OptSign, Id::Digits, Id::Dot]), atoms::act_float));
    t.set(Id::AnyFloat, Rule::new("AnyFloat", alt(&[Id::FloatFull, Id::FloatLead, Id::FloatTrail])));

    // Quote / quasiquote / unquote / unquote-splicing
    t.set(Id::QuoteChar, Rule::new("QuoteChar", RuleKind::Terminal(b"'")));
    t.set(Id::QuasiquoteChar, Rule::new("QuasiquoteChar", RuleKind::Terminal(b"`")));
    t.set(Id::UnquoteChar, Rule::new("UnquoteChar", RuleKind::Terminal(b",")));
    t.set(Id::UnquoteSplice, Rule::new("UnquoteSplice", RuleKind::Terminal(b",@")));
    t.set(
        Id::Quoted,
        Rule::with_action(
            "Quoted",
            alt(&[Id::UnquoteSplice, Id::QuoteChar, Id::QuasiquoteChar, Id::UnquoteChar]),
            readers::act_quoted,
        ),
    );

    // Path expressions
    t.set(Id::PathSegment, Rule::new("PathSegment", alt(&[Id::Sym, Id::Int])));
    t.set(Id::PathTailItem, Rule::new("PathTailItem", seq(&[Id::Dot, Id::PathSegment])));
    t.set(Id::PathTail, Rule::new("PathTail", RuleKind::Pos(rid(Id::PathTailItem))));
    t.set(Id::PathRoot, Rule::new("PathRoot", alt(&[Id::Sym, Id::Int])));
    t.set(Id::Path, Rule::with_action("Path", seq(&[Id::PathRoot, Id::PathTail]), readers::act_path));

    // Set literal
    t.set(Id::Hashset, Rule::new("Hashset", RuleKind::Terminal(b"#set")));
    t.set(
        Id::Set,
        Rule::with_action("Set", seq(&[Id::Hashset, Id::Lbrace, Id::Skip, Id::SlotInner, Id::Skip, Id::Rbrace]), compounds::act_set),
    );

    // Named-char hash prefix
    t.set(Id::Hash, Rule::new("Hash", RuleKind::Terminal(b"#")));

    // Format strings
    t.set(Id::HashFmt, Rule::new("HashFmt", RuleKind::Terminal(b"#fmt")));
    t.set(Id::FmtString, Rule::with_action("FmtString", seq(&[Id::HashFmt, Id::String]), readers::act_fmt_string));
    t.set(Id::HashClf, Rule::new("HashClf", RuleKind::Terminal(b"#clf")));
    t.set(Id::ClfString, Rule::with_action("ClfString", seq(&[Id::HashClf, Id::String]), readers::act_clf_string));

    // #val reader
    t.set(Id::HashValKw, Rule::new("HashValKw", RuleKind::Terminal(b"#val")));
    t.set(Id::HashVal, Rule::with_action("HashVal", seq(&[Id::HashValKw, Id::Skip, Id::Atom]), readers::act_hash_val));

    // Kind splice
    t.set(Id::Hashkind, Rule::new("Hashkind", RuleKind::Terminal(b"#kind")));
    t.set(
        Id::KindSplice,
        Rule::with_action(
            "KindSplice",
            seq(&[Id::Lbrace, Id::Skip, Id::Hashkind, Id::Skip, Id::Expr, Id::Rbrace]),
            compounds::act_kind_splice,
        ),
    );

    // Expression / atom dispatch. No action: both are pure wrapper `Alt`s
    // whose chosen child's value is forwarded by the engine itself.
    t.set(Id::Atom, Rule::new("Atom", alt(&[Id::AnyFloat, Id::SignedInt, Id::Int, Id::String, Id::ColonSym, Id::Sym])));
    t.set(
        Id::Expr,
        Rule::new(
            "Expr",
            alt(&[
                Id::FmtString,
                Id::ClfString,
                Id::Set,
                Id::NamedChar,
                Id::KindSplice,
                Id::HashVal,
                Id::Dict,
                Id::Quoted,
                Id::Path,
                Id::List,
                Id::Slot,
                Id::Type,
                Id::Meta,
                Id::Guard,
                Id::Spread,
                Id::AnyFloat,
                Id::SignedInt,
                Id::Int,
                Id::String,
                Id::ColonSym,
                Id::Sym,
            ]),
        ),
    );

    // Lists
    t.set(Id::ListInnerCont, Rule::new("ListInnerCont", seq(&[Id::Expr, Id::Skip, Id::ListInner])));
    t.set(Id::ListInner, Rule::with_action("ListInner", alt(&[Id::ListInnerCont, Id::Epsilon]), compounds::act_list_inner));
    t.set(Id::List, Rule::with_action("List", seq(&[Id::Lparen, Id::Skip, Id::ListInner, Id::Skip, Id::Rparen]), compounds::act_list));

    // Slots
    t.set(Id::SlotInnerCont, Rule::new("SlotInnerCont", seq(&[Id::Expr, Id::Skip, Id::SlotInner])));
    t.set(Id::SlotInner, Rule::with_action("SlotInner", alt(&[Id::SlotInnerCont, Id::Epsilon]), compounds::act_slot_inner));
    t.set(Id::Slot, Rule::with_action("Slot", seq(&[Id::Lbracket, Id::Skip, Id::SlotInner, Id::Skip, Id::Rbracket]), compounds::act_slot));

    // Type annotations
    t.set(Id::TypeInnerCont, Rule::new("TypeInnerCont", seq(&[Id::Expr, Id::Skip, Id::TypeInner])));
    t.set(Id::TypeInner, Rule::with_action("TypeInner", alt(&[Id::TypeInnerCont, Id::Epsilon]), compounds::act_type_inner));
    t.set(Id::Type, Rule::with_action("Type", seq(&[Id::Lbrace, Id::Skip, Id::TypeInner, Id::Skip, Id::Rbrace]), compounds::act_type));

    // Dicts
    t.set(Id::DictInnerCont, Rule::new("DictInnerCont", seq(&[Id::Expr, Id::Skip, Id::DictInner])));
    t.set(Id::DictInner, Rule::with_action("DictInner", alt(&[Id::DictInnerCont, Id::Epsilon]), compounds::act_dict_inner));
    t.set(Id::Dict, Rule::with_action("Dict", seq(&[Id::Hashbrace, Id::Skip, Id::DictInner, Id::Skip, Id::Rbrace]), compounds::act_dict));

    // Metadata
    t.set(Id::Meta, Rule::with_action("Meta", seq(&[Id::Caret, Id::ColonSym]), compounds::act_meta));

    // Guard / spread
    t.set(Id::Guard, Rule::with_action("Guard", seq(&[Id::Colonwhen, Id::Skip, Id::Expr]), compounds::act_guard));
    t.set(Id::Spread, Rule::with_action("Spread", seq(&[Id::Dotdot, Id::Skip, Id::Sym]), compounds::act_spread));

    // Program root
    t.set(Id::ProgramInnerCont, Rule::new("ProgramInnerCont", seq(&[Id::Expr, Id::Skip, Id::ProgramInner])));
    t.set(
        Id::ProgramInner,
        Rule::with_action("ProgramInner", alt(&[Id::ProgramInnerCont, Id::Epsilon]), readers::act_program_inner),
    );
    t.set(Id::Program, Rule::with_action("Program", seq(&[Id::Skip, Id::ProgramInner]), readers::act_program));

    t.finish()
}
