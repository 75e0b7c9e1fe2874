//! Immutable term representation.
//!
//! A term is either a 32-bit natural-number leaf or a constructor node
//! carrying a 24-bit tag and an ordered list of children. This crate has
//! no knowledge of what a tag *means* — nick encoding, reserved tag
//! values like `Nil`/`Con`/`Err`, and grammar-specific shapes all live in
//! the crate that builds terms during parsing.
//!
//! Terms are reference-counted rather than arena-borrowed: the packrat
//! engine's memoization table holds many overlapping references to the
//! same subtree across fixpoint iterations (an `Alt` rule copies a
//! sibling's cached value verbatim into a different table cell), and an
//! `Rc` clone is the cheapest way to share that value without re-running
//! the action or threading a single arena lifetime through the cache.

use std::fmt;
use std::rc::Rc;

/// A 24-bit constructor tag. Only the low 24 bits are meaningful.
pub type Tag = u32;

/// Mask keeping a value within 24 bits.
pub const TAG_MASK: u32 = 0x00FF_FFFF;

#[derive(Debug, PartialEq)]
enum Node {
    Nat(u32),
    Ctor { tag: Tag, children: Vec<Term> },
}

/// An immutable, cheaply-cloned term.
#[derive(Debug, Clone, PartialEq)]
pub struct Term(Rc<Node>);

impl Term {
    /// Builds a natural-number leaf.
    pub fn nat(value: u32) -> Term {
        Term(Rc::new(Node::Nat(value)))
    }

    /// Builds a constructor node with the given tag and children.
    pub fn ctor(tag: Tag, children: Vec<Term>) -> Term {
        Term(Rc::new(Node::Ctor {
            tag: tag & TAG_MASK,
            children,
        }))
    }

    /// Builds a zero-child constructor node.
    pub fn ctor0(tag: Tag) -> Term {
        Term::ctor(tag, Vec::new())
    }

    /// Builds a one-child constructor node.
    pub fn ctor1(tag: Tag, a: Term) -> Term {
        Term::ctor(tag, vec![a])
    }

    /// Builds a two-child constructor node.
    pub fn ctor2(tag: Tag, a: Term, b: Term) -> Term {
        Term::ctor(tag, vec![a, b])
    }

    /// Builds a three-child constructor node.
    pub fn ctor3(tag: Tag, a: Term, b: Term, c: Term) -> Term {
        Term::ctor(tag, vec![a, b, c])
    }

    /// `true` if this term is a natural-number leaf.
    pub fn is_nat(&self) -> bool {
        matches!(*self.0, Node::Nat(_))
    }

    /// Returns the leaf value if this term is a natural-number leaf.
    pub fn as_nat(&self) -> Option<u32> {
        match *self.0 {
            Node::Nat(n) => Some(n),
            Node::Ctor { .. } => None,
        }
    }

    /// Returns the constructor tag, or `None` for a natural-number leaf.
    pub fn tag(&self) -> Option<Tag> {
        match *self.0 {
            Node::Ctor { tag, .. } => Some(tag),
            Node::Nat(_) => None,
        }
    }

    /// Returns this term's children. Empty for a natural-number leaf.
    pub fn children(&self) -> &[Term] {
        match &*self.0 {
            Node::Ctor { children, .. } => children,
            Node::Nat(_) => &[],
        }
    }

    /// `true` if this is a zero-child constructor carrying exactly `tag`.
    pub fn is_ctor0(&self, tag: Tag) -> bool {
        self.tag() == Some(tag & TAG_MASK) && self.children().is_empty()
    }

    /// Builds a right-nested cons-list terminated by a zero-child `nil_tag`
    /// constructor, from the given items in order.
    ///
    /// `cons_tag` is applied as a two-child constructor at each link, the
    /// way the grammar's own `Con`/`Nil` pair represents sequences.
    pub fn cons_list(nil_tag: Tag, cons_tag: Tag, items: impl DoubleEndedIterator<Item = Term>) -> Term {
        let mut result = Term::ctor0(nil_tag);
        for item in items.rev() {
            result = Term::ctor2(cons_tag, item, result);
        }
        result
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.0 {
            Node::Nat(n) => write!(f, "{}", n),
            Node::Ctor { tag, children } => {
                write!(f, "#{:06x}", tag)?;
                if !children.is_empty() {
                    write!(f, "{{")?;
                    for (i, c) in children.iter().enumerate() {
                        if i > 0 {
                            write!(f, " ")?;
                        }
                        write!(f, "{}", c)?;
                    }
                    write!(f, "}}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nat_roundtrips() {
        let t = Term::nat(42);
        assert!(t.is_nat());
        assert_eq!(t.as_nat(), Some(42));
        assert_eq!(t.tag(), None);
    }

    #[test]
    fn ctor_exposes_tag_and_children() {
        let a = Term::nat(1);
        let b = Term::nat(2);
        let t = Term::ctor2(0x1234, a.clone(), b.clone());
        assert_eq!(t.tag(), Some(0x1234));
        assert_eq!(t.children(), &[a, b]);
    }

    #[test]
    fn tag_is_masked_to_24_bits() {
        let t = Term::ctor0(0xFF_FF_FF_FF);
        assert_eq!(t.tag(), Some(TAG_MASK));
    }

    #[test]
    fn clone_is_cheap_rc_sharing() {
        let t = Term::ctor1(1, Term::nat(9));
        let t2 = t.clone();
        assert_eq!(t, t2);
    }

    #[test]
    fn cons_list_builds_right_nested_chain() {
        let list = Term::cons_list(0, 1, vec![Term::nat(1), Term::nat(2), Term::nat(3)].into_iter());
        assert_eq!(list.tag(), Some(1));
        assert_eq!(list.children()[0], Term::nat(1));
        let tail = &list.children()[1];
        assert_eq!(tail.children()[0], Term::nat(2));
        let tail2 = &tail.children()[1];
        assert_eq!(tail2.children()[0], Term::nat(3));
        assert!(tail2.children()[1].is_ctor0(0));
    }

    #[test]
    fn cons_list_of_no_items_is_nil() {
        let list = Term::cons_list(0, 1, std::iter::empty());
        assert!(list.is_ctor0(0));
    }

    #[test]
    fn is_ctor0_checks_tag_and_empty_children() {
        let t = Term::ctor0(7);
        assert!(t.is_ctor0(7));
        assert!(!t.is_ctor0(8));
        let nonempty = Term::ctor1(7, Term::nat(0));
        assert!(!nonempty.is_ctor0(7));
    }
}
