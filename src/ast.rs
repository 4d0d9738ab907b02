//! AST types for ignore-list patterns.
//!
//! Every node carries the byte span it was parsed from, so any subtree can be
//! rendered back exactly as written, escapes included.

use std::ops::Range;

/// Half-open byte range into the pattern body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Slice the source text covered by this span.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.range()]
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// A single node in the pattern AST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A run of ordinary characters, e.g. `foo bar`.
    Literal { text: String, span: Span },
    /// `.`
    AnyChar { span: Span },
    /// A backslash escape, kept as written: `\(`, `\$`, `\d`.
    Escaped { ch: char, span: Span },
    /// `^` or `$`.
    Anchor { kind: AnchorKind, span: Span },
    /// `( ... )` in any of its flavors.
    Group {
        kind: GroupKind,
        body: Box<Node>,
        span: Span,
    },
    /// `[ ... ]`, contents opaque.
    CharClass { raw: String, span: Span },
    /// An atom followed by a quantifier.
    Quantified {
        node: Box<Node>,
        quantifier: Quantifier,
        span: Span,
    },
    /// Concatenation at one nesting level. May be empty.
    Sequence { items: Vec<Node>, span: Span },
    /// `a|b|c`: always holds at least two branches, each a `Sequence`.
    Alternation { branches: Vec<Node>, span: Span },
}

impl Node {
    pub fn span(&self) -> Span {
        match self {
            Node::Literal { span, .. }
            | Node::AnyChar { span }
            | Node::Escaped { span, .. }
            | Node::Anchor { span, .. }
            | Node::Group { span, .. }
            | Node::CharClass { span, .. }
            | Node::Quantified { span, .. }
            | Node::Sequence { span, .. }
            | Node::Alternation { span, .. } => *span,
        }
    }

    /// Render the node exactly as it appeared in `source`.
    pub fn source_text<'a>(&self, source: &'a str) -> &'a str {
        self.span().text(source)
    }

    /// True for a `Sequence` with no items.
    pub fn is_empty_sequence(&self) -> bool {
        matches!(self, Node::Sequence { items, .. } if items.is_empty())
    }

    /// Direct children in source order.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Sequence { items, .. } => items,
            Node::Alternation { branches, .. } => branches,
            Node::Group { body, .. } | Node::Quantified { node: body, .. } => {
                std::slice::from_ref(body.as_ref())
            }
            Node::Literal { .. }
            | Node::AnyChar { .. }
            | Node::Escaped { .. }
            | Node::Anchor { .. }
            | Node::CharClass { .. } => &[],
        }
    }
}

/// Anchor kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorKind {
    /// `^`
    StartOfString,
    /// `$`
    EndOfString,
}

/// Group flavor. Only the boundaries matter to the analyzer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupKind {
    /// `(...)`
    Capturing,
    /// `(?:...)`
    NonCapturing,
    /// `(?<name>...)`, `(?P<name>...)`, `(?'name'...)`
    Named(String),
    /// Lookaround, atomic, branch-reset and inline-flag groups.
    Other,
}

/// Kind of quantifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantifierKind {
    /// `*`: zero or more.
    Star,
    /// `+`: one or more.
    Plus,
    /// `?`: zero or one.
    Question,
    /// `{n}`: exactly n.
    Exact(usize),
    /// `{n,}`: at least n.
    AtLeast(usize),
    /// `{n,m}`: between n and m inclusive.
    Range(usize, usize),
}

/// Quantifier greediness suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Greediness {
    Greedy,
    /// trailing `?`
    Lazy,
    /// trailing `+`
    Possessive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantifier {
    pub kind: QuantifierKind,
    pub greediness: Greediness,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_text_slices_by_bytes() {
        let source = "ab\\|cd";
        assert_eq!(Span::new(2, 4).text(source), "\\|");
        assert_eq!(Span::new(3, 3).text(source), "");
    }

    #[test]
    fn children_of_leaf_are_empty() {
        let node = Node::Escaped {
            ch: '$',
            span: Span::new(0, 2),
        };
        assert!(node.children().is_empty());
        assert!(!node.is_empty_sequence());
    }

    #[test]
    fn children_of_group_is_body() {
        let body = Node::Sequence {
            items: vec![],
            span: Span::new(1, 1),
        };
        let group = Node::Group {
            kind: GroupKind::Capturing,
            body: Box::new(body.clone()),
            span: Span::new(0, 2),
        };
        assert_eq!(group.children(), std::slice::from_ref(&body));
        assert!(group.children()[0].is_empty_sequence());
    }
}
