//! Pattern parser: converts a pattern body into an AST.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! alternation := sequence ('|' sequence)*
//! sequence    := (atom quantifier?)*
//! atom        := literal | '.' | escape | anchor | group | class
//! group       := '(' group-kind? alternation ')'
//! ```
//!
//! Only structure is recovered. Escapes and class contents stay opaque, and
//! anything the grammar does not know is rejected instead of guessed at.

use tracing::trace;

use crate::ast::*;
use crate::error::ParseError;

/// Default bound on group nesting.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Letters accepted in inline option groups such as `(?i)` or `(?-x:...)`.
const INLINE_FLAGS: &str = "imnsxUJ-^";

pub struct Parser<'a> {
    source: &'a str,
    chars: Vec<(usize, char)>,
    pos: usize,
    depth: usize,
    max_depth: usize,
}

/// Parse `source` with the default nesting bound.
pub fn parse(source: &str) -> Result<Node, ParseError> {
    Parser::new(source).parse()
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Parser {
            source,
            chars: source.char_indices().collect(),
            pos: 0,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse the full body. The root is an `Alternation` when the body has a
    /// top-level `|`, otherwise a `Sequence`.
    pub fn parse(&mut self) -> Result<Node, ParseError> {
        let node = self.parse_alternation()?;
        if self.peek().is_some() {
            // parse_sequence only stops early on ')'
            return Err(ParseError::UnmatchedParenthesis(self.offset()));
        }
        Ok(node)
    }

    /// Byte offset of the current position.
    fn offset(&self) -> usize {
        self.chars
            .get(self.pos)
            .map_or(self.source.len(), |&(offset, _)| offset)
    }

    fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.chars.get(self.pos + n).map(|&(_, ch)| ch)
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek();
        if ch.is_some() {
            self.pos += 1;
        }
        ch
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn text_from(&self, start: usize) -> String {
        self.source[start..self.offset()].to_string()
    }

    /// Parse alternation: `a|b|c`
    fn parse_alternation(&mut self) -> Result<Node, ParseError> {
        let start = self.offset();
        let mut branches = vec![self.parse_sequence()?];
        while self.eat('|') {
            branches.push(self.parse_sequence()?);
        }
        if branches.len() == 1 {
            Ok(branches.swap_remove(0))
        } else {
            Ok(Node::Alternation {
                branches,
                span: Span::new(start, self.offset()),
            })
        }
    }

    /// Parse concatenation up to the next `|` or `)`. May be empty.
    fn parse_sequence(&mut self) -> Result<Node, ParseError> {
        let start = self.offset();
        let mut items = Vec::new();
        while let Some(ch) = self.peek() {
            if ch == ')' || ch == '|' {
                break;
            }
            self.parse_quantified(ch, &mut items)?;
        }
        Ok(Node::Sequence {
            items,
            span: Span::new(start, self.offset()),
        })
    }

    /// Parse an atom possibly followed by a quantifier, pushing the result.
    fn parse_quantified(&mut self, ch: char, items: &mut Vec<Node>) -> Result<(), ParseError> {
        let atom = self.parse_atom(ch)?;
        let Some(quantifier) = self.parse_quantifier() else {
            items.push(atom);
            return Ok(());
        };
        // A quantifier binds to the last character of a literal run only.
        let atom = match atom {
            Node::Literal { text, span } if text.chars().count() > 1 => {
                let split = span.end - text.chars().last().map_or(0, char::len_utf8);
                let local = split - span.start;
                items.push(Node::Literal {
                    text: text[..local].to_string(),
                    span: Span::new(span.start, split),
                });
                Node::Literal {
                    text: text[local..].to_string(),
                    span: Span::new(split, span.end),
                }
            }
            other => other,
        };
        let span = Span::new(atom.span().start, self.offset());
        items.push(Node::Quantified {
            node: Box::new(atom),
            quantifier,
            span,
        });
        Ok(())
    }

    fn parse_quantifier(&mut self) -> Option<Quantifier> {
        let kind = match self.peek()? {
            '*' => {
                self.advance();
                QuantifierKind::Star
            }
            '+' => {
                self.advance();
                QuantifierKind::Plus
            }
            '?' => {
                self.advance();
                QuantifierKind::Question
            }
            '{' => self.parse_counted_quantifier()?,
            _ => return None,
        };
        let greediness = if self.eat('?') {
            Greediness::Lazy
        } else if self.eat('+') {
            Greediness::Possessive
        } else {
            Greediness::Greedy
        };
        Some(Quantifier { kind, greediness })
    }

    /// Parse `{n}`, `{n,}`, `{n,m}`. Leaves the position untouched and
    /// returns `None` when the brace is an ordinary character.
    fn parse_counted_quantifier(&mut self) -> Option<QuantifierKind> {
        let save_pos = self.pos;
        let kind = self.try_parse_brace_contents();
        if kind.is_none() {
            self.pos = save_pos;
        }
        kind
    }

    fn try_parse_brace_contents(&mut self) -> Option<QuantifierKind> {
        if !self.eat('{') {
            return None;
        }
        let n = self.parse_number()?;
        let kind = if self.eat(',') {
            if self.peek() == Some('}') {
                QuantifierKind::AtLeast(n)
            } else {
                QuantifierKind::Range(n, self.parse_number()?)
            }
        } else {
            QuantifierKind::Exact(n)
        };
        self.eat('}').then_some(kind)
    }

    fn parse_number(&mut self) -> Option<usize> {
        let start = self.offset();
        while self.peek().is_some_and(|ch| ch.is_ascii_digit()) {
            self.advance();
        }
        self.source[start..self.offset()].parse().ok()
    }

    fn counted_quantifier_ahead(&mut self) -> bool {
        let save_pos = self.pos;
        let found = self.try_parse_brace_contents().is_some();
        self.pos = save_pos;
        found
    }

    /// Parse a single atom (literal run, class, group, anchor, etc.) starting
    /// at the current character `ch`.
    fn parse_atom(&mut self, ch: char) -> Result<Node, ParseError> {
        let start = self.offset();
        match ch {
            '(' => self.parse_group(),
            '[' => self.parse_char_class(),
            '\\' => self.parse_escape(),
            '.' => {
                self.advance();
                Ok(Node::AnyChar {
                    span: Span::new(start, self.offset()),
                })
            }
            '^' => {
                self.advance();
                Ok(Node::Anchor {
                    kind: AnchorKind::StartOfString,
                    span: Span::new(start, self.offset()),
                })
            }
            '$' => {
                self.advance();
                Ok(Node::Anchor {
                    kind: AnchorKind::EndOfString,
                    span: Span::new(start, self.offset()),
                })
            }
            '*' | '+' | '?' => Err(ParseError::NothingToRepeat(start)),
            '{' if self.counted_quantifier_ahead() => Err(ParseError::NothingToRepeat(start)),
            _ => Ok(self.parse_literal_run()),
        }
    }

    /// Consume the longest run of characters with no structural meaning.
    /// The caller guarantees the first character is ordinary.
    fn parse_literal_run(&mut self) -> Node {
        let start = self.offset();
        self.advance();
        while let Some(ch) = self.peek() {
            let ordinary = match ch {
                '{' => !self.counted_quantifier_ahead(),
                '\\' | '^' | '$' | '.' | '|' | '(' | ')' | '[' | '*' | '+' | '?' => false,
                _ => true,
            };
            if !ordinary {
                break;
            }
            self.advance();
        }
        let span = Span::new(start, self.offset());
        Node::Literal {
            text: span.text(self.source).to_string(),
            span,
        }
    }

    /// Parse an escape sequence. The escaped character is kept, never decoded.
    fn parse_escape(&mut self) -> Result<Node, ParseError> {
        let start = self.offset();
        self.advance(); // consume '\\'
        match self.advance() {
            None => Err(ParseError::TrailingBackslash(start)),
            // `\Q...\E` quotes metacharacters; its contents are not structure.
            Some('Q') => Err(ParseError::UnsupportedEscape(start, 'Q')),
            Some(ch) => Ok(Node::Escaped {
                ch,
                span: Span::new(start, self.offset()),
            }),
        }
    }

    /// Parse a group of any supported flavor.
    fn parse_group(&mut self) -> Result<Node, ParseError> {
        let start = self.offset();
        if self.depth >= self.max_depth {
            return Err(ParseError::NestingTooDeep(self.max_depth));
        }
        self.advance(); // consume '('
        let kind = self.parse_group_kind(start)?;
        trace!(offset = start, ?kind, depth = self.depth, "group");

        self.depth += 1;
        let body = self.parse_alternation()?;
        self.depth -= 1;

        if !self.eat(')') {
            return Err(ParseError::UnclosedGroup(start));
        }
        Ok(Node::Group {
            kind,
            body: Box::new(body),
            span: Span::new(start, self.offset()),
        })
    }

    /// Parse what follows `(`: nothing, or a `?`-introduced group kind.
    fn parse_group_kind(&mut self, start: usize) -> Result<GroupKind, ParseError> {
        if !self.eat('?') {
            return Ok(GroupKind::Capturing);
        }
        match self.advance() {
            Some(':') => Ok(GroupKind::NonCapturing),
            // lookahead, atomic, branch reset
            Some('=' | '!' | '>' | '|') => Ok(GroupKind::Other),
            Some('<') => match self.peek() {
                Some('=' | '!') => {
                    self.advance(); // lookbehind
                    Ok(GroupKind::Other)
                }
                _ => self.parse_group_name('>', start).map(GroupKind::Named),
            },
            Some('P') if self.eat('<') => self.parse_group_name('>', start).map(GroupKind::Named),
            Some('\'') => self.parse_group_name('\'', start).map(GroupKind::Named),
            Some(ch) if INLINE_FLAGS.contains(ch) => {
                while self.peek().is_some_and(|ch| INLINE_FLAGS.contains(ch)) {
                    self.advance();
                }
                // `(?i)` has an empty body; `(?i:...)` a real one.
                if self.eat(':') || self.peek() == Some(')') {
                    Ok(GroupKind::Other)
                } else {
                    Err(self.unsupported_group(start))
                }
            }
            _ => Err(self.unsupported_group(start)),
        }
    }

    fn parse_group_name(&mut self, terminator: char, start: usize) -> Result<String, ParseError> {
        let name_start = self.offset();
        while self
            .peek()
            .is_some_and(|ch| ch.is_alphanumeric() || ch == '_')
        {
            self.advance();
        }
        let name = self.text_from(name_start);
        if name.is_empty() || !self.eat(terminator) {
            return Err(self.unsupported_group(start));
        }
        Ok(name)
    }

    fn unsupported_group(&self, start: usize) -> ParseError {
        ParseError::UnsupportedGroup(start, self.text_from(start))
    }

    /// Parse a character class: `[abc]`, `[^a-z]`, `[]|]`, `[[:alpha:]]`.
    /// Contents are not interpreted.
    fn parse_char_class(&mut self) -> Result<Node, ParseError> {
        let start = self.offset();
        self.advance(); // consume '['
        self.eat('^');
        // Allow ']' as first character in class
        self.eat(']');

        loop {
            match self.advance() {
                None => return Err(ParseError::UnclosedCharClass(start)),
                Some(']') => break,
                Some('\\') => {
                    if self.advance().is_none() {
                        return Err(ParseError::UnclosedCharClass(start));
                    }
                }
                Some('[') if self.peek() == Some(':') => self.skip_posix_class(),
                Some(_) => {}
            }
        }
        let span = Span::new(start, self.offset());
        Ok(Node::CharClass {
            raw: span.text(self.source).to_string(),
            span,
        })
    }

    /// Skip `:name:]` after a `[` inside a class. A `[` not followed by a
    /// complete POSIX name is an ordinary member and nothing is consumed.
    fn skip_posix_class(&mut self) {
        let save_pos = self.pos;
        self.advance(); // consume ':'
        self.eat('^');
        while self.peek().is_some_and(|ch| ch.is_ascii_alphabetic()) {
            self.advance();
        }
        if !(self.eat(':') && self.eat(']')) {
            self.pos = save_pos;
        }
    }
}
