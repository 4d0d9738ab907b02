//! Inspects ignore patterns for unescaped metacharacters that change what
//! the pattern matches.

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::ast::{AnchorKind, Node};
use crate::delimiter;
use crate::error::ValidateError;
use crate::oracle::{PhpTypeKeywords, TypeKeywordOracle};
use crate::parser::{DEFAULT_MAX_DEPTH, Parser};
use crate::result::{EmptyAlternative, ValidationResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Deepest group nesting the parser accepts.
    pub max_depth: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        ValidatorConfig {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Validator<O = PhpTypeKeywords> {
    oracle: O,
    config: ValidatorConfig,
}

/// Validate with the builtin PHP keyword list and default configuration.
pub fn validate(pattern: &str) -> ValidationResult {
    Validator::new(PhpTypeKeywords).validate(pattern)
}

impl<O: TypeKeywordOracle> Validator<O> {
    pub fn new(oracle: O) -> Self {
        Self::with_config(oracle, ValidatorConfig::default())
    }

    pub fn with_config(oracle: O, config: ValidatorConfig) -> Self {
        Validator { oracle, config }
    }

    /// Validate a delimited pattern such as `#^Foo \$bar$#i`.
    ///
    /// A pattern that cannot be unwrapped or parsed yields a result with no
    /// signals set; [`ValidationResult::analysis_error`] tells it apart.
    pub fn validate(&self, pattern: &str) -> ValidationResult {
        match self.try_validate(pattern) {
            Ok(result) => result,
            Err(error) => {
                debug!(pattern, %error, "pattern not analyzed");
                ValidationResult::unanalyzable(error)
            }
        }
    }

    /// Like [`Validator::validate`], but reports unwrap and parse failures.
    pub fn try_validate(&self, pattern: &str) -> Result<ValidationResult, ValidateError> {
        let unwrapped = delimiter::unwrap(pattern)?;
        let body = unwrapped.body;
        trace!(body, flags = ?unwrapped.flags, "unwrapped");
        let ast = Parser::new(body)
            .with_max_depth(self.config.max_depth)
            .parse()?;

        let ignored_types = self.ignored_types(&ast, body);
        let has_anchors_in_the_middle = has_anchors_in_the_middle(&ast, body.len());
        let empty_alternative =
            first_empty_alternative(&ast).map(|offset| EmptyAlternative::at(offset, body));

        debug!(
            pattern,
            ignored_types = ignored_types.len(),
            has_anchors_in_the_middle,
            all_errors_ignored = empty_alternative.is_some(),
            "pattern analyzed"
        );
        Ok(ValidationResult::new(
            ignored_types,
            has_anchors_in_the_middle,
            empty_alternative,
        ))
    }

    /// Map type keywords found at the start of top-level branches, except
    /// the first, to the verbatim text of their branch.
    fn ignored_types(&self, ast: &Node, body: &str) -> IndexMap<String, String> {
        let mut types = IndexMap::new();
        let Node::Alternation { branches, .. } = ast else {
            return types;
        };
        for branch in branches.iter().skip(1) {
            let Some(identifier) = leading_identifier(branch, body) else {
                continue;
            };
            let is_keyword = self.oracle.is_builtin_type_keyword(identifier);
            trace!(identifier, is_keyword, "top-level branch");
            if is_keyword {
                types.insert(identifier.to_string(), branch.source_text(body).to_string());
            }
        }
        types
    }
}

/// Identifier characters at the very start of a branch that opens with
/// literal text.
fn leading_identifier<'a>(branch: &Node, body: &'a str) -> Option<&'a str> {
    let literal_start = match branch.children().first()? {
        Node::Literal { span, .. } => span.start,
        Node::Quantified { node, .. } if matches!(**node, Node::Literal { .. }) => {
            node.span().start
        }
        _ => return None,
    };
    let text = &body[literal_start..branch.span().end];
    let len = text
        .find(|ch: char| !(ch.is_alphanumeric() || ch == '_'))
        .unwrap_or(text.len());
    (len > 0).then(|| &text[..len])
}

/// `^` anywhere but offset 0, or `$` anywhere but the last byte.
fn has_anchors_in_the_middle(ast: &Node, body_len: usize) -> bool {
    let mut anchors = Vec::new();
    collect_anchors(ast, &mut anchors);
    anchors.iter().any(|&(kind, offset)| match kind {
        AnchorKind::StartOfString => offset != 0,
        AnchorKind::EndOfString => offset + 1 != body_len,
    })
}

fn collect_anchors(node: &Node, anchors: &mut Vec<(AnchorKind, usize)>) {
    if let Node::Anchor { kind, span } = node {
        anchors.push((*kind, span.start));
    }
    for child in node.children() {
        collect_anchors(child, anchors);
    }
}

/// Offset of the first empty branch of any alternation, at any depth.
fn first_empty_alternative(node: &Node) -> Option<usize> {
    if let Node::Alternation { branches, .. } = node {
        if let Some(empty) = branches.iter().find(|branch| branch.is_empty_sequence()) {
            return Some(empty.span().start);
        }
    }
    node.children().iter().find_map(first_empty_alternative)
}
