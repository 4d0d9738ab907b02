//! Outcome of validating one ignore pattern.

use std::fmt;

use indexmap::IndexMap;

use crate::error::ValidateError;

/// An empty alternative, with the text around it as written and escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyAlternative {
    /// Byte offset of the empty branch in the pattern body.
    pub offset: usize,
    /// e.g. `||`
    pub wrong_sequence: String,
    /// e.g. `\|\|`
    pub escaped_sequence: String,
}

impl EmptyAlternative {
    /// Describe the empty branch at `offset` using the `|` characters that
    /// border it in `body`.
    pub(crate) fn at(offset: usize, body: &str) -> Self {
        let start = if body[..offset].ends_with('|') {
            offset - 1
        } else {
            offset
        };
        let end = if body[offset..].starts_with('|') {
            offset + 1
        } else {
            offset
        };
        let wrong_sequence = body[start..end].to_string();
        let escaped_sequence = wrong_sequence.replace('|', "\\|");
        EmptyAlternative {
            offset,
            wrong_sequence,
            escaped_sequence,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    ignored_types: IndexMap<String, String>,
    has_anchors_in_the_middle: bool,
    empty_alternative: Option<EmptyAlternative>,
    analysis_error: Option<ValidateError>,
}

impl ValidationResult {
    pub(crate) fn new(
        ignored_types: IndexMap<String, String>,
        has_anchors_in_the_middle: bool,
        empty_alternative: Option<EmptyAlternative>,
    ) -> Self {
        ValidationResult {
            ignored_types,
            has_anchors_in_the_middle,
            empty_alternative,
            analysis_error: None,
        }
    }

    /// The no-defects result, remembering why analysis did not happen.
    pub(crate) fn unanalyzable(error: ValidateError) -> Self {
        ValidationResult {
            analysis_error: Some(error),
            ..Default::default()
        }
    }

    /// Type keyword -> source text of the branch that revealed it, in
    /// discovery order.
    pub fn ignored_types(&self) -> &IndexMap<String, String> {
        &self.ignored_types
    }

    pub fn has_anchors_in_the_middle(&self) -> bool {
        self.has_anchors_in_the_middle
    }

    pub fn are_all_errors_ignored(&self) -> bool {
        self.empty_alternative.is_some()
    }

    /// The first empty alternative found, if any.
    pub fn empty_alternative(&self) -> Option<&EmptyAlternative> {
        self.empty_alternative.as_ref()
    }

    /// Set when the pattern could not be unwrapped or parsed. The other
    /// signals are then all false/empty and say nothing about the pattern.
    pub fn analysis_error(&self) -> Option<&ValidateError> {
        self.analysis_error.as_ref()
    }

    pub fn is_analyzed(&self) -> bool {
        self.analysis_error.is_none()
    }

    /// One advisory per detected problem.
    pub fn advisories(&self) -> impl Iterator<Item = Advisory<'_>> {
        let types = self
            .ignored_types
            .iter()
            .map(|(keyword, branch)| Advisory::IgnoredType {
                keyword: keyword.as_str(),
                branch: branch.as_str(),
            });
        let anchors = self
            .has_anchors_in_the_middle
            .then_some(Advisory::AnchorInTheMiddle);
        let all_ignored = self
            .empty_alternative
            .as_ref()
            .map(|empty| Advisory::AllErrorsIgnored {
                wrong_sequence: empty.wrong_sequence.as_str(),
                escaped_sequence: empty.escaped_sequence.as_str(),
            });
        types.chain(anchors).chain(all_ignored)
    }
}

/// A human-facing warning derived from a [`ValidationResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory<'a> {
    IgnoredType { keyword: &'a str, branch: &'a str },
    AnchorInTheMiddle,
    AllErrorsIgnored {
        wrong_sequence: &'a str,
        escaped_sequence: &'a str,
    },
}

impl fmt::Display for Advisory<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::IgnoredType { keyword, branch } => write!(
                f,
                "unescaped '|' before '{branch}' makes type '{keyword}' a regex alternative, \
                 which ignores more errors than intended; use '\\|' instead"
            ),
            Advisory::AnchorInTheMiddle => write!(
                f,
                "unescaped anchor '^' or '$' in the middle of the pattern; \
                 use '\\^' or '\\$' if it should match literally"
            ),
            Advisory::AllErrorsIgnored {
                wrong_sequence,
                escaped_sequence,
            } => write!(
                f,
                "unescaped '{wrong_sequence}' leads to ignoring all errors; \
                 use '{escaped_sequence}' instead"
            ),
        }
    }
}
