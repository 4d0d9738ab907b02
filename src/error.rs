#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DelimiterError {
    #[error("empty pattern")]
    Empty,
    #[error("pattern is too short to hold a delimiter pair")]
    TooShort,
    #[error("invalid delimiter '{0}'")]
    InvalidDelimiter(char),
    #[error("no closing delimiter '{0}'")]
    MissingClosingDelimiter(char),
    #[error("invalid modifier '{0}' after closing delimiter")]
    InvalidModifier(char),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unclosed group opened at offset {0}")]
    UnclosedGroup(usize),
    #[error("unmatched closing parenthesis at offset {0}")]
    UnmatchedParenthesis(usize),
    #[error("unclosed character class opened at offset {0}")]
    UnclosedCharClass(usize),
    #[error("quantifier does not follow a repeatable item at offset {0}")]
    NothingToRepeat(usize),
    #[error("unsupported group syntax '{1}' at offset {0}")]
    UnsupportedGroup(usize, String),
    #[error("trailing backslash at offset {0}")]
    TrailingBackslash(usize),
    #[error("unsupported escape '\\{1}' at offset {0}")]
    UnsupportedEscape(usize, char),
    #[error("group nesting depth exceeded (max: {0})")]
    NestingTooDeep(usize),
}

/// Why a pattern could not be analyzed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidateError {
    #[error("malformed pattern: {0}")]
    Malformed(#[from] DelimiterError),
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(DelimiterError::Empty, "empty pattern")]
    #[case(DelimiterError::InvalidDelimiter('a'), "invalid delimiter 'a'")]
    #[case(DelimiterError::MissingClosingDelimiter('#'), "no closing delimiter '#'")]
    #[case(
        DelimiterError::InvalidModifier('!'),
        "invalid modifier '!' after closing delimiter"
    )]
    fn delimiter_error_display(#[case] error: DelimiterError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case(ParseError::UnclosedGroup(3), "unclosed group opened at offset 3")]
    #[case(
        ParseError::UnsupportedGroup(0, "(?R".to_string()),
        "unsupported group syntax '(?R' at offset 0"
    )]
    #[case(ParseError::NestingTooDeep(64), "group nesting depth exceeded (max: 64)")]
    #[case(ParseError::UnsupportedEscape(4, 'Q'), "unsupported escape '\\Q' at offset 4")]
    fn parse_error_display(#[case] error: ParseError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn validate_error_wraps_stage_errors() {
        let error: ValidateError = ParseError::TrailingBackslash(2).into();
        assert_eq!(error.to_string(), "parse error: trailing backslash at offset 2");

        let error: ValidateError = DelimiterError::TooShort.into();
        assert!(matches!(error, ValidateError::Malformed(DelimiterError::TooShort)));
    }
}
