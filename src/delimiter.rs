//! Delimiter handling: `#body#flags` -> (`body`, `flags`).

use crate::error::DelimiterError;

/// A pattern with its delimiters and modifiers stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternBody<'a> {
    pub body: &'a str,
    /// Trailing modifiers, sorted and de-duplicated.
    pub flags: Vec<char>,
}

/// Closing counterpart of a delimiter.
fn closing_delimiter(open: char) -> char {
    match open {
        '(' => ')',
        '{' => '}',
        '[' => ']',
        '<' => '>',
        other => other,
    }
}

/// Split a delimited pattern into its body and trailing modifiers.
///
/// The closer is the last occurrence of the closing delimiter, so an escaped
/// delimiter inside the body (`#a\#b#`) stays part of the body.
pub fn unwrap(pattern: &str) -> Result<PatternBody<'_>, DelimiterError> {
    let mut chars = pattern.chars();
    let open = chars.next().ok_or(DelimiterError::Empty)?;
    if open.is_alphanumeric() || open == '\\' || open.is_whitespace() {
        return Err(DelimiterError::InvalidDelimiter(open));
    }
    let close = closing_delimiter(open);
    let body_start = open.len_utf8();
    if pattern.len() < body_start + close.len_utf8() {
        return Err(DelimiterError::TooShort);
    }

    let close_at = pattern[body_start..]
        .rfind(close)
        .map(|idx| idx + body_start)
        .ok_or(DelimiterError::MissingClosingDelimiter(close))?;

    let modifiers = &pattern[close_at + close.len_utf8()..];
    let mut flags = Vec::with_capacity(modifiers.len());
    for ch in modifiers.chars() {
        if !ch.is_ascii_alphabetic() {
            return Err(DelimiterError::InvalidModifier(ch));
        }
        flags.push(ch);
    }
    flags.sort_unstable();
    flags.dedup();

    Ok(PatternBody {
        body: &pattern[body_start..close_at],
        flags,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("#abc#", "abc", &[])]
    #[case("~a|b~iu", "a|b", &['i', 'u'])]
    #[case("/x/uiu", "x", &['i', 'u'])]
    #[case("#a\\#b#", "a\\#b", &[])]
    #[case("{a{1,2}}", "a{1,2}", &[])]
    #[case("(a(b)c)m", "a(b)c", &['m'])]
    #[case("[x]", "x", &[])]
    #[case("<x>", "x", &[])]
    #[case("##", "", &[])]
    fn unwrap_valid(#[case] input: &str, #[case] body: &str, #[case] flags: &[char]) {
        let unwrapped = unwrap(input).unwrap();
        assert_eq!(unwrapped.body, body);
        assert_eq!(unwrapped.flags, flags);
    }

    #[rstest]
    #[case("", DelimiterError::Empty)]
    #[case("#", DelimiterError::TooShort)]
    #[case("abc", DelimiterError::InvalidDelimiter('a'))]
    #[case("\\a\\", DelimiterError::InvalidDelimiter('\\'))]
    #[case("#abc", DelimiterError::MissingClosingDelimiter('#'))]
    #[case("(abc", DelimiterError::MissingClosingDelimiter(')'))]
    #[case("#abc#i-", DelimiterError::InvalidModifier('-'))]
    fn unwrap_malformed(#[case] input: &str, #[case] expected: DelimiterError) {
        assert_eq!(unwrap(input).unwrap_err(), expected);
    }
}
