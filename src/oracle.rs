//! Answers whether an identifier is a builtin type keyword.

/// Builtin and pseudo type keywords, matched case-sensitively.
pub const PHP_TYPE_KEYWORDS: [&str; 18] = [
    "null", "bool", "true", "false", "int", "float", "string", "array", "object", "callable",
    "iterable", "resource", "mixed", "void", "self", "static", "parent", "never",
];

pub trait TypeKeywordOracle {
    fn is_builtin_type_keyword(&self, identifier: &str) -> bool;
}

impl<F> TypeKeywordOracle for F
where
    F: Fn(&str) -> bool,
{
    fn is_builtin_type_keyword(&self, identifier: &str) -> bool {
        self(identifier)
    }
}

/// Recognizes exactly [`PHP_TYPE_KEYWORDS`]. Class names never qualify.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhpTypeKeywords;

impl TypeKeywordOracle for PhpTypeKeywords {
    fn is_builtin_type_keyword(&self, identifier: &str) -> bool {
        PHP_TYPE_KEYWORDS.contains(&identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("null", true)]
    #[case("string", true)]
    #[case("never", true)]
    #[case("iterable", true)]
    #[case("String", false)]
    #[case("NULL", false)]
    #[case("Foo", false)]
    #[case("integer", false)]
    #[case("", false)]
    fn php_keywords(#[case] identifier: &str, #[case] expected: bool) {
        assert_eq!(PhpTypeKeywords.is_builtin_type_keyword(identifier), expected);
    }

    #[test]
    fn closures_are_oracles() {
        let oracle = |identifier: &str| identifier == "Foo";
        assert!(oracle.is_builtin_type_keyword("Foo"));
        assert!(!oracle.is_builtin_type_keyword("int"));
    }
}
