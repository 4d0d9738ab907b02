//! Properties that hold for every pattern.

use ignored_regex_validator::oracle::PHP_TYPE_KEYWORDS;
use ignored_regex_validator::validate;
use proptest::prelude::*;

/// Bodies built from characters with and without structural meaning,
/// never containing `#`.
fn body_without(excluded: &'static str) -> impl Strategy<Value = String> {
    let pool: Vec<char> = "ab int|^$()[]\\.*+?{},:"
        .chars()
        .filter(|ch| !excluded.contains(*ch))
        .collect();
    proptest::collection::vec(proptest::sample::select(pool), 0..40)
        .prop_map(|chars| chars.into_iter().collect::<String>())
}

fn plain_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ,<>]{0,20}"
}

proptest! {
    #[test]
    fn never_panics(pattern in "\\PC{0,60}") {
        let _ = validate(&pattern);
    }

    #[test]
    fn no_pipe_means_no_ignored_types(body in body_without("|")) {
        let result = validate(&format!("#{body}#"));
        prop_assert!(result.ignored_types().is_empty());
    }

    #[test]
    fn no_anchor_characters_means_no_anchor_flag(body in body_without("^$")) {
        let result = validate(&format!("#{body}#"));
        prop_assert!(!result.has_anchors_in_the_middle());
    }

    #[test]
    fn boundary_anchors_alone_never_fire(text in plain_text()) {
        let result = validate(&format!("#^{text}$#"));
        prop_assert!(result.is_analyzed());
        prop_assert!(!result.has_anchors_in_the_middle());
    }

    #[test]
    fn adjacent_pipes_ignore_all_errors(left in plain_text(), right in plain_text()) {
        let top_level = validate(&format!("#{left}||{right}#"));
        prop_assert!(top_level.are_all_errors_ignored());
        let nested = validate(&format!("#({left}||{right})#"));
        prop_assert!(nested.are_all_errors_ignored());
        let leading = validate(&format!("#|{left}#"));
        prop_assert!(leading.are_all_errors_ignored());
    }

    #[test]
    fn first_branch_never_contributes(
        keyword in proptest::sample::select(PHP_TYPE_KEYWORDS.to_vec()),
        rest in "[A-Z][a-z]{0,8}",
    ) {
        let result = validate(&format!("#{keyword}|{rest}#"));
        prop_assert!(result.ignored_types().is_empty());
    }

    #[test]
    fn failures_collapse_to_default(text in plain_text()) {
        let result = validate(&format!("#{text}(#"));
        prop_assert!(!result.is_analyzed());
        prop_assert!(result.ignored_types().is_empty());
        prop_assert!(!result.has_anchors_in_the_middle());
        prop_assert!(!result.are_all_errors_ignored());
    }
}
