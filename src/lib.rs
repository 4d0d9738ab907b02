//! Lints the regular expressions of a static-analysis ignore list.
//!
//! An ignore pattern is meant to match one diagnostic message, but an
//! unescaped `|`, `^` or `$` silently changes what it matches. [`validate`]
//! parses the pattern and reports three signals:
//!
//! - type keywords that leaked into top-level alternatives (`string|null`),
//! - anchors that are not at the very start or end of the pattern,
//! - empty alternatives (`||`) that make the pattern match every message.
//!
//! ```
//! use ignored_regex_validator::validate;
//!
//! let result = validate("#Invalid array key type array|string\\.#");
//! assert_eq!(result.ignored_types()["string"], "string\\.");
//! assert!(!result.has_anchors_in_the_middle());
//! assert!(!result.are_all_errors_ignored());
//! ```

pub mod analyzer;
pub mod ast;
pub mod delimiter;
pub mod error;
pub mod oracle;
pub mod parser;
pub mod result;

use std::sync::Once;

pub use analyzer::{Validator, ValidatorConfig, validate};
pub use error::{DelimiterError, ParseError, ValidateError};
pub use oracle::{PhpTypeKeywords, TypeKeywordOracle};
pub use result::{Advisory, EmptyAlternative, ValidationResult};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with
/// `RUST_LOG=ignored_regex_validator=debug` or `=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
