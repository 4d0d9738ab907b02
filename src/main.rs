use std::env;

use ignored_regex_validator::{init_tracing, validate};

fn main() {
    let patterns: Vec<String> = env::args().skip(1).collect();
    if patterns.is_empty() {
        eprintln!("Usage: ignored-regex-validator <pattern>...");
        std::process::exit(1);
    }

    init_tracing();

    for pattern in &patterns {
        let result = validate(pattern);
        println!("PATTERN:{}", pattern);
        if let Some(error) = result.analysis_error() {
            println!("ERROR:{}", error);
            continue;
        }
        for (keyword, branch) in result.ignored_types() {
            println!("TYPE {}:{}", keyword, branch);
        }
        println!("ANCHORS:{}", result.has_anchors_in_the_middle());
        println!("ALL_IGNORED:{}", result.are_all_errors_ignored());
        for advisory in result.advisories() {
            println!("WARNING:{}", advisory);
        }
    }
}
