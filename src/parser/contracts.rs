//! Contract verification over parsed functions.
//!
//! Checks presence and validity of `@space`/`@time` annotations, presence of
//! `consume`/`emit` blocks, the body line ceiling, name uniqueness, and the
//! exactly-one-`@init` rule. Verification never fails: every finding is
//! collected so one invocation reports every problem.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::parser::extract::FunctionDef;

/// Maximum number of body lines a function may have.
pub const MAX_FUNCTION_LINES: usize = 128;

// Unit suffixes are case-insensitive; digits and underscores are not
// affected by the flag.
static SPACE_VALUE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[0-9_]+[KMGT]?B$").expect("valid regex"));
static TIME_VALUE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9_]+ns$").expect("valid regex"));

/// Check every function's contracts and the whole-program rules.
///
/// Returns human-readable findings in source order: per-function checks in a
/// fixed order (duplicate name, `@space`, `@time`, `consume`, `emit`, line
/// ceiling), then the `@init` cardinality checks at the end. An empty vector
/// means all contracts are satisfied.
pub fn verify_contracts(funcs: &[FunctionDef]) -> Vec<String> {
    let mut errors = Vec::new();
    let mut init_count = 0usize;
    let mut seen_names: HashSet<&str> = HashSet::new();

    for func in funcs {
        if !seen_names.insert(func.name.as_str()) {
            errors.push(format!("Duplicate function name {}", func.name));
        }

        if func.is_init {
            init_count += 1;
        }

        validate_numeric_attr(
            &func.space,
            &SPACE_VALUE_RE,
            &mut errors,
            format!("Function {} missing @space", func.name),
            format!("Function {} invalid @space value", func.name),
            format!("Function {} has non-positive @space", func.name),
        );

        validate_numeric_attr(
            &func.time,
            &TIME_VALUE_RE,
            &mut errors,
            format!("Function {} missing @time", func.name),
            format!("Function {} invalid @time value", func.name),
            format!("Function {} has non-positive @time", func.name),
        );

        if func.consume.is_empty() {
            errors.push(format!("Function {} missing consume block", func.name));
        }
        if func.emit.is_empty() {
            errors.push(format!("Function {} missing emit block", func.name));
        }
        if func.lines > MAX_FUNCTION_LINES {
            errors.push(format!(
                "Function {} exceeds {} line limit",
                func.name, MAX_FUNCTION_LINES
            ));
        }
    }

    if init_count == 0 {
        errors.push("No @init function defined".to_string());
    } else if init_count > 1 {
        errors.push("Multiple @init functions defined".to_string());
    }

    errors
}

/// Validate one annotation value: present, grammatical, and positive.
fn validate_numeric_attr(
    value: &str,
    pattern: &Regex,
    errors: &mut Vec<String>,
    missing_msg: String,
    invalid_msg: String,
    non_positive_msg: String,
) {
    if value.is_empty() {
        errors.push(missing_msg);
        return;
    }

    if !pattern.is_match(value) {
        errors.push(invalid_msg);
        return;
    }

    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    match digits.parse::<u128>() {
        Ok(0) => errors.push(non_positive_msg),
        Ok(_) => {}
        // The grammar guarantees at least one digit; only absurdly long
        // values can land here.
        Err(_) => errors.push(invalid_msg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::extract::parse_functions;

    const BASE_INIT: &str =
        "@init\nfunction \"init\" {\n@space 1B\n@time 1ns\nconsume { nil }\nemit { nil }\n}\n";

    fn verify(src: &str, include_init: bool) -> Vec<String> {
        let full = if include_init {
            format!("{BASE_INIT}{src}")
        } else {
            src.to_string()
        };
        let funcs = parse_functions(&full).unwrap();
        verify_contracts(&funcs)
    }

    #[test]
    fn test_all_contracts_present() {
        let src = "function \"ok\" {\n@space 1B\n@time 1ns\nconsume { nil }\nemit { nil }\n}";
        assert_eq!(verify(src, true), Vec::<String>::new());
    }

    #[test]
    fn test_missing_space() {
        let src = "function \"foo\" {\n@time 1ns\nconsume { nil }\nemit { nil }\n}";
        assert_eq!(verify(src, true), vec!["Function foo missing @space"]);
    }

    #[test]
    fn test_missing_time() {
        let src = "function \"bar\" {\n@space 1B\nconsume { nil }\nemit { nil }\n}";
        assert_eq!(verify(src, true), vec!["Function bar missing @time"]);
    }

    #[test]
    fn test_missing_consume() {
        let src = "function \"baz\" {\n@space 1B\n@time 1ns\nemit { nil }\n}";
        assert_eq!(verify(src, true), vec!["Function baz missing consume block"]);
    }

    #[test]
    fn test_missing_emit() {
        let src = "function \"qux\" {\n@space 1B\n@time 1ns\nconsume { nil }\n}";
        assert_eq!(verify(src, true), vec!["Function qux missing emit block"]);
    }

    #[test]
    fn test_space_value_grammar() {
        let good = ["1B", "128B", "4KB", "4kb", "1_024B", "2MB", "3GB", "9TB"];
        for value in good {
            let src = format!(
                "function \"f\" {{\n@space {value}\n@time 1ns\nconsume {{ nil }}\nemit {{ nil }}\n}}"
            );
            assert_eq!(verify(&src, true), Vec::<String>::new(), "value {value}");
        }

        let bad = ["128", "B", "12XB", "1Bns", "-1B", "1.5KB"];
        for value in bad {
            let src = format!(
                "function \"f\" {{\n@space {value}\n@time 1ns\nconsume {{ nil }}\nemit {{ nil }}\n}}"
            );
            assert_eq!(
                verify(&src, true),
                vec!["Function f invalid @space value"],
                "value {value}"
            );
        }
    }

    #[test]
    fn test_time_value_grammar_rejects_multipliers() {
        for value in ["1Kns", "1ms", "1000", "ns"] {
            let src = format!(
                "function \"f\" {{\n@space 1B\n@time {value}\nconsume {{ nil }}\nemit {{ nil }}\n}}"
            );
            assert_eq!(
                verify(&src, true),
                vec!["Function f invalid @time value"],
                "value {value}"
            );
        }
    }

    #[test]
    fn test_non_positive_values() {
        let src = "function \"f\" {\n@space 0B\n@time 0_0ns\nconsume { nil }\nemit { nil }\n}";
        assert_eq!(
            verify(src, true),
            vec![
                "Function f has non-positive @space",
                "Function f has non-positive @time",
            ]
        );
    }

    #[test]
    fn test_line_limit() {
        let mut src = String::from(
            "function \"big\" {\n@space 1B\n@time 1ns\nconsume { nil }\nemit { nil }\n",
        );
        for _ in 0..130 {
            src.push_str("filler\n");
        }
        src.push('}');
        assert_eq!(verify(&src, true), vec!["Function big exceeds 128 line limit"]);
    }

    #[test]
    fn test_duplicate_names_reported_once_per_repeat() {
        let one = "function \"dup\" {\n@space 1B\n@time 1ns\nconsume { nil }\nemit { nil }\n}\n";
        let src = format!("{one}{one}");
        assert_eq!(verify(&src, true), vec!["Duplicate function name dup"]);

        let src3 = format!("{one}{one}{one}");
        assert_eq!(
            verify(&src3, true),
            vec![
                "Duplicate function name dup",
                "Duplicate function name dup",
            ]
        );
    }

    #[test]
    fn test_no_init_function() {
        let src = "function \"foo\" {\n@space 1B\n@time 1ns\nconsume { nil }\nemit { nil }\n}";
        assert_eq!(verify(src, false), vec!["No @init function defined"]);
    }

    #[test]
    fn test_multiple_init_functions() {
        let src = concat!(
            "@init\nfunction \"i1\" {\n@space 1B\n@time 1ns\nconsume { nil }\nemit { nil }\n}\n",
            "@init\nfunction \"i2\" {\n@space 1B\n@time 1ns\nconsume { nil }\nemit { nil }\n}\n",
        );
        assert_eq!(verify(src, false), vec!["Multiple @init functions defined"]);
    }

    #[test]
    fn test_error_ordering() {
        // Per-function findings come in source order; @init checks come last.
        let src = concat!(
            "function \"a\" {\n@time 1ns\nconsume { nil }\nemit { nil }\n}\n",
            "function \"b\" {\n@space 1B\n@time 1ns\nemit { nil }\n}\n",
        );
        assert_eq!(
            verify(src, false),
            vec![
                "Function a missing @space",
                "Function b missing consume block",
                "No @init function defined",
            ]
        );
    }
}
