//! Toy backend code generators.
//!
//! The extractor leaves `consume`/`emit` parameter lines uninterpreted; the
//! backends parse them as `TYPE(NAME)` against a fixed primitive vocabulary
//! and reject anything else. None of the backends compile function bodies.

pub mod c;
pub mod nasm;
pub mod rust;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::CodegenError;

/// Primitive type vocabulary for parameter declarations.
pub const PRIMITIVE_TYPES: [&str; 10] = [
    "f32", "f64", "int8", "uint8", "int16", "uint16", "int32", "uint32", "int64", "uint64",
];

static PARAM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z0-9_]+)\(([A-Za-z_][A-Za-z0-9_]*)\)$").expect("valid regex"));
static SPACE_SIZE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^([0-9_]+)([KMGT])?B$").expect("valid regex"));

/// A `TYPE(NAME)` parameter declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub ty: String,
    pub name: String,
}

/// Parse a function's `consume` or `emit` lines into typed parameters.
///
/// The literal `nil` declares an empty list and contributes nothing.
pub fn parse_params(function: &str, lines: &[String]) -> Result<Vec<Param>, CodegenError> {
    let mut params = Vec::new();
    for line in lines {
        if line == "nil" {
            continue;
        }
        let caps = PARAM_RE
            .captures(line)
            .ok_or_else(|| CodegenError::InvalidParameter {
                function: function.to_string(),
                line: line.clone(),
            })?;
        let ty = caps[1].to_string();
        if !PRIMITIVE_TYPES.contains(&ty.as_str()) {
            return Err(CodegenError::UnknownType {
                function: function.to_string(),
                ty,
            });
        }
        params.push(Param {
            ty,
            name: caps[2].to_string(),
        });
    }
    Ok(params)
}

/// Byte count declared by an `@space` annotation, with `K/M/G/T` scaled in
/// 1024 steps.
///
/// Returns 0 for values outside the annotation grammar; the verifier reports
/// those separately, so generators just skip the stack reservation.
pub fn parse_space(space: &str) -> u64 {
    let Some(caps) = SPACE_SIZE_RE.captures(space) else {
        return 0;
    };
    let digits: String = caps[1].chars().filter(char::is_ascii_digit).collect();
    let base: u64 = digits.parse().unwrap_or(0);
    let shift = match caps.get(2).map(|m| m.as_str().to_ascii_uppercase()) {
        Some(unit) => match unit.as_str() {
            "K" => 10,
            "M" => 20,
            "G" => 30,
            _ => 40,
        },
        None => 0,
    };
    base.saturating_mul(1u64 << shift)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_params_valid() {
        let lines = vec!["int32(raw)".to_string(), "uint8(limit)".to_string()];
        let params = parse_params("f", &lines).unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params[0], Param { ty: "int32".into(), name: "raw".into() });
        assert_eq!(params[1].name, "limit");
    }

    #[test]
    fn test_parse_params_nil_is_empty() {
        let lines = vec!["nil".to_string()];
        assert!(parse_params("f", &lines).unwrap().is_empty());
    }

    #[test]
    fn test_parse_params_rejects_malformed_line() {
        let lines = vec!["int32 raw".to_string()];
        assert_eq!(
            parse_params("f", &lines).unwrap_err(),
            CodegenError::InvalidParameter {
                function: "f".to_string(),
                line: "int32 raw".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_params_rejects_unknown_type() {
        let lines = vec!["complex128(z)".to_string()];
        assert_eq!(
            parse_params("f", &lines).unwrap_err(),
            CodegenError::UnknownType {
                function: "f".to_string(),
                ty: "complex128".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_space_sizes() {
        assert_eq!(parse_space("128B"), 128);
        assert_eq!(parse_space("1_024B"), 1024);
        assert_eq!(parse_space("4KB"), 4096);
        assert_eq!(parse_space("4kb"), 4096);
        assert_eq!(parse_space("2MB"), 2 << 20);
        assert_eq!(parse_space("1GB"), 1 << 30);
        assert_eq!(parse_space("1TB"), 1u64 << 40);
    }

    #[test]
    fn test_parse_space_invalid_is_zero() {
        assert_eq!(parse_space(""), 0);
        assert_eq!(parse_space("12XB"), 0);
        assert_eq!(parse_space("fast"), 0);
    }
}
