//! Function block extraction.
//!
//! Scans the sanitized buffer for `function "name" { ... }` blocks
//! (optionally preceded by a standalone `@init` marker), matches braces by
//! depth tracking, and slices the body from the original text so embedded
//! comments and strings stay literal.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::ParseError;
use crate::parser::sanitize::{line_at, sanitize_with, ParseOptions};

static DECL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^function\s+"([^"]+)""#).expect("valid regex"));
static SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"@space\s+(\S+)").expect("valid regex"));
static TIME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"@time\s+(\S+)").expect("valid regex"));
static CONSUME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)consume\s*\{([^}]*)\}").expect("valid regex"));
static EMIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)emit\s*\{([^}]*)\}").expect("valid regex"));

/// One parsed function block.
///
/// Built once per parse call and never mutated afterwards. Name uniqueness
/// and annotation validity are verifier concerns, not extraction concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionDef {
    /// Name from the `function "NAME"` declaration.
    pub name: String,
    /// Raw `@space` annotation token, empty if absent.
    pub space: String,
    /// Raw `@time` annotation token, empty if absent.
    pub time: String,
    /// Original-text slice strictly between the matched outer braces.
    pub body: String,
    /// Trimmed non-empty lines of the first `consume { ... }` block.
    pub consume: Vec<String>,
    /// Trimmed non-empty lines of the first `emit { ... }` block.
    pub emit: Vec<String>,
    /// Whether a standalone `@init` marker preceded the declaration.
    pub is_init: bool,
    /// Newline-delimited line count of `body`, 0 if the body is empty.
    pub lines: usize,
}

/// Parse all function blocks with default (strict) options.
pub fn parse_functions(text: &str) -> Result<Vec<FunctionDef>, ParseError> {
    parse_functions_with(text, ParseOptions::default())
}

/// Parse all function blocks from `text` in source order.
///
/// Structural scanning runs on the sanitized buffer; the function name and
/// body are always taken from the original text. Top-level lines that are
/// neither `@init` nor `function` declarations are skipped.
pub fn parse_functions_with(
    text: &str,
    options: ParseOptions,
) -> Result<Vec<FunctionDef>, ParseError> {
    let sanitized = sanitize_with(text, options)?;

    // The sanitizer preserves every newline, so both buffers split into the
    // same number of lines and share byte offsets.
    let orig_lines: Vec<&str> = text.split('\n').collect();
    let san_lines: Vec<&str> = sanitized.split('\n').collect();
    let mut offsets = Vec::with_capacity(orig_lines.len());
    let mut pos = 0;
    for line in &orig_lines {
        offsets.push(pos);
        pos += line.len() + 1;
    }

    let mut funcs = Vec::new();
    let mut i = 0;
    while i < san_lines.len() {
        let mut line_san = san_lines[i].trim();
        let mut flagged_init = false;

        if line_san.starts_with("@init") {
            flagged_init = true;
            i += 1;
            // Blank and comment-only lines may sit between the marker and
            // the declaration it flags.
            while i < san_lines.len() && san_lines[i].trim().is_empty() {
                i += 1;
            }
            if i >= san_lines.len() {
                return Err(ParseError::DanglingInit);
            }
            line_san = san_lines[i].trim();
            if !line_san.starts_with("function ") {
                return Err(ParseError::DanglingInit);
            }
        }

        if line_san.starts_with("function ") {
            // The name comes from the original line: a name that happens to
            // look like a comment marker must still be read correctly.
            let line_orig = orig_lines[i].trim();
            let name = match DECL_RE.captures(line_orig) {
                Some(caps) => caps[1].to_string(),
                None => {
                    return Err(ParseError::MalformedDeclaration {
                        line: i + 1,
                        text: line_orig.to_string(),
                    });
                }
            };

            let start_pos = offsets[i];
            let next_open = sanitized[start_pos..].find('{').map(|p| start_pos + p);
            let next_close = sanitized[start_pos..].find('}').map(|p| start_pos + p);
            if let Some(close) = next_close {
                if next_open.is_none_or(|open| close < open) {
                    return Err(ParseError::UnmatchedBrace {
                        line: line_at(&sanitized, close),
                    });
                }
            }
            let open = next_open.ok_or(ParseError::UnterminatedBlock { line: i + 1 })?;

            let end = find_matching_brace(&sanitized, open)?;
            let body = &text[open + 1..end];
            let lines = if body.is_empty() {
                0
            } else {
                body.matches('\n').count() + 1
            };

            funcs.push(FunctionDef {
                name,
                space: first_capture(&SPACE_RE, body),
                time: first_capture(&TIME_RE, body),
                body: body.to_string(),
                consume: block_lines(&CONSUME_RE, body),
                emit: block_lines(&EMIT_RE, body),
                is_init: flagged_init,
                lines,
            });

            // Resume after the closing brace's line so interior lines are
            // never re-scanned as top-level declarations.
            i = line_at(&sanitized, end);
            continue;
        }

        i += 1;
    }

    Ok(funcs)
}

/// Scan forward from the opening brace tracking nesting depth.
fn find_matching_brace(sanitized: &str, open_pos: usize) -> Result<usize, ParseError> {
    let mut depth = 1usize;
    for (off, ch) in sanitized[open_pos + 1..].char_indices() {
        match ch {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(open_pos + 1 + off);
                }
            }
            _ => {}
        }
    }
    Err(ParseError::UnterminatedBlock {
        line: line_at(sanitized, open_pos),
    })
}

fn first_capture(re: &Regex, body: &str) -> String {
    re.captures(body)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default()
}

fn block_lines(re: &Regex, body: &str) -> Vec<String> {
    re.captures(body)
        .map(|caps| {
            caps[1]
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
