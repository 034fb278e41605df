//! Comment and string sanitization.
//!
//! Produces a "clean" copy of the source where comment and string contents
//! are blanked to spaces while newlines survive, so every byte offset in the
//! clean text maps onto the same offset in the original. Brace matching runs
//! on the clean buffer and body slicing on the original; that alignment is
//! load-bearing for the extractor.

use crate::error::ParseError;

/// Strictness switches for sanitizing and parsing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Tolerate `/*` inside an open block comment instead of failing.
    /// Default is strict: ambiguous input is rejected.
    pub allow_nested_comments: bool,
}

/// Sanitize with default (strict) options.
pub fn sanitize(text: &str) -> Result<String, ParseError> {
    sanitize_with(text, ParseOptions::default())
}

/// Blank comments and string literals out of `text`.
///
/// Replaced characters become one space per byte, so multi-byte characters
/// inside comments or strings keep the clean buffer byte-aligned with the
/// original. Newlines are always preserved.
pub fn sanitize_with(text: &str, options: ParseOptions) -> Result<String, ParseError> {
    let mut result = String::with_capacity(text.len());
    let mut i = 0;
    let mut in_string: Option<(char, usize)> = None;
    let mut block_start: Option<usize> = None;

    while i < text.len() {
        let rest = &text[i..];
        let Some(ch) = rest.chars().next() else { break };

        if block_start.is_some() {
            if rest.starts_with("/*") && !options.allow_nested_comments {
                return Err(ParseError::NestedComment { line: line_at(text, i) });
            }
            if rest.starts_with("*/") {
                result.push_str("  ");
                i += 2;
                block_start = None;
            } else {
                blank_char(&mut result, ch);
                i += ch.len_utf8();
            }
            continue;
        }

        if let Some((quote, _)) = in_string {
            blank_char(&mut result, ch);
            if ch == quote {
                in_string = None;
            }
            i += ch.len_utf8();
            continue;
        }

        if rest.starts_with("/*") {
            block_start = Some(i);
            result.push_str("  ");
            i += 2;
            continue;
        }

        if rest.starts_with("//") {
            i += blank_to_eol(&mut result, rest);
            continue;
        }

        // `#` and `!` open a comment only at line start or after whitespace,
        // so `a != b` stays untouched.
        if (ch == '#' || ch == '!') && (i == 0 || preceded_by_whitespace(text, i)) {
            i += blank_to_eol(&mut result, rest);
            continue;
        }

        if ch == '"' || ch == '\'' {
            in_string = Some((ch, i));
            result.push(' ');
            i += 1;
            continue;
        }

        result.push(ch);
        i += ch.len_utf8();
    }

    if let Some(start) = block_start {
        return Err(ParseError::UnterminatedComment { line: line_at(text, start) });
    }
    if let Some((_, start)) = in_string {
        return Err(ParseError::UnterminatedString { line: line_at(text, start) });
    }

    Ok(result)
}

/// 1-based line number of byte offset `pos`.
pub(crate) fn line_at(text: &str, pos: usize) -> usize {
    text.as_bytes()[..pos].iter().filter(|&&b| b == b'\n').count() + 1
}

fn blank_char(out: &mut String, ch: char) {
    if ch == '\n' {
        out.push('\n');
    } else {
        for _ in 0..ch.len_utf8() {
            out.push(' ');
        }
    }
}

/// Blank from the start of `rest` up to (not including) the next newline.
/// Returns the number of bytes consumed.
fn blank_to_eol(out: &mut String, rest: &str) -> usize {
    let end = rest.find('\n').unwrap_or(rest.len());
    for _ in 0..end {
        out.push(' ');
    }
    end
}

fn preceded_by_whitespace(text: &str, pos: usize) -> bool {
    text[..pos].chars().next_back().is_some_and(|c| c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_round_trips() {
        let src = "function \"f\" is not plain\n"; // quotes get blanked
        let plain = "no comments or strings here\nat all\n";
        assert_eq!(sanitize(plain).unwrap(), plain);
        assert_ne!(sanitize(src).unwrap(), src);
    }

    #[test]
    fn test_alignment_preserved() {
        let src = "abc /* xy */ def // tail\nnext 'q' end";
        let clean = sanitize(src).unwrap();
        assert_eq!(clean.len(), src.len());
        let expected = format!(
            "abc{}def{}\nnext{}end",
            " ".repeat(10),
            " ".repeat(8),
            " ".repeat(5)
        );
        assert_eq!(clean, expected);
    }

    #[test]
    fn test_block_comment_keeps_newlines() {
        let src = "a /* one\ntwo */ b";
        assert_eq!(sanitize(src).unwrap(), "a       \n       b");
    }

    #[test]
    fn test_hash_and_bang_comments_need_boundary() {
        assert_eq!(sanitize("# full line").unwrap(), " ".repeat(11));
        assert_eq!(sanitize("x ! rest").unwrap(), format!("x{}", " ".repeat(7)));
        // No boundary: `!` is an operator here, `#` mid-token passes through.
        assert_eq!(sanitize("a!=b").unwrap(), "a!=b");
        assert_eq!(sanitize("x#y").unwrap(), "x#y");
    }

    #[test]
    fn test_strings_blanked_including_quotes() {
        assert_eq!(sanitize("x = \"{ }\" y").unwrap(), "x =       y");
        assert_eq!(sanitize("x = '{' y").unwrap(), "x =     y");
    }

    #[test]
    fn test_string_quote_kinds_do_not_mix() {
        // A double quote inside a single-quoted string does not close it.
        assert_eq!(sanitize("'a\"b' c").unwrap(), "      c");
    }

    #[test]
    fn test_multibyte_blanking_keeps_byte_offsets() {
        let src = "\"héllo\" {";
        let clean = sanitize(src).unwrap();
        assert_eq!(clean.len(), src.len());
        assert_eq!(clean.find('{'), src.find('{'));
    }

    #[test]
    fn test_unterminated_comment_reports_opening_line() {
        let err = sanitize("line one\nline /* two\nthree").unwrap_err();
        assert_eq!(err, ParseError::UnterminatedComment { line: 2 });
    }

    #[test]
    fn test_unterminated_string_reports_opening_line() {
        let err = sanitize("ok\nok\nbad \"string").unwrap_err();
        assert_eq!(err, ParseError::UnterminatedString { line: 3 });
    }

    #[test]
    fn test_nested_block_comment_strict_vs_tolerant() {
        let src = "/* outer /* inner */ tail";
        assert_eq!(sanitize(src).unwrap_err(), ParseError::NestedComment { line: 1 });

        let opts = ParseOptions { allow_nested_comments: true };
        // Tolerant mode treats the inner `/*` as comment content.
        assert_eq!(
            sanitize_with(src, opts).unwrap(),
            format!("{}tail", " ".repeat(21))
        );
    }
}
