//! Error types for the parser, the arithmetic runtime, and the backends.
//!
//! Structural parse failures are fatal to a parse call and carry the 1-based
//! source line where known. Contract violations are never errors; the
//! verifier collects them as plain strings instead.

use thiserror::Error;

/// Structural failure raised while sanitizing source text or extracting
/// function blocks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A `/* ... */` comment was opened but never closed.
    #[error("Unterminated block comment starting at line {line}")]
    UnterminatedComment { line: usize },

    /// A single- or double-quoted string was opened but never closed.
    #[error("Unterminated string starting at line {line}")]
    UnterminatedString { line: usize },

    /// `/*` encountered inside an open block comment (strict mode only).
    #[error("Nested block comment at line {line}")]
    NestedComment { line: usize },

    /// A `function` line that does not match `function "NAME"`.
    #[error("Malformed function declaration at line {line}: {text}")]
    MalformedDeclaration { line: usize, text: String },

    /// A `}` with no matching `{`.
    #[error("Unmatched closing brace at line {line}")]
    UnmatchedBrace { line: usize },

    /// A `{` that is never closed.
    #[error("Unterminated function block starting at line {line}")]
    UnterminatedBlock { line: usize },

    /// An `@init` marker not followed by a function declaration.
    #[error("@init must be followed by a function definition")]
    DanglingInit,
}

/// Invalid-input failure from the saturating arithmetic runtime.
///
/// Saturation itself is a signaled success, not an error; see
/// [`crate::runtime::SatResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Bit width outside the supported `1..=63` range.
    #[error("bit width must be between 1 and 63, got {0}")]
    InvalidBitWidth(u32),

    /// Zero divisor in `sat_div`.
    #[error("division by zero")]
    DivideByZero,

    /// Zero divisor in `sat_mod`.
    #[error("integer modulo by zero")]
    ModuloByZero,
}

/// Failure raised by a backend generator for parameter lines the extractor
/// deliberately leaves uninterpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodegenError {
    /// A `consume`/`emit` line that does not match `TYPE(NAME)`.
    #[error("Function {function}: invalid parameter declaration `{line}`")]
    InvalidParameter { function: String, line: String },

    /// A parameter type outside the primitive vocabulary.
    #[error("Function {function}: unknown parameter type `{ty}`")]
    UnknownType { function: String, ty: String },
}
