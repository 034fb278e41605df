//! Parser for SafeLang sources
//!
//! This module contains:
//! - `sanitize`: blanks comments and string literals while keeping byte
//!   offsets aligned with the original text
//! - `extract`: locates `function "name" { ... }` blocks and builds
//!   `FunctionDef` records
//! - `contracts`: checks annotation contracts and whole-program rules

pub mod contracts;
pub mod extract;
pub mod sanitize;

pub use contracts::{verify_contracts, MAX_FUNCTION_LINES};
pub use extract::{parse_functions, parse_functions_with, FunctionDef};
pub use sanitize::{sanitize, sanitize_with, ParseOptions};
