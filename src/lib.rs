//! # safelang
//!
//! Source-annotation verifier and toy code generator for SafeLang, a small
//! resource-contract language. Functions declare the memory and timing
//! budgets they require plus the values they consume and emit:
//!
//! ```text
//! @init
//! function "boot" {
//!     @space 128B
//!     @time 1000ns
//!     consume { nil }
//!     emit { uint32(status) }
//! }
//! ```
//!
//! This crate provides:
//! - a sanitizing parser that extracts [`FunctionDef`] records with exact
//!   original-text bodies
//! - a contract verifier that collects every violation in one pass
//! - a saturating fixed-width arithmetic runtime
//! - toy NASM/C/Rust backends and the `safelang` CLI built on them
//!
//! ## Usage
//!
//! ```rust
//! use safelang::{parse_functions, verify_contracts};
//!
//! let src = r#"
//! @init
//! function "boot" {
//!     @space 128B
//!     @time 1000ns
//!     consume { nil }
//!     emit { uint32(status) }
//! }
//! "#;
//!
//! let funcs = parse_functions(src)?;
//! assert!(verify_contracts(&funcs).is_empty());
//! # Ok::<(), safelang::ParseError>(())
//! ```

pub mod codegen;
pub mod error;
pub mod parser;
pub mod runtime;

pub use error::{CodegenError, ParseError, RuntimeError};
pub use parser::{parse_functions, verify_contracts, FunctionDef, ParseOptions};
