//! NASM x86-64 backend.
//!
//! Emits prologue/epilogue stubs and reserves stack space from the `@space`
//! annotation. Parameter lists are ignored: the System V call sequence for
//! them is out of scope for this backend.

use crate::parser::FunctionDef;

use super::parse_space;

/// Emit NASM assembly for `funcs`.
pub fn compile_to_nasm(funcs: &[FunctionDef]) -> String {
    let mut lines = vec!["; Auto-generated NASM for SafeLang".to_string()];
    for func in funcs {
        lines.push(format!("global {}", func.name));
    }
    lines.push(String::new());

    for func in funcs {
        let space = parse_space(&func.space);
        lines.push(format!("{}:", func.name));
        lines.push("    push rbp".to_string());
        lines.push("    mov rbp, rsp".to_string());
        if space > 0 {
            lines.push(format!("    sub rsp, {space}"));
        }
        lines.push("    ; body not compiled".to_string());
        if space > 0 {
            lines.push(format!("    add rsp, {space}"));
        }
        lines.push("    pop rbp".to_string());
        lines.push("    ret".to_string());
        lines.push(String::new());
    }

    lines.join("\n")
}
