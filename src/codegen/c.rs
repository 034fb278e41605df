//! C backend.
//!
//! Emits stub definitions with typed parameters mapped onto `<stdint.h>`
//! types. Consumed values become value parameters and emitted values become
//! out-pointers.

use crate::error::CodegenError;
use crate::parser::FunctionDef;

use super::parse_params;

fn c_type(ty: &str) -> &'static str {
    match ty {
        "f32" => "float",
        "f64" => "double",
        "int8" => "int8_t",
        "uint8" => "uint8_t",
        "int16" => "int16_t",
        "uint16" => "uint16_t",
        "int32" => "int32_t",
        "uint32" => "uint32_t",
        "int64" => "int64_t",
        _ => "uint64_t",
    }
}

/// Emit C stubs for `funcs`.
pub fn compile_to_c(funcs: &[FunctionDef]) -> Result<String, CodegenError> {
    let mut out = String::from("/* Auto-generated C for SafeLang */\n#include <stdint.h>\n\n");

    for func in funcs {
        let consume = parse_params(&func.name, &func.consume)?;
        let emit = parse_params(&func.name, &func.emit)?;

        out.push_str(&format!(
            "/* @space {} @time {} */\n",
            if func.space.is_empty() { "?" } else { &func.space },
            if func.time.is_empty() { "?" } else { &func.time },
        ));

        let mut args: Vec<String> = consume
            .iter()
            .map(|p| format!("{} {}", c_type(&p.ty), p.name))
            .collect();
        args.extend(
            emit.iter()
                .map(|p| format!("{} *out_{}", c_type(&p.ty), p.name)),
        );
        if args.is_empty() {
            args.push("void".to_string());
        }

        out.push_str(&format!("void {}({}) {{\n", func.name, args.join(", ")));
        out.push_str("    /* body not compiled */\n");
        out.push_str("}\n\n");
    }

    Ok(out)
}
