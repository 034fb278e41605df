//! Rust backend.
//!
//! Emits stub functions with typed parameters; emitted values become the
//! return type (unit, single value, or tuple).

use crate::error::CodegenError;
use crate::parser::FunctionDef;

use super::parse_params;

fn rust_type(ty: &str) -> &'static str {
    match ty {
        "f32" => "f32",
        "f64" => "f64",
        "int8" => "i8",
        "uint8" => "u8",
        "int16" => "i16",
        "uint16" => "u16",
        "int32" => "i32",
        "uint32" => "u32",
        "int64" => "i64",
        _ => "u64",
    }
}

/// Emit Rust stubs for `funcs`.
pub fn compile_to_rust(funcs: &[FunctionDef]) -> Result<String, CodegenError> {
    let mut out = String::from("//! Auto-generated Rust for SafeLang\n\n");

    for func in funcs {
        let consume = parse_params(&func.name, &func.consume)?;
        let emit = parse_params(&func.name, &func.emit)?;

        let args: Vec<String> = consume
            .iter()
            .map(|p| format!("_{}: {}", p.name, rust_type(&p.ty)))
            .collect();

        let ret = match emit.len() {
            0 => String::new(),
            1 => format!(" -> {}", rust_type(&emit[0].ty)),
            _ => {
                let tys: Vec<&str> = emit.iter().map(|p| rust_type(&p.ty)).collect();
                format!(" -> ({})", tys.join(", "))
            }
        };

        if !func.space.is_empty() || !func.time.is_empty() {
            out.push_str(&format!(
                "/// Contract: @space {} @time {}\n",
                if func.space.is_empty() { "?" } else { &func.space },
                if func.time.is_empty() { "?" } else { &func.time },
            ));
        }
        out.push_str(&format!("pub fn {}({}){} {{\n", func.name, args.join(", "), ret));
        out.push_str("    unimplemented!(\"body not compiled\")\n");
        out.push_str("}\n\n");
    }

    Ok(out)
}
