//! SafeLang command-line verifier and compiler.
//!
//! Usage: safelang check <paths>... | safelang compile <file> --target nasm

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use walkdir::WalkDir;

use safelang::codegen;
use safelang::parser::{parse_functions, verify_contracts, FunctionDef};
use safelang::runtime;

#[derive(Parser)]
#[command(name = "safelang")]
#[command(about = "SafeLang resource-contract verifier", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify resource contracts in SafeLang sources
    Check {
        /// Files or directories to check (directories are searched for .slang files)
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Compile verified sources with a toy backend
    Compile {
        /// SafeLang source file
        file: PathBuf,

        /// Backend target
        #[arg(long, default_value = "nasm")]
        target: Target,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Evaluate one saturating arithmetic operation
    Math {
        /// Operation
        op: MathOp,

        a: i64,
        b: i64,

        /// Bit width (1-63)
        #[arg(long, default_value = "32")]
        bits: u32,

        /// Use unsigned arithmetic
        #[arg(long)]
        unsigned: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Human,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Target {
    Nasm,
    C,
    Rust,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MathOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

fn main() {
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Check { paths, format } => handle_check(&paths, format),
        Commands::Compile { file, target, output } => {
            handle_compile(&file, target, output.as_deref())
        }
        Commands::Math { op, a, b, bits, unsigned } => handle_math(op, a, b, bits, !unsigned),
    };

    std::process::exit(exit_code);
}

/// One checked source file: its functions and contract findings.
type Report = (PathBuf, Vec<FunctionDef>, Vec<String>);

fn handle_check(paths: &[PathBuf], format: OutputFormat) -> i32 {
    let files = collect_sources(paths);
    if files.is_empty() {
        eprintln!("ERROR: no SafeLang sources found");
        return 1;
    }

    let mut exit_code = 0;
    let mut reports: Vec<Report> = Vec::new();
    for file in files {
        match check_file(&file) {
            Ok((funcs, errors)) => {
                if !errors.is_empty() {
                    exit_code = 1;
                }
                reports.push((file, funcs, errors));
            }
            // Structural and file failures go to stderr; contract findings
            // go to stdout below.
            Err(e) => {
                eprintln!("ERROR: {e:#}");
                exit_code = 1;
            }
        }
    }

    let output = match format {
        OutputFormat::Human => format_human(&reports),
        OutputFormat::Json => format_json(&reports),
    };
    print!("{output}");

    exit_code
}

fn check_file(path: &Path) -> Result<(Vec<FunctionDef>, Vec<String>)> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let funcs = parse_functions(&text).with_context(|| format!("parsing {}", path.display()))?;
    let errors = verify_contracts(&funcs);
    Ok((funcs, errors))
}

/// Expand directories into the `.slang` files they contain.
fn collect_sources(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|e| {
                    !e.path().to_string_lossy().contains("/target/")
                        && !e.path().to_string_lossy().contains("/.git/")
                })
                .filter_map(|e| e.ok())
            {
                if entry.path().extension().and_then(|s| s.to_str()) == Some("slang") {
                    files.push(entry.path().to_path_buf());
                }
            }
        } else {
            files.push(path.clone());
        }
    }
    files
}

fn format_human(reports: &[Report]) -> String {
    if reports.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    let mut total_funcs = 0;
    let mut total_errors = 0;

    for (path, funcs, errors) in reports {
        total_funcs += funcs.len();
        total_errors += errors.len();
        for error in errors {
            out.push_str(&format!("ERROR: {}: {}\n", path.display(), error));
        }
    }

    if total_errors == 0 {
        out.push_str(&format!(
            "Parsed {} functions across {} files successfully.\n",
            total_funcs,
            reports.len()
        ));
    } else {
        out.push_str(&format!(
            "{} contract violations across {} files.\n",
            total_errors,
            reports.len()
        ));
    }
    out
}

fn format_json(reports: &[Report]) -> String {
    use serde_json::json;

    let files: Vec<_> = reports
        .iter()
        .map(|(path, funcs, errors)| {
            json!({
                "file": path.to_string_lossy(),
                "functions": funcs,
                "errors": errors,
            })
        })
        .collect();
    let total_errors: usize = reports.iter().map(|(_, _, errors)| errors.len()).sum();

    let report = json!({
        "files": files,
        "total_errors": total_errors,
    });
    format!("{:#}\n", report)
}

fn handle_compile(file: &Path, target: Target, output: Option<&Path>) -> i32 {
    let text = match compile_file(file, target) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("ERROR: {e:#}");
            return 1;
        }
    };

    if let Some(out_path) = output {
        if let Err(e) = fs::write(out_path, &text) {
            eprintln!("ERROR: writing {}: {}", out_path.display(), e);
            return 1;
        }
    } else {
        print!("{text}");
    }
    0
}

fn compile_file(file: &Path, target: Target) -> Result<String> {
    let text = fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let funcs = parse_functions(&text).with_context(|| format!("parsing {}", file.display()))?;

    let errors = verify_contracts(&funcs);
    if !errors.is_empty() {
        bail!(
            "contract violations in {}:\n{}",
            file.display(),
            errors.join("\n")
        );
    }

    let generated = match target {
        Target::Nasm => codegen::nasm::compile_to_nasm(&funcs),
        Target::C => codegen::c::compile_to_c(&funcs)?,
        Target::Rust => codegen::rust::compile_to_rust(&funcs)?,
    };
    Ok(generated)
}

fn handle_math(op: MathOp, a: i64, b: i64, bits: u32, signed: bool) -> i32 {
    let result = match op {
        MathOp::Add => runtime::sat_add(a, b, bits, signed),
        MathOp::Sub => runtime::sat_sub(a, b, bits, signed),
        MathOp::Mul => runtime::sat_mul(a, b, bits, signed),
        MathOp::Div => runtime::sat_div(a, b, bits, signed),
        MathOp::Mod => runtime::sat_mod(a, b, bits, signed),
    };

    match result {
        Ok(r) if r.saturated => {
            println!("{} (saturated)", r.value);
            0
        }
        Ok(r) => {
            println!("{}", r.value);
            0
        }
        Err(e) => {
            eprintln!("ERROR: {e}");
            1
        }
    }
}
