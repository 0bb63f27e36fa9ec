//! ML Transpiler Driver
//!
//! Main entry point for the mlc transpile-and-run tool: parses the
//! command line, runs the two translation passes, writes the generated C
//! to a per-process temporary file, builds it with the system C
//! compiler, runs the produced binary, and cleans the artifacts up.

use clap::Parser;
use log::{debug, info};
use mlc_codegen::translate;
use mlc_common::{FunctionTable, Limits, TranslateError, TranslationContext, VariableTable};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

#[derive(Parser)]
#[command(name = "mlc")]
#[command(about = "ML to C11 transpile-and-run tool")]
#[command(version = "0.1.0")]
struct Cli {
    /// Input ML source file
    input: PathBuf,

    /// Stream a trace line for each recognized construct
    #[arg(short, long)]
    verbose: bool,

    /// Keep the generated C file and compiled binary
    #[arg(long)]
    keep: bool,

    /// Print the populated symbol tables as JSON after translation
    #[arg(long)]
    dump_symbols: bool,

    /// Arguments forwarded to the compiled program
    #[arg(trailing_var_arg = true)]
    program_args: Vec<String>,
}

fn main() {
    let cli = Cli::parse();

    let mut builder = env_logger::Builder::from_default_env();
    if cli.verbose {
        // Trace lines go to stdout; stderr stays reserved for diagnostics
        builder
            .filter_level(log::LevelFilter::Trace)
            .target(env_logger::Target::Stdout);
    }
    builder.init();

    if let Err(e) = run(&cli) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let source = fs::read_to_string(&cli.input).map_err(|e| {
        TranslateError::file_error(format!("could not open file {}: {}", cli.input.display(), e))
    })?;
    info!("opened file {}", cli.input.display());

    let filename = cli.input.display().to_string();
    let (c_source, ctx) = translate(&source, &filename, Limits::default());

    // Surface every collected diagnostic before deciding overall success
    ctx.reporter.print_diagnostics();

    if cli.dump_symbols {
        print_symbol_dump(&ctx)?;
    }

    if ctx.reporter.has_errors() {
        return Err(format!("translation failed: {}", ctx.reporter.summary()).into());
    }

    let pid = std::process::id();
    let c_file = c_file_name(pid);
    let binary = binary_name(pid);

    fs::write(&c_file, &c_source)?;
    info!("wrote translated C to {}", c_file);

    build_program(&c_file, &binary)?;
    run_program(&binary, &cli.program_args)?;

    if cli.keep {
        info!("keeping artifacts {} and {}", c_file, binary);
    } else {
        clean_up(&c_file, &binary);
    }
    Ok(())
}

/// Temporary C file, named from the process id
fn c_file_name(pid: u32) -> String {
    format!("ml_{}.c", pid)
}

/// Compiled binary, named from the process id
fn binary_name(pid: u32) -> String {
    format!("ml_{}", pid)
}

/// The cc invocation used to build a generated C file
fn compile_command(c_file: &str, binary: &str) -> Command {
    let mut command = Command::new("cc");
    command.args(["-std=c11", "-Wall", "-Werror", "-o", binary, c_file]);
    command
}

/// Build the generated C file with the system C compiler
fn build_program(c_file: &str, binary: &str) -> Result<(), TranslateError> {
    info!("compiling {} with cc", c_file);
    let status = compile_command(c_file, binary)
        .status()
        .map_err(|e| TranslateError::Build {
            message: format!("could not invoke cc: {}", e),
        })?;
    if !status.success() {
        return Err(TranslateError::Build {
            message: format!("compilation failed for {}", c_file),
        });
    }
    Ok(())
}

/// Run the compiled binary, forwarding any trailing user arguments
fn run_program(binary: &str, args: &[String]) -> Result<(), TranslateError> {
    let program = format!("./{}", binary);
    info!("executing {}", program);
    let status = Command::new(&program)
        .args(args)
        .status()
        .map_err(|e| TranslateError::Run {
            message: format!("could not execute {}: {}", program, e),
        })?;
    if !status.success() {
        return Err(TranslateError::Run {
            message: format!("execution failed for {}", binary),
        });
    }
    Ok(())
}

/// Delete the temporary artifacts; failures here are not fatal
fn clean_up(c_file: &str, binary: &str) {
    debug!("cleaning up temporary files");
    let _ = fs::remove_file(c_file);
    let _ = fs::remove_file(binary);
}

#[derive(Serialize)]
struct SymbolDump<'a> {
    functions: &'a FunctionTable,
    globals: &'a VariableTable,
}

fn print_symbol_dump(ctx: &TranslationContext) -> Result<(), Box<dyn std::error::Error>> {
    let dump = SymbolDump {
        functions: &ctx.functions,
        globals: &ctx.globals,
    };
    println!("{}", serde_json::to_string_pretty(&dump)?);
    Ok(())
}
