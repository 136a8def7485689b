//! microc - command-line entry point.

use clap::{Parser, ValueEnum};
use microc_drv::{Config, EmitKind, Session};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Micro compiler - compile Micro source files to native executables.
#[derive(Parser, Debug)]
#[command(name = "microc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Micro compiler - compile Micro source to a native executable")]
struct Cli {
    /// Input source file
    input: PathBuf,

    /// Output path (defaults to the input file name without extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// What to emit
    #[arg(long, value_enum, default_value = "bin")]
    emit: EmitArg,

    /// Keep the .qbe and .asm intermediates after a successful build
    #[arg(long)]
    keep_temps: bool,

    /// Enable verbose (debug-level) logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum EmitArg {
    /// Token stream dump
    Tokens,
    /// Parsed AST dump
    Ast,
    /// Textual QBE IR only
    Ir,
    /// Native executable (default)
    Bin,
}

impl From<EmitArg> for EmitKind {
    fn from(arg: EmitArg) -> Self {
        match arg {
            EmitArg::Tokens => EmitKind::Tokens,
            EmitArg::Ast => EmitKind::Ast,
            EmitArg::Ir => EmitKind::Ir,
            EmitArg::Bin => EmitKind::Bin,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let session = Session::new(Config {
        input: cli.input,
        output: cli.output,
        emit: cli.emit.into(),
        keep_intermediates: cli.keep_temps,
    });

    if let Err(e) = session.compile() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
