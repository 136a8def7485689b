//! microc-drv - Compiler driver.
//!
//! The driver orchestrates the pipeline: read the source file, lex it
//! into a materialised token vector, parse, and hand the AST to the
//! code generator. Each phase runs to completion before the next
//! begins; the first failing phase stops the compilation with a
//! non-zero exit.
//!
//! Besides the default native build, the driver can stop early and dump
//! the token stream, the AST, or the textual IR, which is the main
//! debugging surface of the compiler.

use anyhow::{bail, Context, Result};
use microc_gen::GenOptions;
use microc_lex::Token;
use microc_par::Parser;
use microc_util::Handler;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// What the driver should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmitKind {
    /// Dump the token stream and stop.
    Tokens,
    /// Dump the AST and stop.
    Ast,
    /// Write `{output}.qbe` and stop before the backend.
    Ir,
    /// Full pipeline: IR, backend, link.
    #[default]
    Bin,
}

/// Configuration for one compiler invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Input source file.
    pub input: PathBuf,

    /// Output path; defaults to the input file name without its
    /// extension.
    pub output: Option<PathBuf>,

    /// What to produce.
    pub emit: EmitKind,

    /// Keep the `.qbe` and `.asm` intermediates after a successful
    /// build.
    pub keep_intermediates: bool,
}

impl Config {
    /// The effective output path.
    pub fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => self.input.with_extension(""),
        }
    }
}

/// One compilation session.
pub struct Session {
    pub config: Config,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs the pipeline for this session's configuration.
    pub fn compile(&self) -> Result<()> {
        let source = fs::read(&self.config.input)
            .with_context(|| format!("failed to read {}", self.config.input.display()))?;

        let handler = Handler::with_source(source.clone());

        debug!(
            file = %self.config.input.display(),
            bytes = source.len(),
            "lexing"
        );
        let tokens = microc_lex::tokenize(&source, &handler);
        if handler.has_errors() {
            bail!("lexing failed with {} error(s)", handler.error_count());
        }

        if self.config.emit == EmitKind::Tokens {
            dump_tokens(&source, &tokens);
            return Ok(());
        }

        debug!(tokens = tokens.len(), "parsing");
        let Some(program) = Parser::new(&source, &tokens, &handler).parse() else {
            bail!("parsing failed");
        };

        if self.config.emit == EmitKind::Ast {
            println!("{:#?}", program);
            return Ok(());
        }

        let output = self.config.output_path();
        if output == self.config.input {
            bail!(
                "output path {} would overwrite the input; pass -o",
                output.display()
            );
        }

        match self.config.emit {
            EmitKind::Ir => {
                debug!(output = %output.display(), "emitting ir");
                microc_gen::generate_ir_only(&program, &output, &handler)?;
            }
            EmitKind::Bin => {
                debug!(output = %output.display(), "generating executable");
                microc_gen::generate(
                    &program,
                    &output,
                    &handler,
                    GenOptions {
                        keep_intermediates: self.config.keep_intermediates,
                    },
                )?;
            }
            EmitKind::Tokens | EmitKind::Ast => {}
        }

        Ok(())
    }
}

/// Prints the token stream, one token per line with its position.
fn dump_tokens(source: &[u8], tokens: &[Token]) {
    for token in tokens {
        let lexeme = String::from_utf8_lossy(token.lexeme(source));
        println!(
            "[{:>4}:{:<4}] {:<16} {}",
            token.span.line,
            token.span.column,
            format!("{:?}", token.kind),
            lexeme
        );
    }
}
