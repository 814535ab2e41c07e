//! micac-drv - Compiler Driver
//!
//! Entry points and pipeline orchestration. Each pass has its own
//! subcommand, usable independently for debugging, and each behaves
//! exactly like the same pass inside the full pipeline:
//!
//! - `micac tokenize <file>`: one token per line
//! - `micac parse <file>`: indented AST dump
//! - `micac check <file> [--show-types]`: semantic checking
//! - `micac ircode <file>`: per-procedure instruction tuples
//!
//! Passes run strictly in sequence and the driver gates each pipeline
//! boundary on the error sink: once anything has been reported, later
//! passes are skipped. Diagnostics print to stdout as
//! `line: message`, after the requested stage's output, and never
//! affect the exit status - only usage and I/O errors exit non-zero.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use micac_ir::Procedure;
use micac_lex::Lexer;
use micac_util::Handler;

/// Command line interface for the Mica compiler front-end.
#[derive(Parser, Debug)]
#[command(name = "micac", version, about = "Mica compiler front-end and mid-end")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the token stream, one token per line.
    Tokenize { file: PathBuf },

    /// Print the AST in indented form.
    Parse { file: PathBuf },

    /// Run the program through semantic checking.
    Check {
        file: PathBuf,

        /// Also print every node with its decorated type and line.
        #[arg(long)]
        show_types: bool,
    },

    /// Print the intermediate code, one instruction tuple per line.
    Ircode { file: PathBuf },
}

/// Runs the selected subcommand.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Tokenize { file } => tokenize_cmd(&file),
        Command::Parse { file } => parse_cmd(&file),
        Command::Check { file, show_types } => check_cmd(&file, show_types),
        Command::Ircode { file } => ircode_cmd(&file),
    }
}

/// Runs the full front-end pipeline on `source`: lex, parse, check,
/// generate. Returns an empty procedure list when any stage reported
/// diagnostics; the caller inspects the handler for them.
pub fn compile_ircode(source: &str, handler: &Handler) -> Vec<Procedure> {
    let ast = micac_par::parse(source, handler);
    debug!(statements = ast.len(), "parsed");
    if handler.any_reported() {
        return Vec::new();
    }

    let checked = micac_sem::check_program(&ast, handler);
    debug!("checked");
    if handler.any_reported() {
        return Vec::new();
    }

    let procs = micac_ir::generate(&checked);
    debug!(procedures = procs.len(), "generated ircode");
    procs
}

fn tokenize_cmd(path: &Path) -> Result<()> {
    let source = read_source(path)?;
    let handler = Handler::new();
    let tokens = Lexer::new(&source, &handler).tokenize();
    debug!(tokens = tokens.len(), "tokenized");

    for token in &tokens {
        println!("{}: {:?} '{}'", token.line, token.kind, token.text);
    }
    print_diagnostics(&handler);
    Ok(())
}

fn parse_cmd(path: &Path) -> Result<()> {
    let source = read_source(path)?;
    let handler = Handler::new();
    let program = micac_par::parse(&source, &handler);
    debug!(statements = program.len(), "parsed");

    print!("{}", micac_par::dump_program(&program));
    print_diagnostics(&handler);
    Ok(())
}

fn check_cmd(path: &Path, show_types: bool) -> Result<()> {
    let source = read_source(path)?;
    let handler = Handler::new();
    let ast = micac_par::parse(&source, &handler);

    if !handler.any_reported() {
        let checked = micac_sem::check_program(&ast, &handler);
        debug!("checked");
        if show_types {
            print!("{}", micac_sem::dump_typed(&checked));
        }
    }

    print_diagnostics(&handler);
    Ok(())
}

fn ircode_cmd(path: &Path) -> Result<()> {
    let source = read_source(path)?;
    let handler = Handler::new();
    let procs = compile_ircode(&source, &handler);

    for (index, proc) in procs.iter().enumerate() {
        if index > 0 {
            println!();
        }
        print!("{}", proc);
    }
    print_diagnostics(&handler);
    Ok(())
}

fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn print_diagnostics(handler: &Handler) {
    for diagnostic in handler.diagnostics() {
        println!("{}", diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_produces_procedures() {
        let handler = Handler::new();
        let procs = compile_ircode("print 3;", &handler);
        assert!(!handler.any_reported());
        assert_eq!(procs.len(), 1);
        assert_eq!(procs[0].name.as_str(), "_init");
        assert_eq!(procs[0].code.len(), 2);
    }

    #[test]
    fn test_syntax_error_short_circuits_checking() {
        let handler = Handler::new();
        let procs = compile_ircode("var x = ;", &handler);
        assert!(procs.is_empty());
        // Only the parse error, no follow-on checker diagnostics.
        assert_eq!(handler.error_count(), 1);
        assert!(handler.diagnostics()[0].message.starts_with("Syntax error"));
    }

    #[test]
    fn test_type_error_short_circuits_generation() {
        let handler = Handler::new();
        let procs = compile_ircode("var a bool = true;\na = 1;", &handler);
        assert!(procs.is_empty());
        assert_eq!(
            handler.diagnostics()[0].message,
            "TypeError: assigning type int to \"a\" of type bool"
        );
    }
}
