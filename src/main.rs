//! `holang` command line tool.
//!
//! Prints the tokens of a `Holang` source file, one per line.

use std::{path::PathBuf, process::ExitCode};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use holang::{
    base::{FsProvider, Handler, PrintHandler},
    lexical::token::Token,
};

/// Tokenizes a Holang source file and prints the tokens.
#[derive(Parser, Debug)]
#[command(name = "holang")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Tokenizer for the Holang language", long_about = None)]
struct Cli {
    /// The source file to tokenize
    file: PathBuf,

    /// Also print the comments of the file
    #[arg(long, env = "HOLANG_COMMENTS")]
    comments: bool,

    /// Parse the package clause and imports and print them instead of the tokens
    #[arg(long, env = "HOLANG_PARSE")]
    parse: bool,

    /// Enable verbose output
    #[arg(short, long, env = "HOLANG_VERBOSE")]
    verbose: bool,

    /// Disable color output
    #[arg(long, env = "HOLANG_NO_COLOR")]
    no_color: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    if let Err(err) = init_logging(cli.verbose, cli.no_color) {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    let handler = PrintHandler::new();

    match run(&cli, &handler) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // diagnostics were already printed by the handler
            if !Handler::<holang::base::Error>::has_received(&handler) {
                eprintln!("{err:#}");
            }
            ExitCode::FAILURE
        }
    }
}

/// Initialize the logging system.
///
/// `HOLANG_LOG` takes precedence over the verbosity flag.
fn init_logging(verbose: bool, no_color: bool) -> anyhow::Result<()> {
    let default_directive = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("HOLANG_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let subscriber = fmt::layer()
        .with_ansi(!no_color)
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .context("Failed to initialize logging")
}

fn run(cli: &Cli, handler: &PrintHandler) -> anyhow::Result<()> {
    let provider = FsProvider::default();

    if cli.parse {
        let program = holang::parse(handler, &provider, &cli.file)
            .with_context(|| format!("Failed to parse {}", cli.file.display()))?;
        println!("{program:#?}");
        return Ok(());
    }

    let tokens = holang::tokenize(handler, &provider, &cli.file)
        .with_context(|| format!("Failed to tokenize {}", cli.file.display()))?;

    for token in tokens.tokens() {
        print_token(token);
    }

    if cli.comments {
        for comment in tokens.comments() {
            println!(
                "{}\tcomment\t{:?}",
                comment.span.position(),
                comment.span.str()
            );
        }
    }

    Ok(())
}

fn print_token(token: &Token) {
    println!(
        "{}\t{}\t{:?}",
        token.position(),
        token.kind(),
        token.lexeme()
    );
}
