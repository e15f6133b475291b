//! The `Holang` front end.
//!
//! `Holang` is a language derived from Go. This crate turns its source text into a stream of
//! tokens, inserting the semicolons the grammar leaves implicit, and parses the package clause and
//! import declarations at the top of a source file.

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    clippy::missing_errors_doc
)]
#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::missing_panics_doc, clippy::missing_const_for_fn)]

pub mod base;
pub mod lexical;
pub mod syntax;

use std::{io::Read, path::Path};

use base::{source_file::SourceFile, FileProvider, Handler, Result};
use syntax::syntax_tree::program::ProgramFile;

use crate::{lexical::token_stream::TokenStream, syntax::parser::Parser};

/// Converts the given source code to tokens.
///
/// # Errors
/// - If an error occurs while reading the file.
/// - If the source code contains an illegal token.
pub fn tokenize(
    handler: &impl Handler<base::Error>,
    file_provider: &impl FileProvider,
    path: &Path,
) -> Result<TokenStream> {
    let source_file = SourceFile::load(path, path.display().to_string(), file_provider)?;

    Ok(TokenStream::tokenize(&source_file, handler)?)
}

/// Converts the source code read from the given stream to tokens.
///
/// The stream is read to its end; it is not closed.
///
/// # Errors
/// - If an error occurs while reading the stream or it is not valid UTF-8.
/// - If the source code contains an illegal token.
pub fn tokenize_reader(
    handler: &impl Handler<base::Error>,
    reader: impl Read,
    source_name: impl Into<String>,
) -> Result<TokenStream> {
    let source_file = SourceFile::from_reader(source_name, reader)?;

    Ok(TokenStream::tokenize(&source_file, handler)?)
}

/// Parses the package clause and the import declarations of the given source code.
///
/// # Errors
/// - If an error occurs while reading the file.
/// - If the source code contains an illegal token.
/// - If an error occurs while parsing the source code.
pub fn parse(
    handler: &impl Handler<base::Error>,
    file_provider: &impl FileProvider,
    path: &Path,
) -> Result<ProgramFile> {
    let tokens = tokenize(handler, file_provider, path)?;

    let mut parser = Parser::new(&tokens);
    let program = parser.parse_program(handler)?;

    tracing::debug!(
        "parsed {} import declarations, stopped at token {}",
        program.imports().len(),
        parser.index()
    );

    Ok(program)
}
