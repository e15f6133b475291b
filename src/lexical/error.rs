use std::fmt::Display;

use getset::{CopyGetters, Getters};

use crate::base::{
    log::{Message, Severity, SourceCodeDisplay},
    source_file::Span,
};

use super::token::{Illegal, IllegalKind, LiteralKind};

/// Represents an error that occurred during the lexical analysis of the source code.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    UnterminatedLiteral(#[from] UnterminatedLiteral),
    #[error(transparent)]
    MalformedNumber(#[from] MalformedNumber),
    #[error(transparent)]
    UnexpectedCharacter(#[from] UnexpectedCharacter),
}

impl Error {
    /// Span of the offending source text.
    #[must_use]
    pub fn span(&self) -> &Span {
        match self {
            Self::UnterminatedLiteral(error) => error.span(),
            Self::MalformedNumber(error) => error.span(),
            Self::UnexpectedCharacter(error) => error.span(),
        }
    }

    /// The offending source text.
    #[must_use]
    pub fn lexeme(&self) -> &str {
        self.span().str()
    }
}

impl From<Illegal> for Error {
    fn from(illegal: Illegal) -> Self {
        let Illegal { span, kind } = illegal;
        match kind {
            IllegalKind::UnterminatedLiteral(literal) => {
                UnterminatedLiteral { span, literal }.into()
            }
            IllegalKind::MalformedNumber => MalformedNumber { span }.into(),
            IllegalKind::UnexpectedCharacter(character) => {
                UnexpectedCharacter { span, character }.into()
            }
        }
    }
}

/// Source code contains a string, character, raw string or comment that is never closed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Getters, CopyGetters, thiserror::Error)]
pub struct UnterminatedLiteral {
    /// Span from the opening quote to where scanning stopped.
    #[get = "pub"]
    span: Span,

    /// Kind of the unclosed literal.
    #[get_copy = "pub"]
    literal: LiteralKind,
}

impl Display for UnterminatedLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let help = match self.literal {
            LiteralKind::String => "interpreted strings must be closed on the line they start",
            LiteralKind::Char => "a character literal holds exactly one, possibly escaped, character",
            LiteralKind::RawString | LiteralKind::Comment => "reached the end of the file",
        };

        write!(
            f,
            "{}\n{}",
            Message::new(
                Severity::Error,
                format!("found an unclosed `{}`", self.literal.opening())
            ),
            SourceCodeDisplay::new(&self.span, Some(help))
        )
    }
}

/// Numeric literal whose prefix or exponent is not followed by digits, e.g. `0b` or `1e`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Getters, thiserror::Error)]
pub struct MalformedNumber {
    /// Span of the malformed literal.
    #[get = "pub"]
    span: Span,
}

impl Display for MalformedNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(
                Severity::Error,
                format!("malformed numeric literal `{}`", self.span.str())
            ),
            SourceCodeDisplay::new(&self.span, Some("expected at least one digit"))
        )
    }
}

/// Character that does not start any token.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Getters, CopyGetters, thiserror::Error)]
pub struct UnexpectedCharacter {
    /// Span of the character.
    #[get = "pub"]
    span: Span,

    /// The character itself.
    #[get_copy = "pub"]
    character: char,
}

impl Display for UnexpectedCharacter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(
                Severity::Error,
                format!("unexpected character {:?}", self.character)
            ),
            SourceCodeDisplay::new(&self.span, Option::<i32>::None)
        )
    }
}
