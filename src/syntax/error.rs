//! Contains the error types that can occur while parsing the syntax of the language.

use std::fmt::Display;

use itertools::Itertools;

use crate::{
    base::{
        log::{Message, Severity, SourceCodeDisplay},
        source_file::Span,
    },
    lexical::token::{KeywordKind, PunctuationKind, Token},
};

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, Error>;

/// An enumeration containing all kinds of syntactic errors that can occur while parsing the
/// source code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, thiserror::Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error(transparent)]
    UnexpectedSyntax(#[from] UnexpectedSyntax),
    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),
}

/// Enumeration containing all kinds of syntax that can be failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum SyntaxKind {
    Either(&'static [SyntaxKind]),
    Punctuation(PunctuationKind),
    Keyword(KeywordKind),
    Identifier,
    StringLiteral,
    ImportSpec,
    EndOfFile,
}

impl SyntaxKind {
    fn expected_binding_str(&self) -> String {
        match self {
            Self::Either(variants) => match variants {
                [] => "end of file".to_string(),
                [single] => single.expected_binding_str(),
                [init @ .., last] => format!(
                    "{}, or {}",
                    init.iter().map(Self::expected_binding_str).join(", "),
                    last.expected_binding_str()
                ),
            },
            Self::Identifier => "an identifier token".to_string(),
            Self::Punctuation(punctuation) => format!("a punctuation token `{punctuation}`"),
            Self::Keyword(keyword) => format!("a keyword token `{keyword}`"),
            Self::StringLiteral => "a string literal".to_string(),
            Self::ImportSpec => "an import path".to_string(),
            Self::EndOfFile => "end of file".to_string(),
        }
    }

    /// Keywords this syntax kind accepts.
    fn keywords(&self) -> Vec<KeywordKind> {
        match self {
            Self::Either(variants) => variants.iter().flat_map(Self::keywords).collect(),
            Self::Keyword(keyword) => vec![*keyword],
            _ => Vec::new(),
        }
    }
}

/// A syntax/token is expected but found an other invalid token.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnexpectedSyntax {
    /// The kind of syntax that was expected.
    pub expected: SyntaxKind,

    /// The invalid token that was found.
    pub found: Option<Token>,
}

impl UnexpectedSyntax {
    /// Returns an expected keyword the found identifier is probably a misspelling of.
    #[must_use]
    pub fn suggestion(&self) -> Option<KeywordKind> {
        let Some(Token::Identifier(identifier)) = &self.found else {
            return None;
        };
        let word = identifier.span.str();

        self.expected
            .keywords()
            .into_iter()
            .map(|keyword| (strsim::levenshtein(word, keyword.as_str()), keyword))
            .filter(|(distance, _)| *distance <= 2)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, keyword)| keyword)
    }
}

impl Display for UnexpectedSyntax {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let expected_binding = self.expected.expected_binding_str();
        let found_binding = match &self.found {
            Some(Token::Comment(..)) => "a comment token".to_string(),
            Some(Token::Identifier(..)) => "an identifier token".to_string(),
            Some(Token::Keyword(keyword)) => {
                format!("a keyword token `{}`", keyword.keyword)
            }
            Some(Token::Punctuation(punctuation)) if punctuation.is_inserted() => {
                "a line break".to_string()
            }
            Some(Token::Punctuation(punctuation)) => {
                format!("a punctuation token `{}`", punctuation.punctuation)
            }
            Some(Token::Numeric(..)) => "a numeric token".to_string(),
            Some(Token::CharLiteral(..)) => "a character literal token".to_string(),
            Some(Token::StringLiteral(..)) => "a string literal token".to_string(),
            Some(Token::Illegal(..)) => "an illegal token".to_string(),
            Some(Token::EndOfFile(..)) | None => "EOF".to_string(),
        };

        let message = format!("expected {expected_binding}, but found {found_binding}");

        write!(f, "{}", Message::new(Severity::Error, message))?;

        self.found.as_ref().map_or(Ok(()), |token| {
            let help = self
                .suggestion()
                .map(|keyword| format!("did you mean `{keyword}`?"));
            write!(f, "\n{}", SourceCodeDisplay::new(token.span(), help))
        })
    }
}

impl std::error::Error for UnexpectedSyntax {}

/// An error that occurred due to an invalid argument.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InvalidArgument {
    /// The error message.
    pub message: String,
    /// The span of the invalid argument.
    pub span: Span,
}

impl Display for InvalidArgument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Message::new(Severity::Error, &self.message))?;
        write!(
            f,
            "\n{}",
            SourceCodeDisplay::new(&self.span, Option::<u8>::None)
        )
    }
}

impl std::error::Error for InvalidArgument {}
