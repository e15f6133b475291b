//! Provides the [`Parser`], a cursor over a [`TokenStream`] that asserts the kinds of the tokens
//! it consumes.

use crate::lexical::{
    token::{
        Identifier, Keyword, KeywordKind, Punctuation, PunctuationKind, StringLiteral, Token,
        TokenKind,
    },
    token_stream::TokenStream,
};

use super::error::{ParseResult, SyntaxKind, UnexpectedSyntax};

/// Pulls tokens from a [`TokenStream`] by index.
#[derive(Debug, Clone, Copy)]
pub struct Parser<'a> {
    tokens: &'a TokenStream,
    index: usize,
}

impl<'a> Parser<'a> {
    /// Creates a new parser positioned at the first token.
    #[must_use]
    pub fn new(tokens: &'a TokenStream) -> Self {
        Self { tokens, index: 0 }
    }

    /// Index of the next token to be consumed.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the next token without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<&'a Token> {
        let tokens: &'a TokenStream = self.tokens;
        tokens.get(self.index)
    }

    /// Returns the kind of the next token without consuming it.
    #[must_use]
    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(Token::kind)
    }

    /// Consumes and returns the next token.
    pub fn next_token(&mut self) -> Option<&'a Token> {
        let token = self.peek()?;
        self.index += 1;
        Some(token)
    }

    /// Whether only the end-of-file token is left.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        matches!(self.peek_kind(), None | Some(TokenKind::EndOfFile))
    }

    /// Whether the next token is the given punctuation.
    #[must_use]
    pub fn at_punctuation(&self, punctuation: PunctuationKind) -> bool {
        self.peek_kind() == Some(TokenKind::Punctuation(punctuation))
    }

    /// Whether the next token is the given keyword.
    #[must_use]
    pub fn at_keyword(&self, keyword: KeywordKind) -> bool {
        self.peek_kind() == Some(TokenKind::Keyword(keyword))
    }

    fn unexpected(&self, expected: SyntaxKind) -> UnexpectedSyntax {
        UnexpectedSyntax {
            expected,
            found: self.peek().cloned(),
        }
    }

    /// Consumes the next token if its kind is `expected`.
    ///
    /// # Errors
    /// - [`UnexpectedSyntax`] if the next token is of another kind, the token is not consumed.
    pub fn eat(&mut self, expected: TokenKind) -> ParseResult<&'a Token> {
        match self.peek() {
            Some(token) if token.kind() == expected => {
                self.index += 1;
                Ok(token)
            }
            _ => {
                let expected = match expected {
                    TokenKind::Keyword(keyword) => SyntaxKind::Keyword(keyword),
                    TokenKind::Punctuation(punctuation) => SyntaxKind::Punctuation(punctuation),
                    TokenKind::String => SyntaxKind::StringLiteral,
                    TokenKind::EndOfFile => SyntaxKind::EndOfFile,
                    _ => SyntaxKind::Identifier,
                };
                Err(self.unexpected(expected).into())
            }
        }
    }

    /// Parses the given keyword.
    ///
    /// # Errors
    /// - [`UnexpectedSyntax`] if the next token is not the keyword.
    pub fn parse_keyword(&mut self, keyword: KeywordKind) -> ParseResult<Keyword> {
        match self.peek() {
            Some(Token::Keyword(found)) if found.keyword == keyword => {
                self.index += 1;
                Ok(found.clone())
            }
            _ => Err(self.unexpected(SyntaxKind::Keyword(keyword)).into()),
        }
    }

    /// Parses an identifier.
    ///
    /// # Errors
    /// - [`UnexpectedSyntax`] if the next token is not an identifier.
    pub fn parse_identifier(&mut self) -> ParseResult<Identifier> {
        match self.peek() {
            Some(Token::Identifier(identifier)) => {
                self.index += 1;
                Ok(identifier.clone())
            }
            _ => Err(self.unexpected(SyntaxKind::Identifier).into()),
        }
    }

    /// Parses the given punctuation.
    ///
    /// # Errors
    /// - [`UnexpectedSyntax`] if the next token is not the punctuation.
    pub fn parse_punctuation(&mut self, punctuation: PunctuationKind) -> ParseResult<Punctuation> {
        match self.peek() {
            Some(Token::Punctuation(found)) if found.punctuation == punctuation => {
                self.index += 1;
                Ok(found.clone())
            }
            _ => Err(self.unexpected(SyntaxKind::Punctuation(punctuation)).into()),
        }
    }

    /// Parses a string literal.
    ///
    /// # Errors
    /// - [`UnexpectedSyntax`] if the next token is not a string literal.
    pub fn parse_string_literal(&mut self) -> ParseResult<StringLiteral> {
        match self.peek() {
            Some(Token::StringLiteral(literal)) => {
                self.index += 1;
                Ok(literal.clone())
            }
            _ => Err(self.unexpected(SyntaxKind::StringLiteral).into()),
        }
    }

    /// Parses the `;` ending a declaration, which may be left out right before the end of file.
    ///
    /// # Errors
    /// - [`UnexpectedSyntax`] if neither `;` nor the end of file follows.
    pub fn parse_terminator(&mut self) -> ParseResult<Option<Punctuation>> {
        if self.is_exhausted() {
            return Ok(None);
        }

        match self.peek() {
            Some(Token::Punctuation(found)) if found.punctuation == PunctuationKind::Semicolon => {
                self.index += 1;
                Ok(Some(found.clone()))
            }
            _ => Err(self
                .unexpected(SyntaxKind::Either(&[
                    SyntaxKind::Punctuation(PunctuationKind::Semicolon),
                    SyntaxKind::EndOfFile,
                ]))
                .into()),
        }
    }
}
