//! Contains the [`TokenStream`] struct and its related types.

use std::{fmt::Debug, sync::Arc};

use derive_more::Deref;

use crate::{
    base::{
        self,
        source_file::{SourceFile, Span},
        Handler,
    },
    lexical::Error,
};

use super::token::{
    Comment, CommentKind, EndOfFile, Punctuation, PunctuationKind, Token, TokenKind,
    TokenizeError,
};

/// Is the ordered list of tokens handed to the parser.
///
/// Comments are not part of the list, they are kept aside in [`Self::comments`]. The last token
/// is always [`Token::EndOfFile`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deref)]
pub struct TokenStream {
    #[deref]
    tokens: Vec<Token>,
    comments: Vec<Comment>,
}

impl Debug for TokenStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.tokens.iter()).finish()
    }
}

impl TokenStream {
    /// Tokenizes the given source code.
    ///
    /// This function tokenizes the given source file by calling [`Token::tokenize()`]
    /// repeatedly until the source is exhausted. Line breaks following a token that can end a
    /// statement are turned into [`PunctuationKind::Semicolon`] tokens with an empty span.
    ///
    /// Tokenizing stops at the first illegal token; the error is passed to the handler and
    /// returned.
    ///
    /// # Errors
    /// - [`Error::UnterminatedLiteral`] - A string, character or comment is never closed.
    /// - [`Error::MalformedNumber`] - A numeric prefix or exponent lacks its digits.
    /// - [`Error::UnexpectedCharacter`] - A character starts no token.
    #[tracing::instrument(level = "debug", skip_all, fields(source_file = %source_file.identifier()))]
    pub fn tokenize(
        source_file: &Arc<SourceFile>,
        handler: &impl Handler<base::Error>,
    ) -> Result<Self, Error> {
        let mut tokens = Vec::new();
        let mut comments = Vec::new();
        let mut source_file_iterator = source_file.iter();

        // whether the next line break ends the current statement
        let mut insert_semicolon = false;

        loop {
            match source_file_iterator.peek() {
                Some((index, '\n')) => {
                    source_file_iterator.next();

                    if insert_semicolon {
                        tracing::trace!(index, "Inserting semicolon at line break");
                        tokens.push(Self::inserted_semicolon(source_file, index));
                        insert_semicolon = false;
                    }
                    continue;
                }
                Some((_, character)) if Token::is_whitespace(character) => {
                    source_file_iterator.next();
                    continue;
                }
                _ => {}
            }

            match Token::tokenize(&mut source_file_iterator) {
                Ok(Token::Comment(comment)) => {
                    // a multi-line comment acts like the line break it contains
                    if insert_semicolon && comment.kind == CommentKind::Delimited {
                        if let Some(offset) = comment.span.str().find('\n') {
                            let index = comment.span.start() + offset;
                            tracing::trace!(index, "Inserting semicolon at comment line break");
                            tokens.push(Self::inserted_semicolon(source_file, index));
                            insert_semicolon = false;
                        }
                    }
                    comments.push(comment);
                }
                Ok(Token::Illegal(illegal)) => {
                    let error = Error::from(illegal);
                    tracing::error!(
                        lexeme = error.lexeme(),
                        "Fatal lexical error encountered while tokenizing source code"
                    );
                    handler.receive(base::Error::from(error.clone()));
                    return Err(error);
                }
                Ok(token) => {
                    insert_semicolon = token.arms_semicolon_insertion();
                    tokens.push(token);
                }
                Err(TokenizeError::EndOfSourceCodeIteratorArgument) => break,
            }
        }

        tokens.push(
            EndOfFile {
                span: Self::empty_span(source_file, source_file.content().len()),
            }
            .into(),
        );

        tracing::debug!(
            tokens = tokens.len(),
            comments = comments.len(),
            "Finished tokenizing"
        );

        Ok(Self { tokens, comments })
    }

    fn empty_span(source_file: &Arc<SourceFile>, index: usize) -> Span {
        Span::empty(source_file.clone(), index).expect("index is a character boundary")
    }

    fn inserted_semicolon(source_file: &Arc<SourceFile>, index: usize) -> Token {
        Punctuation {
            span: Self::empty_span(source_file, index),
            punctuation: PunctuationKind::Semicolon,
        }
        .into()
    }

    /// Get the tokens handed to the parser, ending with [`Token::EndOfFile`].
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Get the comments found in the source code, in source order.
    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Get the [`TokenKind`]s of the tokens.
    #[must_use]
    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(Token::kind).collect()
    }

    /// Dissolves this struct into a tuple of its components.
    #[must_use]
    pub fn dissolve(self) -> (Vec<Token>, Vec<Comment>) {
        (self.tokens, self.comments)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        base::{SilentHandler, VoidHandler},
        lexical::token::{KeywordKind, StringKind},
    };

    use super::*;

    use PunctuationKind as P;
    use TokenKind as K;

    fn tokenize(source: &str) -> Result<TokenStream, Error> {
        let source_file = SourceFile::from_source("test.ho", source);
        TokenStream::tokenize(&source_file, &VoidHandler)
    }

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).expect("source should tokenize").kinds()
    }

    #[test]
    fn test_whitespace_only() {
        for source in ["", " ", "\n", "\t \r\n\n  \n"] {
            assert_eq!(kinds(source), [K::EndOfFile]);
        }
    }

    #[test]
    fn test_end_of_file_span() {
        let stream = tokenize("x ").unwrap();
        let end = stream.last().unwrap();

        assert!(end.as_end_of_file().is_some());
        assert_eq!(end.lexeme(), "");
        assert_eq!(end.span().start(), 2);
    }

    #[test]
    fn test_semicolon_insertion() {
        assert_eq!(
            kinds("x\ny"),
            [
                K::Identifier,
                K::Punctuation(P::Semicolon),
                K::Identifier,
                K::EndOfFile
            ]
        );
        assert_eq!(
            kinds("x +\ny"),
            [
                K::Identifier,
                K::Punctuation(P::Add),
                K::Identifier,
                K::EndOfFile
            ]
        );
    }

    #[test]
    fn test_only_first_line_break_inserts() {
        assert_eq!(
            kinds("x\n\n\ny"),
            [
                K::Identifier,
                K::Punctuation(P::Semicolon),
                K::Identifier,
                K::EndOfFile
            ]
        );
    }

    #[test]
    fn test_no_semicolon_at_end_of_file() {
        assert_eq!(kinds("return"), [K::Keyword(KeywordKind::Return), K::EndOfFile]);
        assert_eq!(
            kinds("return\n"),
            [
                K::Keyword(KeywordKind::Return),
                K::Punctuation(P::Semicolon),
                K::EndOfFile
            ]
        );
    }

    #[test]
    fn test_inserted_semicolon_is_empty() {
        let stream = tokenize("x;\ny\n").unwrap();
        let semicolons = stream
            .iter()
            .filter_map(Token::as_punctuation)
            .filter(|punctuation| punctuation.punctuation == P::Semicolon)
            .collect::<Vec<_>>();

        assert_eq!(semicolons.len(), 2);
        assert!(!semicolons[0].is_inserted());
        assert_eq!(semicolons[0].span.str(), ";");
        assert!(semicolons[1].is_inserted());
        assert_eq!(semicolons[1].span.start(), 4);
    }

    #[test]
    fn test_statement_endings() {
        let source = "break\ncontinue\nfallthrough\ni++\nj--\nf()\na[0]\n}\n'c'\n\"s\"\n`r`\n1.5\n2i\n";
        let semicolons = kinds(source)
            .into_iter()
            .filter(|kind| *kind == K::Punctuation(P::Semicolon))
            .count();

        assert_eq!(semicolons, 13);
    }

    #[test]
    fn test_non_terminating_tokens() {
        for source in ["if\nx", "x =\ny", "f(\nx", "a,\nb", "{\nx", "match\nx", "x.\ny"] {
            assert!(
                !kinds(source).contains(&K::Punctuation(P::Semicolon)),
                "unexpected semicolon in {source:?}"
            );
        }
    }

    #[test]
    fn test_comments_are_excluded() {
        let stream = tokenize("x // trailing\ny").unwrap();

        assert_eq!(
            stream.kinds(),
            [
                K::Identifier,
                K::Punctuation(P::Semicolon),
                K::Identifier,
                K::EndOfFile
            ]
        );
        assert_eq!(stream.comments().len(), 1);
        assert_eq!(stream.comments()[0].span.str(), "// trailing");
    }

    #[test]
    fn test_comments_keep_semicolon_state() {
        // a comment after a non-terminating token does not arm insertion
        assert_eq!(
            kinds("x + /* c */\ny"),
            [
                K::Identifier,
                K::Punctuation(P::Add),
                K::Identifier,
                K::EndOfFile
            ]
        );
        // nor does it disarm it
        assert_eq!(
            kinds("x /* c */\ny"),
            [
                K::Identifier,
                K::Punctuation(P::Semicolon),
                K::Identifier,
                K::EndOfFile
            ]
        );
    }

    #[test]
    fn test_multi_line_comment_ends_statement() {
        let stream = tokenize("x /* a\nb */ y").unwrap();

        assert_eq!(
            stream.kinds(),
            [
                K::Identifier,
                K::Punctuation(P::Semicolon),
                K::Identifier,
                K::EndOfFile
            ]
        );
        assert_eq!(stream[1].span().start(), 6);
        assert_eq!(stream.comments().len(), 1);
    }

    #[test]
    fn test_escaped_string_spans_whole_literal() {
        let stream = tokenize(r#""a\"b""#).unwrap();

        assert_eq!(stream.kinds(), [K::String, K::EndOfFile]);
        assert_eq!(stream[0].lexeme(), r#""a\"b""#);
        assert_eq!(
            stream[0].as_string_literal().map(|literal| literal.kind),
            Some(StringKind::Interpreted)
        );
    }

    #[test]
    fn test_fail_fast() {
        let handler = SilentHandler::new();
        let source_file = SourceFile::from_source("fail.ho", "x := \"abc\ny := 0b\n");
        let error = TokenStream::tokenize(&source_file, &handler).unwrap_err();

        assert_eq!(handler.count(), 1);
        assert!(matches!(error, Error::UnterminatedLiteral(_)));
        assert_eq!(error.lexeme(), "\"abc");
        assert_eq!(error.span().position().to_string(), "fail.ho:1:6");
    }

    #[test]
    fn test_error_kinds() {
        assert!(matches!(tokenize("x = 0b"), Err(Error::MalformedNumber(_))));
        assert!(matches!(
            tokenize("a $ b"),
            Err(Error::UnexpectedCharacter(ref error)) if error.character() == '$'
        ));
        assert!(matches!(
            tokenize("/* never closed"),
            Err(Error::UnterminatedLiteral(ref error))
                if error.literal() == crate::lexical::token::LiteralKind::Comment
        ));
    }

    #[test]
    fn test_positions() {
        let stream = tokenize("package main\n\nfunc  main() {}").unwrap();
        let positions = stream
            .iter()
            .filter(|token| !token.lexeme().is_empty())
            .map(|token| token.span().position().to_string())
            .collect::<Vec<_>>();

        assert_eq!(
            positions,
            [
                "test.ho:1:1",
                "test.ho:1:9",
                "test.ho:3:1",
                "test.ho:3:7",
                "test.ho:3:11",
                "test.ho:3:12",
                "test.ho:3:14",
                "test.ho:3:15",
            ]
        );
    }

    #[test]
    fn test_carriage_return() {
        // a lone `\r` is whitespace on the same line, `\r\n` is a line break
        let stream = tokenize("x\ry").unwrap();
        assert_eq!(stream.kinds(), [K::Identifier, K::Identifier, K::EndOfFile]);
        assert_eq!(stream[1].position().to_string(), "test.ho:1:3");

        let stream = tokenize("x\r\ny // c\r\nz").unwrap();
        assert_eq!(
            stream.kinds(),
            [
                K::Identifier,
                K::Punctuation(P::Semicolon),
                K::Identifier,
                K::Punctuation(P::Semicolon),
                K::Identifier,
                K::EndOfFile,
            ]
        );
        assert_eq!(stream[4].position().to_string(), "test.ho:3:1");
        assert_eq!(stream.comments()[0].span.str(), "// c");
    }

    #[test]
    fn test_identifier_stops_at_non_decimal_numerics() {
        let error = tokenize("x\u{b2} := 1").unwrap_err();

        assert!(matches!(
            error,
            Error::UnexpectedCharacter(ref error) if error.character() == '\u{b2}'
        ));
        assert_eq!(error.span().position().to_string(), "test.ho:1:2");
        assert_eq!(kinds("x\u{663}"), [K::Identifier, K::EndOfFile]);
    }

    #[test]
    fn test_empty_char_literal() {
        let error = tokenize("c := ''").unwrap_err();

        assert!(matches!(error, Error::UnterminatedLiteral(_)));
        assert_eq!(error.lexeme(), "''");
    }

    #[test]
    fn test_runs_are_independent() {
        let first = SourceFile::from_source("a.ho", "x");
        let second = SourceFile::from_source("b.ho", "\ny");

        let first = TokenStream::tokenize(&first, &VoidHandler).unwrap();
        let second = TokenStream::tokenize(&second, &VoidHandler).unwrap();

        // the armed state after `x` does not leak into the second run
        assert_eq!(first.kinds(), [K::Identifier, K::EndOfFile]);
        assert_eq!(second.kinds(), [K::Identifier, K::EndOfFile]);
    }

    mod properties {
        use std::str::FromStr;

        use proptest::prelude::*;

        use super::*;

        proptest! {
            #[test]
            fn whitespace_only_is_end_of_file(source in "[ \t\r\n]{0,64}") {
                prop_assert_eq!(kinds(&source), vec![K::EndOfFile]);
            }

            #[test]
            fn numeric_lexemes_rescan_unchanged(
                source in "(0[bB][01_]{0,6}|0[oO][0-7_]{0,6}|0[xX][0-9a-fA-F_]{0,6}|[0-9]{1,6}(\\.[0-9]{0,4})?([eE][+-]?[0-9]{1,3})?i?|\\.[0-9]{1,4}i?)"
            ) {
                if let Ok(stream) = tokenize(&source) {
                    for token in stream.iter().filter(|token| token.as_numeric().is_some()) {
                        let rescanned = tokenize(token.lexeme()).expect("accepted lexeme rescans");
                        prop_assert_eq!(rescanned.len(), 2);
                        prop_assert_eq!(rescanned[0].kind(), token.kind());
                        prop_assert_eq!(rescanned[0].lexeme(), token.lexeme());
                    }
                }
            }

            #[test]
            fn keyword_prefixed_words_are_identifiers(suffix in "[a-z0-9_]{1,8}") {
                for keyword in ["for", "go", "if", "map", "match", "enum", "var"] {
                    let word = format!("{keyword}{suffix}");
                    prop_assume!(KeywordKind::from_str(&word).is_err());
                    prop_assert_eq!(kinds(&word), vec![K::Identifier, K::EndOfFile]);
                }
            }

            #[test]
            fn lexemes_cover_source(source in "[a-z0-9 +*<=&^.;(){}\n]{0,48}") {
                if let Ok(stream) = tokenize(&source) {
                    let covered = stream.iter().map(Token::lexeme).collect::<String>();
                    let expected = source
                        .chars()
                        .filter(|character| !matches!(character, ' ' | '\n'))
                        .collect::<String>();
                    prop_assert_eq!(covered, expected);
                }
            }
        }
    }
}
