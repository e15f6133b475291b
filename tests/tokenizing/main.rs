use std::path::Path;

use holang::{
    base::{MemoryProvider, SilentHandler, VoidHandler},
    lexical::{
        token::{CommentKind, KeywordKind, PunctuationKind, Token, TokenKind},
        Error,
    },
};

fn provider(name: &str, source: &str) -> MemoryProvider {
    let mut provider = MemoryProvider::new();
    provider.add_file(name, source);
    provider
}

fn is_inserted(token: &Token) -> bool {
    matches!(token, Token::Punctuation(punctuation) if punctuation.is_inserted())
}

#[test]
fn tokenizing_hello() {
    let provider = provider("hello.ho", include_str!("./hello.ho"));

    let tokens = holang::tokenize(&VoidHandler, &provider, Path::new("hello.ho"))
        .expect("Failed to tokenize");

    let lexemes = tokens
        .iter()
        .filter(|token| !is_inserted(token) && token.kind() != TokenKind::EndOfFile)
        .map(Token::lexeme)
        .collect::<Vec<_>>();
    assert_eq!(
        lexemes,
        [
            "package", "main", "import", "\"fmt\"", "func", "main", "(", ")", "{", "x", ":=",
            "0x1F", "+", "1.5e3i", "if", "x", "!=", "0", "{", "fmt", ".", "Println", "(", "'a'",
            ",", "`raw`", ")", "}", "x", "++", "}",
        ]
    );

    assert_eq!(tokens.iter().filter(|token| is_inserted(token)).count(), 7);
    assert_eq!(tokens.last().map(Token::kind), Some(TokenKind::EndOfFile));
    assert!(tokens.comments().is_empty());

    let kinds = tokens.kinds();
    assert_eq!(kinds[0], TokenKind::Keyword(KeywordKind::Package));
    assert!(kinds.contains(&TokenKind::Imaginary));
    assert!(kinds.contains(&TokenKind::Char));
    assert!(kinds.contains(&TokenKind::Punctuation(PunctuationKind::Increment)));

    let define = tokens
        .iter()
        .find(|token| token.lexeme() == ":=")
        .expect("define operator");
    assert_eq!(define.span().position().to_string(), "hello.ho:6:4");
}

#[test]
fn tokenizing_comments() {
    let provider = provider("comments.ho", include_str!("./comments.ho"));

    let tokens = holang::tokenize(&VoidHandler, &provider, Path::new("comments.ho"))
        .expect("Failed to tokenize");

    let comments = tokens
        .comments()
        .iter()
        .map(|comment| (comment.kind, comment.span.str()))
        .collect::<Vec<_>>();
    assert_eq!(
        comments,
        [
            (CommentKind::Line, "// Package doc comment."),
            (CommentKind::Delimited, "/* first\nsecond */"),
            (CommentKind::Line, "// trailing"),
        ]
    );

    // the multi-line comment ends the `var total` statement
    let semicolon = tokens
        .iter()
        .skip_while(|token| token.lexeme() != "1")
        .nth(1)
        .expect("token after the literal");
    assert!(is_inserted(semicolon));
    assert_eq!(semicolon.span().position().to_string(), "comments.ho:4:23");

    assert_eq!(tokens.iter().filter(|token| is_inserted(token)).count(), 3);
    assert!(tokens
        .iter()
        .all(|token| token.kind() != TokenKind::Comment));
}

#[test]
fn tokenizing_unterminated() {
    let provider = provider("unterminated.ho", include_str!("./unterminated.ho"));
    let handler = SilentHandler::new();

    let error = holang::tokenize(&handler, &provider, Path::new("unterminated.ho"))
        .expect_err("Expecting tokenizing failure");

    assert_eq!(handler.count(), 1);

    let holang::base::Error::LexicalError(Error::UnterminatedLiteral(unterminated)) = &error else {
        panic!("Expected an unterminated literal, found {error:?}");
    };
    assert_eq!(unterminated.span().str(), "\"hello");
    assert_eq!(
        unterminated.span().position().to_string(),
        "unterminated.ho:3:18"
    );
}

#[test]
fn tokenizing_reader() {
    let source = "x := `a\nb`\ny--\n";

    let tokens = holang::tokenize_reader(&VoidHandler, source.as_bytes(), "<stdin>")
        .expect("Failed to tokenize");

    assert_eq!(
        tokens.kinds(),
        [
            TokenKind::Identifier,
            TokenKind::Punctuation(PunctuationKind::Define),
            TokenKind::String,
            TokenKind::Punctuation(PunctuationKind::Semicolon),
            TokenKind::Identifier,
            TokenKind::Punctuation(PunctuationKind::Decrement),
            TokenKind::Punctuation(PunctuationKind::Semicolon),
            TokenKind::EndOfFile,
        ]
    );
    assert_eq!(tokens[3].span().position().to_string(), "<stdin>:2:3");
}

#[test]
fn tokenizing_missing_file() {
    let provider = MemoryProvider::new();

    let error = holang::tokenize(&VoidHandler, &provider, Path::new("missing.ho"))
        .expect_err("Expecting a missing file");

    assert!(matches!(error, holang::base::Error::IoError(_)));
}
