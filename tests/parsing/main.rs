use std::path::Path;

use holang::{
    base::{source_file::SourceElement, MemoryProvider, PrintHandler, SilentHandler, VoidHandler},
    lexical::token::KeywordKind,
    syntax::{
        error::{Error, SyntaxKind},
        parser::Parser,
        syntax_tree::program::ImportName,
    },
};

fn provider(name: &str, source: &str) -> MemoryProvider {
    let mut provider = MemoryProvider::new();
    provider.add_file(name, source);
    provider
}

#[test]
fn parsing_test1() {
    let provider = provider("test1.ho", include_str!("./test1.ho"));

    let parsed = holang::parse(&PrintHandler::default(), &provider, Path::new("test1.ho"))
        .expect("Failed to parse");

    assert_eq!(parsed.package().name().span().str(), "greeter");

    let imports = parsed.imports();
    assert_eq!(imports.len(), 2);
    assert!(imports[0].is_grouped());
    assert!(!imports[1].is_grouped());

    let specs = parsed
        .import_specs()
        .map(|spec| {
            let name = spec.name().as_ref().map(|name| match name {
                ImportName::Dot(_) => ".".to_string(),
                ImportName::Identifier(identifier) => identifier.span().str().to_string(),
            });
            (name, spec.path().str_content())
        })
        .collect::<Vec<_>>();
    assert_eq!(
        specs,
        [
            (None, "fmt"),
            (Some("str".to_string()), "strings"),
            (Some(".".to_string()), "math"),
            (None, "os"),
        ]
    );

    assert_eq!(
        imports[0].span().position().to_string(),
        "test1.ho:4:1"
    );
}

#[test]
fn parsing_stops_after_imports() {
    let provider = provider("test1.ho", include_str!("./test1.ho"));
    let tokens = holang::tokenize(&VoidHandler, &provider, Path::new("test1.ho"))
        .expect("Failed to tokenize");

    let mut parser = Parser::new(&tokens);
    parser.parse_program(&VoidHandler).expect("Failed to parse");

    let rest = &tokens[parser.index()..];
    assert_eq!(rest[0].lexeme(), "func");
    assert_eq!(rest[1].lexeme(), "Greet");
    assert_eq!(tokens.comments().len(), 2);
}

#[test]
fn parsing_invalid() {
    let provider = provider("invalid.ho", include_str!("./invalid.ho"));
    let handler = SilentHandler::new();

    let error = holang::parse(&handler, &provider, Path::new("invalid.ho"))
        .expect_err("Expecting parsing failure");

    assert_eq!(handler.count(), 1);
    let holang::base::Error::ParseError(Error::InvalidArgument(invalid)) = &error else {
        panic!("Expected an invalid argument, found {error:?}");
    };
    assert_eq!(invalid.span.position().to_string(), "invalid.ho:1:9");
    assert!(error.to_string().contains("blank identifier"));
}

#[test]
fn parsing_misspelled_keyword() {
    let provider = provider("misspelled.ho", include_str!("./misspelled.ho"));

    let error = holang::parse(&VoidHandler, &provider, Path::new("misspelled.ho"))
        .expect_err("Expecting parsing failure");

    let holang::base::Error::ParseError(Error::UnexpectedSyntax(unexpected)) = &error else {
        panic!("Expected unexpected syntax, found {error:?}");
    };
    assert_eq!(
        unexpected.expected,
        SyntaxKind::Keyword(KeywordKind::Package)
    );
    assert_eq!(unexpected.suggestion(), Some(KeywordKind::Package));
    assert!(error.to_string().contains("misspelled.ho:1:1"));
}
