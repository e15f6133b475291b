//! The program node of the syntax tree.

use getset::Getters;

use crate::{
    base::{
        self,
        source_file::{SourceElement, Span},
        Handler,
    },
    lexical::token::{
        Identifier, Keyword, KeywordKind, Punctuation, PunctuationKind, StringLiteral, Token,
    },
    syntax::{
        error::{InvalidArgument, ParseResult, SyntaxKind, UnexpectedSyntax},
        parser::Parser,
    },
};

/// Program is the package clause of a source file followed by its import declarations.
///
/// Everything after the last import declaration is left unparsed, see [`Parser::index`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct ProgramFile {
    /// The package clause.
    #[get = "pub"]
    package: PackageClause,
    /// The import declarations, in source order.
    #[get = "pub"]
    imports: Vec<ImportDeclaration>,
}

impl ProgramFile {
    /// Iterates over every import spec of every declaration.
    pub fn import_specs(&self) -> impl Iterator<Item = &ImportSpec> {
        self.imports
            .iter()
            .flat_map(|declaration| declaration.specs.as_slice())
    }
}

/// Declares the package a source file belongs to.
///
/// Syntax Synopsis:
///
/// ```ebnf
/// PackageClause:
///    'package' Identifier ';' ;
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct PackageClause {
    /// The `package` keyword.
    #[get = "pub"]
    package_keyword: Keyword,
    /// The name of the package.
    #[get = "pub"]
    name: Identifier,
    /// The semicolon, absent when the clause ends the file.
    #[get = "pub"]
    semicolon: Option<Punctuation>,
}

impl SourceElement for PackageClause {
    fn span(&self) -> Span {
        self.package_keyword
            .span()
            .join(&self.name.span())
            .expect("Invalid span")
    }
}

impl PackageClause {
    /// Dissolves the package clause into its components.
    #[must_use]
    pub fn dissolve(self) -> (Keyword, Identifier, Option<Punctuation>) {
        (self.package_keyword, self.name, self.semicolon)
    }
}

/// Imports one or more packages.
///
/// Syntax Synopsis:
///
/// ```ebnf
/// ImportDeclaration:
///    'import' (ImportSpec | '(' (ImportSpec ';')* ')') ';' ;
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct ImportDeclaration {
    /// The `import` keyword.
    #[get = "pub"]
    import_keyword: Keyword,
    /// The parentheses around a grouped declaration.
    #[get = "pub"]
    delimiters: Option<(Punctuation, Punctuation)>,
    /// The imported packages.
    #[get = "pub"]
    specs: Vec<ImportSpec>,
    /// The semicolon, absent when the declaration ends the file.
    #[get = "pub"]
    semicolon: Option<Punctuation>,
}

impl ImportDeclaration {
    /// Whether the specs are enclosed in parentheses.
    #[must_use]
    pub fn is_grouped(&self) -> bool {
        self.delimiters.is_some()
    }
}

impl SourceElement for ImportDeclaration {
    fn span(&self) -> Span {
        let end = match (&self.delimiters, self.specs.last()) {
            (Some((_, close)), _) => close.span(),
            (None, Some(spec)) => spec.span(),
            (None, None) => self.import_keyword.span(),
        };

        self.import_keyword.span().join(&end).expect("Invalid span")
    }
}

/// Name an imported package is bound to.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum ImportName {
    /// `.` imports the exported names into the file scope.
    Dot(Punctuation),
    Identifier(Identifier),
}

impl SourceElement for ImportName {
    fn span(&self) -> Span {
        match self {
            Self::Dot(punctuation) => punctuation.span(),
            Self::Identifier(identifier) => identifier.span(),
        }
    }
}

/// A single imported package.
///
/// Syntax Synopsis:
///
/// ```ebnf
/// ImportSpec:
///    ('.' | Identifier)? StringLiteral ;
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct ImportSpec {
    /// The optional package name.
    #[get = "pub"]
    name: Option<ImportName>,
    /// The import path.
    #[get = "pub"]
    path: StringLiteral,
}

impl SourceElement for ImportSpec {
    fn span(&self) -> Span {
        self.name.as_ref().map_or_else(
            || self.path.span(),
            |name| name.span().join(&self.path.span()).expect("Invalid span"),
        )
    }
}

impl<'a> Parser<'a> {
    /// Parses a [`ProgramFile`].
    ///
    /// The error is reported to the handler and returned.
    ///
    /// # Errors
    /// - [`UnexpectedSyntax`] if the package clause or an import declaration is malformed.
    /// - [`InvalidArgument`] if the package name is the blank identifier.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn parse_program(
        &mut self,
        handler: &impl Handler<base::Error>,
    ) -> ParseResult<ProgramFile> {
        tracing::debug!("Parsing program");

        let result = self.parse_program_inner();

        if let Err(error) = &result {
            tracing::error!("failed to parse the program at token {}", self.index());
            handler.receive(base::Error::from(error.clone()));
        }

        result
    }

    fn parse_program_inner(&mut self) -> ParseResult<ProgramFile> {
        let package = self.parse_package_clause()?;

        tracing::debug!(
            "Found package '{}', parsing imports",
            package.name.span.str()
        );

        let mut imports = Vec::new();
        while self.at_keyword(KeywordKind::Import) {
            imports.push(self.parse_import_declaration()?);
        }

        Ok(ProgramFile { package, imports })
    }

    /// Parses a [`PackageClause`].
    ///
    /// # Errors
    /// - [`UnexpectedSyntax`] if the clause is malformed.
    /// - [`InvalidArgument`] if the package name is the blank identifier.
    pub fn parse_package_clause(&mut self) -> ParseResult<PackageClause> {
        let package_keyword = self.parse_keyword(KeywordKind::Package)?;
        let name = self.parse_identifier()?;

        if name.is_blank() {
            return Err(InvalidArgument {
                message: "the package name must not be the blank identifier".to_string(),
                span: name.span,
            }
            .into());
        }

        let semicolon = self.parse_terminator()?;

        Ok(PackageClause {
            package_keyword,
            name,
            semicolon,
        })
    }

    /// Parses an [`ImportDeclaration`].
    ///
    /// # Errors
    /// - [`UnexpectedSyntax`] if the declaration is malformed.
    pub fn parse_import_declaration(&mut self) -> ParseResult<ImportDeclaration> {
        let import_keyword = self.parse_keyword(KeywordKind::Import)?;

        let (delimiters, specs) = if self.at_punctuation(PunctuationKind::LeftParen) {
            let open = self.parse_punctuation(PunctuationKind::LeftParen)?;
            let mut specs = Vec::new();

            let close = loop {
                if self.at_punctuation(PunctuationKind::RightParen) {
                    break self.parse_punctuation(PunctuationKind::RightParen)?;
                }

                specs.push(self.parse_import_spec()?);

                // the semicolon may be left out before the closing parenthesis
                if !self.at_punctuation(PunctuationKind::RightParen) {
                    self.parse_punctuation(PunctuationKind::Semicolon)?;
                }
            };

            (Some((open, close)), specs)
        } else {
            (None, vec![self.parse_import_spec()?])
        };

        let semicolon = self.parse_terminator()?;

        Ok(ImportDeclaration {
            import_keyword,
            delimiters,
            specs,
            semicolon,
        })
    }

    /// Parses an [`ImportSpec`].
    ///
    /// # Errors
    /// - [`UnexpectedSyntax`] if no import path follows.
    pub fn parse_import_spec(&mut self) -> ParseResult<ImportSpec> {
        let name = match self.peek() {
            Some(Token::Punctuation(punctuation))
                if punctuation.punctuation == PunctuationKind::Period =>
            {
                self.next_token();
                Some(ImportName::Dot(punctuation.clone()))
            }
            Some(Token::Identifier(identifier)) => {
                self.next_token();
                Some(ImportName::Identifier(identifier.clone()))
            }
            Some(Token::StringLiteral(_)) => None,
            found => {
                return Err(UnexpectedSyntax {
                    expected: SyntaxKind::ImportSpec,
                    found: found.cloned(),
                }
                .into())
            }
        };

        let path = self.parse_string_literal()?;

        Ok(ImportSpec { name, path })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        base::{source_file::SourceFile, SilentHandler, VoidHandler},
        lexical::token_stream::TokenStream,
        syntax::error::Error,
    };

    use super::*;

    fn stream(source: &str) -> TokenStream {
        let source_file = SourceFile::from_source("program.ho", source);
        TokenStream::tokenize(&source_file, &VoidHandler).unwrap()
    }

    fn parse(source: &str) -> ParseResult<ProgramFile> {
        let tokens = stream(source);
        Parser::new(&tokens).parse_program(&VoidHandler)
    }

    fn paths(program: &ProgramFile) -> Vec<&str> {
        program
            .import_specs()
            .map(|spec| spec.path().str_content())
            .collect()
    }

    #[test]
    fn test_package_clause() {
        let program = parse("package main\n").unwrap();

        assert_eq!(program.package().name().span.str(), "main");
        assert!(program.package().semicolon().as_ref().unwrap().is_inserted());
        assert!(program.imports().is_empty());
        assert_eq!(program.package().span().str(), "package main");
    }

    #[test]
    fn test_package_clause_at_end_of_file() {
        let program = parse("package main").unwrap();

        assert!(program.package().semicolon().is_none());
    }

    #[test]
    fn test_blank_package_name() {
        let error = parse("package _\n").unwrap_err();

        let Error::InvalidArgument(invalid) = error else {
            panic!("expected an invalid argument error");
        };
        assert_eq!(invalid.span.str(), "_");
        assert_eq!(invalid.span.position().to_string(), "program.ho:1:9");
    }

    #[test]
    fn test_missing_package() {
        let error = parse("import \"fmt\"\n").unwrap_err();

        assert!(matches!(
            error,
            Error::UnexpectedSyntax(UnexpectedSyntax {
                expected: SyntaxKind::Keyword(KeywordKind::Package),
                found: Some(Token::Keyword(_)),
            })
        ));
    }

    #[test]
    fn test_misspelled_package() {
        let error = parse("pakage main\n").unwrap_err();

        let Error::UnexpectedSyntax(unexpected) = &error else {
            panic!("expected an unexpected syntax error");
        };
        assert_eq!(unexpected.suggestion(), Some(KeywordKind::Package));
        assert!(error.to_string().contains("did you mean `package`?"));
    }

    #[test]
    fn test_single_imports() {
        let program = parse(
            "package main\n\nimport \"fmt\"\nimport str `strings`\nimport . \"math\"\n",
        )
        .unwrap();

        assert_eq!(program.imports().len(), 3);
        assert_eq!(paths(&program), ["fmt", "strings", "math"]);

        let names = program
            .import_specs()
            .map(|spec| spec.name().as_ref().map(|name| name.span().str().to_string()))
            .collect::<Vec<_>>();
        assert_eq!(names, [None, Some("str".to_string()), Some(".".to_string())]);
        assert!(program.imports().iter().all(|import| !import.is_grouped()));
    }

    #[test]
    fn test_grouped_imports() {
        let program = parse(
            "package main\n\nimport (\n\t\"fmt\"\n\tos \"os\"\n)\n\nimport ()\nimport (\"a\"; \"b\")\n",
        )
        .unwrap();

        assert_eq!(program.imports().len(), 3);
        assert!(program.imports().iter().all(ImportDeclaration::is_grouped));
        assert_eq!(paths(&program), ["fmt", "os", "a", "b"]);
        assert!(program.imports()[1].specs().is_empty());
        assert!(program.imports()[0].span().str().starts_with("import ("));
        assert!(program.imports()[0].span().str().ends_with(')'));
    }

    #[test]
    fn test_parsing_stops_after_imports() {
        let tokens = stream("package main\nimport \"fmt\"\nfunc main() {}\n");
        let mut parser = Parser::new(&tokens);

        let program = parser.parse_program(&VoidHandler).unwrap();
        assert_eq!(program.imports().len(), 1);
        assert_eq!(parser.peek().unwrap().lexeme(), "func");
        assert_eq!(tokens[parser.index()].lexeme(), "func");
    }

    #[test]
    fn test_import_without_path() {
        let error = parse("package main\nimport fmt\n").unwrap_err();

        assert!(matches!(
            error,
            Error::UnexpectedSyntax(UnexpectedSyntax {
                expected: SyntaxKind::StringLiteral,
                ..
            })
        ));
        assert!(error.to_string().contains("but found a line break"));

        let error = parse("package main\nimport 42\n").unwrap_err();
        assert!(matches!(
            error,
            Error::UnexpectedSyntax(UnexpectedSyntax {
                expected: SyntaxKind::ImportSpec,
                ..
            })
        ));
    }

    #[test]
    fn test_unclosed_group() {
        let error = parse("package main\nimport (\n\t\"fmt\"\n").unwrap_err();

        assert!(matches!(
            error,
            Error::UnexpectedSyntax(UnexpectedSyntax {
                expected: SyntaxKind::ImportSpec,
                found: Some(Token::EndOfFile(_)),
            })
        ));
    }

    #[test]
    fn test_errors_reach_handler() {
        let tokens = stream("package _\n");
        let handler = SilentHandler::new();

        assert!(Parser::new(&tokens).parse_program(&handler).is_err());
        assert_eq!(handler.count(), 1);
        assert!(Handler::<base::Error>::has_received(&handler));
    }
}
