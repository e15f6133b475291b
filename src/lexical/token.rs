//! Contains the [`Token`] enum and its related types.

use std::{collections::HashMap, fmt::Display, str::FromStr, sync::OnceLock};

use crate::base::source_file::{Position, SourceElement, SourceIterator, Span};
use derive_more::From;
use enum_as_inner::EnumAsInner;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use unicode_properties::{GeneralCategory, GeneralCategoryGroup, UnicodeGeneralCategory};

/// Is an enumeration representing keywords in Holang.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
#[allow(missing_docs)]
pub enum KeywordKind {
    Break,
    Case,
    Chan,
    Const,
    Continue,
    Default,
    Defer,
    Else,
    Enum,
    Fallthrough,
    For,
    Func,
    Go,
    Goto,
    If,
    Import,
    Interface,
    Map,
    Match,
    Package,
    Range,
    Return,
    Select,
    Struct,
    Switch,
    Type,
    Var,
}

impl Display for KeywordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Is an error that is returned when a string cannot be parsed into a [`KeywordKind`] in
/// [`FromStr`] trait implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, thiserror::Error)]
#[error("invalid string representation of keyword.")]
pub struct KeywordParseError;

impl FromStr for KeywordKind {
    type Err = KeywordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        static STRING_KEYWORD_MAP: OnceLock<HashMap<&'static str, KeywordKind>> = OnceLock::new();
        let map = STRING_KEYWORD_MAP.get_or_init(|| {
            let mut map = HashMap::new();

            for keyword in Self::iter() {
                map.insert(keyword.as_str(), keyword);
            }

            map
        });

        map.get(s).copied().ok_or(KeywordParseError)
    }
}

impl KeywordKind {
    /// Gets the string representation of the keyword as a `&str`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Break => "break",
            Self::Case => "case",
            Self::Chan => "chan",
            Self::Const => "const",
            Self::Continue => "continue",
            Self::Default => "default",
            Self::Defer => "defer",
            Self::Else => "else",
            Self::Enum => "enum",
            Self::Fallthrough => "fallthrough",
            Self::For => "for",
            Self::Func => "func",
            Self::Go => "go",
            Self::Goto => "goto",
            Self::If => "if",
            Self::Import => "import",
            Self::Interface => "interface",
            Self::Map => "map",
            Self::Match => "match",
            Self::Package => "package",
            Self::Range => "range",
            Self::Return => "return",
            Self::Select => "select",
            Self::Struct => "struct",
            Self::Switch => "switch",
            Self::Type => "type",
            Self::Var => "var",
        }
    }

    /// Whether a line break directly after the keyword ends the statement.
    #[must_use]
    pub fn ends_statement(self) -> bool {
        matches!(
            self,
            Self::Break | Self::Continue | Self::Fallthrough | Self::Return
        )
    }
}

/// Is an enumeration of all operators and delimiters in Holang.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
#[allow(missing_docs)]
pub enum PunctuationKind {
    Add,
    Sub,
    Mul,
    Quo,
    Rem,
    Pow,

    And,
    Or,
    Xor,
    Shl,
    Shr,
    AndNot,

    AddAssign,
    SubAssign,
    MulAssign,
    QuoAssign,
    RemAssign,
    PowAssign,

    AndAssign,
    OrAssign,
    XorAssign,
    ShlAssign,
    ShrAssign,
    AndNotAssign,

    LogicalAnd,
    LogicalOr,
    Arrow,
    Increment,
    Decrement,

    Equal,
    Assign,
    Not,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Define,
    Ellipsis,

    LeftParen,
    LeftBracket,
    LeftBrace,
    Comma,
    Period,
    RightParen,
    RightBracket,
    RightBrace,
    Semicolon,
    Colon,
}

impl Display for PunctuationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PunctuationKind {
    /// Gets the source text of the operator or delimiter.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Quo => "/",
            Self::Rem => "%",
            Self::Pow => "**",
            Self::And => "&",
            Self::Or => "|",
            Self::Xor => "^",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::AndNot => "&^",
            Self::AddAssign => "+=",
            Self::SubAssign => "-=",
            Self::MulAssign => "*=",
            Self::QuoAssign => "/=",
            Self::RemAssign => "%=",
            Self::PowAssign => "**=",
            Self::AndAssign => "&=",
            Self::OrAssign => "|=",
            Self::XorAssign => "^=",
            Self::ShlAssign => "<<=",
            Self::ShrAssign => ">>=",
            Self::AndNotAssign => "&^=",
            Self::LogicalAnd => "&&",
            Self::LogicalOr => "||",
            Self::Arrow => "<-",
            Self::Increment => "++",
            Self::Decrement => "--",
            Self::Equal => "==",
            Self::Assign => "=",
            Self::Not => "!",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::Define => ":=",
            Self::Ellipsis => "...",
            Self::LeftParen => "(",
            Self::LeftBracket => "[",
            Self::LeftBrace => "{",
            Self::Comma => ",",
            Self::Period => ".",
            Self::RightParen => ")",
            Self::RightBracket => "]",
            Self::RightBrace => "}",
            Self::Semicolon => ";",
            Self::Colon => ":",
        }
    }

    /// Whether a line break directly after the punctuation ends the statement.
    #[must_use]
    pub fn ends_statement(self) -> bool {
        matches!(
            self,
            Self::Increment
                | Self::Decrement
                | Self::RightParen
                | Self::RightBracket
                | Self::RightBrace
        )
    }
}

/// The closed set of token classes, as seen by consumers of the token stream.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum TokenKind {
    Identifier,
    Int,
    Float,
    Imaginary,
    Char,
    String,
    Comment,
    Illegal,
    EndOfFile,
    Keyword(KeywordKind),
    Punctuation(PunctuationKind),
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identifier => f.write_str("identifier"),
            Self::Int => f.write_str("integer literal"),
            Self::Float => f.write_str("floating-point literal"),
            Self::Imaginary => f.write_str("imaginary literal"),
            Self::Char => f.write_str("character literal"),
            Self::String => f.write_str("string literal"),
            Self::Comment => f.write_str("comment"),
            Self::Illegal => f.write_str("illegal token"),
            Self::EndOfFile => f.write_str("end of file"),
            Self::Keyword(keyword) => write!(f, "keyword `{keyword}`"),
            Self::Punctuation(punctuation) => write!(f, "`{punctuation}`"),
        }
    }
}

/// Is an enumeration containing all kinds of tokens in the Holang programming language.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, From, EnumAsInner)]
#[allow(missing_docs)]
pub enum Token {
    Identifier(Identifier),
    Keyword(Keyword),
    Punctuation(Punctuation),
    Numeric(Numeric),
    CharLiteral(CharLiteral),
    StringLiteral(StringLiteral),
    Comment(Comment),
    Illegal(Illegal),
    EndOfFile(EndOfFile),
}

impl Token {
    /// Returns the span of the token.
    #[must_use]
    pub fn span(&self) -> &Span {
        match self {
            Self::Identifier(token) => &token.span,
            Self::Keyword(token) => &token.span,
            Self::Punctuation(token) => &token.span,
            Self::Numeric(token) => &token.span,
            Self::CharLiteral(token) => &token.span,
            Self::StringLiteral(token) => &token.span,
            Self::Comment(token) => &token.span,
            Self::Illegal(token) => &token.span,
            Self::EndOfFile(token) => &token.span,
        }
    }

    /// Returns the source text that produced the token.
    ///
    /// Empty for the end-of-file token and for inserted semicolons.
    #[must_use]
    pub fn lexeme(&self) -> &str {
        self.span().str()
    }

    /// Returns where the token starts, as `source:line:column`.
    #[must_use]
    pub fn position(&self) -> Position<'_> {
        self.span().position()
    }

    /// Returns the [`TokenKind`] of the token.
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        match self {
            Self::Identifier(_) => TokenKind::Identifier,
            Self::Keyword(token) => TokenKind::Keyword(token.keyword),
            Self::Punctuation(token) => TokenKind::Punctuation(token.punctuation),
            Self::Numeric(token) => match token.kind {
                NumericKind::Int => TokenKind::Int,
                NumericKind::Float => TokenKind::Float,
                NumericKind::Imaginary => TokenKind::Imaginary,
            },
            Self::CharLiteral(_) => TokenKind::Char,
            Self::StringLiteral(_) => TokenKind::String,
            Self::Comment(_) => TokenKind::Comment,
            Self::Illegal(_) => TokenKind::Illegal,
            Self::EndOfFile(_) => TokenKind::EndOfFile,
        }
    }

    /// Whether a line break following this token is turned into a semicolon.
    #[must_use]
    pub fn arms_semicolon_insertion(&self) -> bool {
        match self {
            Self::Identifier(_)
            | Self::Numeric(_)
            | Self::CharLiteral(_)
            | Self::StringLiteral(_) => true,
            Self::Keyword(token) => token.keyword.ends_statement(),
            Self::Punctuation(token) => token.punctuation.ends_statement(),
            Self::Comment(_) | Self::Illegal(_) | Self::EndOfFile(_) => false,
        }
    }
}

impl SourceElement for Token {
    fn span(&self) -> Span {
        self.span().clone()
    }
}

/// Represents a contiguous sequence of characters that are valid in an identifier.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier {
    /// Is the span that makes up the token.
    pub span: Span,
}

impl Identifier {
    /// Whether this is the blank identifier `_`.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.span.str() == "_"
    }
}

impl SourceElement for Identifier {
    fn span(&self) -> Span {
        self.span.clone()
    }
}

/// Represents a contiguous sequence of characters that are reserved for a keyword.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Keyword {
    /// Is the span that makes up the token.
    pub span: Span,

    /// Is the [`KeywordKind`] that the token represents.
    pub keyword: KeywordKind,
}

impl SourceElement for Keyword {
    fn span(&self) -> Span {
        self.span.clone()
    }
}

/// Represents an operator or a delimiter.
///
/// A semicolon inserted at a line break has an empty span.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Punctuation {
    /// Is the span that makes up the token.
    pub span: Span,

    /// Is the operator or delimiter that the token represents.
    pub punctuation: PunctuationKind,
}

impl Punctuation {
    /// Whether the token was inserted at a line break rather than written in the source.
    #[must_use]
    pub fn is_inserted(&self) -> bool {
        self.span.is_empty()
    }
}

impl SourceElement for Punctuation {
    fn span(&self) -> Span {
        self.span.clone()
    }
}

/// Is an enumeration of the classes of numeric literals.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NumericKind {
    /// `42`, `0b1010`, `0o17`, `017`, `0xFF`
    Int,
    /// `1.5`, `.5`, `1e9`
    Float,
    /// `2i`, `1.5i`
    Imaginary,
}

/// Represents a hardcoded numeric literal value in the source code.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Numeric {
    /// Is the span that makes up the token.
    pub span: Span,

    /// Is the class of the literal.
    pub kind: NumericKind,
}

impl Numeric {
    /// Returns the radix the digits of the literal are written in.
    #[must_use]
    pub fn radix(&self) -> u32 {
        let text = self.span.str();
        match text.as_bytes() {
            [b'0', b'b' | b'B', ..] => 2,
            [b'0', b'o' | b'O', ..] => 8,
            [b'0', b'x' | b'X', ..] => 16,
            [b'0', rest @ ..]
                if self.kind == NumericKind::Int
                    && rest.iter().any(u8::is_ascii_digit)
                    && rest.iter().all(|&b| matches!(b, b'0'..=b'7' | b'_')) =>
            {
                8
            }
            _ => 10,
        }
    }
}

impl SourceElement for Numeric {
    fn span(&self) -> Span {
        self.span.clone()
    }
}

/// Represents a character literal such as `'a'` or `'\n'`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CharLiteral {
    /// Is the span that makes up the token.
    pub span: Span,
}

impl CharLiteral {
    /// Returns the literal without the enclosing single quotes.
    #[must_use]
    pub fn str_content(&self) -> &str {
        let string = self.span.str();
        &string[1..string.len() - 1]
    }
}

impl SourceElement for CharLiteral {
    fn span(&self) -> Span {
        self.span.clone()
    }
}

/// Is an enumeration of the two kinds of string literals.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StringKind {
    /// A single-line string enclosed in `"`.
    Interpreted,

    /// A string enclosed in `` ` `` that may span multiple lines.
    Raw,
}

/// Represents a hardcoded string literal value in the source code.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StringLiteral {
    /// Is the span that makes up the token.
    pub span: Span,

    /// Is the kind of string literal.
    pub kind: StringKind,
}

impl StringLiteral {
    /// Returns the string without the leading and trailing quotes.
    #[must_use]
    pub fn str_content(&self) -> &str {
        let string = self.span.str();
        &string[1..string.len() - 1]
    }
}

impl SourceElement for StringLiteral {
    fn span(&self) -> Span {
        self.span.clone()
    }
}

/// Is an enumeration representing the two kinds of comments in the Holang programming language.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CommentKind {
    /// A comment that starts with `//` and ends at the end of the line.
    Line,

    /// A comment that starts with `/*` and ends with `*/`.
    Delimited,
}

/// Represents a portion of the source code that is ignored by the parser.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Comment {
    /// Is the span that makes up the token.
    pub span: Span,

    /// Is the kind of comment that the token represents.
    pub kind: CommentKind,
}

impl SourceElement for Comment {
    fn span(&self) -> Span {
        self.span.clone()
    }
}

/// Is an enumeration of the literals that can be left open.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum LiteralKind {
    Char,
    String,
    RawString,
    Comment,
}

impl LiteralKind {
    /// Returns the text that opens the literal.
    #[must_use]
    pub fn opening(self) -> &'static str {
        match self {
            Self::Char => "'",
            Self::String => "\"",
            Self::RawString => "`",
            Self::Comment => "/*",
        }
    }
}

/// Is an enumeration of the reasons a sequence of characters is illegal.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IllegalKind {
    /// A literal or comment that is never closed.
    UnterminatedLiteral(LiteralKind),

    /// A numeric literal with a prefix or exponent that lacks its digits.
    MalformedNumber,

    /// A character that starts no token.
    UnexpectedCharacter(char),
}

/// Represents a sequence of characters that does not form a valid token.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Illegal {
    /// Is the span of everything consumed before the token was found to be illegal.
    pub span: Span,

    /// Is the reason the token is illegal.
    pub kind: IllegalKind,
}

impl SourceElement for Illegal {
    fn span(&self) -> Span {
        self.span.clone()
    }
}

/// Marks the end of the source code. Its span is empty.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EndOfFile {
    /// Is the empty span at the end of the source code.
    pub span: Span,
}

impl SourceElement for EndOfFile {
    fn span(&self) -> Span {
        self.span.clone()
    }
}

/// Is an error that can occur when invoking the [`Token::tokenize`] method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, thiserror::Error)]
#[allow(missing_docs)]
pub enum TokenizeError {
    #[error("the iterator argument is at the end of the source code.")]
    EndOfSourceCodeIteratorArgument,
}

impl Token {
    /// Increments the iterator while the predicate returns true.
    pub fn walk_iter(iter: &mut SourceIterator, predicate: impl Fn(char) -> bool) {
        while let Some((_, character)) = iter.peek() {
            if !predicate(character) {
                break;
            }

            iter.next();
        }
    }

    /// Increments the iterator over digits of the given radix and `_` separators.
    ///
    /// Returns the number of digits walked, separators excluded.
    fn walk_digits(iter: &mut SourceIterator, radix: u32) -> usize {
        let mut digits = 0;
        while let Some((_, character)) = iter.peek() {
            if character.is_digit(radix) {
                digits += 1;
            } else if character != '_' {
                break;
            }

            iter.next();
        }
        digits
    }

    /// Creates a span from the given start location to the current location of the iterator.
    fn create_span(start: usize, iter: &mut SourceIterator) -> Span {
        let end = iter.offset();
        Span::new(iter.source_file().clone(), start, end)
            .expect("iterator offsets are character boundaries")
    }

    /// Checks if the given character is skipped between tokens.
    ///
    /// Line breaks are not included, they take part in semicolon insertion.
    #[must_use]
    pub fn is_whitespace(character: char) -> bool {
        matches!(character, ' ' | '\t' | '\r')
    }

    /// Checks if the given character is a valid first character of an identifier.
    ///
    /// Letters are the characters of the Unicode general category `L`.
    fn is_first_identifier_character(character: char) -> bool {
        character == '_' || character.general_category_group() == GeneralCategoryGroup::Letter
    }

    /// Checks if the given character is a valid character of an identifier.
    ///
    /// Digits are the characters of the Unicode general category `Nd`, so `²` or `Ⅷ` are not.
    fn is_identifier_character(character: char) -> bool {
        Self::is_first_identifier_character(character)
            || character.general_category() == GeneralCategory::DecimalNumber
    }

    fn illegal(iter: &mut SourceIterator, start: usize, kind: IllegalKind) -> Self {
        Illegal {
            span: Self::create_span(start, iter),
            kind,
        }
        .into()
    }

    fn punctuation(iter: &mut SourceIterator, start: usize, punctuation: PunctuationKind) -> Self {
        Punctuation {
            span: Self::create_span(start, iter),
            punctuation,
        }
        .into()
    }

    fn numeric(iter: &mut SourceIterator, start: usize, kind: NumericKind) -> Self {
        Numeric {
            span: Self::create_span(start, iter),
            kind,
        }
        .into()
    }

    /// Handles a contiguous sequence of characters that are valid in an identifier.
    fn handle_identifier_and_keyword(iter: &mut SourceIterator, start: usize) -> Self {
        Self::walk_iter(iter, Self::is_identifier_character);

        let span = Self::create_span(start, iter);
        let word = span.str();

        // Checks if the word is a keyword
        KeywordKind::from_str(word).ok().map_or_else(
            || Identifier { span: span.clone() }.into(),
            |kw| {
                Keyword {
                    span: span.clone(),
                    keyword: kw,
                }
                .into()
            },
        )
    }

    /// Handles a sequence starting with a slash
    fn handle_slash(iter: &mut SourceIterator, start: usize) -> Self {
        // Single line comment
        if iter.next_if_eq('/') {
            // stops before `\n` or `\r\n`, the line break is handled by the caller
            while let Some((_, character)) = iter.peek() {
                if character == '\n'
                    || (character == '\r' && matches!(iter.peek_second(), Some((_, '\n'))))
                {
                    break;
                }

                iter.next();
            }

            Comment {
                span: Self::create_span(start, iter),
                kind: CommentKind::Line,
            }
            .into()
        }
        // Delimited comment
        else if iter.next_if_eq('*') {
            while let Some((_, character)) = iter.next() {
                if character == '*' && iter.next_if_eq('/') {
                    return Comment {
                        span: Self::create_span(start, iter),
                        kind: CommentKind::Delimited,
                    }
                    .into();
                }
            }

            Self::illegal(
                iter,
                start,
                IllegalKind::UnterminatedLiteral(LiteralKind::Comment),
            )
        } else if iter.next_if_eq('=') {
            Self::punctuation(iter, start, PunctuationKind::QuoAssign)
        } else {
            Self::punctuation(iter, start, PunctuationKind::Quo)
        }
    }

    /// Handles a numeric literal starting with a decimal digit.
    fn handle_numeric_literal(iter: &mut SourceIterator, start: usize, first: char) -> Self {
        if first == '0' {
            let radix = match iter.peek() {
                Some((_, 'b' | 'B')) => Some(2),
                Some((_, 'o' | 'O')) => Some(8),
                Some((_, 'x' | 'X')) => Some(16),
                _ => None,
            };

            if let Some(radix) = radix {
                iter.next();

                return if Self::walk_digits(iter, radix) == 0 {
                    Self::illegal(iter, start, IllegalKind::MalformedNumber)
                } else {
                    Self::numeric(iter, start, NumericKind::Int)
                };
            }

            // legacy octal form, e.g. `0755`
            Self::walk_iter(iter, |character| character.is_digit(8));

            let continues_decimal = matches!(
                iter.peek(),
                Some((_, character))
                    if character.is_ascii_digit()
                        || matches!(character, '_' | '.' | 'e' | 'E' | 'i')
            );
            if !continues_decimal {
                return Self::numeric(iter, start, NumericKind::Int);
            }
        }

        Self::handle_decimal_literal(iter, start, false)
    }

    /// Handles the decimal integer, floating-point and imaginary forms.
    ///
    /// `is_float` is set when the literal started with a `.`, in which case the fraction is
    /// walked first.
    fn handle_decimal_literal(iter: &mut SourceIterator, start: usize, mut is_float: bool) -> Self {
        Self::walk_digits(iter, 10);

        if !is_float && iter.next_if_eq('.') {
            is_float = true;
            Self::walk_digits(iter, 10);
        }

        if matches!(iter.peek(), Some((_, 'e' | 'E'))) {
            iter.next();
            is_float = true;

            if !iter.next_if_eq('+') {
                iter.next_if_eq('-');
            }

            if Self::walk_digits(iter, 10) == 0 {
                return Self::illegal(iter, start, IllegalKind::MalformedNumber);
            }
        }

        let kind = if iter.next_if_eq('i') {
            NumericKind::Imaginary
        } else if is_float {
            NumericKind::Float
        } else {
            NumericKind::Int
        };

        Self::numeric(iter, start, kind)
    }

    /// Handles a sequence starting with a period: a fraction, `...` or `.`.
    fn handle_period(iter: &mut SourceIterator, start: usize) -> Self {
        match iter.peek() {
            Some((_, character)) if character.is_ascii_digit() => {
                Self::handle_decimal_literal(iter, start, true)
            }
            Some((_, '.')) if matches!(iter.peek_second(), Some((_, '.'))) => {
                iter.next();
                iter.next();
                Self::punctuation(iter, start, PunctuationKind::Ellipsis)
            }
            _ => Self::punctuation(iter, start, PunctuationKind::Period),
        }
    }

    /// Handles a character literal, the opening `'` is already consumed.
    fn handle_char_literal(iter: &mut SourceIterator, start: usize) -> Self {
        match iter.peek() {
            Some((_, '\\')) => {
                iter.next();
                if matches!(iter.peek(), Some((_, character)) if character != '\n') {
                    iter.next();
                }
            }
            Some((_, '\'')) => {
                // `''` holds no character
                iter.next();
                return Self::illegal(
                    iter,
                    start,
                    IllegalKind::UnterminatedLiteral(LiteralKind::Char),
                );
            }
            Some((_, character)) if character != '\n' => {
                iter.next();
            }
            _ => {}
        }

        if iter.next_if_eq('\'') {
            CharLiteral {
                span: Self::create_span(start, iter),
            }
            .into()
        } else {
            Self::illegal(
                iter,
                start,
                IllegalKind::UnterminatedLiteral(LiteralKind::Char),
            )
        }
    }

    /// Handles a sequence of characters that are enclosed in `quote`.
    ///
    /// Interpreted strings end at a line break, raw strings may span lines.
    fn handle_string_literal(iter: &mut SourceIterator, start: usize, kind: StringKind) -> Self {
        let (quote, literal) = match kind {
            StringKind::Interpreted => ('"', LiteralKind::String),
            StringKind::Raw => ('`', LiteralKind::RawString),
        };

        let mut is_escaped = false;

        loop {
            match iter.peek() {
                None => break,
                Some((_, '\n')) if kind == StringKind::Interpreted => break,
                Some((_, character)) => {
                    iter.next();

                    if character == quote && !is_escaped {
                        return StringLiteral {
                            span: Self::create_span(start, iter),
                            kind,
                        }
                        .into();
                    }

                    is_escaped = character == '\\' && !is_escaped;
                }
            }
        }

        Self::illegal(iter, start, IllegalKind::UnterminatedLiteral(literal))
    }

    /// Picks `extended` if the next character is `next`, `otherwise` if not.
    fn extend(
        iter: &mut SourceIterator,
        next: char,
        extended: PunctuationKind,
        otherwise: PunctuationKind,
    ) -> PunctuationKind {
        if iter.next_if_eq(next) {
            extended
        } else {
            otherwise
        }
    }

    /// Handles operators and delimiters, always taking the longest match.
    fn handle_punctuation(iter: &mut SourceIterator, start: usize, character: char) -> Self {
        use PunctuationKind as P;

        let punctuation = match character {
            '+' if iter.next_if_eq('+') => P::Increment,
            '+' => Self::extend(iter, '=', P::AddAssign, P::Add),
            '-' if iter.next_if_eq('-') => P::Decrement,
            '-' => Self::extend(iter, '=', P::SubAssign, P::Sub),
            '*' if iter.next_if_eq('*') => Self::extend(iter, '=', P::PowAssign, P::Pow),
            '*' => Self::extend(iter, '=', P::MulAssign, P::Mul),
            '%' => Self::extend(iter, '=', P::RemAssign, P::Rem),
            '&' if iter.next_if_eq('&') => P::LogicalAnd,
            '&' if iter.next_if_eq('^') => Self::extend(iter, '=', P::AndNotAssign, P::AndNot),
            '&' => Self::extend(iter, '=', P::AndAssign, P::And),
            '|' if iter.next_if_eq('|') => P::LogicalOr,
            '|' => Self::extend(iter, '=', P::OrAssign, P::Or),
            '^' => Self::extend(iter, '=', P::XorAssign, P::Xor),
            '<' if iter.next_if_eq('<') => Self::extend(iter, '=', P::ShlAssign, P::Shl),
            '<' if iter.next_if_eq('-') => P::Arrow,
            '<' => Self::extend(iter, '=', P::LessEqual, P::Less),
            '>' if iter.next_if_eq('>') => Self::extend(iter, '=', P::ShrAssign, P::Shr),
            '>' => Self::extend(iter, '=', P::GreaterEqual, P::Greater),
            '=' => Self::extend(iter, '=', P::Equal, P::Assign),
            '!' => Self::extend(iter, '=', P::NotEqual, P::Not),
            ':' => Self::extend(iter, '=', P::Define, P::Colon),
            '(' => P::LeftParen,
            '[' => P::LeftBracket,
            '{' => P::LeftBrace,
            ')' => P::RightParen,
            ']' => P::RightBracket,
            '}' => P::RightBrace,
            ',' => P::Comma,
            ';' => P::Semicolon,
            _ => {
                return Self::illegal(iter, start, IllegalKind::UnexpectedCharacter(character));
            }
        };

        Self::punctuation(iter, start, punctuation)
    }

    /// Lexes the source code from the given iterator.
    ///
    /// The tokenization starts at the current location of the iterator, which must not be at a
    /// whitespace character (see [`Self::is_whitespace`]) or a line break. The function moves the
    /// iterator at least once and forwards it until it makes a token. After the token is made,
    /// the iterator is left at the next character that is not part of the token.
    ///
    /// Characters that do not form a valid token are returned as [`Token::Illegal`].
    ///
    /// # Errors
    /// - [`TokenizeError::EndOfSourceCodeIteratorArgument`] - The iterator argument is at the end
    ///   of the source code.
    pub fn tokenize(iter: &mut SourceIterator) -> Result<Self, TokenizeError> {
        // Gets the first character
        let (start, character) = iter
            .next()
            .ok_or(TokenizeError::EndOfSourceCodeIteratorArgument)?;

        let token = match character {
            _ if Self::is_first_identifier_character(character) => {
                Self::handle_identifier_and_keyword(iter, start)
            }
            '0'..='9' => Self::handle_numeric_literal(iter, start, character),
            '.' => Self::handle_period(iter, start),
            '\'' => Self::handle_char_literal(iter, start),
            '"' => Self::handle_string_literal(iter, start, StringKind::Interpreted),
            '`' => Self::handle_string_literal(iter, start, StringKind::Raw),
            '/' => Self::handle_slash(iter, start),
            _ => Self::handle_punctuation(iter, start, character),
        };

        Ok(token)
    }
}
