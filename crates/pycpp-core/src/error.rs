//! Error types for pycpp operations.

use std::fmt;

use crate::token::{Span, Token};
use crate::types::VarType;

/// The primary error type for all pycpp operations.
#[derive(Debug)]
pub enum Error {
    /// Unrecognized input while tokenizing
    Lex(LexError),
    /// Token stream does not follow the grammar
    Parse(ParseError),
    /// Invalid configuration
    Config(ConfigError),
    /// I/O errors
    Io(std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    /// A character that starts no token
    UnexpectedChar(char),
    /// Dedent to a column that matches no enclosing block
    InconsistentDedent,
    /// First line of the file is indented
    UnexpectedIndent,
    /// Numeric literal out of range for its type
    NumberOutOfRange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Offending token; `None` at end of input.
    pub token: Option<Token>,
    pub span: Span,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Token does not fit the grammar here
    UnexpectedToken,
    /// Input ended in the middle of a construct
    UnexpectedEof,
    /// Variable redeclared with a different type in the same scope
    TypeConflict { previous: VarType, declared: VarType },
    /// `def` inside a block
    NestedFunction,
}

#[derive(Debug)]
pub struct ConfigError {
    pub message: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ConfigError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }
}

impl LexError {
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

impl ParseError {
    pub fn unexpected(token: Token, message: impl Into<String>) -> Self {
        Self {
            kind: ParseErrorKind::UnexpectedToken,
            span: token.span,
            token: Some(token),
            message: message.into(),
        }
    }

    pub fn eof(span: Span, message: impl Into<String>) -> Self {
        Self {
            kind: ParseErrorKind::UnexpectedEof,
            token: None,
            span,
            message: message.into(),
        }
    }

    pub fn line(&self) -> usize {
        self.span.line
    }
}

impl Error {
    /// Is this a problem with the input program (as opposed to the environment)?
    pub fn is_source_error(&self) -> bool {
        matches!(self, Error::Lex(_) | Error::Parse(_))
    }

    /// Source line the error points at, if any.
    pub fn line(&self) -> Option<usize> {
        self.span().map(|s| s.line)
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Error::Lex(e) => Some(e.span),
            Error::Parse(e) => Some(e.span),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Lex(e) => write!(f, "{}", e),
            Error::Parse(e) => write!(f, "{}", e),
            Error::Config(e) => write!(f, "Configuration error: {}", e.message),
            Error::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Lex(e) => Some(e),
            Error::Parse(e) => Some(e),
            Error::Config(e) => e
                .source
                .as_deref()
                .map(|err| err as &(dyn std::error::Error + 'static)),
            Error::Io(e) => Some(e),
        }
    }
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexErrorKind::UnexpectedChar(c) => write!(f, "unexpected character {:?}", c),
            LexErrorKind::InconsistentDedent => {
                write!(f, "unindent does not match any outer indentation level")
            }
            LexErrorKind::UnexpectedIndent => write!(f, "unexpected indent"),
            LexErrorKind::NumberOutOfRange => write!(f, "numeric literal out of range"),
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lexical error: line {}: {}", self.span.line, self.kind)
    }
}

impl std::error::Error for LexError {}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.token {
            Some(token) => write!(
                f,
                "syntax error: token {}, line {}: {}",
                token, self.span.line, self.message
            ),
            None => write!(
                f,
                "syntax error: end of input, line {}: {}",
                self.span.line, self.message
            ),
        }
    }
}

impl std::error::Error for ParseError {}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|err| err as &(dyn std::error::Error + 'static))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<LexError> for Error {
    fn from(err: LexError) -> Self {
        Error::Lex(err)
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::Parse(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Config(err)
    }
}

/// Result type alias for pycpp operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;

    #[test]
    fn lex_error_display() {
        let err = Error::from(LexError::new(
            LexErrorKind::UnexpectedChar('&'),
            Span::new(3, 7),
        ));
        assert_eq!(err.to_string(), "lexical error: line 3: unexpected character '&'");
        assert_eq!(err.line(), Some(3));
        assert!(err.is_source_error());
    }

    #[test]
    fn parse_error_display() {
        let token = Token::new(TokenKind::Dedent, Span::new(9, 1));
        let err = ParseError::unexpected(token, "unexpected dedent");
        assert_eq!(
            err.to_string(),
            "syntax error: token DEDENT, line 9: unexpected dedent"
        );

        let eof = ParseError::eof(Span::new(2, 5), "expected expression");
        assert_eq!(
            eof.to_string(),
            "syntax error: end of input, line 2: expected expression"
        );
    }

    #[test]
    fn environment_errors_are_not_source_errors() {
        let io = Error::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(!io.is_source_error());
        assert_eq!(io.line(), None);
        assert!(std::error::Error::source(&io).is_some());

        let cfg = Error::from(ConfigError::new("indent width must be positive"));
        assert_eq!(cfg.to_string(), "Configuration error: indent width must be positive");
    }
}
