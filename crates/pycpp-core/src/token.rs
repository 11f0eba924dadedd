//! Token vocabulary shared by the lexer and the parser.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 1-based position of a token in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Kinds of tokens produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    // Keywords
    Def,
    If,
    Elif,
    Else,
    While,
    None,
    Int,
    Float,
    Bool,
    Return,
    Print,
    And,
    Or,
    Not,

    // Literals and names
    ValueInt,
    ValueFloat,
    ValueBool,
    Identifier,

    // Punctuation
    Colon,
    Comma,
    ReturnType,
    Lp,
    Rp,

    // Arithmetic
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,

    // Comparison
    IsEqual,
    IsNotEqual,
    IsLess,
    IsEqualLess,
    IsMore,
    IsEqualMore,

    /// Assignment (=)
    Equals,

    // Layout
    Newline,
    Indent,
    Dedent,
}

impl TokenKind {
    /// Canonical upper-case name, as shown in diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            TokenKind::Def => "DEF",
            TokenKind::If => "IF",
            TokenKind::Elif => "ELIF",
            TokenKind::Else => "ELSE",
            TokenKind::While => "WHILE",
            TokenKind::None => "NONE",
            TokenKind::Int => "INT",
            TokenKind::Float => "FLOAT",
            TokenKind::Bool => "BOOL",
            TokenKind::Return => "RETURN",
            TokenKind::Print => "PRINT",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Not => "NOT",
            TokenKind::ValueInt => "VALUE_INT",
            TokenKind::ValueFloat => "VALUE_FLOAT",
            TokenKind::ValueBool => "VALUE_BOOL",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Colon => "COLON",
            TokenKind::Comma => "COMMA",
            TokenKind::ReturnType => "RETURN_TYPE",
            TokenKind::Lp => "LP",
            TokenKind::Rp => "RP",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Multiply => "MULTIPLY",
            TokenKind::Divide => "DIVIDE",
            TokenKind::Modulo => "MODULO",
            TokenKind::IsEqual => "ISEQUAL",
            TokenKind::IsNotEqual => "ISNOTEQUAL",
            TokenKind::IsLess => "ISLESS",
            TokenKind::IsEqualLess => "ISEQUALLESS",
            TokenKind::IsMore => "ISMORE",
            TokenKind::IsEqualMore => "ISEQUALMORE",
            TokenKind::Equals => "EQUALS",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Indent => "INDENT",
            TokenKind::Dedent => "DEDENT",
        }
    }

    /// Look up a reserved word. Returns `None` for ordinary identifiers.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        let kind = match word {
            "def" => TokenKind::Def,
            "if" => TokenKind::If,
            "elif" => TokenKind::Elif,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "None" => TokenKind::None,
            "int" => TokenKind::Int,
            "float" => TokenKind::Float,
            "bool" => TokenKind::Bool,
            "return" => TokenKind::Return,
            "print" => TokenKind::Print,
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            "not" => TokenKind::Not,
            "True" | "False" => TokenKind::ValueBool,
            _ => return Option::None,
        };
        Some(kind)
    }

    /// Literal value tokens.
    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::ValueInt | TokenKind::ValueFloat | TokenKind::ValueBool
        )
    }

    /// Type annotations usable on variables and parameters.
    pub const fn is_type(self) -> bool {
        matches!(self, TokenKind::Int | TokenKind::Float | TokenKind::Bool)
    }

    /// Tokens after which a `-` is a binary minus rather than a sign.
    pub const fn ends_operand(self) -> bool {
        matches!(self, TokenKind::Identifier | TokenKind::Rp) || self.is_literal()
    }

    pub const fn is_layout(self) -> bool {
        matches!(
            self,
            TokenKind::Newline | TokenKind::Indent | TokenKind::Dedent
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decimal text of a float, never in exponent form and always with a `.`.
pub fn float_text(value: f64) -> String {
    let text = value.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}

/// Payload carried by literal and identifier tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Ident(String),
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Int(v) => write!(f, "{v}"),
            TokenValue::Float(v) => f.write_str(&float_text(*v)),
            TokenValue::Bool(true) => f.write_str("True"),
            TokenValue::Bool(false) => f.write_str("False"),
            TokenValue::Ident(name) => f.write_str(name),
        }
    }
}

/// A single lexical token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<TokenValue>,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self {
            kind,
            value: None,
            span,
        }
    }

    pub fn with_value(kind: TokenKind, value: TokenValue, span: Span) -> Self {
        Self {
            kind,
            value: Some(value),
            span,
        }
    }

    pub fn ident(name: impl Into<String>, span: Span) -> Self {
        Self::with_value(TokenKind::Identifier, TokenValue::Ident(name.into()), span)
    }

    /// Identifier text, if this is an identifier token.
    pub fn as_ident(&self) -> Option<&str> {
        match &self.value {
            Some(TokenValue::Ident(name)) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}({})", self.kind, value),
            None => write!(f, "{}", self.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_diagnostic_format() {
        let span = Span::new(1, 1);
        assert_eq!(Token::new(TokenKind::If, span).to_string(), "IF");
        assert_eq!(Token::ident("x", span).to_string(), "IDENTIFIER(x)");
        assert_eq!(
            Token::with_value(TokenKind::ValueInt, TokenValue::Int(5), span).to_string(),
            "VALUE_INT(5)"
        );
        assert_eq!(
            Token::with_value(TokenKind::ValueFloat, TokenValue::Float(-4.5), span).to_string(),
            "VALUE_FLOAT(-4.5)"
        );
        assert_eq!(
            Token::with_value(TokenKind::ValueBool, TokenValue::Bool(true), span).to_string(),
            "VALUE_BOOL(True)"
        );
    }

    #[test]
    fn float_text_has_no_exponent() {
        assert_eq!(float_text(1.0), "1.0");
        assert_eq!(float_text(-4.5), "-4.5");
        assert_eq!(float_text(1e20), "100000000000000000000.0");
        assert_eq!(float_text(1e-7), "0.0000001");
    }

    #[test]
    fn keywords_are_whole_words() {
        assert_eq!(TokenKind::keyword("elif"), Some(TokenKind::Elif));
        assert_eq!(TokenKind::keyword("None"), Some(TokenKind::None));
        assert_eq!(TokenKind::keyword("False"), Some(TokenKind::ValueBool));
        assert_eq!(TokenKind::keyword("ifelif"), None);
        assert_eq!(TokenKind::keyword("integer"), None);
        assert_eq!(TokenKind::keyword("none"), None);
    }

    #[test]
    fn operand_endings() {
        assert!(TokenKind::Identifier.ends_operand());
        assert!(TokenKind::ValueFloat.ends_operand());
        assert!(TokenKind::Rp.ends_operand());
        assert!(!TokenKind::Equals.ends_operand());
        assert!(!TokenKind::Lp.ends_operand());
    }
}
