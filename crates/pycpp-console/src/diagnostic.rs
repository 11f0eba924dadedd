//! Error diagnostics for lexer, parser and environment failures.
//!
//! ```rust
//! use pycpp_console::{Diagnostic, OutputMode};
//! use pycpp_core::{LexError, LexErrorKind, Span};
//!
//! let err = LexError::new(LexErrorKind::UnexpectedChar('&'), Span::new(1, 7)).into();
//! let diagnostic = Diagnostic::from_error(&err).with_source("x = 1 & 2");
//! assert_eq!(
//!     diagnostic.render(OutputMode::Plain),
//!     "lexical error: line 1\nunexpected character '&'"
//! );
//! ```

use pycpp_core::{Error, Span};

use crate::OutputMode;
use crate::style::{BOLD, BRIGHT_RED, CYAN, DIM, RED, RESET, paint};

/// Which phase produced the diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    Lexical,
    Syntax,
    Config,
    Io,
}

impl DiagnosticKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lexical => "lexical",
            Self::Syntax => "syntax",
            Self::Config => "config",
            Self::Io => "io",
        }
    }
}

/// A rendered-on-demand error report.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    kind: DiagnosticKind,
    message: String,
    span: Option<Span>,
    /// Display form of the offending token. `None` at end of input.
    token: Option<String>,
    source_line: Option<String>,
    path: Option<String>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            span: None,
            token: None,
            source_line: None,
            path: None,
        }
    }

    /// Build a diagnostic from any pipeline error.
    pub fn from_error(err: &Error) -> Self {
        match err {
            Error::Lex(e) => Self::new(DiagnosticKind::Lexical, e.kind.to_string()).with_span(e.span),
            Error::Parse(e) => {
                let diagnostic =
                    Self::new(DiagnosticKind::Syntax, e.message.clone()).with_span(e.span);
                match &e.token {
                    Some(token) => diagnostic.with_token(token.to_string()),
                    None => diagnostic,
                }
            }
            Error::Config(e) => Self::new(DiagnosticKind::Config, e.message.clone()),
            Error::Io(e) => Self::new(DiagnosticKind::Io, e.to_string()),
        }
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Attach the source text; the line under the span is kept for excerpts.
    #[must_use]
    pub fn with_source(mut self, source: &str) -> Self {
        if let Some(span) = self.span {
            self.source_line = source
                .lines()
                .nth(span.line.saturating_sub(1))
                .map(|l| l.trim_end_matches('\r').to_string());
        }
        self
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn span(&self) -> Option<Span> {
        self.span
    }

    pub fn render(&self, mode: OutputMode) -> String {
        match mode {
            OutputMode::Plain => self.render_plain(),
            OutputMode::Rich => self.render_styled(),
            OutputMode::Json => format!("{:#}", self.to_json()),
        }
    }

    /// First line of the plain report.
    ///
    /// `lexical error: line N`, `syntax error: token T, line N` or
    /// `syntax error: end of input, line N`.
    #[must_use]
    pub fn header(&self) -> String {
        let line = self.span.map_or(0, |s| s.line);
        match self.kind {
            DiagnosticKind::Lexical => format!("lexical error: line {line}"),
            DiagnosticKind::Syntax => match &self.token {
                Some(token) => format!("syntax error: token {token}, line {line}"),
                None => format!("syntax error: end of input, line {line}"),
            },
            DiagnosticKind::Config => "configuration error".to_string(),
            DiagnosticKind::Io => "I/O error".to_string(),
        }
    }

    #[must_use]
    pub fn render_plain(&self) -> String {
        format!("{}\n{}", self.header(), self.message)
    }

    #[must_use]
    pub fn render_styled(&self) -> String {
        let mut lines = vec![
            paint(&self.header(), &format!("{BOLD}{RED}"), true),
            format!("  {}", self.message),
        ];

        if let Some(span) = self.span {
            let location = match &self.path {
                Some(path) => format!("{path}:{span}"),
                None => span.to_string(),
            };
            lines.push(format!("  {DIM}--> {location}{RESET}"));

            if let Some(source) = &self.source_line {
                let gutter = span.line.to_string();
                let pad = " ".repeat(gutter.len());
                let marker = caret_indent(source, span.column);
                lines.push(format!("  {CYAN}{pad} |{RESET}"));
                lines.push(format!("  {CYAN}{gutter} |{RESET} {source}"));
                lines.push(format!(
                    "  {CYAN}{pad} |{RESET} {marker}{BRIGHT_RED}^{RESET}"
                ));
            }
        }

        lines.join("\n")
    }

    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "kind": self.kind.as_str(),
            "line": self.span.map(|s| s.line),
            "column": self.span.map(|s| s.column),
            "token": self.token,
            "message": self.message,
        })
    }
}

/// Whitespace that puts a caret under `column` of `line`. Tabs in the line
/// are copied so the terminal expands both rows alike.
fn caret_indent(line: &str, column: usize) -> String {
    let width = column.saturating_sub(1);
    let mut indent: String = line
        .chars()
        .take(width)
        .map(|c| if c == '\t' { '\t' } else { ' ' })
        .collect();
    let short = width.saturating_sub(indent.chars().count());
    indent.push_str(&" ".repeat(short));
    indent
}

#[cfg(test)]
mod tests {
    use super::*;
    use pycpp_core::{ConfigError, TranspileConfig};
    use pycpp_parser::parse_source;

    fn diagnose(source: &str) -> Diagnostic {
        let err = parse_source(source, &TranspileConfig::default()).unwrap_err();
        Diagnostic::from_error(&err).with_source(source)
    }

    #[test]
    fn test_lexical_plain() {
        let d = diagnose("x = 1\ny = $\n");
        assert_eq!(d.kind(), DiagnosticKind::Lexical);
        assert_eq!(d.render_plain(), "lexical error: line 2\nunexpected character '$'");
    }

    #[test]
    fn test_syntax_plain_with_token() {
        let d = diagnose("x = 1 y = 2");
        assert_eq!(
            d.render_plain(),
            "syntax error: token IDENTIFIER(y), line 1\nexpected end of statement"
        );
    }

    #[test]
    fn test_syntax_plain_at_end_of_input() {
        let d = diagnose("x = 1 +");
        assert!(d.header().starts_with("syntax error: end of input, line 1"));
    }

    #[test]
    fn test_styled_has_caret_under_column() {
        let d = diagnose("x = 1 y = 2").with_path("demo.py");
        let styled = d.render_styled();
        assert!(styled.contains("demo.py:1:7"));
        assert!(styled.contains("x = 1 y = 2"));
        assert!(styled.contains(&format!("      {BRIGHT_RED}^")));
    }

    #[test]
    fn test_caret_follows_tabs() {
        let d = diagnose("while x:\n\ty = $\n");
        assert_eq!(d.span(), Some(Span::new(2, 6)));
        let styled = d.render_styled();
        assert!(styled.contains("\ty = $"));
        assert!(styled.contains(&format!("{RESET} \t    {BRIGHT_RED}^")));
    }

    #[test]
    fn test_caret_past_end_of_line() {
        assert_eq!(caret_indent("\tx +", 8), "\t      ");
    }

    #[test]
    fn test_json_fields() {
        let json = diagnose("x = 1 y = 2").to_json();
        assert_eq!(json["kind"], "syntax");
        assert_eq!(json["line"], 1);
        assert_eq!(json["column"], 7);
        assert_eq!(json["token"], "IDENTIFIER(y)");
        assert_eq!(json["message"], "expected end of statement");
    }

    #[test]
    fn test_config_error_has_no_location() {
        let err = Error::Config(ConfigError::new("indent width must be between 1 and 16"));
        let d = Diagnostic::from_error(&err);
        assert_eq!(d.span(), None);
        assert_eq!(
            d.render(OutputMode::Plain),
            "configuration error\nindent width must be between 1 and 16"
        );
        assert!(d.to_json()["line"].is_null());
    }

    #[test]
    fn test_builder() {
        let d = Diagnostic::new(DiagnosticKind::Syntax, "expected ':'")
            .with_span(Span::new(3, 9))
            .with_token("NEWLINE");
        assert_eq!(d.header(), "syntax error: token NEWLINE, line 3");
        assert_eq!(d.message(), "expected ':'");
    }
}
