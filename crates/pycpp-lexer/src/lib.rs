//! Tokenizer for the pycpp source language.
//!
//! Turns source text into [`Token`]s, synthesizing layout tokens from
//! indentation the way Python does:
//!
//! - a line indented deeper than the current block yields one `INDENT`
//! - a shallower line yields one `DEDENT` per block it closes
//! - a line at the same depth yields one `NEWLINE`
//! - blank and comment-only lines yield nothing
//! - end of input closes every open block with a `DEDENT`
//!
//! # Example
//!
//! ```rust
//! use pycpp_core::TokenKind;
//! use pycpp_lexer::Lexer;
//!
//! let tokens = Lexer::new("x: int = 5").tokenize().unwrap();
//! let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     [TokenKind::Identifier, TokenKind::Colon, TokenKind::Int, TokenKind::Equals, TokenKind::ValueInt]
//! );
//! ```

mod rules;

use std::collections::VecDeque;

use pycpp_core::{LexError, LexErrorKind, Span, Token, TokenKind, TokenValue, TranspileConfig};

use crate::rules::{OPERATORS, rules};

/// Streaming tokenizer over a source string.
#[derive(Debug)]
pub struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    line: usize,
    line_start: usize,
    tab_width: usize,
    /// Open indentation widths; the bottom entry is always 0.
    indents: Vec<usize>,
    pending: VecDeque<Token>,
    last: Option<TokenKind>,
    at_line_start: bool,
    seen_line: bool,
    finished: bool,
}

impl<'a> Lexer<'a> {
    /// Create a lexer with default configuration.
    pub fn new(source: &'a str) -> Self {
        Self::with_config(source, &TranspileConfig::default())
    }

    pub fn with_config(source: &'a str, config: &TranspileConfig) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
            line_start: 0,
            tab_width: config.tab_width.max(1),
            indents: vec![0],
            pending: VecDeque::new(),
            last: None,
            at_line_start: true,
            seen_line: false,
            finished: false,
        }
    }

    /// Return the next token, or `None` once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        let token = self.advance()?;
        if let Some(token) = &token {
            self.last = Some(token.kind);
            tracing::trace!(token = %token, line = token.span.line, "token");
        }
        Ok(token)
    }

    /// Consume the lexer and collect every token.
    #[tracing::instrument(level = "debug", skip(self), fields(bytes = self.source.len()))]
    pub fn tokenize(self) -> Result<Vec<Token>, LexError> {
        let tokens = self.collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(count = tokens.len(), "tokenized");
        Ok(tokens)
    }

    fn advance(&mut self) -> Result<Option<Token>, LexError> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            if self.finished {
                return Ok(None);
            }
            if self.at_line_start {
                self.at_line_start = false;
                self.line_layout()?;
                continue;
            }

            self.skip_inline_space();
            match self.peek_char() {
                None => self.finish(),
                Some('\n') => {
                    self.pos += 1;
                    self.new_line();
                    self.at_line_start = true;
                }
                Some(_) => return self.scan().map(Some),
            }
        }
    }

    /// Measure the indentation of the next non-blank line and queue the
    /// matching layout tokens.
    fn line_layout(&mut self) -> Result<(), LexError> {
        let width = loop {
            let width = self.measure_indent();
            match self.peek_char() {
                None => return Ok(()),
                Some('\n') => {
                    self.pos += 1;
                    self.new_line();
                }
                Some('#') => self.skip_comment(),
                Some(_) => break width,
            }
        };

        let span = self.span();
        if !self.seen_line {
            self.seen_line = true;
            if width > 0 {
                return Err(LexError::new(LexErrorKind::UnexpectedIndent, span));
            }
            return Ok(());
        }

        let current = self.current_indent();
        if width > current {
            self.indents.push(width);
            self.pending.push_back(Token::new(TokenKind::Indent, span));
        } else if width < current {
            while self.current_indent() > width {
                self.indents.pop();
                self.pending.push_back(Token::new(TokenKind::Dedent, span));
            }
            if self.current_indent() != width {
                self.pending.clear();
                self.finished = true;
                return Err(LexError::new(LexErrorKind::InconsistentDedent, span));
            }
        } else {
            self.pending.push_back(Token::new(TokenKind::Newline, span));
        }
        Ok(())
    }

    /// Skip leading whitespace on the current line, returning its width.
    fn measure_indent(&mut self) -> usize {
        let mut width = 0;
        while let Some(c) = self.peek_char() {
            match c {
                ' ' => width += 1,
                '\t' => width = (width / self.tab_width + 1) * self.tab_width,
                '\r' | '\x0c' => {}
                _ => break,
            }
            self.pos += 1;
        }
        width
    }

    fn skip_inline_space(&mut self) {
        while let Some(c) = self.peek_char() {
            match c {
                ' ' | '\t' | '\r' | '\x0c' => self.pos += 1,
                '#' => self.skip_comment(),
                _ => break,
            }
        }
    }

    fn skip_comment(&mut self) {
        let rest = &self.source[self.pos..];
        self.pos += rest.find('\n').unwrap_or(rest.len());
    }

    fn new_line(&mut self) {
        self.line += 1;
        self.line_start = self.pos;
    }

    fn finish(&mut self) {
        self.finished = true;
        let span = self.span();
        while self.indents.len() > 1 {
            self.indents.pop();
            self.pending.push_back(Token::new(TokenKind::Dedent, span));
        }
    }

    fn scan(&mut self) -> Result<Token, LexError> {
        let span = self.span();
        let rest = &self.source[self.pos..];
        let rules = rules();

        let signed_ok = !self.last.is_some_and(TokenKind::ends_operand);
        let number = if rest.starts_with('-') && !signed_ok {
            None
        } else {
            rules
                .float
                .find(rest)
                .map(|m| (m.as_str(), true))
                .or_else(|| rules.int.find(rest).map(|m| (m.as_str(), false)))
        };
        if let Some((text, is_float)) = number {
            self.pos += text.len();
            let token = if is_float {
                let value = text
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| LexError::new(LexErrorKind::NumberOutOfRange, span))?;
                Token::with_value(TokenKind::ValueFloat, TokenValue::Float(value), span)
            } else {
                let value: i64 = text
                    .parse()
                    .map_err(|_| LexError::new(LexErrorKind::NumberOutOfRange, span))?;
                Token::with_value(TokenKind::ValueInt, TokenValue::Int(value), span)
            };
            return Ok(token);
        }

        if let Some(m) = rules.word.find(rest) {
            let word = m.as_str();
            self.pos += word.len();
            let token = match TokenKind::keyword(word) {
                Some(TokenKind::ValueBool) => Token::with_value(
                    TokenKind::ValueBool,
                    TokenValue::Bool(word == "True"),
                    span,
                ),
                Some(kind) => Token::new(kind, span),
                None => Token::ident(word, span),
            };
            return Ok(token);
        }

        for (text, kind) in OPERATORS {
            if rest.starts_with(text) {
                self.pos += text.len();
                return Ok(Token::new(*kind, span));
            }
        }

        let c = self.peek_char().unwrap_or_default();
        Err(LexError::new(LexErrorKind::UnexpectedChar(c), span))
    }

    fn current_indent(&self) -> usize {
        self.indents.last().copied().unwrap_or(0)
    }

    fn peek_char(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn span(&self) -> Span {
        let column = self.source[self.line_start..self.pos].chars().count() + 1;
        Span::new(self.line, column)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Ok(token) => token.map(Ok),
            Err(err) => {
                self.finished = true;
                self.pending.clear();
                Some(Err(err))
            }
        }
    }
}

/// Tokenize `source` with the given configuration.
pub fn tokenize(source: &str, config: &TranspileConfig) -> Result<Vec<Token>, LexError> {
    Lexer::with_config(source, config).tokenize()
}
