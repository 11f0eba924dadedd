//! Parser for the pycpp source language.
//!
//! Consumes the lexer's token stream and produces a [`Program`] together with
//! the [`SymbolTable`] of annotated variables. Grammar:
//!
//! ```text
//! program      = { statement }
//! statement    = assignment | declaration | function_def | return_stmt
//!              | while_stmt | if_stmt | print_stmt | call | NEWLINE
//! block        = INDENT { statement } DEDENT
//! declaration  = IDENTIFIER COLON type
//! assignment   = IDENTIFIER [COLON type] EQUALS expression
//! function_def = DEF IDENTIFIER LP [param {COMMA param}] RP RETURN_TYPE (type | NONE) COLON block
//! return_stmt  = RETURN [expression]
//! while_stmt   = WHILE expression COLON block
//! if_stmt      = IF expression COLON block [ELIF ... | ELSE COLON block]
//! print_stmt   = PRINT LP [expression {COMMA expression}] [COMMA] RP
//! expression   = call | [NOT] operand {operator operand}
//! call         = IDENTIFIER LP [operand {COMMA operand}] RP
//! ```
//!
//! Function definitions are only accepted at module level.

mod expression;
mod statement;

use pycpp_core::{
    MODULE_SCOPE, ParseError, ParseErrorKind, Program, Span, SymbolTable, Token, TokenKind,
    TranspileConfig, VarType,
};

/// Recursive-descent parser over a token vector.
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    symbols: SymbolTable,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            symbols: SymbolTable::new(),
        }
    }

    /// Parse the whole token stream.
    #[tracing::instrument(level = "debug", skip(self), fields(tokens = self.tokens.len()))]
    pub fn parse(mut self) -> Result<(SymbolTable, Program), ParseError> {
        let mut program = Program::default();

        while let Some(kind) = self.peek_kind() {
            match kind {
                TokenKind::Newline => {
                    self.pos += 1;
                }
                TokenKind::Def => {
                    let function = self.function()?;
                    tracing::debug!(
                        name = %function.name,
                        params = function.params.len(),
                        "parsed function"
                    );
                    program.functions.push(function);
                }
                TokenKind::Dedent => {
                    let token = self.next("statement")?;
                    return Err(ParseError::unexpected(token, "unexpected dedent"));
                }
                _ => program.body.push(self.statement(MODULE_SCOPE)?),
            }
        }

        tracing::debug!(
            functions = program.functions.len(),
            statements = program.body.len(),
            "parsed program"
        );
        Ok((self.symbols, program))
    }

    // ------------------------------------------------------------------
    // Cursor helpers
    // ------------------------------------------------------------------

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    fn peek_kind_at(&self, offset: usize) -> Option<TokenKind> {
        self.tokens.get(self.pos + offset).map(|t| t.kind)
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Consume a token, failing at end of input.
    fn next(&mut self, expected: &str) -> Result<Token, ParseError> {
        self.bump()
            .ok_or_else(|| ParseError::eof(self.eof_span(), format!("expected {expected}")))
    }

    /// Consume a token of the given kind.
    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token, ParseError> {
        let token = self.next(expected)?;
        if token.kind == kind {
            Ok(token)
        } else {
            Err(ParseError::unexpected(token, format!("expected {expected}")))
        }
    }

    fn expect_ident(&mut self, expected: &str) -> Result<(String, Token), ParseError> {
        let token = self.expect(TokenKind::Identifier, expected)?;
        match token.as_ident().map(str::to_string) {
            Some(name) => Ok((name, token)),
            None => Err(ParseError::unexpected(token, "identifier without a name")),
        }
    }

    fn eof_span(&self) -> Span {
        self.tokens.last().map_or(Span::new(1, 1), |t| t.span)
    }

    fn conflict(
        token: Token,
        name: &str,
        previous: VarType,
        declared: VarType,
    ) -> ParseError {
        ParseError {
            kind: ParseErrorKind::TypeConflict { previous, declared },
            span: token.span,
            token: Some(token),
            message: format!(
                "variable '{name}' already declared as {previous}, cannot redeclare as {declared}"
            ),
        }
    }
}

/// Lex and parse `source` in one step.
pub fn parse_source(
    source: &str,
    config: &TranspileConfig,
) -> pycpp_core::Result<(SymbolTable, Program)> {
    let tokens = pycpp_lexer::tokenize(source, config)?;
    Ok(Parser::new(tokens).parse()?)
}
