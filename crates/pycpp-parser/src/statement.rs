//! Statements, blocks and function definitions.

use pycpp_core::{
    CondBlock, Expr, Function, IfStmt, Param, ParseError, ParseErrorKind, ReturnType, Span, Stmt,
    Token, TokenKind, VarType,
};

use crate::Parser;

impl Parser {
    /// Parse one statement in `scope`.
    pub(crate) fn statement(&mut self, scope: &str) -> Result<Stmt, ParseError> {
        let token = self.next("statement")?;
        let stmt = match token.kind {
            TokenKind::Identifier => {
                let stmt = self.identifier_statement(token, scope)?;
                self.end_of_statement()?;
                stmt
            }
            TokenKind::Return => {
                let value = if self.at_statement_end() {
                    None
                } else {
                    Some(self.expression()?)
                };
                self.end_of_statement()?;
                Stmt::Return {
                    value,
                    span: token.span,
                }
            }
            TokenKind::Print => {
                let args = self.print_args()?;
                self.end_of_statement()?;
                Stmt::Print {
                    args,
                    span: token.span,
                }
            }
            TokenKind::While => {
                let condition = self.expression()?;
                self.expect(TokenKind::Colon, "':' after while condition")?;
                let body = self.block(scope)?;
                Stmt::While {
                    condition,
                    body,
                    span: token.span,
                }
            }
            TokenKind::If => Stmt::If(self.if_tail(token.span, scope)?),
            TokenKind::Def => {
                return Err(ParseError {
                    kind: ParseErrorKind::NestedFunction,
                    span: token.span,
                    token: Some(token),
                    message: "functions can only be defined at module level".to_string(),
                });
            }
            TokenKind::Indent => return Err(ParseError::unexpected(token, "unexpected indent")),
            _ => return Err(ParseError::unexpected(token, "expected a statement")),
        };
        tracing::trace!(span = %stmt.span(), scope = scope, "parsed statement");
        Ok(stmt)
    }

    /// Statements that start with a name: declaration, assignment or call.
    fn identifier_statement(
        &mut self,
        token: Token,
        scope: &str,
    ) -> Result<Stmt, ParseError> {
        let name = token.as_ident().unwrap_or_default().to_string();
        match self.peek_kind() {
            Some(TokenKind::Colon) => {
                self.pos += 1;
                let ty = self.var_type("type annotation")?;
                if let Err(conflict) = self.symbols.declare(scope, &name, ty, token.span) {
                    return Err(Self::conflict(token, &name, conflict.previous, ty));
                }
                if self.check(TokenKind::Equals) {
                    self.pos += 1;
                    let value = self.expression()?;
                    Ok(Stmt::Assign {
                        target: name,
                        annotation: Some(ty),
                        value,
                        span: token.span,
                    })
                } else {
                    Ok(Stmt::Declare {
                        name,
                        ty,
                        span: token.span,
                    })
                }
            }
            Some(TokenKind::Equals) => {
                self.pos += 1;
                let value = self.expression()?;
                Ok(Stmt::Assign {
                    target: name,
                    annotation: None,
                    value,
                    span: token.span,
                })
            }
            Some(TokenKind::Lp) => Ok(Stmt::Call(self.call_tail(name, token.span)?)),
            _ => {
                let next = self.next("'=', ':' or '(' after identifier")?;
                Err(ParseError::unexpected(
                    next,
                    format!("expected '=', ':' or '(' after '{name}'"),
                ))
            }
        }
    }

    /// `if` chain after the `if` keyword has been consumed. Each `elif`
    /// adds an arm, so the chain length never deepens the call stack.
    fn if_tail(&mut self, span: Span, scope: &str) -> Result<IfStmt, ParseError> {
        let mut arms = vec![self.cond_block(span, scope)?];
        while self.check(TokenKind::Elif) {
            let elif = self.next("elif")?;
            arms.push(self.cond_block(elif.span, scope)?);
        }

        let else_block = if self.check(TokenKind::Else) {
            self.pos += 1;
            self.expect(TokenKind::Colon, "':' after else")?;
            Some(self.block(scope)?)
        } else {
            None
        };

        Ok(IfStmt {
            arms,
            else_block,
            span,
        })
    }

    /// `condition: block` of one `if` or `elif` arm.
    fn cond_block(&mut self, span: Span, scope: &str) -> Result<CondBlock, ParseError> {
        let condition = self.expression()?;
        self.expect(TokenKind::Colon, "':' after if condition")?;
        let body = self.block(scope)?;
        Ok(CondBlock {
            condition,
            body,
            span,
        })
    }

    /// `(expr, ...)` of a print call. A trailing comma is accepted.
    fn print_args(&mut self) -> Result<Vec<Expr>, ParseError> {
        self.expect(TokenKind::Lp, "'(' after print")?;
        let mut args = Vec::new();
        loop {
            if self.check(TokenKind::Rp) {
                self.pos += 1;
                return Ok(args);
            }
            args.push(self.expression()?);
            let token = self.next("',' or ')'")?;
            match token.kind {
                TokenKind::Comma => {}
                TokenKind::Rp => return Ok(args),
                _ => return Err(ParseError::unexpected(token, "expected ',' or ')'")),
            }
        }
    }

    /// `def name(params) -> type: block`
    pub(crate) fn function(&mut self) -> Result<Function, ParseError> {
        let def = self.expect(TokenKind::Def, "def")?;
        let (name, _) = self.expect_ident("function name")?;
        self.expect(TokenKind::Lp, "'(' after function name")?;

        let mut params = Vec::new();
        if self.check(TokenKind::Rp) {
            self.pos += 1;
        } else {
            loop {
                let (param, _) = self.expect_ident("parameter name")?;
                self.expect(TokenKind::Colon, "':' after parameter name")?;
                let ty = self.var_type("parameter type")?;
                params.push(Param { name: param, ty });

                let token = self.next("',' or ')'")?;
                match token.kind {
                    TokenKind::Comma => {}
                    TokenKind::Rp => break,
                    _ => return Err(ParseError::unexpected(token, "expected ',' or ')'")),
                }
            }
        }

        self.expect(TokenKind::ReturnType, "'->' after parameter list")?;
        let token = self.next("return type")?;
        let Some(return_type) = ReturnType::from_token(token.kind) else {
            return Err(ParseError::unexpected(
                token,
                "expected return type (int, float, bool or None)",
            ));
        };
        self.expect(TokenKind::Colon, "':' after return type")?;
        let body = self.block(&name)?;

        Ok(Function {
            name,
            params,
            return_type,
            body,
            span: def.span,
        })
    }

    /// `INDENT { statement } DEDENT`. End of input also closes the block.
    fn block(&mut self, scope: &str) -> Result<Vec<Stmt>, ParseError> {
        self.expect(TokenKind::Indent, "indented block")?;
        let mut body = Vec::new();
        loop {
            match self.peek_kind() {
                None => break,
                Some(TokenKind::Dedent) => {
                    self.pos += 1;
                    break;
                }
                Some(TokenKind::Newline) => self.pos += 1,
                Some(_) => body.push(self.statement(scope)?),
            }
        }
        Ok(body)
    }

    fn var_type(&mut self, expected: &str) -> Result<VarType, ParseError> {
        let token = self.next(expected)?;
        match VarType::from_token(token.kind) {
            Some(ty) => Ok(ty),
            None => Err(ParseError::unexpected(
                token,
                format!("expected {expected} (int, float or bool)"),
            )),
        }
    }

    fn at_statement_end(&self) -> bool {
        matches!(
            self.peek_kind(),
            None | Some(TokenKind::Newline | TokenKind::Dedent)
        )
    }

    /// A simple statement must be followed by a line break, the end of its
    /// block, or the end of input. Only `NEWLINE` is consumed.
    fn end_of_statement(&mut self) -> Result<(), ParseError> {
        match self.peek_kind() {
            None | Some(TokenKind::Dedent) => Ok(()),
            Some(TokenKind::Newline) => {
                self.pos += 1;
                Ok(())
            }
            Some(_) => {
                let token = self.next("end of statement")?;
                Err(ParseError::unexpected(token, "expected end of statement"))
            }
        }
    }
}
