//! Expressions: calls and flat operations.

use pycpp_core::{
    BinaryOp, Call, Expr, Literal, Operand, Operation, ParseError, Span, TokenKind, TokenValue,
};

use crate::Parser;

impl Parser {
    /// `call | [not] operand {op operand}`
    pub(crate) fn expression(&mut self) -> Result<Expr, ParseError> {
        if self.check(TokenKind::Identifier) && self.peek_kind_at(1) == Some(TokenKind::Lp) {
            let (name, token) = self.expect_ident("function name")?;
            return Ok(Expr::Call(self.call_tail(name, token.span)?));
        }

        let negated = self.check(TokenKind::Not);
        if negated {
            self.pos += 1;
        }
        let first = self.operand()?;
        let mut rest = Vec::new();
        while let Some(op) = self.peek_kind().and_then(BinaryOp::from_token) {
            self.pos += 1;
            rest.push((op, self.operand()?));
        }

        Ok(Expr::Operation(Operation {
            negated,
            first,
            rest,
        }))
    }

    /// Argument list of a call whose name has been consumed.
    pub(crate) fn call_tail(&mut self, name: String, span: Span) -> Result<Call, ParseError> {
        self.expect(TokenKind::Lp, "'('")?;
        let mut args = Vec::new();
        if self.check(TokenKind::Rp) {
            self.pos += 1;
        } else {
            loop {
                args.push(self.operand()?);
                let token = self.next("',' or ')'")?;
                match token.kind {
                    TokenKind::Comma => {}
                    TokenKind::Rp => break,
                    _ => return Err(ParseError::unexpected(token, "expected ',' or ')'")),
                }
            }
        }
        Ok(Call { name, args, span })
    }

    /// A variable name or a literal.
    fn operand(&mut self) -> Result<Operand, ParseError> {
        let token = self.next("operand")?;
        let operand = match (token.kind, token.value.clone()) {
            (TokenKind::Identifier, Some(TokenValue::Ident(name))) => Operand::Ident(name),
            (TokenKind::ValueInt, Some(TokenValue::Int(v))) => Operand::Literal(Literal::Int(v)),
            (TokenKind::ValueFloat, Some(TokenValue::Float(v))) => {
                Operand::Literal(Literal::Float(v))
            }
            (TokenKind::ValueBool, Some(TokenValue::Bool(v))) => {
                Operand::Literal(Literal::Bool(v))
            }
            _ => {
                return Err(ParseError::unexpected(
                    token,
                    "expected a variable or a literal",
                ));
            }
        };
        Ok(operand)
    }
}
