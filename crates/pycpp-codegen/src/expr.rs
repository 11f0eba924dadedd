//! Expression rendering.

use pycpp_core::{Call, Expr, Literal, Operand, float_text};

/// Render an expression as C++. Operation parts are joined by single spaces.
pub fn expression(expr: &Expr) -> String {
    match expr {
        Expr::Call(c) => call(c),
        Expr::Operation(op) => {
            let mut parts = Vec::with_capacity(op.rest.len() * 2 + 2);
            if op.negated {
                parts.push("!".to_string());
            }
            parts.push(operand(&op.first));
            for (bin, rhs) in &op.rest {
                parts.push(bin.cpp_str().to_string());
                parts.push(operand(rhs));
            }
            parts.join(" ")
        }
    }
}

pub(crate) fn call(call: &Call) -> String {
    let args: Vec<String> = call.args.iter().map(operand).collect();
    format!("{}({})", call.name, args.join(", "))
}

pub fn operand(operand: &Operand) -> String {
    match operand {
        Operand::Ident(name) => name.clone(),
        Operand::Literal(lit) => literal(*lit),
    }
}

/// Floats are written in plain decimal with a `.`, so C++ reads them as
/// `double` and no exponent form appears.
pub fn literal(literal: Literal) -> String {
    match literal {
        Literal::Int(v) => v.to_string(),
        Literal::Float(v) => float_text(v),
        Literal::Bool(true) => "true".to_string(),
        Literal::Bool(false) => "false".to_string(),
    }
}
