//! Inspection views: token listing and the symbol table / AST outline.

use pycpp_core::{
    Call, Expr, Function, IfStmt, Literal, MODULE_SCOPE, Operand, Program, Stmt, SymbolTable,
    Token, float_text,
};

use crate::OutputMode;
use crate::style::{CYAN, DIM, MAGENTA, paint};

const BRANCH: &str = "+-- ";
const LAST_BRANCH: &str = "\\-- ";
const VERTICAL: &str = "|   ";
const SPACE: &str = "    ";

/// One token per line, or a JSON array of tokens.
pub fn render_tokens(tokens: &[Token], mode: OutputMode) -> String {
    if mode.is_structured() {
        return format!("{:#}", serde_json::json!(tokens));
    }
    let color = mode.supports_ansi();
    tokens
        .iter()
        .map(|token| {
            let code = if token.kind.is_layout() {
                MAGENTA
            } else if token.kind.is_literal() {
                CYAN
            } else {
                ""
            };
            let location = format!("{:<8}", token.span.to_string());
            let text = token.to_string();
            format!(
                "{}{}",
                paint(&location, DIM, color),
                paint(&text, code, color && !code.is_empty())
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The symbol table followed by an outline of the program.
pub fn render_tree(symbols: &SymbolTable, program: &Program) -> String {
    let mut lines = Vec::new();
    render_node(&symbol_tree(symbols), "", None, &mut lines);
    render_node(&program_tree(program), "", None, &mut lines);
    lines.join("\n")
}

/// `{"symbols": ..., "program": ...}` for the JSON output mode.
pub fn ast_json(symbols: &SymbolTable, program: &Program) -> serde_json::Value {
    serde_json::json!({
        "symbols": symbols,
        "program": program,
    })
}

struct Node {
    label: String,
    children: Vec<Node>,
}

impl Node {
    fn leaf(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    fn branch(label: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            label: label.into(),
            children,
        }
    }
}

/// `is_last` is `None` for a root, which is printed without a connector.
fn render_node(node: &Node, prefix: &str, is_last: Option<bool>, lines: &mut Vec<String>) {
    let child_prefix = match is_last {
        None => {
            lines.push(node.label.clone());
            String::new()
        }
        Some(last) => {
            let connector = if last { LAST_BRANCH } else { BRANCH };
            lines.push(format!("{prefix}{connector}{}", node.label));
            format!("{prefix}{}", if last { SPACE } else { VERTICAL })
        }
    };
    let count = node.children.len();
    for (i, child) in node.children.iter().enumerate() {
        render_node(child, &child_prefix, Some(i + 1 == count), lines);
    }
}

fn symbol_tree(symbols: &SymbolTable) -> Node {
    if symbols.is_empty() {
        return Node::leaf("Symbols: (empty)");
    }
    let scopes = symbols
        .scopes()
        .map(|scope| {
            let name = if scope.name == MODULE_SCOPE {
                "<module>".to_string()
            } else {
                format!("def {}", scope.name)
            };
            let entries = scope
                .symbols
                .iter()
                .map(|s| Node::leaf(format!("{}: {} @{}", s.name, s.ty, s.span)))
                .collect();
            Node::branch(name, entries)
        })
        .collect();
    Node::branch("Symbols", scopes)
}

fn program_tree(program: &Program) -> Node {
    if program.is_empty() {
        return Node::leaf("Program: (empty)");
    }
    let mut children: Vec<Node> = program.functions.iter().map(function_node).collect();
    children.extend(block(&program.body));
    Node::branch("Program", children)
}

fn function_node(function: &Function) -> Node {
    let params: Vec<String> = function
        .params
        .iter()
        .map(|p| format!("{}: {}", p.name, p.ty))
        .collect();
    Node::branch(
        format!(
            "def {}({}) -> {}",
            function.name,
            params.join(", "),
            function.return_type
        ),
        block(&function.body),
    )
}

fn block(body: &[Stmt]) -> Vec<Node> {
    let mut nodes = Vec::with_capacity(body.len());
    for stmt in body {
        statement(stmt, &mut nodes);
    }
    nodes
}

/// `if`, each `elif` and the `else` become sibling nodes.
fn if_nodes(stmt: &IfStmt, nodes: &mut Vec<Node>) {
    for (i, arm) in stmt.arms.iter().enumerate() {
        let keyword = if i == 0 { "if" } else { "elif" };
        nodes.push(Node::branch(
            format!("{keyword} {}", expression(&arm.condition)),
            block(&arm.body),
        ));
    }
    if let Some(body) = &stmt.else_block {
        nodes.push(Node::branch("else", block(body)));
    }
}

fn statement(stmt: &Stmt, nodes: &mut Vec<Node>) {
    let node = match stmt {
        Stmt::Assign {
            target,
            annotation: Some(ty),
            value,
            ..
        } => Node::leaf(format!("{target}: {ty} = {}", expression(value))),
        Stmt::Assign { target, value, .. } => {
            Node::leaf(format!("{target} = {}", expression(value)))
        }
        Stmt::Declare { name, ty, .. } => Node::leaf(format!("{name}: {ty}")),
        Stmt::Return { value: Some(v), .. } => Node::leaf(format!("return {}", expression(v))),
        Stmt::Return { value: None, .. } => Node::leaf("return"),
        Stmt::While {
            condition, body, ..
        } => Node::branch(format!("while {}", expression(condition)), block(body)),
        Stmt::If(chain) => {
            if_nodes(chain, nodes);
            return;
        }
        Stmt::Print { args, .. } => {
            let args: Vec<String> = args.iter().map(expression).collect();
            Node::leaf(format!("print({})", args.join(", ")))
        }
        Stmt::Call(call) => Node::leaf(call_text(call)),
    };
    nodes.push(node);
}

fn call_text(call: &Call) -> String {
    let args: Vec<String> = call.args.iter().map(operand).collect();
    format!("{}({})", call.name, args.join(", "))
}

/// Source spelling of an expression.
fn expression(expr: &Expr) -> String {
    match expr {
        Expr::Call(call) => call_text(call),
        Expr::Operation(op) => {
            let mut parts = Vec::new();
            if op.negated {
                parts.push("not".to_string());
            }
            parts.push(operand(&op.first));
            for (bin, rhs) in &op.rest {
                parts.push(bin.source_str().to_string());
                parts.push(operand(rhs));
            }
            parts.join(" ")
        }
    }
}

fn operand(operand: &Operand) -> String {
    match operand {
        Operand::Ident(name) => name.clone(),
        Operand::Literal(Literal::Int(v)) => v.to_string(),
        Operand::Literal(Literal::Float(v)) => float_text(*v),
        Operand::Literal(Literal::Bool(true)) => "True".to_string(),
        Operand::Literal(Literal::Bool(false)) => "False".to_string(),
    }
}
