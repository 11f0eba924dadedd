//! Core types for pycpp.
//!
//! This crate provides the data shared by every transpiler stage:
//!
//! - `Token`/`TokenKind` produced by the lexer
//! - `Program` and the rest of the syntax tree built by the parser
//! - `SymbolTable` holding per-scope variable declarations
//! - `VarType`/`ReturnType` and their C++ spellings
//! - `Error` and the `Result` alias
//! - `TranspileConfig`

pub mod ast;
pub mod config;
pub mod error;
pub mod symbols;
pub mod token;
pub mod types;

pub use ast::{
    BinaryOp, Call, CondBlock, Expr, Function, IfStmt, Literal, Operand, Operation, Param,
    Program, Stmt,
};
pub use config::TranspileConfig;
pub use error::{
    ConfigError, Error, LexError, LexErrorKind, ParseError, ParseErrorKind, Result,
};
pub use symbols::{MODULE_SCOPE, Scope, Symbol, SymbolTable};
pub use token::{Span, Token, TokenKind, TokenValue, float_text};
pub use types::{ReturnType, VarType};
