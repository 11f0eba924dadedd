//! Source-level types and their C++ spellings.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::token::TokenKind;

/// Type annotation on a variable or parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarType {
    Int,
    Float,
    Bool,
}

impl VarType {
    /// Map an annotation token to its type.
    pub const fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Int => Some(VarType::Int),
            TokenKind::Float => Some(VarType::Float),
            TokenKind::Bool => Some(VarType::Bool),
            _ => None,
        }
    }

    /// The C++ type name.
    pub const fn cpp_name(self) -> &'static str {
        match self {
            VarType::Int => "int",
            VarType::Float => "float",
            VarType::Bool => "bool",
        }
    }

    /// The annotation as written in the source.
    pub const fn source_name(self) -> &'static str {
        match self {
            VarType::Int => "int",
            VarType::Float => "float",
            VarType::Bool => "bool",
        }
    }
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.source_name())
    }
}

/// Declared return type of a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnType {
    Value(VarType),
    /// `-> None`, emitted as `void`.
    None,
}

impl ReturnType {
    pub const fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::None => Some(ReturnType::None),
            other => match VarType::from_token(other) {
                Some(ty) => Some(ReturnType::Value(ty)),
                None => None,
            },
        }
    }

    pub const fn cpp_name(self) -> &'static str {
        match self {
            ReturnType::Value(ty) => ty.cpp_name(),
            ReturnType::None => "void",
        }
    }
}

impl fmt::Display for ReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnType::Value(ty) => write!(f, "{ty}"),
            ReturnType::None => f.write_str("None"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpp_names() {
        assert_eq!(VarType::Float.cpp_name(), "float");
        assert_eq!(ReturnType::Value(VarType::Bool).cpp_name(), "bool");
        assert_eq!(ReturnType::None.cpp_name(), "void");
    }

    #[test]
    fn from_tokens() {
        assert_eq!(VarType::from_token(TokenKind::Int), Some(VarType::Int));
        assert_eq!(VarType::from_token(TokenKind::None), None);
        assert_eq!(ReturnType::from_token(TokenKind::None), Some(ReturnType::None));
        assert_eq!(
            ReturnType::from_token(TokenKind::Float),
            Some(ReturnType::Value(VarType::Float))
        );
        assert_eq!(ReturnType::from_token(TokenKind::Identifier), None);
    }
}
