//! Variable declarations grouped by scope.
//!
//! The module scope is named `""`; every function body gets a scope named
//! after the function. Declarations are kept in source order and repeats are
//! kept as separate entries, so the generator declares a variable once per
//! annotation in the source.

use serde::{Deserialize, Serialize};

use crate::token::Span;
use crate::types::VarType;

/// Name of the module-level scope.
pub const MODULE_SCOPE: &str = "";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    pub ty: VarType,
    pub span: Span,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    pub name: String,
    pub symbols: Vec<Symbol>,
}

/// A declaration that clashes with an earlier one of a different type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conflict {
    pub previous: VarType,
    pub previous_span: Span,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a declaration of `name` in `scope`.
    ///
    /// Redeclaring with the same type appends another entry. Redeclaring with
    /// a different type is rejected and leaves the table unchanged.
    pub fn declare(
        &mut self,
        scope: &str,
        name: &str,
        ty: VarType,
        span: Span,
    ) -> Result<(), Conflict> {
        let entry = self.scope_mut(scope);
        if let Some(prev) = entry.symbols.iter().find(|s| s.name == name && s.ty != ty) {
            return Err(Conflict {
                previous: prev.ty,
                previous_span: prev.span,
            });
        }
        entry.symbols.push(Symbol {
            name: name.to_string(),
            ty,
            span,
        });
        tracing::trace!(scope = scope, name = name, ty = %ty, "declared variable");
        Ok(())
    }

    pub fn scope(&self, name: &str) -> Option<&Scope> {
        self.scopes.iter().find(|s| s.name == name)
    }

    /// Declarations of `scope`, empty if it has none.
    pub fn symbols(&self, scope: &str) -> &[Symbol] {
        match self.scope(scope) {
            Some(s) => &s.symbols,
            None => &[],
        }
    }

    pub fn scopes(&self) -> impl Iterator<Item = &Scope> {
        self.scopes.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    fn scope_mut(&mut self, name: &str) -> &mut Scope {
        let index = match self.scopes.iter().position(|s| s.name == name) {
            Some(index) => index,
            None => {
                self.scopes.push(Scope {
                    name: name.to_string(),
                    symbols: Vec::new(),
                });
                self.scopes.len() - 1
            }
        };
        &mut self.scopes[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(line: usize) -> Span {
        Span::new(line, 1)
    }

    #[test]
    fn same_type_redeclaration_is_kept_twice() {
        let mut table = SymbolTable::new();
        table.declare(MODULE_SCOPE, "z", VarType::Float, at(1)).unwrap();
        table.declare(MODULE_SCOPE, "z", VarType::Float, at(2)).unwrap();
        let names: Vec<_> = table
            .symbols(MODULE_SCOPE)
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, ["z", "z"]);
    }

    #[test]
    fn conflicting_redeclaration_is_rejected() {
        let mut table = SymbolTable::new();
        table.declare("f", "x", VarType::Int, at(4)).unwrap();
        let err = table.declare("f", "x", VarType::Bool, at(5)).unwrap_err();
        assert_eq!(err.previous, VarType::Int);
        assert_eq!(err.previous_span, at(4));
        assert_eq!(table.symbols("f").len(), 1);
    }

    #[test]
    fn scopes_are_independent() {
        let mut table = SymbolTable::new();
        table.declare(MODULE_SCOPE, "x", VarType::Int, at(1)).unwrap();
        table.declare("g", "x", VarType::Float, at(2)).unwrap();
        assert_eq!(table.symbols("g")[0].ty, VarType::Float);
        assert_eq!(table.symbols(MODULE_SCOPE)[0].ty, VarType::Int);
        assert!(table.symbols("missing").is_empty());
        let order: Vec<_> = table.scopes().map(|s| s.name.as_str()).collect();
        assert_eq!(order, ["", "g"]);
    }
}
