//! pycpp - transpile statically annotated Python into C++.
//!
//! The source language is a small typed subset of Python: `int`, `float` and
//! `bool` variables, module-level functions, `if`/`elif`/`else`, `while`,
//! `return`, `print` and calls. Output is a single C++ translation unit whose
//! `main` holds the module-level statements.
//!
//! # Quick Start
//!
//! ```rust
//! let cpp = pycpp::transpile("x: int = 1\nprint(x)\n").unwrap();
//! assert_eq!(
//!     cpp,
//!     "#include <iostream>\n\n\nint main()\n{\n    int x;\n    x = 1;\n    std::cout << x << std::endl;\n    return 0;\n}\n"
//! );
//! ```
//!
//! # Pipeline
//!
//! - [`pycpp_lexer`]: indentation-aware tokenizer
//! - [`pycpp_parser`]: recursive-descent parser building the AST and symbol table
//! - [`pycpp_codegen`]: C++ emission
//! - [`pycpp_console`]: diagnostics and inspection views for the CLI

pub use pycpp_codegen::{Backend, CppGenerator};
pub use pycpp_core::{
    ConfigError, Error, LexError, LexErrorKind, ParseError, ParseErrorKind, Program, Result,
    Span, SymbolTable, Token, TokenKind, TranspileConfig,
};
pub use pycpp_lexer::{Lexer, tokenize};
pub use pycpp_parser::{Parser, parse_source};

pub use pycpp_console as console;

/// Runs the full pipeline with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Transpiler {
    config: TranspileConfig,
}

impl Transpiler {
    pub fn new(config: TranspileConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TranspileConfig {
        &self.config
    }

    /// Token stream of `source`.
    pub fn tokens(&self, source: &str) -> Result<Vec<Token>> {
        self.config.validate()?;
        Ok(tokenize(source, &self.config)?)
    }

    /// Symbol table and AST of `source`.
    pub fn parse(&self, source: &str) -> Result<(SymbolTable, Program)> {
        self.config.validate()?;
        parse_source(source, &self.config)
    }

    /// C++ translation of `source`.
    #[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
    pub fn transpile(&self, source: &str) -> Result<String> {
        let (symbols, program) = self.parse(source)?;
        Ok(CppGenerator::new(&self.config).generate(&symbols, &program))
    }
}

/// Transpile with the default configuration.
pub fn transpile(source: &str) -> Result<String> {
    Transpiler::default().transpile(source)
}

/// Commonly used items.
pub mod prelude {
    pub use crate::{Backend, Error, Result, TranspileConfig, Transpiler, transpile};
}
