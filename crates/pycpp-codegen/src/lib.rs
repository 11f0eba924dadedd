//! C++ code generation from the parsed program.
//!
//! The generator walks the [`Program`] and writes a single translation unit:
//! module-level functions first, then a `main` holding the module-level
//! declarations and statements.

mod expr;

pub use expr::{expression, literal, operand};

use pycpp_core::{
    Function, IfStmt, MODULE_SCOPE, Program, Stmt, SymbolTable, TranspileConfig,
};

const PRELUDE: &str = "#include <iostream>\n\n";
const MAIN_OPEN: &str = "\nint main()\n{\n";

/// Generates target source text from a parsed program.
pub trait Backend {
    /// Target language name.
    fn name(&self) -> &'static str;

    /// Generate the full translation unit.
    fn generate(&self, symbols: &SymbolTable, program: &Program) -> String;
}

/// Emits C++ that streams `print` through `std::cout`.
#[derive(Debug, Clone)]
pub struct CppGenerator {
    indent_width: usize,
}

impl Default for CppGenerator {
    fn default() -> Self {
        Self::new(&TranspileConfig::default())
    }
}

impl CppGenerator {
    pub fn new(config: &TranspileConfig) -> Self {
        Self {
            indent_width: config.indent_width,
        }
    }

    fn function(&self, out: &mut String, symbols: &SymbolTable, function: &Function) {
        let params: Vec<String> = function
            .params
            .iter()
            .map(|p| format!("{} {}", p.ty.cpp_name(), p.name))
            .collect();
        out.push_str(&format!(
            "{} {}({})\n{{\n",
            function.return_type.cpp_name(),
            function.name,
            params.join(", ")
        ));
        self.declarations(out, symbols, &function.name);
        self.block(out, &function.body, 1);
        out.push_str("}\n");
    }

    /// One `type name;` line per recorded declaration, repeats included.
    fn declarations(&self, out: &mut String, symbols: &SymbolTable, scope: &str) {
        for symbol in symbols.symbols(scope) {
            self.line(out, 1, &format!("{} {};", symbol.ty.cpp_name(), symbol.name));
        }
    }

    fn block(&self, out: &mut String, body: &[Stmt], depth: usize) {
        for stmt in body {
            self.statement(out, stmt, depth);
        }
    }

    fn statement(&self, out: &mut String, stmt: &Stmt, depth: usize) {
        match stmt {
            Stmt::Assign { target, value, .. } => {
                self.line(out, depth, &format!("{} = {};", target, expression(value)));
            }
            // Emitted with the other declarations at the top of the scope.
            Stmt::Declare { .. } => {}
            Stmt::Return { value: Some(value), .. } => {
                self.line(out, depth, &format!("return {};", expression(value)));
            }
            Stmt::Return { value: None, .. } => self.line(out, depth, "return;"),
            Stmt::While {
                condition, body, ..
            } => {
                self.line(out, depth, &format!("while({})", expression(condition)));
                self.braced(out, body, depth);
            }
            Stmt::If(stmt) => self.if_chain(out, stmt, depth),
            Stmt::Print { args, .. } => {
                let mut text = String::from("std::cout << ");
                for arg in args {
                    text.push_str(&expression(arg));
                    text.push_str(" << ");
                }
                text.push_str("std::endl;");
                self.line(out, depth, &text);
            }
            Stmt::Call(call) => {
                self.line(out, depth, &format!("{};", expr::call(call)));
            }
        }
    }

    /// `elif` arms become `else if` so the chain keeps its meaning.
    fn if_chain(&self, out: &mut String, stmt: &IfStmt, depth: usize) {
        for (i, arm) in stmt.arms.iter().enumerate() {
            let keyword = if i == 0 { "if" } else { "else if" };
            self.line(
                out,
                depth,
                &format!("{}({})", keyword, expression(&arm.condition)),
            );
            self.braced(out, &arm.body, depth);
        }
        if let Some(body) = &stmt.else_block {
            self.line(out, depth, "else");
            self.braced(out, body, depth);
        }
    }

    fn braced(&self, out: &mut String, body: &[Stmt], depth: usize) {
        self.line(out, depth, "{");
        self.block(out, body, depth + 1);
        self.line(out, depth, "}");
    }

    fn line(&self, out: &mut String, depth: usize, text: &str) {
        out.push_str(&" ".repeat(depth * self.indent_width));
        out.push_str(text);
        out.push('\n');
    }
}

impl Backend for CppGenerator {
    fn name(&self) -> &'static str {
        "c++"
    }

    #[tracing::instrument(level = "debug", skip_all, fields(functions = program.functions.len()))]
    fn generate(&self, symbols: &SymbolTable, program: &Program) -> String {
        let mut out = String::from(PRELUDE);
        for function in &program.functions {
            tracing::trace!(name = %function.name, "emitting function");
            self.function(&mut out, symbols, function);
        }
        out.push_str(MAIN_OPEN);
        self.declarations(&mut out, symbols, MODULE_SCOPE);
        self.block(&mut out, &program.body, 1);
        self.line(&mut out, 1, "return 0;");
        out.push_str("}\n");
        tracing::debug!(bytes = out.len(), "generated translation unit");
        out
    }
}

/// Generate C++ with the given configuration.
pub fn generate(symbols: &SymbolTable, program: &Program, config: &TranspileConfig) -> String {
    CppGenerator::new(config).generate(symbols, program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pycpp_parser::parse_source;

    fn emit(source: &str) -> String {
        emit_with(source, &TranspileConfig::default())
    }

    fn emit_with(source: &str, config: &TranspileConfig) -> String {
        let (symbols, program) = parse_source(source, config).unwrap();
        generate(&symbols, &program, config)
    }

    /// Body lines of `main`, without the skeleton.
    fn main_body(cpp: &str) -> Vec<String> {
        let start = cpp.find("int main()\n{\n").unwrap() + "int main()\n{\n".len();
        let end = cpp.rfind("    return 0;\n}\n").unwrap();
        cpp[start..end].lines().map(str::to_string).collect()
    }

    #[test]
    fn empty_program() {
        assert_eq!(
            emit(""),
            "#include <iostream>\n\n\nint main()\n{\n    return 0;\n}\n"
        );
    }

    #[test]
    fn assignments_and_declarations() {
        let cpp = emit("x: int = 5\ny: float\ny = 2.0\nflag: bool = False\n");
        assert_eq!(
            main_body(&cpp),
            [
                "    int x;",
                "    float y;",
                "    bool flag;",
                "    x = 5;",
                "    y = 2.0;",
                "    flag = false;",
            ]
        );
    }

    #[test]
    fn function_with_locals() {
        let source = "def area(w: float, h: float) -> float:\n\tr: float = w * h\n\treturn r\n";
        let cpp = emit(source);
        assert!(cpp.starts_with(
            "#include <iostream>\n\nfloat area(float w, float h)\n{\n    float r;\n    r = w * h;\n    return r;\n}\n\nint main()\n"
        ));
    }

    #[test]
    fn void_function_and_bare_return() {
        let cpp = emit("def stop() -> None:\n\treturn\nstop()\n");
        assert!(cpp.contains("void stop()\n{\n    return;\n}\n"));
        assert_eq!(main_body(&cpp), ["    stop();"]);
    }

    #[test]
    fn while_loop() {
        let cpp = emit("i: int = 0\nwhile i < 10:\n\ti = i + 1\n");
        assert_eq!(
            main_body(&cpp),
            [
                "    int i;",
                "    i = 0;",
                "    while(i < 10)",
                "    {",
                "        i = i + 1;",
                "    }",
            ]
        );
    }

    #[test]
    fn if_elif_else() {
        let source = "if a == 1:\n\tx = 1\nelif a == 2:\n\tx = 2\nelse:\n\tx = 3\n";
        assert_eq!(
            main_body(&emit(source)),
            [
                "    if(a == 1)",
                "    {",
                "        x = 1;",
                "    }",
                "    else if(a == 2)",
                "    {",
                "        x = 2;",
                "    }",
                "    else",
                "    {",
                "        x = 3;",
                "    }",
            ]
        );
    }

    #[test]
    fn long_elif_chain() {
        let mut source = String::from("if a == 0:\n\tx = 0\n");
        for i in 1..25_000 {
            source.push_str(&format!("elif a == {i}:\n\tx = {i}\n"));
        }
        let cpp = emit(&source);
        assert_eq!(cpp.matches("    else if(a == ").count(), 24_999);
        assert!(cpp.contains("    else if(a == 24999)\n    {\n        x = 24999;\n    }\n    return 0;\n"));
    }

    #[test]
    fn print_forms() {
        let cpp = emit("print(x, f(1), y + 1)\nprint()\n");
        assert_eq!(
            main_body(&cpp),
            [
                "    std::cout << x << f(1) << y + 1 << std::endl;",
                "    std::cout << std::endl;",
            ]
        );
    }

    #[test]
    fn operators_map_to_cpp() {
        let cpp = emit("b = not a and c or d != e\nc = x % 2 >= 1\n");
        assert_eq!(
            main_body(&cpp),
            ["    b = ! a && c || d != e;", "    c = x % 2 >= 1;"]
        );
    }

    #[test]
    fn custom_indent_width() {
        let config = TranspileConfig::default().indent_width(2);
        let cpp = emit_with("while x:\n\tx = False\n", &config);
        assert!(cpp.contains("  while(x)\n  {\n    x = false;\n  }\n  return 0;\n"));
    }

    #[test]
    fn duplicate_declarations_are_emitted_twice() {
        let cpp = emit("z: float\nz: float\n");
        assert_eq!(main_body(&cpp), ["    float z;", "    float z;"]);
    }

    #[test]
    fn backend_name() {
        assert_eq!(CppGenerator::default().name(), "c++");
    }
}
