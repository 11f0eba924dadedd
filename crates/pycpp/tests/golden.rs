mod fixtures;

use fixtures::*;
use pycpp::console::{Diagnostic, OutputMode, render_tree};
use pycpp::{TranspileConfig, Transpiler, transpile};

fn emit(stem: &str) {
    let source = load_golden(&format!("{stem}.py"));
    let cpp = transpile(&source).unwrap_or_else(|e| panic!("{stem}.py: {e}"));
    assert_golden(&format!("{stem}.cpp"), &cpp);
}

fn diagnose(stem: &str) {
    let source = load_golden(&format!("{stem}.py"));
    let err = transpile(&source).expect_err("source should be rejected");
    let plain = Diagnostic::from_error(&err)
        .with_source(&source)
        .render(OutputMode::Plain);
    assert_golden(&format!("{stem}.txt"), &plain);
}

// ==================== Emitted C++ ====================

#[test]
fn test_complex3() {
    emit("complex3");
}

#[test]
fn test_complex3_is_thirty_nine_lines() {
    let cpp = transpile(&load_golden("complex3.py")).unwrap();
    assert_eq!(cpp.lines().count(), 39);
    assert!(!cpp.contains('\t'));
    assert!(cpp.ends_with("    return 0;\n}\n"));
    assert_eq!(cpp.matches("    float z;\n").count(), 2);
}

#[test]
fn test_empty() {
    emit("empty");
}

#[test]
fn test_functions() {
    emit("functions");
}

#[test]
fn test_control_flow() {
    emit("control_flow");
}

#[test]
fn test_operators() {
    emit("operators");
}

#[test]
fn test_scopes() {
    emit("scopes");
}

#[test]
fn test_spaces_and_tabs_agree() {
    let tabs = load_golden("complex3.py");
    let spaces = tabs.replace('\t', "    ");
    let config = TranspileConfig::default().tab_width(4);
    assert_eq!(
        Transpiler::new(config).transpile(&spaces).unwrap(),
        load_golden("complex3.cpp")
    );
}

// ==================== Inspection and diagnostics ====================

#[test]
fn test_complex3_tree() {
    let (symbols, program) = Transpiler::default()
        .parse(&load_golden("complex3.py"))
        .unwrap();
    assert_golden("complex3.tree.txt", &render_tree(&symbols, &program));
}

#[test]
fn test_type_conflict_diagnostic() {
    diagnose("type_conflict");
}

#[test]
fn test_bad_char_diagnostic() {
    diagnose("bad_char");
}
