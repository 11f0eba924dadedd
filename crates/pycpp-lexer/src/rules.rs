//! Token patterns.

use std::sync::OnceLock;

use pycpp_core::TokenKind;
use regex::Regex;

pub(crate) struct Rules {
    pub float: Regex,
    pub int: Regex,
    pub word: Regex,
}

/// Fixed-text tokens, longest spelling first where prefixes overlap.
pub(crate) const OPERATORS: &[(&str, TokenKind)] = &[
    ("->", TokenKind::ReturnType),
    ("==", TokenKind::IsEqual),
    ("!=", TokenKind::IsNotEqual),
    ("<=", TokenKind::IsEqualLess),
    (">=", TokenKind::IsEqualMore),
    ("<", TokenKind::IsLess),
    (">", TokenKind::IsMore),
    ("=", TokenKind::Equals),
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("*", TokenKind::Multiply),
    ("/", TokenKind::Divide),
    ("%", TokenKind::Modulo),
    ("(", TokenKind::Lp),
    (")", TokenKind::Rp),
    (":", TokenKind::Colon),
    (",", TokenKind::Comma),
];

/// Compiled patterns, anchored at the start of the remaining input.
pub(crate) fn rules() -> &'static Rules {
    static RULES: OnceLock<Rules> = OnceLock::new();
    RULES.get_or_init(|| Rules {
        float: compile(r"\A-?[0-9]+\.[0-9]+"),
        int: compile(r"\A-?[0-9]+"),
        word: compile(r"\A[A-Za-z_][A-Za-z0-9_]*"),
    })
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid token pattern {pattern}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patterns_anchor_at_start() {
        let rules = rules();
        assert_eq!(rules.float.find("3.25 + x").map(|m| m.as_str()), Some("3.25"));
        assert!(rules.float.find("x 3.25").is_none());
        assert_eq!(rules.int.find("-12)").map(|m| m.as_str()), Some("-12"));
        assert_eq!(rules.word.find("a_1b+").map(|m| m.as_str()), Some("a_1b"));
        assert!(rules.word.find("1abc").is_none());
    }

    #[test]
    fn two_character_operators_come_first() {
        let position = |text: &str| OPERATORS.iter().position(|(t, _)| *t == text).unwrap();
        assert!(position("->") < position("-"));
        assert!(position("==") < position("="));
        assert!(position(">=") < position(">"));
        assert!(position("<=") < position("<"));
    }
}
