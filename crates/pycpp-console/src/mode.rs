//! Output mode detection.
//!
//! # Detection Priority
//!
//! First match wins:
//!
//! 1. `PYCPP_PLAIN=1` - Force plain output
//! 2. `PYCPP_JSON=1` - Force JSON output
//! 3. `PYCPP_RICH=1` - Force rich output, even under an agent
//! 4. `NO_COLOR` - Standard env var for disabling colors
//! 5. `CI=true` - CI environment
//! 6. `TERM=dumb` - Dumb terminal
//! 7. Agent env vars - coding assistants that read our output
//! 8. stdout is not a terminal
//! 9. Default: Rich output

use std::env;
use std::io::IsTerminal;

pub const PLAIN_ENV: &str = "PYCPP_PLAIN";
pub const JSON_ENV: &str = "PYCPP_JSON";
pub const RICH_ENV: &str = "PYCPP_RICH";

const AGENT_MARKERS: &[&str] = &[
    "CLAUDE_CODE",
    "CODEX_CLI",
    "CODEX_SESSION",
    "CURSOR_SESSION",
    "CURSOR_EDITOR",
    "AIDER_MODEL",
    "AIDER_REPO",
    "AGENT_MODE",
    "AI_AGENT",
    "GITHUB_COPILOT",
    "COPILOT_SESSION",
    "CONTINUE_SESSION",
    "CODY_AGENT",
    "WINDSURF_SESSION",
    "GEMINI_CLI",
];

/// How console output is formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum OutputMode {
    /// No ANSI codes. Machine-parseable.
    Plain,
    /// Colours and source excerpts for an interactive terminal.
    #[default]
    Rich,
    /// JSON documents for tool integrations.
    Json,
}

impl OutputMode {
    /// Detect the mode from the process environment and stdout.
    #[must_use]
    pub fn detect() -> Self {
        Self::detect_from(|name| env::var(name).ok(), std::io::stdout().is_terminal())
    }

    /// Detection against an arbitrary variable lookup, for callers that
    /// already hold the environment (and for tests).
    pub fn detect_from<F>(lookup: F, is_terminal: bool) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let truthy = |name: &str| lookup(name).is_some_and(|v| is_truthy(&v));

        if truthy(PLAIN_ENV) {
            return Self::Plain;
        }
        if truthy(JSON_ENV) {
            return Self::Json;
        }
        if truthy(RICH_ENV) {
            return Self::Rich;
        }

        // https://no-color.org/
        if lookup("NO_COLOR").is_some() {
            return Self::Plain;
        }
        if truthy("CI") {
            return Self::Plain;
        }
        if lookup("TERM").is_some_and(|t| t == "dumb") {
            return Self::Plain;
        }
        if AGENT_MARKERS.iter().any(|var| lookup(var).is_some()) {
            return Self::Plain;
        }
        if !is_terminal {
            return Self::Plain;
        }

        Self::Rich
    }

    /// Whether a known coding agent is driving this process.
    #[must_use]
    pub fn is_agent_environment() -> bool {
        AGENT_MARKERS.iter().any(|var| env::var(var).is_ok())
    }

    #[must_use]
    pub const fn supports_ansi(&self) -> bool {
        matches!(self, Self::Rich)
    }

    #[must_use]
    pub const fn is_structured(&self) -> bool {
        matches!(self, Self::Json)
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Rich => "rich",
            Self::Json => "json",
        }
    }
}

impl std::fmt::Display for OutputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recognizes `1`, `true`, `yes`, `on` (case-insensitive).
fn is_truthy(value: &str) -> bool {
    let v = value.to_lowercase();
    v == "1" || v == "true" || v == "yes" || v == "on"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn detect(vars: &[(&str, &str)], tty: bool) -> OutputMode {
        let env: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        OutputMode::detect_from(|name| env.get(name).cloned(), tty)
    }

    #[test]
    fn test_default_is_rich() {
        assert_eq!(OutputMode::default(), OutputMode::Rich);
        assert_eq!(detect(&[], true), OutputMode::Rich);
    }

    #[test]
    fn test_explicit_overrides() {
        assert_eq!(detect(&[("PYCPP_PLAIN", "1")], true), OutputMode::Plain);
        assert_eq!(detect(&[("PYCPP_JSON", "true")], true), OutputMode::Json);
        assert_eq!(detect(&[("PYCPP_RICH", "yes")], false), OutputMode::Rich);
    }

    #[test]
    fn test_plain_takes_priority_over_json() {
        let vars = [("PYCPP_PLAIN", "1"), ("PYCPP_JSON", "1")];
        assert_eq!(detect(&vars, true), OutputMode::Plain);
    }

    #[test]
    fn test_falsy_override_is_ignored() {
        assert_eq!(detect(&[("PYCPP_PLAIN", "0")], true), OutputMode::Rich);
    }

    #[test]
    fn test_rich_override_beats_agent() {
        let vars = [("CLAUDE_CODE", "1"), ("PYCPP_RICH", "1")];
        assert_eq!(detect(&vars, true), OutputMode::Rich);
    }

    #[test]
    fn test_environment_causes_plain() {
        assert_eq!(detect(&[("NO_COLOR", "")], true), OutputMode::Plain);
        assert_eq!(detect(&[("CI", "true")], true), OutputMode::Plain);
        assert_eq!(detect(&[("TERM", "dumb")], true), OutputMode::Plain);
        assert_eq!(detect(&[("CURSOR_SESSION", "x")], true), OutputMode::Plain);
    }

    #[test]
    fn test_pipe_causes_plain() {
        assert_eq!(detect(&[("TERM", "xterm")], false), OutputMode::Plain);
    }

    #[test]
    fn test_mode_predicates() {
        assert!(OutputMode::Rich.supports_ansi());
        assert!(!OutputMode::Plain.supports_ansi());
        assert!(OutputMode::Json.is_structured());
        assert_eq!(OutputMode::Json.to_string(), "json");
    }
}
