//! Transpiler configuration.
//!
//! Values come from, in increasing priority: defaults, the `PYCPP_*`
//! environment variables, and explicit builder calls (the CLI maps its flags
//! onto the builder).

use std::env;

use crate::error::ConfigError;

/// Environment variable overriding [`TranspileConfig::indent_width`].
pub const INDENT_WIDTH_ENV: &str = "PYCPP_INDENT_WIDTH";
/// Environment variable overriding [`TranspileConfig::tab_width`].
pub const TAB_WIDTH_ENV: &str = "PYCPP_TAB_WIDTH";

const MAX_WIDTH: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranspileConfig {
    /// Spaces per nesting level in the emitted C++ (default: 4)
    pub indent_width: usize,
    /// Column multiple a tab advances to when measuring source indentation (default: 8)
    pub tab_width: usize,
}

impl Default for TranspileConfig {
    fn default() -> Self {
        Self {
            indent_width: 4,
            tab_width: 8,
        }
    }
}

impl TranspileConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by any `PYCPP_*` variables that are set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(INDENT_WIDTH_ENV) {
            config.indent_width = parse_width(INDENT_WIDTH_ENV, &raw)?;
        }
        if let Some(raw) = lookup(TAB_WIDTH_ENV) {
            config.tab_width = parse_width(TAB_WIDTH_ENV, &raw)?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Set the output indentation width.
    pub fn indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Set the source tab width.
    pub fn tab_width(mut self, width: usize) -> Self {
        self.tab_width = width;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("indent width", self.indent_width)?;
        check_range("tab width", self.tab_width)
    }
}

fn parse_width(key: &str, raw: &str) -> Result<usize, ConfigError> {
    raw.trim().parse::<usize>().map_err(|e| ConfigError {
        message: format!("{key} must be a positive integer, got {raw:?}"),
        source: Some(Box::new(e)),
    })
}

fn check_range(what: &str, value: usize) -> Result<(), ConfigError> {
    if (1..=MAX_WIDTH).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::new(format!(
            "{what} must be between 1 and {MAX_WIDTH}, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = TranspileConfig::default();
        assert_eq!(config.indent_width, 4);
        assert_eq!(config.tab_width, 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_overrides() {
        let config = TranspileConfig::new().indent_width(2).tab_width(4);
        assert_eq!(config.indent_width, 2);
        assert_eq!(config.tab_width, 4);
    }

    #[test]
    fn lookup_reads_variables() {
        let config = TranspileConfig::from_lookup(|key| match key {
            INDENT_WIDTH_ENV => Some(" 2 ".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.indent_width, 2);
        assert_eq!(config.tab_width, 8);
    }

    #[test]
    fn lookup_rejects_garbage() {
        let err = TranspileConfig::from_lookup(|key| {
            (key == TAB_WIDTH_ENV).then(|| "wide".to_string())
        })
        .unwrap_err();
        assert!(err.message.contains("PYCPP_TAB_WIDTH"));
        assert!(err.source.is_some());
    }

    #[test]
    fn zero_and_huge_widths_are_invalid() {
        assert!(TranspileConfig::new().indent_width(0).validate().is_err());
        assert!(TranspileConfig::new().tab_width(17).validate().is_err());
        assert!(TranspileConfig::new().indent_width(16).validate().is_ok());
    }
}
