//! Console output for pycpp.
//!
//! Everything here renders to `String`; callers decide where it goes. The
//! [`OutputMode`] picks between plain text for agents and pipes, ANSI
//! colour for terminals, and JSON for tools.

mod diagnostic;
mod inspect;
mod mode;
mod style;

pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use inspect::{ast_json, render_tokens, render_tree};
pub use mode::OutputMode;
