//! Diagnostics reported back to the user, in fragment coordinates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Pseudo file name used when rendering a remapped diagnostic.
pub const CELL_MARKER: &str = "<cell>";

/// A checker diagnostic whose line number is relative to the fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellDiagnostic {
    /// 1-based line inside the fragment
    pub line: i64,
    /// Message text following the line number, e.g. `": error: ..."`
    pub message: String,
}

impl CellDiagnostic {
    pub fn new(line: i64, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }

    /// Severity word from a message shaped like `": error: text"`
    /// (or `":5: note: text"` when column numbers are enabled).
    pub fn severity(&self) -> Option<&str> {
        self.message
            .split(':')
            .map(str::trim)
            .find(|part| matches!(*part, "error" | "warning" | "note"))
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Some("error")
    }
}

impl fmt::Display for CellDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", CELL_MARKER, self.line, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_checker_layout() {
        let diag = CellDiagnostic::new(3, ": error: Name \"y\" is not defined  [name-defined]");
        assert_eq!(
            diag.to_string(),
            "<cell>3: error: Name \"y\" is not defined  [name-defined]"
        );
    }

    #[test]
    fn test_severity() {
        assert_eq!(CellDiagnostic::new(1, ": error: boom").severity(), Some("error"));
        assert_eq!(CellDiagnostic::new(1, ":7: note: see here").severity(), Some("note"));
        assert_eq!(CellDiagnostic::new(1, " something else").severity(), None);
        assert!(!CellDiagnostic::new(1, ": note: x").is_error());
    }
}
