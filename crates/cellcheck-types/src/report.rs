//! Per-fragment check results.

use crate::CellDiagnostic;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Result of running the external checker for one fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckReport {
    pub session_id: Uuid,
    /// Line count of the history buffer before the fragment was appended
    pub offset: usize,
    /// Diagnostics belonging to the fragment, already remapped
    pub diagnostics: Vec<CellDiagnostic>,
    /// Checker error stream, passed through unmodified
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checker_stderr: Option<String>,
    pub status: i32,
    /// Extra checker flags were discarded after an argument error
    #[serde(default)]
    pub flags_reset: bool,
    pub checked_at: DateTime<Utc>,
}

impl CheckReport {
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }
}

/// What happened to a fragment submitted to a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CheckOutcome {
    /// Checking is switched off
    Disabled,
    /// Block-level front-end directive, never checked
    BlockDirective,
    /// Fragment did not parse after neutralization
    SyntaxError { line: usize },
    /// Checker ran
    Checked(CheckReport),
    /// Unexpected fault inside the pipeline
    Faulted { message: String },
}

impl CheckOutcome {
    pub fn report(&self) -> Option<&CheckReport> {
        match self {
            CheckOutcome::Checked(report) => Some(report),
            _ => None,
        }
    }

    pub fn diagnostics(&self) -> &[CellDiagnostic] {
        self.report().map(|r| r.diagnostics.as_slice()).unwrap_or_default()
    }
}
