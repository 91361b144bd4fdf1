//! Error types for cellcheck.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CellCheckError {
    #[error("Syntax error at line {line}")]
    Syntax { line: usize },

    #[error("Syntax error in history buffer at line {line}")]
    HistorySyntax { line: usize },

    #[error("Failed to load Python grammar: {0}")]
    Grammar(String),

    #[error("Type checker could not be started: {0}")]
    CheckerSpawn(String),

    #[error("Session is busy with another fragment")]
    SessionBusy,
}
