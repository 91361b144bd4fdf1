//! History-aware type checking for interactive Python sessions.

mod checker;
mod control;
mod error;
mod extension;
pub mod hooks;
mod history;
pub mod preprocess;
mod remap;
mod reveal;
mod rewrite;
mod serialize;
mod session;
mod symbols;
mod syntax;

pub use checker::{checker_args, CheckerOutput, MypyChecker, TypeChecker, ARGUMENT_ERROR_STATUS, BASELINE_FLAGS};
pub use control::VERSION;
pub use error::CellCheckError;
pub use extension::{CellCheckExtension, MAGIC_NAME};
pub use hooks::{CellInfo, EventHooks, HookId, HostShell};
pub use history::{HistoryBuffer, DEFAULT_PRELUDE};
pub use remap::{parse_diagnostic, remap_diagnostics, shift_line_references, RawDiagnostic};
pub use reveal::strip_reveal_type;
pub use rewrite::prune_history;
pub use session::{CheckSession, SessionConfig};
pub use symbols::SymbolExtractor;
pub use syntax::PythonSyntax;

/// Result type for cellcheck operations.
pub type Result<T> = std::result::Result<T, CellCheckError>;
