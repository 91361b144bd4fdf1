//! A type-checking session: history buffer, symbol registry and checker.

use crate::checker::{checker_args, ARGUMENT_ERROR_STATUS};
use crate::history::{HistoryBuffer, DEFAULT_PRELUDE};
use crate::preprocess;
use crate::remap::remap_diagnostics;
use crate::rewrite::prune_history;
use crate::{CellCheckError, MypyChecker, PythonSyntax, Result, SymbolExtractor, TypeChecker};
use cellcheck_types::{CheckOutcome, CheckReport, SessionState, SymbolSet};
use std::path::PathBuf;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Configuration for a new session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Checker executable, used when no checker is injected
    pub checker_program: PathBuf,
    /// Flags appended after the baseline ones
    pub extra_flags: Vec<String>,
    pub enabled: bool,
    pub debug: bool,
    /// Initial history buffer contents
    pub prelude: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            checker_program: PathBuf::from("mypy"),
            extra_flags: Vec::new(),
            enabled: true,
            debug: false,
            prelude: DEFAULT_PRELUDE.to_string(),
        }
    }
}

/// Owns everything one interactive session needs to check fragments.
///
/// Fragments are processed strictly one at a time. The registry always
/// mirrors the declarations still live in the history buffer.
pub struct CheckSession {
    pub(crate) id: Uuid,
    pub(crate) state: SessionState,
    pub(crate) extra_flags: Vec<String>,
    history: HistoryBuffer,
    known: SymbolSet,
    syntax: PythonSyntax,
    checker: Box<dyn TypeChecker>,
    last_outcome: Option<CheckOutcome>,
    fragments_checked: usize,
}

impl CheckSession {
    /// Create a session that runs the configured checker executable.
    pub fn new(config: SessionConfig) -> Result<Self> {
        let checker = MypyChecker::new(config.checker_program.clone());
        Self::with_checker(config, Box::new(checker))
    }

    /// Create a session around an already constructed checker.
    pub fn with_checker(config: SessionConfig, checker: Box<dyn TypeChecker>) -> Result<Self> {
        let session = Self {
            id: Uuid::new_v4(),
            state: SessionState {
                enabled: config.enabled,
                debug: config.debug,
            },
            extra_flags: config.extra_flags,
            history: HistoryBuffer::new(&config.prelude),
            known: SymbolSet::new(),
            syntax: PythonSyntax::new()?,
            checker,
            last_outcome: None,
            fragments_checked: 0,
        };
        info!(target: "cellcheck::session", "Session {} started ({})", session.id, session.state);
        Ok(session)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn extra_flags(&self) -> &[String] {
        &self.extra_flags
    }

    pub fn history(&self) -> &str {
        self.history.as_str()
    }

    /// Names currently declared in the history buffer.
    pub fn known_symbols(&self) -> &SymbolSet {
        &self.known
    }

    pub fn last_outcome(&self) -> Option<&CheckOutcome> {
        self.last_outcome.as_ref()
    }

    /// Remove and return the outcome of the most recent fragment.
    pub fn take_last_outcome(&mut self) -> Option<CheckOutcome> {
        self.last_outcome.take()
    }

    /// Check a fragment before the host executes it.
    ///
    /// Never fails: faults are logged and reported as
    /// [`CheckOutcome::Faulted`], leaving the session usable.
    pub fn check_fragment(&mut self, raw: &str) -> CheckOutcome {
        let outcome = if !self.state.enabled {
            CheckOutcome::Disabled
        } else {
            match self.run_pipeline(raw) {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(
                        target: "cellcheck::critical",
                        "Error in type checker, you can turn it off with '%cellcheck Off'"
                    );
                    if self.state.debug {
                        debug!(target: "cellcheck::debug", "Error was fatal: please report it\n{}", e);
                    }
                    CheckOutcome::Faulted {
                        message: e.to_string(),
                    }
                }
            }
        };
        self.last_outcome = Some(outcome.clone());
        outcome
    }

    fn run_pipeline(&mut self, raw: &str) -> Result<CheckOutcome> {
        if preprocess::is_block_directive(raw) {
            return Ok(CheckOutcome::BlockDirective);
        }

        let fragment = preprocess::neutralize(raw);
        let tree = match self.syntax.parse(&fragment) {
            Ok(tree) => tree,
            Err(CellCheckError::Syntax { line }) => {
                if self.state.debug {
                    debug!(target: "cellcheck::debug", "Syntax error in cell:\n{}", fragment);
                }
                return Ok(CheckOutcome::SyntaxError { line });
            }
            Err(e) => return Err(e),
        };

        let introduced = SymbolExtractor::new().extract(tree.root_node(), &fragment);
        self.consolidate(&introduced);

        let offset = self.history.line_count();
        self.history.append_fragment(&fragment);

        let args = checker_args(&self.extra_flags);
        if self.state.debug {
            debug!(target: "cellcheck::debug", "Program before typechecking:\n{}", self.history.as_str());
            debug!(target: "cellcheck::debug", "Args passed to checker:\n{:?}", args);
        }

        let output = self.checker.run(&args, self.history.as_str())?;
        if self.state.debug {
            debug!(target: "cellcheck::debug", "Checker result:\n{:?}", output);
        }

        let diagnostics = remap_diagnostics(&output.stdout, offset);
        for diagnostic in &diagnostics {
            error!(target: "cellcheck::diagnostics", "{}", diagnostic);
        }

        let mut flags_reset = false;
        let checker_stderr = if output.stderr.trim().is_empty() {
            None
        } else {
            error!(target: "cellcheck::checker", "{}", output.stderr);
            if output.status == ARGUMENT_ERROR_STATUS {
                error!(
                    target: "cellcheck::checker",
                    "There is probably an error in the extra arguments that were provided via mypy-options: '{:?}'",
                    self.extra_flags
                );
                error!(target: "cellcheck::checker", "So we will disable the extra arguments.");
                self.extra_flags.clear();
                flags_reset = true;
            }
            Some(output.stderr)
        };

        self.fragments_checked += 1;
        if self.state.debug {
            debug!(target: "cellcheck::debug", "Finished type checking");
        }

        Ok(CheckOutcome::Checked(CheckReport {
            session_id: self.id,
            offset,
            diagnostics,
            checker_stderr,
            status: output.status,
            flags_reset,
            checked_at: chrono::Utc::now(),
        }))
    }

    /// Prune declarations superseded by `introduced`, then record the new names.
    fn consolidate(&mut self, introduced: &SymbolSet) {
        let purge = self.known.superseded_by(introduced);

        if !purge.is_empty() {
            match prune_history(&mut self.syntax, self.history.as_str(), &purge) {
                Ok(text) => {
                    self.history.replace(text);
                    // Remove first: a name may move to another category.
                    self.known.remove_all(&purge);
                }
                Err(e) => {
                    if self.state.debug {
                        error!(target: "cellcheck::rewrite", "{} in old cells:\n{}", e, self.history.as_str());
                    } else {
                        error!(target: "cellcheck::rewrite", "Syntax error in old cells");
                    }
                }
            }
        }

        self.known.extend_from(introduced);
    }

    /// Tear the session down, dropping its history.
    pub fn close(self) {
        info!(
            target: "cellcheck::session",
            "Session {} closed after {} checked fragments ({} live names)",
            self.id,
            self.fragments_checked,
            self.known.len()
        );
    }
}
