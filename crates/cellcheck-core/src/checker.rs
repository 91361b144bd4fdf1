//! Invocation of the external whole-program type checker.

use crate::{CellCheckError, Result};
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

/// Flags always passed before any user-configured ones.
///
/// Redefinition must be allowed: the history buffer legitimately rebinds
/// names that a later fragment reassigns with a new type.
pub const BASELINE_FLAGS: [&str; 2] = ["--ignore-missing-imports", "--allow-redefinition"];

/// Exit status the checker uses for command-line usage errors.
pub const ARGUMENT_ERROR_STATUS: i32 = 2;

/// Raw result of one checker run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckerOutput {
    /// Diagnostics, one per line
    pub stdout: String,
    /// Errors not tied to a line of the program
    pub stderr: String,
    pub status: i32,
}

/// A synchronous whole-program type checker.
///
/// `args` holds the baseline and extra flags; `program` is the complete
/// source text to check.
pub trait TypeChecker {
    fn run(&mut self, args: &[String], program: &str) -> Result<CheckerOutput>;
}

impl<F> TypeChecker for F
where
    F: FnMut(&[String], &str) -> Result<CheckerOutput>,
{
    fn run(&mut self, args: &[String], program: &str) -> Result<CheckerOutput> {
        self(args, program)
    }
}

/// Runs `mypy` (or a compatible executable) as a child process, passing the
/// program with `-c`.
#[derive(Debug, Clone)]
pub struct MypyChecker {
    program: PathBuf,
}

impl MypyChecker {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl TypeChecker for MypyChecker {
    fn run(&mut self, args: &[String], program: &str) -> Result<CheckerOutput> {
        debug!(target: "cellcheck::checker", "Running {:?} with {:?}", self.program, args);

        let output = Command::new(&self.program)
            .args(args)
            .arg("-c")
            .arg(program)
            .output()
            .map_err(|e| CellCheckError::CheckerSpawn(format!("{:?}: {}", self.program, e)))?;

        Ok(CheckerOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            status: output.status.code().unwrap_or(-1),
        })
    }
}

/// Baseline flags followed by `extra`.
pub fn checker_args(extra: &[String]) -> Vec<String> {
    BASELINE_FLAGS
        .iter()
        .map(|f| f.to_string())
        .chain(extra.iter().cloned())
        .collect()
}
