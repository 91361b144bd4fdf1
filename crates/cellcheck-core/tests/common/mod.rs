//! Common test utilities for integration tests.
#![allow(dead_code)]

use cellcheck_core::{CellCheckError, CheckSession, CheckerOutput, Result, SessionConfig, TypeChecker};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// One recorded checker invocation.
#[derive(Debug, Clone)]
pub struct CheckerCall {
    pub args: Vec<String>,
    pub program: String,
}

/// A fake checker that records its calls and replays queued responses.
///
/// Clones share state, so a test can keep one handle after boxing another.
#[derive(Clone, Default)]
pub struct ScriptedChecker {
    calls: Rc<RefCell<Vec<CheckerCall>>>,
    responses: Rc<RefCell<VecDeque<Result<CheckerOutput>>>>,
}

impl ScriptedChecker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the output of the next call. Unscripted calls report nothing.
    pub fn respond(&self, output: CheckerOutput) {
        self.responses.borrow_mut().push_back(Ok(output));
    }

    pub fn fail_next(&self, error: CellCheckError) {
        self.responses.borrow_mut().push_back(Err(error));
    }

    pub fn calls(&self) -> Vec<CheckerCall> {
        self.calls.borrow().clone()
    }

    pub fn boxed(&self) -> Box<dyn TypeChecker> {
        Box::new(self.clone())
    }
}

impl TypeChecker for ScriptedChecker {
    fn run(&mut self, args: &[String], program: &str) -> Result<CheckerOutput> {
        self.calls.borrow_mut().push(CheckerCall {
            args: args.to_vec(),
            program: program.to_string(),
        });
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(CheckerOutput::default()))
    }
}

/// Checker output with a single error at absolute `line`.
pub fn error_at(line: usize, message: &str) -> CheckerOutput {
    CheckerOutput {
        stdout: format!(
            "<string>:{}: error: {}\nFound 1 error in 1 file (checked 1 source file)\n",
            line, message
        ),
        stderr: String::new(),
        status: 1,
    }
}

/// A session with the default prelude driven by `checker`.
pub fn session_with(checker: &ScriptedChecker) -> CheckSession {
    CheckSession::with_checker(SessionConfig::default(), checker.boxed())
        .unwrap_or_else(|e| panic!("Failed to create session: {}", e))
}

/// Number of top-level statements in `history` that start with `prefix`.
pub fn count_statements(history: &str, prefix: &str) -> usize {
    history.lines().filter(|line| line.starts_with(prefix)).count()
}
