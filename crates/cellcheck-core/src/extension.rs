//! Wires a [`CheckSession`] into a host shell.

use crate::hooks::{CellInfo, HookId, HostShell};
use crate::{
    strip_reveal_type, CellCheckError, CheckSession, PythonSyntax, Result, SessionConfig, TypeChecker,
    VERSION,
};
use std::cell::{Ref, RefCell, RefMut};
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;
use tracing::{error, info, warn};

/// Name the control magic is registered under.
pub const MAGIC_NAME: &str = "cellcheck";

/// A loaded extension: one session plus its host registrations.
pub struct CellCheckExtension {
    session: Rc<RefCell<CheckSession>>,
    pre_run: HookId,
    transformer: HookId,
}

impl CellCheckExtension {
    /// Load with a session that runs the configured checker executable.
    pub fn load(shell: &mut impl HostShell, config: SessionConfig) -> Result<Self> {
        let session = CheckSession::new(config)?;
        Self::install(shell, session)
    }

    pub fn load_with_checker(
        shell: &mut impl HostShell,
        config: SessionConfig,
        checker: Box<dyn TypeChecker>,
    ) -> Result<Self> {
        let session = CheckSession::with_checker(config, checker)?;
        Self::install(shell, session)
    }

    fn install(shell: &mut impl HostShell, session: CheckSession) -> Result<Self> {
        info!(target: "cellcheck::startup", "cellcheck version {}", VERSION);
        let session = Rc::new(RefCell::new(session));

        let hook_session = Rc::clone(&session);
        let pre_run = shell.register_pre_run(Box::new(move |info: &CellInfo<'_>| {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| match hook_session.try_borrow_mut() {
                Ok(mut session) => {
                    session.check_fragment(info.raw_cell);
                }
                Err(_) => warn!(target: "cellcheck::session", "{}", CellCheckError::SessionBusy),
            }));
            if outcome.is_err() {
                error!(
                    target: "cellcheck::critical",
                    "Error in type checker, you can turn it off with '%cellcheck Off'"
                );
            }
        }));

        let mut syntax = PythonSyntax::new()?;
        let transformer =
            shell.register_transformer(Box::new(move |source: &str| strip_reveal_type(&mut syntax, source)));

        let magic_session = Rc::clone(&session);
        shell.register_line_magic(
            MAGIC_NAME,
            Box::new(move |line: &str| match magic_session.try_borrow_mut() {
                Ok(mut session) => {
                    // Parse errors are already logged
                    let _ = session.handle_control_line(line);
                }
                Err(_) => warn!(target: "cellcheck::control", "{}", CellCheckError::SessionBusy),
            }),
        );

        Ok(Self {
            session,
            pre_run,
            transformer,
        })
    }

    pub fn session(&self) -> Ref<'_, CheckSession> {
        self.session.borrow()
    }

    pub fn session_mut(&self) -> RefMut<'_, CheckSession> {
        self.session.borrow_mut()
    }

    /// Remove every registration and close the session.
    pub fn unload(self, shell: &mut impl HostShell) {
        shell.unregister_pre_run(self.pre_run);
        shell.unregister_transformer(self.transformer);
        shell.unregister_line_magic(MAGIC_NAME);

        match Rc::try_unwrap(self.session) {
            Ok(session) => session.into_inner().close(),
            Err(_) => warn!(target: "cellcheck::session", "Session still referenced by the host after unload"),
        }
    }
}
