//! The `%cellcheck` control surface.

use crate::CheckSession;
use cellcheck_types::{ControlCommand, ControlParseError};
use tracing::{error, info};

/// Crate version reported by `%cellcheck -v`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

impl CheckSession {
    /// Parse and apply one control line (the text after the command name).
    pub fn handle_control_line(&mut self, line: &str) -> Result<(), ControlParseError> {
        match line.parse::<ControlCommand>() {
            Ok(command) => {
                self.apply_command(command);
                Ok(())
            }
            Err(e) => {
                error!(target: "cellcheck::control", "{}", e);
                Err(e)
            }
        }
    }

    pub fn apply_command(&mut self, command: ControlCommand) {
        match command {
            ControlCommand::State => {
                info!(target: "cellcheck::control", "State: {}", self.state);
            }
            ControlCommand::Version => {
                info!(target: "cellcheck::control", "Version {}", VERSION);
            }
            ControlCommand::Enable => self.state.enabled = true,
            ControlCommand::Disable => self.state.enabled = false,
            ControlCommand::DebugOn => self.state.debug = true,
            ControlCommand::DebugOff => self.state.debug = false,
            ControlCommand::CheckerFlags(flags) => {
                info!(target: "cellcheck::control", "Extra checker flags: {:?}", flags);
                self.extra_flags = flags;
            }
        }
    }
}
