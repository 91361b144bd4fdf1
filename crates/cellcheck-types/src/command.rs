//! The `%cellcheck` control command vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Token that forwards the rest of the line as extra checker flags.
pub const OPTIONS_TOKEN: &str = "mypy-options";

/// Every accepted argument, in the order they are listed to the user.
pub const VALID_ARGUMENTS: [&str; 7] = [
    "",
    "-v",
    "On",
    "Off",
    "DebugOn",
    "DebugOff",
    "mypy-options OPTIONS",
];

/// A parsed control command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlCommand {
    /// Report enabled/debug state
    State,
    /// Report the version
    Version,
    Enable,
    Disable,
    DebugOn,
    DebugOff,
    /// Replace the extra checker flags (empty clears them)
    CheckerFlags(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown argument '{argument}'\n Valid arguments: {valid:?}")]
pub struct ControlParseError {
    pub argument: String,
    pub valid: Vec<String>,
}

impl FromStr for ControlCommand {
    type Err = ControlParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();

        if let Some(rest) = line.strip_prefix(OPTIONS_TOKEN) {
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                let flags = rest.split_whitespace().map(str::to_string).collect();
                return Ok(ControlCommand::CheckerFlags(flags));
            }
        }

        match line {
            "" => Ok(ControlCommand::State),
            "-v" => Ok(ControlCommand::Version),
            "On" => Ok(ControlCommand::Enable),
            "Off" => Ok(ControlCommand::Disable),
            "DebugOn" => Ok(ControlCommand::DebugOn),
            "DebugOff" => Ok(ControlCommand::DebugOff),
            other => Err(ControlParseError {
                argument: other.to_string(),
                valid: VALID_ARGUMENTS.iter().map(|a| a.to_string()).collect(),
            }),
        }
    }
}

/// Enabled/debug switches of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub enabled: bool,
    pub debug: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            enabled: true,
            debug: false,
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let on_off = if self.enabled { "On" } else { "Off" };
        let debug = if self.debug { "DebugOn" } else { "DebugOff" };
        write!(f, "{} {}", on_off, debug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fixed_vocabulary() {
        assert_eq!("".parse::<ControlCommand>().unwrap(), ControlCommand::State);
        assert_eq!("-v".parse::<ControlCommand>().unwrap(), ControlCommand::Version);
        assert_eq!("On".parse::<ControlCommand>().unwrap(), ControlCommand::Enable);
        assert_eq!("Off".parse::<ControlCommand>().unwrap(), ControlCommand::Disable);
        assert_eq!("DebugOn".parse::<ControlCommand>().unwrap(), ControlCommand::DebugOn);
        assert_eq!("DebugOff".parse::<ControlCommand>().unwrap(), ControlCommand::DebugOff);
    }

    #[test]
    fn test_parse_checker_flags() {
        assert_eq!(
            "mypy-options --strict  --warn-unreachable".parse::<ControlCommand>().unwrap(),
            ControlCommand::CheckerFlags(vec!["--strict".into(), "--warn-unreachable".into()])
        );
        assert_eq!(
            "mypy-options".parse::<ControlCommand>().unwrap(),
            ControlCommand::CheckerFlags(vec![])
        );
    }

    #[test]
    fn test_parse_unknown_lists_valid_arguments() {
        let err = "on".parse::<ControlCommand>().unwrap_err();
        assert_eq!(err.argument, "on");
        assert!(err.valid.contains(&"DebugOn".to_string()));
        assert!(err.to_string().contains("mypy-options OPTIONS"));

        // Prefix alone is not the options token
        assert!("mypy-optionsX".parse::<ControlCommand>().is_err());
    }

    #[test]
    fn test_state_display() {
        assert_eq!(SessionState::default().to_string(), "On DebugOff");
        let state = SessionState {
            enabled: false,
            debug: true,
        };
        assert_eq!(state.to_string(), "Off DebugOn");
    }
}
