//! Logging for the `cellcheck` binary.
//!
//! The engine logs under a fixed set of `cellcheck::*` targets. A preset
//! picks a level per target, `--log target=level` adjusts single targets,
//! and `RUST_LOG` replaces the whole filter when set. Everything goes to
//! stderr; stdout carries the check results.

use clap::{Args, ValueEnum};
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Namespace shared by every engine target.
pub const NAMESPACE: &str = "cellcheck";

/// Targets the engine logs under, without the namespace.
pub const TARGETS: [&str; 8] = [
    "startup",
    "session",
    "control",
    "rewrite",
    "checker",
    "diagnostics",
    "debug",
    "critical",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// A `--log` override resolved to a full target name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetLevel {
    pub target: String,
    pub level: Level,
}

/// Accepts `rewrite=debug`, `cellcheck::rewrite=debug` or `cellcheck=debug`.
fn parse_target_level(s: &str) -> Result<TargetLevel, String> {
    let (target, level) = s
        .split_once('=')
        .ok_or_else(|| format!("expected TARGET=LEVEL, got '{}'", s))?;
    let level = level
        .trim()
        .parse::<Level>()
        .map_err(|_| format!("unknown level '{}'", level.trim()))?;

    let target = target.trim();
    let short = target
        .strip_prefix(NAMESPACE)
        .map(|rest| rest.trim_start_matches("::"))
        .unwrap_or(target);
    let target = match short {
        "" => NAMESPACE.to_string(),
        name if TARGETS.contains(&name) => format!("{}::{}", NAMESPACE, name),
        name => return Err(format!("unknown target '{}', expected one of {:?}", name, TARGETS)),
    };

    Ok(TargetLevel { target, level })
}

/// Logging flags, flattened into the command line.
#[derive(Debug, Clone, Default, Args)]
pub struct LogArgs {
    /// Show session lifecycle and rewrite activity
    #[arg(short, long)]
    pub verbose: bool,

    /// Log everything at DEBUG level
    #[arg(short, long)]
    pub debug: bool,

    /// Log everything at TRACE level, including per-statement rewrite decisions
    #[arg(long)]
    pub trace: bool,

    /// Warnings and errors only
    #[arg(short, long)]
    pub quiet: bool,

    /// Level for one target (e.g. "rewrite=debug"); comma-separated or repeated
    #[arg(long = "log", value_name = "TARGET=LEVEL", value_delimiter = ',', value_parser = parse_target_level)]
    pub overrides: Vec<TargetLevel>,

    /// Log output format
    #[arg(long = "log-format", value_name = "FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub format: LogFormat,
}

/// Per-target levels selected by the preset flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogPreset {
    #[default]
    Production,
    Verbose,
    Debug,
    Trace,
    Quiet,
}

impl LogPreset {
    /// Directives for this preset. The CLI prints diagnostics itself;
    /// `cellcheck::debug` only fires while a session has debugging on.
    pub fn directives(self) -> &'static [&'static str] {
        match self {
            LogPreset::Production => &[
                "cellcheck=warn",
                "cellcheck::startup=info",
                "cellcheck::control=info",
                "cellcheck::diagnostics=off",
                "cellcheck::debug=debug",
            ],
            LogPreset::Verbose => &[
                "cellcheck=info",
                "cellcheck::diagnostics=off",
                "cellcheck::debug=debug",
            ],
            LogPreset::Debug => &["cellcheck=debug"],
            LogPreset::Trace => &["cellcheck=trace"],
            LogPreset::Quiet => &["cellcheck=warn", "cellcheck::diagnostics=off"],
        }
    }
}

impl LogArgs {
    /// `--quiet` wins; otherwise the most detailed flag given.
    pub fn preset(&self) -> LogPreset {
        if self.quiet {
            LogPreset::Quiet
        } else if self.trace {
            LogPreset::Trace
        } else if self.debug {
            LogPreset::Debug
        } else if self.verbose {
            LogPreset::Verbose
        } else {
            LogPreset::Production
        }
    }

    /// Preset directives followed by the overrides, later entries winning.
    pub fn directives(&self) -> Vec<String> {
        self.preset()
            .directives()
            .iter()
            .map(|d| d.to_string())
            .chain(
                self.overrides
                    .iter()
                    .map(|o| format!("{}={}", o.target, o.level.as_str().to_ascii_lowercase())),
            )
            .collect()
    }

    pub fn filter(&self) -> EnvFilter {
        if let Ok(env_filter) = EnvFilter::try_from_default_env() {
            return env_filter;
        }
        EnvFilter::try_new(self.directives().join(",")).unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}

/// Install the global subscriber.
pub fn init(args: &LogArgs) {
    let (text, json) = match args.format {
        LogFormat::Text => (
            Some(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .without_time(),
            ),
            None,
        ),
        LogFormat::Json => (
            None,
            Some(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE),
            ),
        ),
    };

    tracing_subscriber::registry()
        .with(args.filter())
        .with(text)
        .with(json)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        log: LogArgs,
    }

    fn parse(args: &[&str]) -> Result<LogArgs, clap::Error> {
        TestCli::try_parse_from(std::iter::once("cellcheck").chain(args.iter().copied())).map(|cli| cli.log)
    }

    #[test]
    fn test_quiet_beats_other_presets() {
        assert_eq!(parse(&["-v", "-d", "--trace", "-q"]).unwrap().preset(), LogPreset::Quiet);
        assert_eq!(parse(&["-v", "--trace"]).unwrap().preset(), LogPreset::Trace);
        assert_eq!(parse(&[]).unwrap().preset(), LogPreset::Production);
    }

    #[test]
    fn test_overrides_resolve_to_engine_targets() {
        let args = parse(&["--log", "rewrite=trace,cellcheck::checker=DEBUG", "--log", "cellcheck=info"]).unwrap();
        let targets: Vec<_> = args.overrides.iter().map(|o| (o.target.as_str(), o.level)).collect();
        assert_eq!(
            targets,
            vec![
                ("cellcheck::rewrite", Level::TRACE),
                ("cellcheck::checker", Level::DEBUG),
                ("cellcheck", Level::INFO),
            ]
        );
        assert_eq!(args.directives().last().unwrap(), "cellcheck=info");
    }

    #[test]
    fn test_unknown_target_or_level_rejected() {
        assert!(parse(&["--log", "websocket=debug"]).is_err());
        assert!(parse(&["--log", "rewrite=loud"]).is_err());
        assert!(parse(&["--log", "rewrite"]).is_err());
    }

    #[test]
    fn test_production_hides_diagnostics_but_keeps_debug_dumps() {
        let directives = LogPreset::Production.directives();
        assert!(directives.contains(&"cellcheck::diagnostics=off"));
        assert!(directives.contains(&"cellcheck::debug=debug"));
        assert!(LogPreset::Debug.directives().iter().all(|d| !d.contains("=off")));
    }

    #[test]
    fn test_log_format_values() {
        assert_eq!(parse(&["--log-format", "json"]).unwrap().format, LogFormat::Json);
        assert!(parse(&["--log-format", "yaml"]).is_err());
    }
}
