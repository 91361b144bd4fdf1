//! cellcheck - type check percent-format Python scripts cell by cell.

use anyhow::{Context, Result};
use cellcheck_cli::{cells, config, logging, shell};
use cellcheck_core::CellCheckExtension;
use cellcheck_types::CheckOutcome;
use clap::{Parser, ValueEnum};
use std::io::Read;
use std::path::PathBuf;

use config::Config;
use logging::LogArgs;
use shell::ReplayShell;

/// Result output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One line per diagnostic
    #[default]
    Text,
    /// One CheckReport object per checked cell
    Json,
}

/// cellcheck - history-aware type checking of notebook-style scripts.
#[derive(Parser, Debug)]
#[command(name = "cellcheck")]
#[command(about = "Type check Python cells as an interactive session would run them")]
#[command(version)]
struct Cli {
    /// Scripts to replay, split into cells at "# %%" lines ("-" or none for stdin)
    #[arg(value_name = "INPUTS")]
    inputs: Vec<PathBuf>,

    /// Path to config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the checker executable
    #[arg(long, value_name = "PROGRAM")]
    checker: Option<PathBuf>,

    /// Extra flag passed to the checker; can be specified multiple times
    #[arg(long = "checker-flag", value_name = "FLAG", allow_hyphen_values = true)]
    checker_flags: Vec<String>,

    /// Start the session with debug dumps on
    #[arg(long)]
    debug_session: bool,

    /// Result output format
    #[arg(long, value_name = "FORMAT", value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write the source each cell would execute to FILE
    #[arg(long, value_name = "FILE")]
    emit_executed: Option<PathBuf>,

    /// Exit with status 1 if any diagnostic was reported
    #[arg(long)]
    strict: bool,

    #[command(flatten)]
    log: LogArgs,
}

/// One input script.
struct Input {
    name: String,
    source: String,
}

fn read_inputs(paths: &[PathBuf]) -> Result<Vec<Input>> {
    if paths.is_empty() {
        return Ok(vec![read_stdin()?]);
    }

    paths
        .iter()
        .map(|path| {
            if path.as_os_str() == "-" {
                return read_stdin();
            }
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Ok(Input {
                name: path.display().to_string(),
                source,
            })
        })
        .collect()
}

fn read_stdin() -> Result<Input> {
    let mut source = String::new();
    std::io::stdin()
        .read_to_string(&mut source)
        .context("Failed to read stdin")?;
    Ok(Input {
        name: "<stdin>".to_string(),
        source,
    })
}

/// Print one cell's outcome; returns the number of diagnostics reported.
fn print_outcome(format: OutputFormat, input: &str, cell: usize, outcome: &CheckOutcome) -> Result<usize> {
    match (format, outcome) {
        (OutputFormat::Json, CheckOutcome::Checked(report)) => {
            println!("{}", serde_json::to_string(report)?);
        }
        (OutputFormat::Json, _) => {}
        (OutputFormat::Text, CheckOutcome::SyntaxError { line }) => {
            println!("{} [cell {}]: syntax error at line {}, not checked", input, cell, line);
        }
        (OutputFormat::Text, _) => {
            for diagnostic in outcome.diagnostics() {
                println!("{} [cell {}]: {}", input, cell, diagnostic);
            }
        }
    }
    Ok(outcome.diagnostics().len())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(&cli.log);

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(checker) = cli.checker {
        config.checker = checker;
    }
    if !cli.checker_flags.is_empty() {
        config.checker_flags = cli.checker_flags;
    }
    if cli.debug_session {
        config.debug = true;
    }

    tracing::info!(
        target: "cellcheck::startup",
        "Loaded configuration (checker: {}, flags: {:?})",
        config.checker.display(),
        config.checker_flags
    );

    let inputs = read_inputs(&cli.inputs)?;

    let mut shell = ReplayShell::new();
    let extension = CellCheckExtension::load(&mut shell, config.session_config())?;

    let mut total_diagnostics = 0;
    for input in &inputs {
        for (index, cell) in cells::split_cells(&input.source).iter().enumerate() {
            shell.run_cell(cell);
            let outcome = extension.session_mut().take_last_outcome();
            if let Some(outcome) = outcome {
                total_diagnostics += print_outcome(cli.format, &input.name, index + 1, &outcome)?;
            }
        }
    }

    if let Some(path) = &cli.emit_executed {
        let executed: String = shell
            .executed()
            .iter()
            .map(|source| format!("# %%\n{}\n", source))
            .collect();
        std::fs::write(path, executed).with_context(|| format!("Failed to write {}", path.display()))?;
    }

    extension.unload(&mut shell);

    if cli.strict && total_diagnostics > 0 {
        std::process::exit(1);
    }
    Ok(())
}
