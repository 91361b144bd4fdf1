//! Maps checker diagnostics for the combined program back onto the fragment.

use cellcheck_types::CellDiagnostic;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// `<string>:12: error: ...`: pseudo file name, absolute line, message.
static DIAGNOSTIC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(<[a-z]+>:)(\d+)(.*)$").expect("Invalid diagnostic regex")
});

/// Secondary `line N` references inside a message.
static LINE_REF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"line(\s)([0-9]+)").expect("Invalid line reference regex")
});

/// A diagnostic as printed by the checker, before remapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDiagnostic {
    /// Absolute line in the combined program
    pub line: usize,
    pub message: String,
}

/// Parse one line of checker output. Lines without a line marker
/// (summaries, blank lines) yield `None`.
pub fn parse_diagnostic(line: &str) -> Option<RawDiagnostic> {
    let caps = DIAGNOSTIC_RE.captures(line)?;
    let number = caps[2].parse().ok()?;
    Some(RawDiagnostic {
        line: number,
        message: caps[3].to_string(),
    })
}

/// Subtract `offset` from every `line N` reference in `message`.
///
/// The surrounding text is kept verbatim. References into history become
/// zero or negative.
pub fn shift_line_references(message: &str, offset: usize) -> String {
    LINE_REF_RE
        .replace_all(message, |caps: &Captures| match caps[2].parse::<i64>() {
            Ok(number) => format!("line{}{}", &caps[1], number - offset as i64),
            Err(_) => caps[0].to_string(),
        })
        .into_owned()
}

/// Keep the diagnostics that fall after `offset` and make them
/// fragment-relative.
pub fn remap_diagnostics(stdout: &str, offset: usize) -> Vec<CellDiagnostic> {
    stdout
        .trim()
        .lines()
        .filter_map(parse_diagnostic)
        .filter(|raw| raw.line > offset)
        .map(|raw| {
            CellDiagnostic::new(
                (raw.line - offset) as i64,
                shift_line_references(&raw.message, offset),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_diagnostic_line() {
        let raw = parse_diagnostic("<string>:14: error: Name \"q\" is not defined  [name-defined]").unwrap();
        assert_eq!(raw.line, 14);
        assert_eq!(raw.message, ": error: Name \"q\" is not defined  [name-defined]");
        assert!(parse_diagnostic("Found 1 error in 1 file (checked 1 source file)").is_none());
        assert!(parse_diagnostic("").is_none());
    }

    #[test]
    fn test_offset_subtracted() {
        let diags = remap_diagnostics("<string>:13: error: boom\n", 10);
        assert_eq!(diags, vec![CellDiagnostic::new(3, ": error: boom")]);
    }

    #[test]
    fn test_history_diagnostics_suppressed() {
        let stdout = "<string>:2: error: old\n<string>:10: error: boundary\n<string>:11: note: new\nFound 3 errors";
        let diags = remap_diagnostics(stdout, 10);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].line, 1);
        assert_eq!(diags[0].message, ": note: new");
    }

    #[test]
    fn test_column_numbers_preserved() {
        let diags = remap_diagnostics("<string>:7:5: error: bad", 4);
        assert_eq!(diags[0].to_string(), "<cell>3:5: error: bad");
    }

    #[test]
    fn test_secondary_line_references() {
        let message = ": note: \"f\" defined on line 12; overload on line 15";
        assert_eq!(
            shift_line_references(message, 10),
            ": note: \"f\" defined on line 2; overload on line 5"
        );
    }

    #[test]
    fn test_reference_into_history_goes_non_positive() {
        assert_eq!(
            shift_line_references(": error: Name \"f\" already defined on line 3", 10),
            ": error: Name \"f\" already defined on line -7"
        );
    }

    #[test]
    fn test_message_without_references_untouched() {
        let message = ": error: Incompatible types in assignment";
        assert_eq!(shift_line_references(message, 5), message);
    }
}
