//! Splitting percent-format scripts into cells.

/// Line prefix that starts a new cell.
pub const CELL_SEPARATOR: &str = "# %%";

/// Split `source` into cells at lines starting with [`CELL_SEPARATOR`].
///
/// Separator lines are not part of any cell. Trailing blank lines are
/// trimmed and cells left empty are skipped.
pub fn split_cells(source: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in source.lines() {
        if line.starts_with(CELL_SEPARATOR) {
            push_cell(&mut cells, &current);
            current.clear();
        } else {
            current.push(line);
        }
    }
    push_cell(&mut cells, &current);

    cells
}

fn push_cell(cells: &mut Vec<String>, lines: &[&str]) {
    let cell = lines.join("\n");
    let cell = cell.trim_end();
    if !cell.trim().is_empty() {
        cells.push(cell.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_script_is_one_cell() {
        assert_eq!(split_cells("a = 1\nb = 2\n"), vec!["a = 1\nb = 2"]);
    }

    #[test]
    fn test_separators_split_cells() {
        let source = "# %%\na = 1\n\n# %% [markdown] title\nb = 2\n# %%\n\n";
        assert_eq!(split_cells(source), vec!["a = 1", "b = 2"]);
    }

    #[test]
    fn test_leading_blank_lines_kept() {
        // Line numbers inside a cell must match what the user wrote
        assert_eq!(split_cells("# %%\n\nx = 1"), vec!["\nx = 1"]);
    }

    #[test]
    fn test_indented_marker_is_not_a_separator() {
        let source = "def f():\n    # %% not a cell\n    return 1";
        assert_eq!(split_cells(source).len(), 1);
    }
}
