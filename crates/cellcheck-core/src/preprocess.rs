//! Neutralizes front-end-only syntax so fragments parse as plain Python.
//!
//! Shell escapes (`!ls`), inline directives (`%matplotlib inline`) and help
//! queries (`?obj`, `obj?`) are rewritten to `pass #<line>`. The line
//! count and leading indentation are kept, so checker line numbers still
//! line up with the fragment the user typed.

use std::borrow::Cow;

/// First characters that mark a front-end-only line.
const FRONTEND_SIGILS: [char; 3] = ['%', '!', '?'];

/// Prefix marking a fragment handled entirely by the front end.
const BLOCK_DIRECTIVE: &str = "%%";

/// True if the whole fragment is a block-level front-end directive.
pub fn is_block_directive(fragment: &str) -> bool {
    fragment.starts_with(BLOCK_DIRECTIVE)
}

/// Neutralize a single line.
pub fn neutralize_line(line: &str) -> Cow<'_, str> {
    let Some(start) = line.find(|c: char| !c.is_whitespace()) else {
        return Cow::Borrowed(line);
    };

    let first = line[start..].chars().next();
    let last = line.chars().last();
    let frontend = first.is_some_and(|c| FRONTEND_SIGILS.contains(&c)) || last == Some('?');

    if frontend {
        Cow::Owned(format!("{}pass #{}", &line[..start], &line[start..]))
    } else {
        Cow::Borrowed(line)
    }
}

/// Neutralize every line of a fragment.
pub fn neutralize(fragment: &str) -> String {
    fragment
        .split('\n')
        .map(neutralize_line)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_shell_escape_and_magic() {
        assert_eq!(neutralize_line("!pip install numpy"), "pass #!pip install numpy");
        assert_eq!(neutralize_line("%matplotlib inline"), "pass #%matplotlib inline");
        assert_eq!(neutralize_line("?len"), "pass #?len");
    }

    #[test]
    fn test_trailing_help_query() {
        assert_eq!(neutralize_line("np.array?"), "pass #np.array?");
        assert_eq!(neutralize_line("np.array??"), "pass #np.array??");
    }

    #[test]
    fn test_indentation_preserved() {
        assert_eq!(neutralize_line("    !ls"), "    pass #!ls");
        assert_eq!(neutralize_line("\t%time f()"), "\tpass #%time f()");
    }

    #[test]
    fn test_plain_code_untouched() {
        assert!(matches!(neutralize_line("x = 1"), Cow::Borrowed(_)));
        assert!(matches!(neutralize_line("   "), Cow::Borrowed(_)));
        assert_eq!(neutralize_line(""), "");
        assert_eq!(neutralize_line("x = a % b"), "x = a % b");
    }

    #[test]
    fn test_multi_line_fragment() {
        let fragment = "import os\n!ls\nfor x in y:\n    %time f(x)\nprint(x)";
        assert_eq!(
            neutralize(fragment),
            "import os\npass #!ls\nfor x in y:\n    pass #%time f(x)\nprint(x)"
        );
    }

    #[test]
    fn test_block_directive() {
        assert!(is_block_directive("%%time\nx = 1"));
        assert!(is_block_directive("%%bash\nls"));
        assert!(!is_block_directive("%time x = 1"));
        assert!(!is_block_directive("  %%time"));
    }

    proptest! {
        #[test]
        fn prop_line_count_and_indent_preserved(
            lines in prop::collection::vec("[ \t]{0,4}[%!?a-z =()]{0,12}", 0..8)
        ) {
            let fragment = lines.join("\n");
            let out = neutralize(&fragment);
            let before: Vec<&str> = fragment.split('\n').collect();
            let after: Vec<&str> = out.split('\n').collect();
            prop_assert_eq!(before.len(), after.len());
            for (b, a) in before.iter().zip(after.iter()) {
                let indent_b: String = b.chars().take_while(|c| c.is_whitespace()).collect();
                prop_assert!(a.starts_with(&indent_b));
                prop_assert!(a.ends_with(b.trim_start()));
            }
        }
    }
}
