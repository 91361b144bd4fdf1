//! The synthetic program accumulated from earlier fragments.

/// Prelude placed at the top of every new history buffer.
pub const DEFAULT_PRELUDE: &str = "from IPython import get_ipython\n";

/// Source text the checker treats as already declared.
///
/// Grows by appending fragments; shrinks only when a rewrite replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryBuffer {
    text: String,
}

impl HistoryBuffer {
    pub fn new(prelude: &str) -> Self {
        let mut text = prelude.to_string();
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        Self { text }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of complete lines; the offset of the next appended fragment.
    pub fn line_count(&self) -> usize {
        self.text.bytes().filter(|b| *b == b'\n').count()
    }

    pub fn append_fragment(&mut self, fragment: &str) {
        self.text.push_str(fragment);
        self.text.push('\n');
    }

    /// Swap in the output of a rewrite.
    pub fn replace(&mut self, text: String) {
        self.text = text;
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
