//! Indentation-aware line buffer for source emission.

/// Accumulates source lines at the current nesting depth.
pub(crate) struct SourceWriter {
    buffer: String,
    depth: usize,
    unit: String,
}

impl SourceWriter {
    pub(crate) fn new(indent_width: usize) -> Self {
        Self {
            buffer: String::new(),
            depth: 0,
            unit: " ".repeat(indent_width),
        }
    }

    /// Write one line at the current depth.
    pub(crate) fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.unit);
        }
        self.buffer.push_str(text);
        self.buffer.push('\n');
    }

    /// Write an empty line, never doubling one.
    pub(crate) fn blank_line(&mut self) {
        if !self.buffer.is_empty() && !self.buffer.ends_with("\n\n") {
            self.buffer.push('\n');
        }
    }

    pub(crate) fn indent(&mut self) {
        self.depth += 1;
    }

    pub(crate) fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub(crate) fn finish(self) -> String {
        self.buffer
    }
}
