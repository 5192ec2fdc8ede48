//! Rendering options and configuration.

use std::fmt;
use std::str::FromStr;

/// Import line that opens every exported source block.
pub const DEFAULT_IMPORT_LINE: &str = "import { Document, Page } from '@/components/document';";

/// Layout policy for emitted source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FormatPolicy {
    /// Inline styles, unit-suffixed numbers, no grouping blank lines
    Compact,
    /// Wrapped style blocks, bare numbers, blank lines between groups
    #[default]
    Detailed,
}

impl fmt::Display for FormatPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatPolicy::Compact => f.write_str("compact"),
            FormatPolicy::Detailed => f.write_str("detailed"),
        }
    }
}

impl FromStr for FormatPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(FormatPolicy::Compact),
            "detailed" => Ok(FormatPolicy::Detailed),
            other => Err(format!("unknown format policy: {}", other)),
        }
    }
}

/// Options for rendering documents to source.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Layout policy
    pub policy: FormatPolicy,

    /// Spaces per nesting level
    pub indent_width: usize,

    /// Content shorter than this (in characters) may share a line with its tags
    pub inline_text_limit: usize,

    /// Detailed policy: styles with more entries than this wrap one per line
    pub inline_style_limit: usize,

    /// First line of the emitted block
    pub import_line: String,

    /// Collect render statistics
    pub collect_stats: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compact policy defaults.
    pub fn compact() -> Self {
        Self::default().with_policy(FormatPolicy::Compact)
    }

    /// Detailed policy defaults.
    pub fn detailed() -> Self {
        Self::default().with_policy(FormatPolicy::Detailed)
    }

    /// Set the layout policy.
    pub fn with_policy(mut self, policy: FormatPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the indent width.
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width.max(1);
        self
    }

    /// Set the single-line content threshold.
    pub fn with_inline_text_limit(mut self, limit: usize) -> Self {
        self.inline_text_limit = limit;
        self
    }

    /// Set the import line.
    pub fn with_import_line(mut self, line: impl Into<String>) -> Self {
        self.import_line = line.into();
        self
    }

    /// Enable statistics collection during rendering.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            policy: FormatPolicy::default(),
            indent_width: 2,
            inline_text_limit: 50,
            inline_style_limit: 2,
            import_line: DEFAULT_IMPORT_LINE.to_string(),
            collect_stats: false,
        }
    }
}
