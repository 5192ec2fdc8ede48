//! Cleanup pipeline for template source returned by generative backends.
//!
//! Model output usually arrives wrapped in prose and a Markdown code fence,
//! with CRLF line endings or trailing whitespace. The pipeline reduces it to
//! the bare source text that the style inliner and template import expect.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Cleanup preset levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupPreset {
    /// Fence extraction and line endings only
    Minimal,
    /// Fence extraction, NFC, whitespace and blank-line cleanup
    #[default]
    Standard,
}

/// Options for generated-source cleanup.
#[derive(Debug, Clone)]
pub struct CleanupOptions {
    /// Keep only the body of the first fenced code block, if any
    pub extract_code_fence: bool,

    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Convert CRLF and lone CR to LF
    pub normalize_line_endings: bool,

    /// Strip trailing spaces and tabs from every line
    pub trim_trailing_whitespace: bool,

    /// Maximum consecutive blank lines (0 = unlimited)
    pub max_blank_lines: u8,
}

impl CleanupOptions {
    /// Create options from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        match preset {
            CleanupPreset::Minimal => Self::minimal(),
            CleanupPreset::Standard => Self::standard(),
        }
    }

    /// Minimal cleanup options.
    pub fn minimal() -> Self {
        Self {
            extract_code_fence: true,
            normalize_unicode: false,
            normalize_line_endings: true,
            trim_trailing_whitespace: false,
            max_blank_lines: 0,
        }
    }

    /// Standard cleanup options.
    pub fn standard() -> Self {
        Self {
            extract_code_fence: true,
            normalize_unicode: true,
            normalize_line_endings: true,
            trim_trailing_whitespace: true,
            max_blank_lines: 1,
        }
    }
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self::standard()
    }
}

/// Generated-source cleanup pipeline.
pub struct CleanupPipeline {
    options: CleanupOptions,
    fence_regex: Option<Regex>,
}

impl CleanupPipeline {
    /// Create a new cleanup pipeline with the given options.
    pub fn new(options: CleanupOptions) -> Self {
        Self {
            options,
            fence_regex: Regex::new(r"(?s)```[A-Za-z0-9_+\-]*[ \t]*\n(.*?)\n?[ \t]*```").ok(),
        }
    }

    /// Create a pipeline from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        Self::new(CleanupOptions::from_preset(preset))
    }

    /// Process text through the cleanup pipeline.
    pub fn process(&self, text: &str) -> String {
        let mut result = text.to_string();

        // Line endings first so the fence pattern only has to handle LF
        if self.options.normalize_line_endings {
            result = result.replace("\r\n", "\n").replace('\r', "\n");
        }

        if self.options.extract_code_fence {
            if let Some(body) = self.extract_fence(&result) {
                result = body;
            }
        }

        if self.options.normalize_unicode {
            result = result.nfc().collect();
        }

        if self.options.trim_trailing_whitespace {
            result = result
                .lines()
                .map(str::trim_end)
                .collect::<Vec<_>>()
                .join("\n");
        }

        if self.options.max_blank_lines > 0 {
            result = self.limit_blank_lines(&result);
        }

        let trimmed = result.trim_matches('\n');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("{}\n", trimmed)
        }
    }

    fn extract_fence(&self, text: &str) -> Option<String> {
        let caps = self.fence_regex.as_ref()?.captures(text)?;
        let body = caps.get(1)?.as_str();
        log::debug!("extracted {} bytes from fenced code block", body.len());
        Some(body.to_string())
    }

    fn limit_blank_lines(&self, text: &str) -> String {
        let max = self.options.max_blank_lines as usize;
        let mut output = Vec::new();
        let mut blank_run = 0;
        for line in text.lines() {
            if line.trim().is_empty() {
                blank_run += 1;
                if blank_run > max {
                    continue;
                }
            } else {
                blank_run = 0;
            }
            output.push(line);
        }
        output.join("\n")
    }
}

/// Clean generated source with the standard preset.
pub fn clean_generated_source(text: &str) -> String {
    CleanupPipeline::from_preset(CleanupPreset::Standard).process(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_fenced_block() {
        let text = "Here is your flyer:\n\n```jsx\n<Page>\n  <h1>Hi</h1>\n</Page>\n```\n\nLet me know!";
        assert_eq!(clean_generated_source(text), "<Page>\n  <h1>Hi</h1>\n</Page>\n");
    }

    #[test]
    fn test_first_fence_wins() {
        let text = "```tsx\nfirst\n```\nthen\n```\nsecond\n```";
        assert_eq!(clean_generated_source(text), "first\n");
    }

    #[test]
    fn test_unfenced_text_kept() {
        let text = "const a = 1;\n";
        assert_eq!(clean_generated_source(text), "const a = 1;\n");
    }

    #[test]
    fn test_crlf_and_trailing_whitespace() {
        let text = "```\r\nline one   \r\nline two\t\r\n```";
        assert_eq!(clean_generated_source(text), "line one\nline two\n");
    }

    #[test]
    fn test_blank_lines_limited() {
        let text = "a\n\n\n\nb";
        assert_eq!(clean_generated_source(text), "a\n\nb\n");
    }

    #[test]
    fn test_minimal_keeps_blank_lines() {
        let pipeline = CleanupPipeline::from_preset(CleanupPreset::Minimal);
        assert_eq!(pipeline.process("a\n\n\nb  "), "a\n\n\nb  \n");
    }

    #[test]
    fn test_unicode_normalization() {
        let decomposed = "Cafe\u{0301}";
        assert_eq!(clean_generated_source(decomposed), "Caf\u{00e9}\n");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(clean_generated_source(""), "");
        assert_eq!(clean_generated_source("```\n```"), "");
    }
}
