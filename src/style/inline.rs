//! Style dictionary inlining for raw template source.
//!
//! Hand-written or generated templates reference a style dictionary through a
//! local binding (`styles.colors.primary`). Inlining rewrites every such
//! reference into its literal value and drops the import and binding lines,
//! leaving source with no dependency on the dictionary module.
//!
//! Only imports that bind the dictionary name, or the factory called in the
//! binding assignment (`const styles = getStyles('modern')`), are removed.
//! Other imports are left as written.
//!
//! The rewrite is textual. It does not parse the source, so references inside
//! string literals are rewritten too.

use super::format::{format_number, quote_single};
use super::registry::{lookup_path, StyleRegistry};
use regex::Regex;
use serde_json::Value;
use std::fmt;

/// Binding name templates use for the style dictionary by default.
pub const DEFAULT_BINDING: &str = "styles";

/// Options for style inlining.
#[derive(Debug, Clone)]
pub struct InlineOptions {
    /// Local binding that holds the dictionary
    pub binding: String,

    /// Remove the dictionary import and binding assignment
    pub strip_imports: bool,
}

impl InlineOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the binding name.
    pub fn with_binding(mut self, binding: impl Into<String>) -> Self {
        self.binding = binding.into();
        self
    }

    /// Enable or disable import stripping.
    pub fn with_strip_imports(mut self, strip: bool) -> Self {
        self.strip_imports = strip;
        self
    }
}

impl Default for InlineOptions {
    fn default() -> Self {
        Self {
            binding: DEFAULT_BINDING.to_string(),
            strip_imports: true,
        }
    }
}

/// Kind of inlining diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The requested style set is not registered
    UnknownDictionary,
    /// A reference path does not resolve inside the dictionary
    UnresolvedPath,
    /// The configured binding produced an unusable pattern
    InvalidPattern,
}

/// A non-fatal problem found while inlining.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Diagnostic kind
    pub kind: DiagnosticKind,

    /// 1-indexed line in the stripped source (0 when not tied to a line)
    pub line: usize,

    /// Offending token or name
    pub token: String,

    /// Human-readable message
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line > 0 {
            write!(f, "line {}: {}", self.line, self.message)
        } else {
            f.write_str(&self.message)
        }
    }
}

/// Result of inlining a source text.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineResult {
    /// Rewritten source (unmodified when the set is unknown)
    pub source: String,

    /// Problems found, in source order
    pub diagnostics: Vec<Diagnostic>,

    /// Number of references replaced
    pub replacements: usize,
}

impl InlineResult {
    fn unchanged(source: &str, diagnostic: Diagnostic) -> Self {
        Self {
            source: source.to_string(),
            diagnostics: vec![diagnostic],
            replacements: 0,
        }
    }

    /// Whether inlining finished without diagnostics.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

const LINE_END: &str = r"[ \t]*;?[ \t]*(?:\r?\n|$)";

struct Patterns {
    binding_import: Regex,
    binding_assignment: Regex,
    reference: Regex,
}

impl Patterns {
    fn compile(options: &InlineOptions) -> Result<Self, regex::Error> {
        let binding = regex::escape(&options.binding);

        Ok(Self {
            binding_import: import_of(&options.binding)?,
            binding_assignment: Regex::new(&format!(
                r"(?m)^[ \t]*(?:export\s+)?(?:const|let|var)\s+{}\s*=[ \t]*(?:await\s+)?(?P<factory>[A-Za-z_$][A-Za-z0-9_$]*)?[^;\n]*{}",
                binding, LINE_END
            ))?,
            reference: Regex::new(&format!(
                r"(?P<prefix>^|[^A-Za-z0-9_$.])(?P<token>{}(?:\.[A-Za-z0-9_$]+)+)",
                binding
            ))?,
        })
    }

    /// Names called to produce the binding.
    fn factories(&self, source: &str) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for caps in self.binding_assignment.captures_iter(source) {
            if let Some(name) = caps.name("factory") {
                if !names.iter().any(|n| n == name.as_str()) {
                    names.push(name.as_str().to_string());
                }
            }
        }
        names
    }

    fn strip(&self, source: &str) -> Result<String, regex::Error> {
        let mut stripped = self.binding_import.replace_all(source, "").into_owned();
        for factory in self.factories(source) {
            stripped = import_of(&factory)?
                .replace_all(&stripped, "")
                .into_owned();
        }
        Ok(self.binding_assignment.replace_all(&stripped, "").into_owned())
    }
}

/// Import statement that brings `name` into scope.
fn import_of(name: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r#"(?m)^[ \t]*import\s+[^;'"]*?\b{}\b[^;'"]*?\bfrom\s*['"][^'"\n]*['"]{}"#,
        regex::escape(name),
        LINE_END
    ))
}

/// Rewrites style dictionary references into literal values.
pub struct StyleInliner<'a> {
    registry: &'a StyleRegistry,
    options: InlineOptions,
}

impl<'a> StyleInliner<'a> {
    /// Create an inliner reading from `registry`.
    pub fn new(registry: &'a StyleRegistry) -> Self {
        Self {
            registry,
            options: InlineOptions::default(),
        }
    }

    /// Replace the inlining options.
    pub fn with_options(mut self, options: InlineOptions) -> Self {
        self.options = options;
        self
    }

    /// Inline every reference to the `set_name` dictionary in `source`.
    pub fn inline(&self, source: &str, set_name: &str) -> InlineResult {
        let Some(dictionary) = self.registry.resolve(set_name) else {
            log::error!("style set '{}' is not registered", set_name);
            return InlineResult::unchanged(
                source,
                Diagnostic {
                    kind: DiagnosticKind::UnknownDictionary,
                    line: 0,
                    token: set_name.to_string(),
                    message: format!("style set '{}' is not registered", set_name),
                },
            );
        };

        let patterns = match Patterns::compile(&self.options) {
            Ok(patterns) => patterns,
            Err(e) => {
                log::error!("invalid binding '{}': {}", self.options.binding, e);
                return InlineResult::unchanged(
                    source,
                    Diagnostic {
                        kind: DiagnosticKind::InvalidPattern,
                        line: 0,
                        token: self.options.binding.clone(),
                        message: format!("invalid binding '{}': {}", self.options.binding, e),
                    },
                );
            }
        };

        let stripped = if self.options.strip_imports {
            match patterns.strip(source) {
                Ok(stripped) => stripped,
                Err(e) => {
                    log::warn!("import stripping skipped: {}", e);
                    source.to_string()
                }
            }
        } else {
            source.to_string()
        };

        self.substitute(&stripped, dictionary, &patterns.reference)
    }

    fn substitute(&self, source: &str, dictionary: &Value, reference: &Regex) -> InlineResult {
        let prefix_len = self.options.binding.len() + 1;
        let mut output = String::with_capacity(source.len());
        let mut diagnostics = Vec::new();
        let mut replacements = 0;
        let mut last = 0;

        for caps in reference.captures_iter(source) {
            let Some(token) = caps.name("token") else {
                continue;
            };
            let path = &token.as_str()[prefix_len..];
            output.push_str(&source[last..token.start()]);

            match lookup_path(dictionary, path) {
                Some(value) => {
                    output.push_str(&literal_source(value));
                    replacements += 1;
                }
                None => {
                    let line = source[..token.start()].matches('\n').count() + 1;
                    log::warn!("line {}: unresolved style reference '{}'", line, token.as_str());
                    diagnostics.push(Diagnostic {
                        kind: DiagnosticKind::UnresolvedPath,
                        line,
                        token: token.as_str().to_string(),
                        message: format!("unresolved style reference '{}'", token.as_str()),
                    });
                    output.push_str(token.as_str());
                }
            }
            last = token.end();
        }
        output.push_str(&source[last..]);

        log::debug!(
            "inlined {} style references ({} unresolved)",
            replacements,
            diagnostics.len()
        );

        InlineResult {
            source: output,
            diagnostics,
            replacements,
        }
    }
}

/// Source text for a resolved dictionary value.
fn literal_source(value: &Value) -> String {
    match value {
        Value::String(s) => quote_single(s),
        Value::Number(n) => format_number(n),
        Value::Object(_) | Value::Array(_) => value.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
    }
}

/// Inline `set_name` references in `source` with default options.
pub fn inline_styles(source: &str, set_name: &str, registry: &StyleRegistry) -> InlineResult {
    StyleInliner::new(registry).inline(source, set_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry() -> StyleRegistry {
        StyleRegistry::new().register(
            "modern",
            json!({
                "colors": { "primary": "#fff" },
                "spacing": { "md": 16 },
                "card": { "padding": 12, "radius": 4 }
            }),
        )
    }

    #[test]
    fn test_string_reference() {
        let registry = registry();
        let result = inline_styles("color: styles.colors.primary,", "modern", &registry);
        assert_eq!(result.source, "color: '#fff',");
        assert_eq!(result.replacements, 1);
        assert!(result.is_clean());
    }

    #[test]
    fn test_every_occurrence_replaced() {
        let registry = registry();
        let source = "a: styles.colors.primary, b: styles.colors.primary";
        let result = inline_styles(source, "modern", &registry);
        assert_eq!(result.source, "a: '#fff', b: '#fff'");
        assert_eq!(result.replacements, 2);
    }

    #[test]
    fn test_number_and_object_references() {
        let registry = registry();
        let result = inline_styles(
            "gap: styles.spacing.md\nstyle={styles.card}",
            "modern",
            &registry,
        );
        assert_eq!(result.source, "gap: 16\nstyle={{\"padding\":12,\"radius\":4}}");
    }

    #[test]
    fn test_unresolved_path_left_verbatim() {
        let registry = registry();
        let result = inline_styles("x\ncolor: styles.colors.missing", "modern", &registry);
        assert_eq!(result.source, "x\ncolor: styles.colors.missing");
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].kind, DiagnosticKind::UnresolvedPath);
        assert_eq!(result.diagnostics[0].line, 2);
        assert_eq!(result.diagnostics[0].token, "styles.colors.missing");
    }

    #[test]
    fn test_unknown_dictionary_returns_source() {
        let registry = registry();
        let source = "import { getStyles } from '../styles';\ncolor: styles.colors.primary";
        let result = inline_styles(source, "classic", &registry);
        assert_eq!(result.source, source);
        assert_eq!(result.diagnostics[0].kind, DiagnosticKind::UnknownDictionary);
    }

    #[test]
    fn test_strips_import_and_binding() {
        let registry = registry();
        let source = "import { Document, Page } from '@/components/document';\n\
                      import { getStyles } from '@/lib/styles';\n\
                      const styles = getStyles('modern');\n\
                      \n\
                      <p style={{ color: styles.colors.primary }}>Hi</p>\n";
        let result = inline_styles(source, "modern", &registry);
        assert_eq!(
            result.source,
            "import { Document, Page } from '@/components/document';\n\
             \n\
             <p style={{ color: '#fff' }}>Hi</p>\n"
        );
    }

    #[test]
    fn test_strips_default_import_of_binding() {
        let registry = registry();
        let source = "import styles from './tokens.json';\nstyles.spacing.md";
        let result = inline_styles(source, "modern", &registry);
        assert_eq!(result.source, "16");
    }

    #[test]
    fn test_ignores_other_identifiers() {
        let registry = registry();
        let source = "mystyles.colors.primary this.styles.colors.primary";
        let result = inline_styles(source, "modern", &registry);
        assert_eq!(result.source, source);
        assert_eq!(result.replacements, 0);
    }

    #[test]
    fn test_custom_binding() {
        let registry = registry();
        let inliner = StyleInliner::new(&registry)
            .with_options(InlineOptions::new().with_binding("theme"));
        let result = inliner.inline("const theme = useTheme();\ntheme.colors.primary", "modern");
        assert_eq!(result.source, "'#fff'");
    }

    #[test]
    fn test_keep_imports_when_disabled() {
        let registry = registry();
        let inliner = StyleInliner::new(&registry)
            .with_options(InlineOptions::new().with_strip_imports(false));
        let source = "const styles = getStyles('modern');\nstyles.spacing.md";
        let result = inliner.inline(source, "modern");
        assert_eq!(result.source, "const styles = getStyles('modern');\n16");
    }

    #[test]
    fn test_unrelated_imports_survive() {
        let registry = registry();
        let source = "import { ThemeProvider } from '@/components/theme-provider';\n\
                      import { useTheme } from '@mui/material/styles';\n\
                      import { getStyles } from '@/lib/styles';\n\
                      const styles = getStyles('brand');\n\
                      styles.spacing.md\n";
        let result = inline_styles(source, "modern", &registry);
        assert_eq!(
            result.source,
            "import { ThemeProvider } from '@/components/theme-provider';\n\
             import { useTheme } from '@mui/material/styles';\n\
             16\n"
        );
    }

    #[test]
    fn test_factory_collected_from_assignment() {
        let patterns = Patterns::compile(&InlineOptions::default()).unwrap();
        let source = "const styles = await loadStyles('a');\nlet other = getStyles();\n";
        assert_eq!(patterns.factories(source), vec!["loadStyles".to_string()]);
    }
}
