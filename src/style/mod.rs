//! Style dictionaries: registry, literal formatting, and source inlining.

pub mod format;
mod inline;
mod registry;

pub use format::{
    export_dictionary, format_dictionary, format_subset, UNITLESS_PROPERTIES,
};
pub use inline::{
    inline_styles, Diagnostic, DiagnosticKind, InlineOptions, InlineResult, StyleInliner,
    DEFAULT_BINDING,
};
pub use registry::{lookup_path, StyleRegistry, DEFAULT_STYLE_SET};
