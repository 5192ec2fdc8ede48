//! Rendering module for converting documents to template source and JSON.

mod json;
mod options;
mod result;
mod source;
mod writer;

pub use json::{to_json, JsonFormat, TemplateFile, TEMPLATE_VERSION};
pub use options::{FormatPolicy, RenderOptions, DEFAULT_IMPORT_LINE};
pub use result::{RenderResult, RenderStats};
pub use source::{to_source, to_source_with_stats, SourceRenderer};
