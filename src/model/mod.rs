//! Document model types.
//!
//! This module defines the intermediate representation (IR) shared by every
//! capture and every renderer. IR values are plain owned data: a capture
//! builds a fresh tree, a renderer reads it, and nothing holds a reference
//! back to the tree it was captured from.

mod document;
mod element;
mod page;
mod style;

pub use document::{Document, DocumentType, Metadata, DEFAULT_DOCUMENT_ID, DOCUMENT_COMPONENT};
pub use element::{element_id, page_id, Element, ElementKind, DEFAULT_TAG};
pub use page::{Padding, Page, PAGE_COMPONENT};
pub use style::Style;
