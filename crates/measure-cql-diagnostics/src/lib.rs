//! ELM diagnostics
//!
//! This crate provides the diagnostic plumbing between the CQL-to-ELM
//! translator and a code editor, including translator error records,
//! locator parsing and the gutter annotation / underline marker projection.

mod editor;
mod error;
mod locator;

pub use editor::*;
pub use error::*;
pub use locator::*;
