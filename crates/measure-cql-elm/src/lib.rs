//! ELM (Expression Logical Model) documents as produced by the CQL-to-ELM translator
//!
//! This crate provides:
//! - A tolerant ELM document model where every nested field may be absent
//! - Result-type resolution for definitions and function arguments
//! - The lodash-compatible camel-casing used for definition keys

pub mod error;
pub mod model;
pub mod naming;
pub mod resolve;

pub use error::{ElmParseError, Result};
pub use model::*;
pub use naming::camel_case;
pub use resolve::*;
