//! Common test utilities for the measure CQL checker
//!
//! This module provides shared testing infrastructure including:
//! - Mock translator and terminology service
//! - Builders for ELM documents

pub mod elm;
pub mod mocks;

pub use elm::*;
pub use mocks::*;
