//! CLI functionality for the measure CQL checker
//!
//! This module contains all CLI-related functionality including:
//! - Checking CQL against the translator and terminology services
//! - Printing resolved definition and function types
//! - Parsing locators
//! - Output formatting

pub mod check;
pub mod output;
pub mod types;
