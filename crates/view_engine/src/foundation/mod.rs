//! Foundation module - Core utilities and types
//!
//! - Math types and lenient number parsing
//! - Logging utilities

pub mod math;
pub mod logging;
