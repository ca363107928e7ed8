//! # Core Module
//!
//! Shared configuration types used by every subsystem.

pub mod config;

// Re-export commonly used config types
pub use config::{
    ViewerConfig,
    PathConfig,
    FontConfig,
    TransitionConfig,
    Config,
    ConfigError,
};
