//! Configuration model for devflow.
//!
//! This module defines the Config struct that represents `devflow.yaml`.
//! It supports forward-compatible YAML parsing (unknown fields are ignored),
//! sensible defaults for optional fields, and validation of config values.

mod model;
mod operations;
pub mod types;


/// Name of the optional config file at the project root.
pub const CONFIG_FILE_NAME: &str = "devflow.yaml";

// Re-export public API
pub use model::Config;
pub use types::{DemoStep, SanitizerDefines, ToolNames};
