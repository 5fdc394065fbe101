//! Buildr - an environment-aware shell task runner
//!
//! Buildr reads `.buildr.properties`, resolves the environment descriptor of
//! the selected environment and runs every command template found in that
//! environment's directory, or writes a runfile that launches the project
//! with the environment set.

// Public modules
pub mod cli;
pub mod config;
pub mod error;
pub mod runner;

// Re-export commonly used types
pub use error::{BuildrError, Result};

/// Current version of Buildr
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
