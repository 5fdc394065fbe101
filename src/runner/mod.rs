//! Command collection and execution
//!
//! This module renders command templates, runs them through the shell and
//! generates runfiles.

pub mod collect;
pub mod command;
pub mod context;
pub mod pipeline;
pub mod runfile;
pub mod template;

// Re-export main types
pub use collect::*;
pub use command::*;
pub use context::*;
pub use runfile::*;
pub use template::*;
