//! Project configuration
//!
//! This module handles the project layout, the `.buildr.properties` file and
//! environment descriptors.

pub mod environment;
pub mod layout;
pub mod properties;

// Re-export main types
pub use environment::*;
pub use layout::*;
pub use properties::*;
