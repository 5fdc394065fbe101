//! Error types for Buildr

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Buildr operations
pub type Result<T> = std::result::Result<T, BuildrError>;

/// Errors that end the process
///
/// Everything else is reported where it happens and the run carries on.
#[derive(Error, Debug)]
pub enum BuildrError {
    /// Command line parsing errors (including help and version requests)
    #[error(transparent)]
    Cli(#[from] clap::Error),

    /// Command collection and execution errors
    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),
}

/// Errors raised while loading properties and environment descriptors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to render '{path}': {source}")]
    Template {
        path: PathBuf,
        #[source]
        source: RenderError,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Template rendering errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RenderError {
    #[error("Variable '{0}' is not defined")]
    UndefinedVariable(String),

    #[error("Variable '{0}' is not a scalar value")]
    NonScalar(String),

    #[error("Invalid template syntax: {0}")]
    InvalidSyntax(String),
}

/// Command collection, execution and runfile errors
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Failed to walk '{path}': {error}")]
    Walk { path: PathBuf, error: String },

    #[error("Failed to read command file '{path}': {source}")]
    ReadCommand {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to render command file '{path}': {source}")]
    RenderCommand {
        path: PathBuf,
        #[source]
        source: RenderError,
    },

    #[error("Failed to start '{path}': {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Command '{path}' failed with exit code {code:?}")]
    CommandFailed { path: PathBuf, code: Option<i32> },

    #[error("Failed to write runfile '{path}': {source}")]
    WriteRunfile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Specialized result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Specialized result type for template rendering
pub type RenderResult<T> = std::result::Result<T, RenderError>;

/// Specialized result type for execution operations
pub type ExecutionResult<T> = std::result::Result<T, ExecutionError>;
