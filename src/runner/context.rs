//! Execution context for command running
//!
//! The context carries the settings shared by every pipeline stage and owns all
//! console output, gated by the selected verbosity.

use colored::Colorize;
use std::env;
use std::path::PathBuf;

/// Execution context shared by the pipeline stages
#[derive(Debug, Clone)]
pub struct Context {
    /// Working directory for spawned commands
    pub working_dir: PathBuf,

    /// Interpreter used to run command bodies (e.g., ["sh", "-c"])
    pub interpreter: Vec<String>,

    /// Whether scalar environment values are exported to spawned commands.
    /// Variables already set in this process are never replaced.
    pub export_env: bool,

    /// Verbosity level
    pub verbosity: Verbosity,
}

/// Verbosity levels for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Silent = 0,
    Quiet = 1,
    Normal = 2,
    Verbose = 3,
}

impl Context {
    /// Create a new context with default settings
    pub fn new() -> Self {
        Context {
            working_dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            interpreter: vec!["sh".to_string(), "-c".to_string()],
            export_env: false,
            verbosity: Verbosity::Normal,
        }
    }

    /// Create a context with a specific working directory
    pub fn with_working_dir(mut self, dir: PathBuf) -> Self {
        self.working_dir = dir;
        self
    }

    /// Set the interpreter
    pub fn with_interpreter(mut self, interpreter: Vec<String>) -> Self {
        self.interpreter = interpreter;
        self
    }

    /// Enable or disable exporting environment values to commands
    pub fn with_export_env(mut self, export_env: bool) -> Self {
        self.export_env = export_env;
        self
    }

    /// Set verbosity level
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Print info message
    pub fn print_info(&self, message: &str) {
        if self.verbosity >= Verbosity::Normal {
            println!("{}", message);
        }
    }

    /// Print an advisory error; execution carries on after this
    pub fn print_error(&self, message: &str) {
        log::debug!("advisory error: {}", message);
        if self.verbosity >= Verbosity::Quiet {
            println!("{} {}", "[ERROR]".red().bold(), message);
        }
    }

    /// Print warning message
    pub fn print_warning(&self, message: &str) {
        if self.verbosity >= Verbosity::Normal {
            println!("{} {}", "[WARN]".yellow().bold(), message);
        }
    }

    /// Print debug message (only in verbose mode)
    pub fn print_debug(&self, message: &str) {
        if self.verbosity >= Verbosity::Verbose {
            eprintln!("[DEBUG] {}", message);
        }
    }

    /// Print the highlighted banner shown before a command runs
    pub fn print_banner(&self, name: &str) {
        if self.verbosity >= Verbosity::Normal {
            println!("{}", format!("====> Executing script: {} ", name).green());
            println!("{}", "--------------".green());
        }
    }

    /// Print the separator that follows a finished command
    pub fn print_separator(&self) {
        if self.verbosity >= Verbosity::Normal {
            println!();
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
