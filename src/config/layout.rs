//! Project file layout
//!
//! Every path buildr touches is derived from the project root and the selected
//! environment name.

use std::path::{Path, PathBuf};

/// Project properties file, relative to the project root
pub const PROPERTIES_FILE: &str = ".buildr.properties";

/// Directory holding one sub-directory per environment
pub const ENV_ROOT_DIR: &str = ".buildr";

/// Environment descriptor file name inside an environment directory
pub const ENV_FILE: &str = "env.buildr";

/// Substring that marks a file as a command template
pub const COMMAND_MARKER: &str = ".cmd.buildr";

/// Directory (under the env root) that receives the generated runfile
pub const BIN_DIR: &str = "bin";

/// Generated runfile name
pub const RUNFILE: &str = "Runfile";

/// Environment used when none is given on the command line
pub const DEFAULT_ENVIRONMENT: &str = "test";

/// Resolved paths for one project and environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
    environment: String,
}

impl Layout {
    pub fn new(root: impl Into<PathBuf>, environment: impl Into<String>) -> Self {
        Layout {
            root: root.into(),
            environment: environment.into(),
        }
    }

    /// Project root (the working directory for commands)
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Selected environment name
    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn properties_file(&self) -> PathBuf {
        self.root.join(PROPERTIES_FILE)
    }

    pub fn env_root(&self) -> PathBuf {
        self.root.join(ENV_ROOT_DIR)
    }

    /// `<root>/.buildr/<environment>`
    pub fn env_dir(&self) -> PathBuf {
        self.env_root().join(&self.environment)
    }

    pub fn env_file(&self) -> PathBuf {
        self.env_dir().join(ENV_FILE)
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.env_root().join(BIN_DIR)
    }

    pub fn runfile(&self) -> PathBuf {
        self.bin_dir().join(RUNFILE)
    }
}
