//! Project properties loading

use crate::error::{ConfigError, ConfigResult};
use crate::runner::Context;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Trailing runfile command used when the properties do not name one
pub const DEFAULT_RUN_COMMAND: &str = "go run *.go";

/// Contents of `.buildr.properties`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProjectProperties {
    /// Project name, available to environment templates
    #[serde(rename = "project-name", default)]
    pub project_name: String,

    /// Command appended to the generated runfile
    #[serde(
        rename = "run-command",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub run_command: Option<String>,
}

impl ProjectProperties {
    /// Command the runfile should launch
    pub fn run_command(&self) -> &str {
        self.run_command.as_deref().unwrap_or(DEFAULT_RUN_COMMAND)
    }

    /// Template context for rendering the environment descriptor
    ///
    /// Each field is reachable both by its file key (`project-name`) and by its
    /// field-style name (`ProjectName`).
    pub fn template_context(&self) -> Mapping {
        let mut ctx = Mapping::new();
        let name = Value::String(self.project_name.clone());
        ctx.insert(Value::from("project-name"), name.clone());
        ctx.insert(Value::from("ProjectName"), name);

        let run = Value::String(self.run_command().to_string());
        ctx.insert(Value::from("run-command"), run.clone());
        ctx.insert(Value::from("RunCommand"), run);
        ctx
    }
}

/// Parse properties from a YAML string
pub fn parse_properties(yaml: &str, path: &Path) -> ConfigResult<ProjectProperties> {
    // An empty file is a valid, empty set of properties.
    if yaml.trim().is_empty() {
        return Ok(ProjectProperties::default());
    }

    serde_yaml::from_str(yaml).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and parse a properties file
pub fn load_properties(path: &Path) -> ConfigResult<ProjectProperties> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse_properties(&contents, path)
}

/// Load properties, falling back to empty ones if the file is missing or invalid
pub fn load_properties_or_default(path: &Path, ctx: &Context) -> ProjectProperties {
    match load_properties(path) {
        Ok(props) => {
            log::debug!("loaded properties from {}: {:?}", path.display(), props);
            props
        }
        Err(e) => {
            ctx.print_error(&e.to_string());
            ProjectProperties::default()
        }
    }
}
