//! Environment resolution
//!
//! An environment descriptor (`.buildr/<env>/env.buildr`) is a template rendered
//! with the project properties, whose output is a YAML mapping. Its keys are
//! normalized into shell-style names (`database-host` becomes `DATABASE_HOST`).

use crate::config::{Layout, ProjectProperties};
use crate::error::{ConfigError, ConfigResult};
use crate::runner::{render_lenient, scalar_to_string, Context};
use serde_yaml::{Mapping, Value};
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Resolved environment variables, keyed by normalized name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvironmentMap {
    vars: BTreeMap<String, Value>,
}

impl EnvironmentMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert under the normalized form of `key`, replacing any previous value
    pub fn insert(&mut self, key: &str, value: Value) -> Option<Value> {
        self.vars.insert(normalize_key(key), value)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.vars.get(key)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.vars.keys()
    }

    /// Entries in key order
    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.vars.iter()
    }

    /// Scalar entries formatted as strings, for exporting to child processes
    pub fn scalar_vars(&self) -> impl Iterator<Item = (&String, String)> {
        self.vars
            .iter()
            .filter_map(|(k, v)| scalar_to_string(v).map(|s| (k, s)))
    }

    /// The map as a template context
    pub fn template_context(&self) -> Mapping {
        self.vars
            .iter()
            .map(|(k, v)| (Value::String(k.clone()), v.clone()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a EnvironmentMap {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.vars.iter()
    }
}

/// Normalize a descriptor key into an environment variable name
pub fn normalize_key(key: &str) -> String {
    key.to_uppercase().replace('-', "_")
}

/// Parse a rendered descriptor into an environment map
///
/// Scalar keys are stringified; keys that are sequences or mappings are skipped
/// and returned so the caller can report them.
pub fn parse_environment(
    rendered: &str,
    path: &Path,
) -> ConfigResult<(EnvironmentMap, Vec<String>)> {
    let doc: Value = serde_yaml::from_str(rendered).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let mapping = match doc {
        Value::Null => Mapping::new(),
        Value::Mapping(mapping) => mapping,
        _ => {
            return Err(ConfigError::Invalid(format!(
                "'{}' must render to a mapping of names to values",
                path.display()
            )))
        }
    };

    let mut env = EnvironmentMap::new();
    let mut skipped = Vec::new();

    for (key, value) in mapping {
        match key_to_string(&key) {
            Some(name) => {
                if let Some(previous) = env.insert(&name, value) {
                    log::debug!("'{}' overrides earlier value {:?}", name, previous);
                }
            }
            None => skipped.push(format!("{:?}", key)),
        }
    }

    Ok((env, skipped))
}

fn key_to_string(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Bool(_) | Value::Number(_) => scalar_to_string(key),
        _ => None,
    }
}

/// Outcome of loading an environment descriptor
#[derive(Debug, Default)]
pub struct LoadedEnvironment {
    pub env: EnvironmentMap,

    /// Keys that could not be used as variable names
    pub skipped_keys: Vec<String>,

    /// References that rendered as empty text
    pub render_errors: Vec<ConfigError>,
}

/// Read, render and parse the environment descriptor at `path`
///
/// A bad reference renders as empty text and is reported in
/// [`LoadedEnvironment::render_errors`]; the rest of the descriptor still
/// loads. Read and parse failures are returned.
pub fn load_environment(
    path: &Path,
    props: &ProjectProperties,
) -> ConfigResult<LoadedEnvironment> {
    let template = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let (rendered, errors) = render_lenient(&template, &props.template_context());
    let render_errors = errors
        .into_iter()
        .map(|source| ConfigError::Template {
            path: path.to_path_buf(),
            source,
        })
        .collect();

    let (env, skipped_keys) = parse_environment(&rendered, path)?;
    Ok(LoadedEnvironment {
        env,
        skipped_keys,
        render_errors,
    })
}

/// Resolve the environment for `layout`, reporting failures and continuing
///
/// A missing or unparseable descriptor resolves to an empty map.
pub fn resolve_environment(
    layout: &Layout,
    props: &ProjectProperties,
    ctx: &Context,
) -> EnvironmentMap {
    let path = layout.env_file();
    ctx.print_debug(&format!("Resolving environment from {}", path.display()));

    match load_environment(&path, props) {
        Ok(loaded) => {
            for e in &loaded.render_errors {
                ctx.print_error(&e.to_string());
            }
            for key in &loaded.skipped_keys {
                ctx.print_warning(&format!(
                    "Ignoring non-scalar key {} in {}",
                    key,
                    path.display()
                ));
            }
            log::debug!("resolved {} environment variables", loaded.env.len());
            loaded.env
        }
        Err(e) => {
            ctx.print_error(&e.to_string());
            EnvironmentMap::new()
        }
    }
}
