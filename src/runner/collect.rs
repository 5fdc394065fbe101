//! Command template collection
//!
//! Walks an environment directory, picks out command templates and renders each
//! one with the resolved environment.

use crate::config::{EnvironmentMap, COMMAND_MARKER};
use crate::error::{ExecutionError, ExecutionResult};
use crate::runner::{render, Command, Context};
use std::fmt::Debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Source of candidate command files
pub trait CommandSource: Debug {
    /// Regular files under `root`, depth-first with entries of each directory
    /// sorted by name. A failed entry is reported in place.
    fn walk(&self, root: &Path) -> Vec<ExecutionResult<PathBuf>>;

    /// Read a file returned by `walk`
    fn read(&self, path: &Path) -> io::Result<String>;
}

/// Filesystem-backed source
#[derive(Debug, Clone, Default)]
pub struct FsCommandSource;

impl CommandSource for FsCommandSource {
    fn walk(&self, root: &Path) -> Vec<ExecutionResult<PathBuf>> {
        WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) if entry.file_type().is_file() => Some(Ok(entry.into_path())),
                Ok(_) => None,
                Err(e) => Some(Err(ExecutionError::Walk {
                    path: e.path().unwrap_or(root).to_path_buf(),
                    error: e.to_string(),
                })),
            })
            .collect()
    }

    fn read(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }
}

/// What to do when one command file cannot be walked, read or rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CollectPolicy {
    /// Report the failure, skip the file and keep collecting
    #[default]
    BestEffort,
    /// Stop at the first failure
    FailFast,
}

/// Whether `path` names a command template
///
/// Only the part of `path` below `root` is matched, so a marker in the name of
/// the root or one of its ancestors does not count.
pub fn is_command_file(path: &Path, root: &Path) -> bool {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .contains(COMMAND_MARKER)
}

/// Collect and render every command template under `root`
///
/// With [`CollectPolicy::BestEffort`] failures are reported through `ctx` and the
/// affected files are left out. With [`CollectPolicy::FailFast`] the first
/// failure is returned.
pub fn collect_commands(
    source: &dyn CommandSource,
    root: &Path,
    env: &EnvironmentMap,
    policy: CollectPolicy,
    ctx: &Context,
) -> ExecutionResult<Vec<Command>> {
    let context = env.template_context();
    let mut commands = Vec::new();

    for entry in source.walk(root) {
        let result = entry.and_then(|path| {
            if !is_command_file(&path, root) {
                return Ok(None);
            }
            log::trace!("rendering command template {}", path.display());

            let template = source
                .read(&path)
                .map_err(|source| ExecutionError::ReadCommand {
                    path: path.clone(),
                    source,
                })?;
            let body = render(&template, &context).map_err(|source| {
                ExecutionError::RenderCommand {
                    path: path.clone(),
                    source,
                }
            })?;

            Ok(Some(Command::new(path, body)))
        });

        match result {
            Ok(Some(command)) => commands.push(command),
            Ok(None) => {}
            Err(e) => match policy {
                CollectPolicy::FailFast => return Err(e),
                CollectPolicy::BestEffort => ctx.print_error(&e.to_string()),
            },
        }
    }

    ctx.print_debug(&format!(
        "Collected {} command(s) from {}",
        commands.len(),
        root.display()
    ));
    Ok(commands)
}
