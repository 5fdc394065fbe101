//! Runfile generation
//!
//! A runfile is a shell script that launches the project with every resolved
//! environment value set inline, e.g. `DB_HOST="x" PORT="80" go run *.go`.

use crate::config::EnvironmentMap;
use crate::error::{ExecutionError, ExecutionResult};
use crate::runner::{scalar_to_string, Context};
use std::fs;
use std::io::Write;
use std::path::Path;

const HEADER: &str = "#!/bin/bash\n# Auto-generated by buildr.  Do not modify.\n";

/// Build the runfile text
///
/// Values that are sequences or mappings cannot be written inline; their keys
/// are returned alongside the script.
pub fn build_runfile(env: &EnvironmentMap, run_command: &str) -> (String, Vec<String>) {
    let mut script = String::from(HEADER);
    let mut skipped = Vec::new();

    for (key, value) in env {
        match scalar_to_string(value) {
            Some(value) => {
                script.push_str(&format!("{}=\"{}\" ", key, quote(&value)));
            }
            None => skipped.push(key.clone()),
        }
    }

    script.push_str(run_command);
    script.push('\n');
    (script, skipped)
}

/// Escape a value for use inside double quotes
fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '"' | '$' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Write `script` to `path`, creating the parent directory if needed
///
/// The file is created executable for everyone (subject to the umask).
pub fn write_runfile(path: &Path, script: &str) -> ExecutionResult<()> {
    let to_error = |source| ExecutionError::WriteRunfile {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.is_dir() {
            fs::create_dir_all(parent).map_err(to_error)?;
        }
    }

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o777);
    }

    let mut file = options.open(path).map_err(to_error)?;
    file.write_all(script.as_bytes()).map_err(to_error)?;
    Ok(())
}

/// Build and write the runfile, reporting skipped values
pub fn generate_runfile(
    path: &Path,
    env: &EnvironmentMap,
    run_command: &str,
    ctx: &Context,
) -> ExecutionResult<()> {
    let (script, skipped) = build_runfile(env, run_command);
    for key in skipped {
        ctx.print_warning(&format!("Skipping non-scalar value for {} in runfile", key));
    }

    write_runfile(path, &script)?;
    ctx.print_debug(&format!("Wrote {}", path.display()));
    Ok(())
}
