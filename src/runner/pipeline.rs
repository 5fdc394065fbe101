//! The buildr pipeline
//!
//! Load properties, resolve the environment, then either collect and run the
//! command templates or write a runfile.

use crate::config::{
    load_properties_or_default, resolve_environment, EnvironmentMap, Layout, ProjectProperties,
};
use crate::error::ExecutionResult;
use crate::runner::{
    collect_commands, generate_runfile, run_commands, CollectPolicy, CommandSource, Context,
};

/// Properties and environment resolved for one run
#[derive(Debug, Clone)]
pub struct Resolved {
    pub properties: ProjectProperties,
    pub env: EnvironmentMap,
}

/// Load the project properties and resolve the selected environment
///
/// Never fails; problems are reported through `ctx`.
pub fn resolve(layout: &Layout, ctx: &Context) -> Resolved {
    let properties = load_properties_or_default(&layout.properties_file(), ctx);
    let env = resolve_environment(layout, &properties, ctx);
    Resolved { properties, env }
}

/// The `run` mode: render every command template and execute it
///
/// Collection errors stop the run under [`CollectPolicy::FailFast`], but are
/// still only reported; command failures never affect the outcome.
pub fn run(layout: &Layout, source: &dyn CommandSource, policy: CollectPolicy, ctx: &Context) {
    let resolved = resolve(layout, ctx);

    let commands = match collect_commands(source, &layout.env_dir(), &resolved.env, policy, ctx) {
        Ok(commands) => commands,
        Err(e) => {
            ctx.print_error(&e.to_string());
            return;
        }
    };

    run_commands(&commands, &resolved.env, ctx);
}

/// The `build-env` mode: write the runfile
///
/// A write failure is returned to the caller and is fatal.
pub fn build_env(layout: &Layout, ctx: &Context) -> ExecutionResult<()> {
    let resolved = resolve(layout, ctx);

    ctx.print_info("Generating Runfile...");
    generate_runfile(
        &layout.runfile(),
        &resolved.env,
        resolved.properties.run_command(),
        ctx,
    )?;
    ctx.print_info("Done!");

    Ok(())
}
