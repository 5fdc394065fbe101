//! Main CLI application

use crate::config::{Layout, DEFAULT_ENVIRONMENT};
use crate::error::Result;
use crate::runner::{pipeline, CollectPolicy, Context, FsCommandSource, Verbosity};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::ffi::OsString;
use std::path::PathBuf;

pub const RUN_COMMAND: &str = "run";
pub const BUILD_ENV_COMMAND: &str = "build-env";

/// CLI application
pub struct App {
    /// The clap command
    command: Command,
}

impl App {
    pub fn new() -> Self {
        App {
            command: build_command(),
        }
    }

    /// Run the application with the given command line (including the binary name)
    pub fn run_from<I, T>(self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.command.try_get_matches_from(args)?;

        let verbosity = get_verbosity(&matches);
        let root = matches
            .get_one::<PathBuf>("dir")
            .cloned()
            .unwrap_or_else(|| PathBuf::from("."));

        let mut ctx = Context::new()
            .with_working_dir(root.clone())
            .with_verbosity(verbosity);

        match matches.subcommand() {
            Some((RUN_COMMAND, sub)) => {
                let layout = Layout::new(root, environment(sub));
                let policy = if sub.get_flag("fail-fast") {
                    CollectPolicy::FailFast
                } else {
                    CollectPolicy::BestEffort
                };
                ctx = ctx.with_export_env(sub.get_flag("export"));

                ctx.print_debug(&format!("Running environment '{}'", layout.environment()));
                pipeline::run(&layout, &FsCommandSource, policy, &ctx);
                Ok(())
            }
            Some((BUILD_ENV_COMMAND, sub)) => {
                let layout = Layout::new(root, environment(sub));
                pipeline::build_env(&layout, &ctx)?;
                Ok(())
            }
            // subcommand_required rejects everything else during parsing
            _ => Ok(()),
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the clap command
fn build_command() -> Command {
    let env_arg = Arg::new("env")
        .short('e')
        .long("env")
        .value_name("ENV")
        .default_value(DEFAULT_ENVIRONMENT)
        .help("Environment to run buildr upon");

    Command::new("buildr")
        .version(crate::VERSION)
        .about("Render environment-specific command templates and run them")
        .subcommand_required(true)
        .arg(
            Arg::new("dir")
                .short('C')
                .long("dir")
                .value_name("DIR")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Project root (defaults to the current directory)")
                .global(true),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only print command output and errors")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("silent")
                .short('s')
                .long("silent")
                .help("Print no output of our own")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print verbose output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new(RUN_COMMAND)
                .about("Render and execute the environment's command templates")
                .arg(env_arg.clone())
                .arg(
                    Arg::new("fail-fast")
                        .long("fail-fast")
                        .help("Run nothing if any command template fails to load")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("export")
                        .long("export")
                        .help("Also export environment values to commands (inherited variables win)")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new(BUILD_ENV_COMMAND)
                .about("Generate .buildr/bin/Runfile for the environment")
                .arg(env_arg),
        )
}

/// Get verbosity level from matches
fn get_verbosity(matches: &ArgMatches) -> Verbosity {
    if matches.get_flag("silent") {
        Verbosity::Silent
    } else if matches.get_flag("quiet") {
        Verbosity::Quiet
    } else if matches.get_flag("verbose") {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    }
}

fn environment(matches: &ArgMatches) -> String {
    matches
        .get_one::<String>("env")
        .cloned()
        .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string())
}

/// Run the CLI application with the process arguments
pub fn run() -> Result<()> {
    App::new().run_from(std::env::args_os())
}
