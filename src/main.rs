use anyhow::Context as _;
use buildr::BuildrError;
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = buildr::cli::run().context("buildr stopped") {
        // Usage errors, help and version output are handled by clap.
        if let Some(BuildrError::Cli(clap_err)) = e.downcast_ref::<BuildrError>() {
            clap_err.exit();
        }

        eprintln!("Error: {:#}", e);
        process::exit(2);
    }
}
