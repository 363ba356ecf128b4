//! nsgate - network namespace entry gate
//!
//! A one-shot privileged helper: prove the caller owns the target
//! network namespace, check the command against the deployment
//! allowlist, join the namespace, and exec - preserving inherited
//! descriptors so socket-activated proxying works across the namespace
//! boundary.

use std::process;

use clap::Parser;
use nsgate_core::{ActivationEnv, CallerIdentity};
use nsgate_netns::{entry, run, Policy};
use tracing::Level;

mod cli;

use cli::Cli;

fn main() {
    // Usage-shape errors (missing --, missing command) exit 2 here
    let cli = Cli::parse();

    // Setup logging based on verbosity; stdout belongs to the exec'd
    // command, so diagnostics go to stderr
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // One snapshot of process-global state for the whole run
    let caller = CallerIdentity::current();
    let activation = ActivationEnv::from_env();
    let policy = Policy::default();

    entry::log_handoff_state(&activation);

    let err = match cli
        .into_request()
        .and_then(|request| run(&request, &policy, &caller, &activation))
    {
        // run only returns on failure; a successful exec replaced us
        Ok(never) => match never {},
        Err(err) => err,
    };

    eprintln!("nsgate: {err}");
    process::exit(err.exit_status());
}
