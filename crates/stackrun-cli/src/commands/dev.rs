use anyhow::Result;
use clap::Parser;
use stackrun_core::config::Workspace;
use stackrun_core::interrupt::Interrupt;
use stackrun_core::launch::{self, LaunchOutcome, POLL_INTERVAL};
use stackrun_core::process::SystemRunner;

/// Exit status after Ctrl+C, as a shell reports SIGINT.
const INTERRUPTED_EXIT_CODE: i32 = 130;

#[derive(Parser)]
#[command(
    name = "stackrun-dev",
    version,
    about = "Build the backend, then run backend + frontend dev servers"
)]
pub struct DevCli {}

pub fn run(_cli: DevCli) -> Result<()> {
    let workspace = Workspace::discover()?;
    let interrupt = Interrupt::install()?;

    let outcome = super::exit_on_missing_toolchain(launch::run(
        &workspace,
        &SystemRunner,
        &interrupt,
        POLL_INTERVAL,
    ))?;

    if outcome == LaunchOutcome::Interrupted {
        std::process::exit(INTERRUPTED_EXIT_CODE);
    }
    Ok(())
}
