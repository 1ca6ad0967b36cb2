use anyhow::Result;
use clap::Parser;
use stackrun_core::config::Workspace;
use stackrun_core::install;
use stackrun_core::process::SystemRunner;

#[derive(Parser)]
#[command(
    name = "stackrun-install",
    version,
    about = "Install backend and frontend dependencies (npm install in each)"
)]
pub struct InstallCli {}

pub fn run(_cli: InstallCli) -> Result<()> {
    let workspace = Workspace::discover()?;
    super::exit_on_missing_toolchain(install::run(&workspace, &SystemRunner))
}
