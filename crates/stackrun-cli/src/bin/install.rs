use anyhow::Result;
use clap::Parser;
use stackrun_cli::commands::install::{self, InstallCli};

fn main() -> Result<()> {
    let cli = InstallCli::parse();
    install::run(cli)
}
