use anyhow::Result;
use clap::Parser;
use stackrun_cli::commands::dev::{self, DevCli};

fn main() -> Result<()> {
    let cli = DevCli::parse();
    dev::run(cli)
}
