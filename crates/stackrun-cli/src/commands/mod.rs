pub mod dev;
pub mod install;

use anyhow::Result;
use colored::Colorize;
use stackrun_core::preflight::{ToolchainMissing, TOOLCHAIN_MISSING_MESSAGE};

/// A failed toolchain check ends the process here with the fixed message
/// and status 1; every other error is handed back to `main`.
fn exit_on_missing_toolchain<T>(result: Result<T>) -> Result<T> {
    if let Err(err) = &result {
        if err.downcast_ref::<ToolchainMissing>().is_some() {
            println!("{}", TOOLCHAIN_MISSING_MESSAGE.red());
            std::process::exit(1);
        }
    }
    result
}
