use std::fmt;
use std::path::Path;

use crate::config::ToolchainConfig;
use crate::process::{CommandSpec, ProcessRunner};

/// Printed by both binaries when the toolchain check fails.
pub const TOOLCHAIN_MISSING_MESSAGE: &str =
    "Node.js and npm are required. Please install them first.";

/// A required tool is missing or its version query failed.
#[derive(Debug)]
pub struct ToolchainMissing {
    pub command: CommandSpec,
    pub reason: String,
}

impl fmt::Display for ToolchainMissing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toolchain check `{}` failed: {}", self.command, self.reason)
    }
}

impl std::error::Error for ToolchainMissing {}

/// Run every version query in order, stopping at the first failure.
pub fn verify<R: ProcessRunner>(
    toolchain: &ToolchainConfig,
    root: &Path,
    runner: &R,
) -> Result<(), ToolchainMissing> {
    for check in &toolchain.checks {
        runner.run(check, root).map_err(|e| ToolchainMissing {
            command: check.clone(),
            reason: format!("{:#}", e),
        })?;
    }
    Ok(())
}
