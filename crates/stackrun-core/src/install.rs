use anyhow::{Context, Result};

use crate::config::{Component, Workspace};
use crate::preflight;
use crate::process::ProcessRunner;
use crate::utils::ui;

/// Check the toolchain, then install backend and frontend dependencies,
/// strictly in that order.
pub fn run<R: ProcessRunner>(workspace: &Workspace, runner: &R) -> Result<()> {
    preflight::verify(&workspace.config.toolchain, &workspace.root, runner)?;

    for component in [Component::Backend, Component::Frontend] {
        runner
            .run(workspace.install_command(component), &workspace.dir(component))
            .with_context(|| format!("{} install failed", component))?;
    }

    ui::success("All dependencies installed successfully.");
    Ok(())
}
