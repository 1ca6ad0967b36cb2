use anyhow::{Context, Result};
use std::time::Duration;

use crate::config::{Component, Workspace};
use crate::interrupt::Interrupt;
use crate::preflight;
use crate::process::{ProcessExit, ProcessHandle, ProcessRunner};
use crate::utils::ui;

/// How often a running server is polled for exit.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// Both servers exited on their own.
    Completed,
    /// An interrupt ended the wait before both servers exited.
    Interrupted,
}

/// Check the toolchain, build the backend, then run the backend and
/// frontend dev servers side by side until both exit or `interrupt` fires.
/// Both servers are asked to terminate before this returns, whatever the
/// outcome of the wait.
pub fn run<R: ProcessRunner>(
    workspace: &Workspace,
    runner: &R,
    interrupt: &Interrupt,
    poll_interval: Duration,
) -> Result<LaunchOutcome> {
    let config = &workspace.config;

    preflight::verify(&config.toolchain, &workspace.root, runner)?;

    runner
        .run(&config.backend.build, &workspace.dir(Component::Backend))
        .context("backend build failed")?;

    if interrupt.is_triggered() {
        return Ok(LaunchOutcome::Interrupted);
    }

    ui::section("Starting development servers...");
    let mut servers = DevServers::start(workspace, runner)?;
    let joined = servers.join(interrupt, poll_interval);
    servers.terminate_all();

    match joined? {
        LaunchOutcome::Completed if interrupt.is_triggered() => Ok(LaunchOutcome::Interrupted),
        outcome => Ok(outcome),
    }
}

struct DevServers<H> {
    backend: H,
    frontend: H,
}

impl<H: ProcessHandle> DevServers<H> {
    /// Spawn both servers back to back; neither is waited on here.
    fn start<R>(workspace: &Workspace, runner: &R) -> Result<Self>
    where
        R: ProcessRunner<Handle = H>,
    {
        let config = &workspace.config;

        let mut backend = runner
            .spawn(&config.backend.start, &workspace.dir(Component::Backend))
            .context("failed to start backend dev server")?;

        let frontend_dir = workspace.dir(Component::Frontend);
        let frontend = match runner.spawn(&config.frontend.dev, &frontend_dir) {
            Ok(handle) => handle,
            Err(e) => {
                // Ignored: the spawn error is the one worth reporting.
                let _ = backend.terminate();
                return Err(e.context("failed to start frontend dev server"));
            }
        };

        Ok(Self { backend, frontend })
    }

    /// Wait for the backend, then the frontend.
    fn join(&mut self, interrupt: &Interrupt, poll_interval: Duration) -> Result<LaunchOutcome> {
        let servers = [
            (Component::Backend, &mut self.backend),
            (Component::Frontend, &mut self.frontend),
        ];
        for (component, handle) in servers {
            let exit = wait_for(handle, interrupt, poll_interval)
                .with_context(|| format!("failed waiting on {} dev server", component))?;
            match exit {
                Some(exit) => ui::notice(&format!("{} dev server exited ({})", component, exit)),
                None => {
                    ui::notice("interrupted, stopping dev servers");
                    return Ok(LaunchOutcome::Interrupted);
                }
            }
        }
        Ok(LaunchOutcome::Completed)
    }

    /// Best-effort: termination errors are discarded so a failure on one
    /// server never prevents the attempt on the other.
    fn terminate_all(&mut self) {
        for handle in [&mut self.backend, &mut self.frontend] {
            let _ = handle.terminate();
        }
    }
}

/// Block until `handle` exits (`Some`) or `interrupt` fires (`None`).
fn wait_for<H: ProcessHandle>(
    handle: &mut H,
    interrupt: &Interrupt,
    poll_interval: Duration,
) -> Result<Option<ProcessExit>> {
    loop {
        // Checked before polling: a server killed by the same Ctrl+C never
        // counts as a normal exit.
        if interrupt.is_triggered() {
            return Ok(None);
        }
        if let Some(exit) = handle.try_wait()? {
            return Ok(Some(exit));
        }
        std::thread::sleep(poll_interval);
    }
}
