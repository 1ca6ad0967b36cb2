use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::process::{Child, Command};

use crate::utils::ui;

/// A program plus its arguments, e.g. `npm run build`.
///
/// In `stackrun.toml` a command is written as a string array:
/// `build = ["npm", "run", "build"]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<String>")]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    fn to_command(&self, cwd: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args).current_dir(cwd);
        command
    }
}

impl TryFrom<Vec<String>> for CommandSpec {
    type Error = String;

    fn try_from(mut parts: Vec<String>) -> Result<Self, Self::Error> {
        if parts.is_empty() {
            return Err("command must name at least a program".to_string());
        }
        let program = parts.remove(0);
        if program.trim().is_empty() {
            return Err("command program must not be blank".to_string());
        }
        Ok(Self {
            program,
            args: parts,
        })
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// How a child process ended. `code` is `None` when it was ended by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessExit {
    pub code: Option<i32>,
}

impl ProcessExit {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl fmt::Display for ProcessExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {}", code),
            None => write!(f, "terminated by signal"),
        }
    }
}

impl From<std::process::ExitStatus> for ProcessExit {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

/// A background process started by [`ProcessRunner::spawn`].
pub trait ProcessHandle {
    /// Poll for exit without blocking.
    fn try_wait(&mut self) -> Result<Option<ProcessExit>>;

    /// Ask the process to stop. One request, no escalation; a process that
    /// already exited is left alone.
    fn terminate(&mut self) -> Result<()>;
}

/// Runs external commands on behalf of the installer and the launcher.
pub trait ProcessRunner {
    type Handle: ProcessHandle;

    /// Echo and run `cmd` in `cwd`, blocking until it exits. Any non-zero
    /// exit is an error.
    fn run(&self, cmd: &CommandSpec, cwd: &Path) -> Result<()>;

    /// Echo and start `cmd` in `cwd` without waiting for it.
    fn spawn(&self, cmd: &CommandSpec, cwd: &Path) -> Result<Self::Handle>;
}

/// [`ProcessRunner`] backed by `std::process` with inherited stdio.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    type Handle = SystemProcess;

    fn run(&self, cmd: &CommandSpec, cwd: &Path) -> Result<()> {
        ui::command(&cmd.to_string());
        let status = cmd
            .to_command(cwd)
            .status()
            .with_context(|| format!("Failed to execute `{}` in {}", cmd, cwd.display()))?;

        if !status.success() {
            bail!("`{}` failed with {}", cmd, ProcessExit::from(status));
        }
        Ok(())
    }

    fn spawn(&self, cmd: &CommandSpec, cwd: &Path) -> Result<SystemProcess> {
        ui::command(&cmd.to_string());
        let child = cmd
            .to_command(cwd)
            .spawn()
            .with_context(|| format!("Failed to start `{}` in {}", cmd, cwd.display()))?;
        Ok(SystemProcess { child })
    }
}

#[derive(Debug)]
pub struct SystemProcess {
    child: Child,
}

impl SystemProcess {
    /// Block until the process exits.
    pub fn wait(&mut self) -> Result<ProcessExit> {
        Ok(self.child.wait()?.into())
    }
}

impl ProcessHandle for SystemProcess {
    fn try_wait(&mut self) -> Result<Option<ProcessExit>> {
        Ok(self.child.try_wait()?.map(ProcessExit::from))
    }

    fn terminate(&mut self) -> Result<()> {
        if self.child.try_wait()?.is_some() {
            return Ok(());
        }

        #[cfg(unix)]
        {
            use nix::sys::signal::{kill, Signal};
            use nix::unistd::Pid;

            let pid = i32::try_from(self.child.id()).context("Process id out of range")?;
            kill(Pid::from_raw(pid), Signal::SIGTERM)
                .with_context(|| format!("SIGTERM to process {} failed", pid))?;
        }

        #[cfg(not(unix))]
        {
            self.child.kill()?;
        }

        Ok(())
    }
}
