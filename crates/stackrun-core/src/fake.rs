//! Recording [`ProcessRunner`] for unit tests.
//!
//! Every call is logged as an [`Event`] so tests can assert on ordering.
//! Commands are matched by their display form (`"npm run build"`).

use anyhow::{bail, Result};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::interrupt::Interrupt;
use crate::process::{CommandSpec, ProcessExit, ProcessHandle, ProcessRunner};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Run { cmd: String, cwd: PathBuf },
    Spawn { cmd: String, cwd: PathBuf },
    Exited { cmd: String },
    Terminate { cmd: String },
}

impl Event {
    pub fn run(cmd: &str, cwd: impl Into<PathBuf>) -> Self {
        Event::Run {
            cmd: cmd.to_string(),
            cwd: cwd.into(),
        }
    }

    pub fn spawn(cmd: &str, cwd: impl Into<PathBuf>) -> Self {
        Event::Spawn {
            cmd: cmd.to_string(),
            cwd: cwd.into(),
        }
    }

    pub fn exited(cmd: &str) -> Self {
        Event::Exited {
            cmd: cmd.to_string(),
        }
    }

    pub fn terminate(cmd: &str) -> Self {
        Event::Terminate {
            cmd: cmd.to_string(),
        }
    }
}

#[derive(Default)]
pub struct FakeRunner {
    log: Rc<RefCell<Vec<Event>>>,
    failing_runs: HashSet<String>,
    failing_spawns: HashSet<String>,
    failing_terminates: HashSet<String>,
    failing_waits: HashSet<String>,
    /// Raised on the first poll of the keyed command, before it reports.
    interrupts: HashMap<String, Interrupt>,
    /// Polls before a spawned command reports exit; absent means it never exits.
    exit_after: HashMap<String, usize>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_run(mut self, cmd: &str) -> Self {
        self.failing_runs.insert(cmd.to_string());
        self
    }

    pub fn fail_spawn(mut self, cmd: &str) -> Self {
        self.failing_spawns.insert(cmd.to_string());
        self
    }

    pub fn fail_terminate(mut self, cmd: &str) -> Self {
        self.failing_terminates.insert(cmd.to_string());
        self
    }

    pub fn fail_wait(mut self, cmd: &str) -> Self {
        self.failing_waits.insert(cmd.to_string());
        self
    }

    /// Raise `interrupt` when `cmd` is polled, as a Ctrl+C reaching the
    /// launcher and its children at once would.
    pub fn interrupts_on_poll(mut self, cmd: &str, interrupt: &Interrupt) -> Self {
        self.interrupts.insert(cmd.to_string(), interrupt.clone());
        self
    }

    pub fn exits_after(mut self, cmd: &str, polls: usize) -> Self {
        self.exit_after.insert(cmd.to_string(), polls);
        self
    }

    pub fn events(&self) -> Vec<Event> {
        self.log.borrow().clone()
    }
}

impl ProcessRunner for FakeRunner {
    type Handle = FakeProcess;

    fn run(&self, cmd: &CommandSpec, cwd: &Path) -> Result<()> {
        let line = cmd.to_string();
        self.log.borrow_mut().push(Event::run(&line, cwd));
        if self.failing_runs.contains(&line) {
            bail!("`{}` failed with exit code 2", line);
        }
        Ok(())
    }

    fn spawn(&self, cmd: &CommandSpec, cwd: &Path) -> Result<FakeProcess> {
        let line = cmd.to_string();
        if self.failing_spawns.contains(&line) {
            bail!("Failed to start `{}`", line);
        }
        self.log.borrow_mut().push(Event::spawn(&line, cwd));
        Ok(FakeProcess {
            polls_left: self.exit_after.get(&line).copied(),
            fail_terminate: self.failing_terminates.contains(&line),
            fail_wait: self.failing_waits.contains(&line),
            interrupt: self.interrupts.get(&line).cloned(),
            exited: false,
            log: Rc::clone(&self.log),
            cmd: line,
        })
    }
}

pub struct FakeProcess {
    cmd: String,
    polls_left: Option<usize>,
    fail_terminate: bool,
    fail_wait: bool,
    interrupt: Option<Interrupt>,
    exited: bool,
    log: Rc<RefCell<Vec<Event>>>,
}

impl ProcessHandle for FakeProcess {
    fn try_wait(&mut self) -> Result<Option<ProcessExit>> {
        if let Some(interrupt) = &self.interrupt {
            interrupt.trigger();
        }
        if self.fail_wait {
            bail!("waitpid on `{}` failed", self.cmd);
        }
        match self.polls_left {
            Some(0) => {
                if !self.exited {
                    self.exited = true;
                    self.log.borrow_mut().push(Event::exited(&self.cmd));
                }
                Ok(Some(ProcessExit { code: Some(0) }))
            }
            Some(ref mut n) => {
                *n -= 1;
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn terminate(&mut self) -> Result<()> {
        self.log.borrow_mut().push(Event::terminate(&self.cmd));
        if self.fail_terminate {
            bail!("terminate `{}` failed", self.cmd);
        }
        Ok(())
    }
}
