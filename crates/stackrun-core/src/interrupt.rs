use anyhow::{Context, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Raised when the user asks the launcher to stop (Ctrl+C or SIGTERM).
#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    flag: Arc<AtomicBool>,
}

impl Interrupt {
    /// A flag nothing raises except [`Interrupt::trigger`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Route Ctrl+C and SIGTERM into a new flag instead of killing the
    /// process. Can only be called once per process.
    pub fn install() -> Result<Self> {
        let interrupt = Self::new();
        let handle = interrupt.clone();
        ctrlc::set_handler(move || handle.trigger()).context("Failed to set Ctrl+C handler")?;
        Ok(interrupt)
    }

    pub fn trigger(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_triggered(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}
