//! Dependency installer and dev-server launcher for projects split into a
//! `backend/` and a `frontend/` directory.

pub mod config;
pub mod install;
pub mod interrupt;
pub mod launch;
pub mod preflight;
pub mod process;
pub mod utils;

#[cfg(test)]
mod fake;
