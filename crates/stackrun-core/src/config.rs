use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::process::CommandSpec;

/// Name of the optional configuration file at the project root.
pub const CONFIG_FILE: &str = "stackrun.toml";

/// Effective configuration. Every section is optional in `stackrun.toml`;
/// missing keys fall back to the npm defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StackConfig {
    #[serde(default)]
    pub toolchain: ToolchainConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub frontend: FrontendConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ToolchainConfig {
    /// Version queries that must all succeed before anything else runs.
    #[serde(default = "default_checks")]
    pub checks: Vec<CommandSpec>,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            checks: default_checks(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_install")]
    pub install: CommandSpec,
    #[serde(default = "default_build")]
    pub build: CommandSpec,
    /// Long-running server started by the dev launcher.
    #[serde(default = "default_start")]
    pub start: CommandSpec,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            dir: default_backend_dir(),
            install: default_install(),
            build: default_build(),
            start: default_start(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FrontendConfig {
    #[serde(default = "default_frontend_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_install")]
    pub install: CommandSpec,
    /// Long-running dev server started by the dev launcher.
    #[serde(default = "default_dev")]
    pub dev: CommandSpec,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            dir: default_frontend_dir(),
            install: default_install(),
            dev: default_dev(),
        }
    }
}

fn default_checks() -> Vec<CommandSpec> {
    vec![
        CommandSpec::new("node", &["-v"]),
        CommandSpec::new("npm", &["-v"]),
    ]
}

fn default_backend_dir() -> PathBuf {
    PathBuf::from("backend")
}

fn default_frontend_dir() -> PathBuf {
    PathBuf::from("frontend")
}

fn default_install() -> CommandSpec {
    CommandSpec::new("npm", &["install"])
}

fn default_build() -> CommandSpec {
    CommandSpec::new("npm", &["run", "build"])
}

fn default_start() -> CommandSpec {
    CommandSpec::new("npm", &["run", "start:dev"])
}

fn default_dev() -> CommandSpec {
    CommandSpec::new("npm", &["run", "dev"])
}

impl StackConfig {
    /// Read `stackrun.toml` from `root`, or the defaults if there is none.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: StackConfig = toml::from_str(&content)
            .with_context(|| format!("Invalid {}", path.display()))?;
        Ok(config)
    }
}

/// One half of the project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Backend,
    Frontend,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Backend => write!(f, "backend"),
            Component::Frontend => write!(f, "frontend"),
        }
    }
}

/// The project root plus its effective configuration. Resolved once at
/// startup and handed to every operation.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub root: PathBuf,
    pub config: StackConfig,
}

impl Workspace {
    pub fn load(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let config = StackConfig::load(&root)?;
        Ok(Self { root, config })
    }

    /// Resolve the root from the current directory (see [`find_root`]).
    pub fn discover() -> Result<Self> {
        let cwd = std::env::current_dir().context("Cannot determine current directory")?;
        Self::load(find_root(&cwd))
    }

    pub fn dir(&self, component: Component) -> PathBuf {
        match component {
            Component::Backend => self.root.join(&self.config.backend.dir),
            Component::Frontend => self.root.join(&self.config.frontend.dir),
        }
    }

    pub fn install_command(&self, component: Component) -> &CommandSpec {
        match component {
            Component::Backend => &self.config.backend.install,
            Component::Frontend => &self.config.frontend.install,
        }
    }
}

/// First of `start` and its ancestors holding `stackrun.toml` or both a
/// `backend/` and a `frontend/` directory. Falls back to `start`.
pub fn find_root(start: &Path) -> PathBuf {
    start
        .ancestors()
        .find(|dir| {
            dir.join(CONFIG_FILE).is_file()
                || (dir.join("backend").is_dir() && dir.join("frontend").is_dir())
        })
        .unwrap_or(start)
        .to_path_buf()
}
