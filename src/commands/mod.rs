//! CLI command implementations.

use std::{
    io::{self, IsTerminal},
    path::{Path, PathBuf},
};

use crate::{
    config::Config, diagnostics::Diagnostics, error::Result, paths::resolve_project_root,
    process::PackageManager,
};

/// Output color handling selection.
#[derive(Debug, Clone, Copy)]
pub enum ColorChoice {
    /// Colorize only when output is a TTY.
    Auto,
    /// Always colorize output.
    Always,
    /// Never colorize output.
    Never,
}

impl ColorChoice {
    /// Determine whether color output should be enabled.
    pub(crate) fn enabled(self) -> bool {
        match self {
            Self::Auto => io::stdout().is_terminal(),
            Self::Always => true,
            Self::Never => false,
        }
    }
}

/// Settings shared by every command invocation.
#[derive(Debug, Clone)]
pub struct Context {
    /// Project root holding `package.json`.
    pub root: PathBuf,
    /// Output color selection.
    pub color: ColorChoice,
    /// Whether verbose traces are printed.
    pub verbose: bool,
    /// Loaded user configuration.
    pub config: Config,
}

impl Context {
    /// Resolve the project root and load the user config.
    pub(crate) fn load(dir: Option<&Path>, color: ColorChoice, verbose: bool) -> Result<Self> {
        let root = resolve_project_root(dir)?;
        let config = Config::load()?;
        Ok(Self {
            root,
            color,
            verbose,
            config,
        })
    }

    /// Whether output should be colored.
    pub(crate) fn use_color(&self) -> bool {
        self.color.enabled()
    }

    /// A fresh diagnostics collector honoring `--verbose`.
    pub(crate) fn diagnostics(&self) -> Diagnostics {
        Diagnostics::new(self.verbose)
    }

    /// The configured package manager, rooted in the project.
    pub(crate) fn package_manager(&self) -> PackageManager {
        PackageManager::new(self.config.package_manager(), &self.root)
    }
}

/// Build a context for a test project that uses `package_manager`.
#[cfg(test)]
pub(crate) fn test_context(root: &Path, package_manager: &str) -> Context {
    Context {
        root: root.to_path_buf(),
        color: ColorChoice::Never,
        verbose: false,
        config: Config::with_package_manager(package_manager).expect("config"),
    }
}

// Command modules are ordered alphabetically - maintain this order.
/// Add command implementation.
pub mod add;
/// Checkdeps command implementation.
pub mod checkdeps;
/// Init command implementation.
pub mod init;
/// Link command implementation.
pub mod link;
/// Package-manager pass-through implementation.
pub mod passthrough;
/// Run command implementation.
pub mod run;
/// Scripts command implementation.
pub mod scripts;
/// Set command implementation.
pub mod set;
/// Unlink command implementation.
pub mod unlink;
