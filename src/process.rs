//! Spawning the package manager and other external tools.
//!
//! Children inherit the terminal's stdin, stdout and stderr and always run
//! with the project root as their working directory. Every call blocks until
//! the child exits.

use std::{
    io,
    path::{Path, PathBuf},
    process::{Command, ExitStatus, Stdio},
};

use crate::error::{Error, Result};

/// An external command line rooted in the project directory.
#[derive(Debug, Clone)]
pub struct Tool {
    /// Program followed by its fixed leading arguments.
    words: Vec<String>,
    /// Working directory for spawned children.
    root: PathBuf,
}

impl Tool {
    /// Create a tool from `program` with no leading arguments.
    pub fn new(program: &str, root: &Path) -> Self {
        Self {
            words: vec![program.to_string()],
            root: root.to_path_buf(),
        }
    }

    /// Create a tool from a pre-split command line; `words` must be non-empty.
    pub fn from_words(words: &[String], root: &Path) -> Self {
        Self {
            words: words.to_vec(),
            root: root.to_path_buf(),
        }
    }

    /// Program name used in messages.
    pub fn program(&self) -> &str {
        self.words.first().map(String::as_str).unwrap_or_default()
    }

    /// Full command line for `args`, quoted for display.
    pub fn command_line<S: AsRef<str>>(&self, args: &[S]) -> String {
        let words = self
            .words
            .iter()
            .map(String::as_str)
            .chain(args.iter().map(AsRef::as_ref));
        shell_words::join(words)
    }

    /// Run with `args`, returning the child's exit status.
    pub fn status<S: AsRef<str>>(&self, args: &[S]) -> Result<ExitStatus> {
        let (program, fixed) = self.words.split_first().ok_or_else(|| Error::ProcessSpawn {
            program: String::new(),
            source: io::Error::other("empty command"),
        })?;
        Command::new(program)
            .args(fixed)
            .args(args.iter().map(AsRef::as_ref))
            .current_dir(&self.root)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|error| Error::ProcessSpawn {
                program: program.clone(),
                source: error,
            })
    }

    /// Run with `args`, treating a non-zero exit as an error.
    pub fn run<S: AsRef<str>>(&self, args: &[S]) -> Result<()> {
        let status = self.status(args)?;
        if !status.success() {
            return Err(Error::ProcessStatus {
                program: self.program().to_string(),
                status,
            });
        }
        Ok(())
    }
}

/// The package manager that owns scripts and dependencies.
#[derive(Debug, Clone)]
pub struct PackageManager {
    /// Underlying command line.
    tool: Tool,
}

impl PackageManager {
    /// Create a package manager from a pre-split command line.
    pub fn new(words: &[String], root: &Path) -> Self {
        Self {
            tool: Tool::from_words(words, root),
        }
    }

    /// Underlying command line.
    pub fn tool(&self) -> &Tool {
        &self.tool
    }

    /// Arguments that run a manifest script.
    pub fn run_script_args(script: &str) -> [&str; 2] {
        ["run", script]
    }

    /// Run a manifest script and report how it exited.
    pub fn run_script(&self, script: &str) -> Result<ExitStatus> {
        self.tool.status(&Self::run_script_args(script))
    }

    /// Install packages, into devDependencies when `dev` is set.
    pub fn install(&self, packages: &[String], dev: bool) -> Result<()> {
        let mut args = vec!["install".to_string()];
        if dev {
            args.push("-D".to_string());
        }
        args.extend(packages.iter().cloned());
        self.tool.run(&args)
    }

    /// Uninstall packages.
    pub fn uninstall(&self, packages: &[String]) -> Result<()> {
        let mut args = vec!["uninstall".to_string()];
        args.extend(packages.iter().cloned());
        self.tool.run(&args)
    }
}
