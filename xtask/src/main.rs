//! Developer workflow tasks for the tpm workspace.
//!
//! `cargo xtask tidy` formats and lints; `cargo xtask check` runs the same
//! steps without fixing anything, followed by the test suite.

use std::{
    env,
    path::Path,
    process::{Command, ExitCode, Stdio},
};

/// Nightly rustfmt configuration, used when present.
const NIGHTLY_FMT_CONFIG: &str = "rustfmt-nightly.toml";

/// Usage line printed for unknown input.
const USAGE: &str = "Usage: cargo xtask <tidy|check>";

fn main() -> ExitCode {
    let Some(task) = parse_task() else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };
    for step in task.steps() {
        if !step.run() {
            return ExitCode::from(1);
        }
    }
    ExitCode::SUCCESS
}

/// Requested task.
#[derive(Debug, Clone, Copy)]
enum Task {
    /// Format and apply clippy fixes in place.
    Tidy,
    /// Verify formatting and lints, then run tests.
    Check,
}

/// A single cargo invocation within a task.
#[derive(Debug)]
struct Step {
    /// Arguments passed to cargo.
    args: Vec<&'static str>,
}

impl Task {
    /// Cargo invocations making up the task, in order.
    fn steps(self) -> Vec<Step> {
        match self {
            Self::Tidy => vec![fmt_step(false), clippy_step(true)],
            Self::Check => vec![
                fmt_step(true),
                clippy_step(false),
                Step {
                    args: vec!["test", "--workspace", "--all-features"],
                },
            ],
        }
    }
}

impl Step {
    /// Run cargo with this step's arguments, reporting failures.
    fn run(&self) -> bool {
        let status = Command::new("cargo")
            .args(&self.args)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status();
        match status {
            Ok(status) if status.success() => true,
            Ok(status) => {
                eprintln!("`cargo {}` failed with status {status}", self.args.join(" "));
                false
            }
            Err(err) => {
                eprintln!("Failed to run cargo: {err}");
                false
            }
        }
    }
}

/// Parse the single task argument.
fn parse_task() -> Option<Task> {
    let mut args = env::args().skip(1);
    let task = match args.next().as_deref() {
        Some("tidy") => Task::Tidy,
        Some("check") => Task::Check,
        _ => return None,
    };
    args.next().is_none().then_some(task)
}

/// Nightly rustfmt, optionally only checking.
fn fmt_step(check_only: bool) -> Step {
    let mut args = vec!["+nightly", "fmt", "--all"];
    if check_only || Path::new(NIGHTLY_FMT_CONFIG).exists() {
        args.push("--");
    }
    if check_only {
        args.push("--check");
    }
    if Path::new(NIGHTLY_FMT_CONFIG).exists() {
        args.extend(["--config-path", NIGHTLY_FMT_CONFIG]);
    }
    Step { args }
}

/// Clippy over every target, applying fixes when `fix` is set.
fn clippy_step(fix: bool) -> Step {
    let mut args = vec!["clippy", "-q", "--workspace", "--all-targets", "--all-features"];
    if fix {
        args.extend(["--fix", "--allow-dirty"]);
    } else {
        args.extend(["--", "-D", "warnings"]);
    }
    Step { args }
}
