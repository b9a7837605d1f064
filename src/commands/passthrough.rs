//! Forwarding package-manager commands such as `tpm install`.

use crate::{
    commands::Context,
    error::{Error, Result},
    prompt,
};

/// Package-manager verbs forwarded verbatim when they are not tpm commands.
pub const PASSTHROUGH_COMMANDS: &[&str] = &[
    "access",
    "audit",
    "cache",
    "ci",
    "config",
    "dedupe",
    "docs",
    "doctor",
    "exec",
    "fund",
    "i",
    "install",
    "login",
    "logout",
    "ls",
    "org",
    "outdated",
    "pkg",
    "prefix",
    "profile",
    "prune",
    "publish",
    "rebuild",
    "reinstall",
    "remove",
    "restart",
    "rm",
    "root",
    "search",
    "set-script",
    "team",
    "token",
    "uninstall",
    "unpublish",
    "update",
    "version",
    "view",
    "whoami",
];

/// Flag that publishes a scoped package publicly.
const PUBLIC_ACCESS: &str = "--access=public";

/// Whether `verb` is forwarded to the package manager.
pub fn is_passthrough(verb: &str) -> bool {
    PASSTHROUGH_COMMANDS.contains(&verb)
}

/// Whether `args` is a `publish` with no access flag of any form.
fn needs_access_prompt(args: &[String]) -> bool {
    args.first().is_some_and(|verb| verb == "publish")
        && !args.iter().any(|arg| arg.starts_with("--access"))
}

/// Insert `--access=public` directly after the verb.
fn with_public_access(mut args: Vec<String>) -> Vec<String> {
    let position = usize::from(!args.is_empty());
    args.insert(position, PUBLIC_ACCESS.to_string());
    args
}

/// Forward `args` to the package manager, failing with the child's status.
pub async fn run(context: &Context, args: Vec<String>) -> Result<()> {
    let args = if needs_access_prompt(&args)
        && prompt::confirm("Add --access=public to publish?", true)?
    {
        with_public_access(args)
    } else {
        args
    };
    forward(context, &args)
}

/// Run the package manager with `args`, blocking until it exits.
///
/// A failing child surfaces as [`Error::ForwardedStatus`] so only its exit
/// code is passed on.
fn forward(context: &Context, args: &[String]) -> Result<()> {
    let package_manager = context.package_manager();
    let tool = package_manager.tool();
    context.diagnostics().verbose(tool.command_line(args));
    let status = tool.status(args)?;
    if !status.success() {
        return Err(Error::ForwardedStatus {
            program: tool.program().to_string(),
            status,
        });
    }
    Ok(())
}
