#![warn(missing_docs)]
//! Library support for the tpm CLI.

/// Alias table stored in the manifest.
mod alias;
/// Command-line interface wiring and dispatch.
mod cli;
/// Command implementations.
mod commands;
/// Configuration loading and validation.
mod config;
/// Missing and unused dependency detection.
mod depcheck;
/// Common diagnostics and warning aggregation.
mod diagnostics;
/// Error handling for the crate.
mod error;
/// Reading and writing package.json.
mod manifest;
/// Color palette and styling for CLI output.
mod palette;
/// Path resolution and display utilities.
mod paths;
/// Spawning the package manager and other tools.
mod process;
/// Interactive prompt helpers.
mod prompt;
/// Script and alias resolution.
mod resolve;
/// Interactive project scaffolding.
mod scaffold;
/// Throwaway project fixtures for tests.
#[cfg(test)]
mod testutil;

pub use crate::error::{Error, Result};

/// Run the CLI, returning a structured error on failure.
pub async fn run() -> Result<()> {
    cli::run().await
}
