//! Error types for the tpm CLI.

use std::{
    io,
    path::PathBuf,
    process::{ExitCode, ExitStatus},
    result::Result as StdResult,
};

use thiserror::Error;
use toml::de::Error as TomlError;

/// Result type for tpm operations.
pub type Result<T> = StdResult<T, Error>;

/// Errors that can occur while running the CLI.
#[derive(Debug, Error)]
pub enum Error {
    /// No manifest exists in the project root.
    #[error("No package.json found at {path}")]
    ManifestNotFound {
        /// Expected manifest path.
        path: PathBuf,
    },
    /// The manifest exists but could not be read.
    #[error("Failed to read {path}: {source}")]
    ManifestRead {
        /// Path to the manifest.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// The manifest is not valid JSON.
    #[error("Failed to parse {path}: {source}")]
    ManifestParse {
        /// Path to the manifest.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
    /// The manifest parsed, but its top level is not a JSON object.
    #[error("Expected a JSON object at the top level of {path}")]
    ManifestNotObject {
        /// Path to the manifest.
        path: PathBuf,
    },
    /// A field the CLI manages has an unexpected JSON type.
    #[error("Field `{field}` in package.json must be {expected}")]
    InvalidManifestField {
        /// Dotted field path.
        field: String,
        /// Description of the expected type.
        expected: &'static str,
    },
    /// The manifest could not be serialized.
    #[error("Failed to serialize package.json: {source}")]
    ManifestSerialize {
        /// Underlying JSON error.
        source: serde_json::Error,
    },
    /// The manifest could not be written.
    #[error("Failed to write {path}: {source}")]
    ManifestWrite {
        /// Path to the manifest.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// An alias with this name is already declared.
    #[error("Alias '{alias}' already exists for script '{target}'")]
    AliasAlreadyExists {
        /// Alias name.
        alias: String,
        /// Script the existing alias points at.
        target: String,
    },
    /// No alias with this name is declared.
    #[error("Alias '{alias}' does not exist")]
    AliasNotFound {
        /// Alias name.
        alias: String,
    },
    /// None of the requested names resolved to a script.
    #[error("No valid scripts or aliases found.")]
    NoValidScripts,
    /// An external program could not be started.
    #[error("Failed to run `{program}`: {source}")]
    ProcessSpawn {
        /// Program that failed to start.
        program: String,
        /// Underlying spawn error.
        source: io::Error,
    },
    /// An external program exited unsuccessfully.
    #[error("`{program}` exited with {status}")]
    ProcessStatus {
        /// Program that exited.
        program: String,
        /// Exit status returned by the program.
        status: ExitStatus,
    },
    /// A forwarded package-manager command exited unsuccessfully. The child
    /// has already reported its own failure.
    #[error("`{program}` exited with {status}")]
    ForwardedStatus {
        /// Program that exited.
        program: String,
        /// Exit status returned by the program.
        status: ExitStatus,
    },
    /// An interactive prompt was interrupted or canceled.
    #[error("Prompt canceled.")]
    PromptCanceled,
    /// An interactive prompt failed.
    #[error("Prompt failed: {message}")]
    PromptFailed {
        /// Error message describing the prompt failure.
        message: String,
    },
    /// The configuration file could not be read.
    #[error("Failed to read config at {path}: {source}")]
    ConfigRead {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// The configuration file could not be parsed.
    #[error("Failed to parse config at {path}: {source}")]
    ConfigParse {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying parse error.
        source: TomlError,
    },
    /// The configured package manager command is unusable.
    #[error("Invalid package_manager command `{command}`: {message}")]
    InvalidPackageManager {
        /// Raw command from the config file.
        command: String,
        /// Why the command was rejected.
        message: String,
    },
    /// Home directory resolution failed.
    #[error("Failed to resolve the home directory.")]
    HomeDirMissing,
    /// The requested project root is not a directory.
    #[error("Project directory does not exist: {path}")]
    ProjectRootMissing {
        /// Path that was requested.
        path: PathBuf,
    },
    /// A scaffolded file or directory could not be written.
    #[error("Failed to write {path}: {source}")]
    ScaffoldWrite {
        /// Path that failed to write.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// A built-in search pattern failed to compile.
    #[error("Invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        /// Pattern source text.
        pattern: String,
        /// Underlying regex error.
        source: regex::Error,
    },
    /// A starter template could not be rendered.
    #[error("Failed to render template: {message}")]
    TemplateRender {
        /// Error message describing the render failure.
        message: String,
    },
}

impl Error {
    /// Map errors to exit codes for CLI termination.
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }

    /// Whether the error should be printed before exiting.
    pub fn is_reported(&self) -> bool {
        !matches!(self, Self::ForwardedStatus { .. })
    }

    /// Numeric process status for this error.
    ///
    /// Cancelling a prompt is a clean exit, and a failed pass-through child
    /// hands its own exit code back to the shell.
    fn exit_status(&self) -> u8 {
        match self {
            Self::PromptCanceled => 0,
            Self::ProcessStatus { status, .. } | Self::ForwardedStatus { status, .. } => status
                .code()
                .and_then(|code| u8::try_from(code).ok())
                .filter(|code| *code != 0)
                .unwrap_or(1),
            _ => 1,
        }
    }
}
