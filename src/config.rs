//! User configuration loading and validation.

use std::{fs, io::ErrorKind, path::Path};

use serde::Deserialize;

use crate::{
    error::{Error, Result},
    paths,
};

/// Package manager used when no config overrides it.
pub const DEFAULT_PACKAGE_MANAGER: &str = "npm";

/// Parsed configuration for the CLI.
#[derive(Debug, Clone)]
pub struct Config {
    /// Package manager command line, already split into words.
    package_manager: Vec<String>,
}

/// Raw config file structure.
#[derive(Debug, Deserialize)]
struct RawConfig {
    /// Package manager command line, e.g. `pnpm` or `npm --silent`.
    package_manager: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            package_manager: vec![DEFAULT_PACKAGE_MANAGER.to_string()],
        }
    }
}

impl Config {
    /// Load the default config from disk, falling back to defaults when absent.
    pub(crate) fn load() -> Result<Self> {
        let path = paths::default_config_path()?;
        Self::load_from(&path)
    }

    /// Load a config file from an explicit path.
    pub(crate) fn load_from(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(error) => {
                return Err(Error::ConfigRead {
                    path: path.to_path_buf(),
                    source: error,
                });
            }
        };

        let raw: RawConfig = toml::from_str(&contents).map_err(|error| Error::ConfigParse {
            path: path.to_path_buf(),
            source: error,
        })?;

        match raw.package_manager {
            Some(command) => Self::with_package_manager(&command),
            None => Ok(Self::default()),
        }
    }

    /// Build a config around an explicit package manager command line.
    pub(crate) fn with_package_manager(command: &str) -> Result<Self> {
        let words = shell_words::split(command).map_err(|error| Error::InvalidPackageManager {
            command: command.to_string(),
            message: error.to_string(),
        })?;
        if words.is_empty() {
            return Err(Error::InvalidPackageManager {
                command: command.to_string(),
                message: "command is empty".to_string(),
            });
        }
        Ok(Self {
            package_manager: words,
        })
    }

    /// Return the package manager command line.
    pub(crate) fn package_manager(&self) -> &[String] {
        &self.package_manager
    }
}
