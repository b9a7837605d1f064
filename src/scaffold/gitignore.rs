//! Appending entries to a project's `.gitignore`.

use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use crate::error::{Error, Result};

/// Name of the ignore file in the project root.
pub const GITIGNORE_FILE: &str = ".gitignore";

/// Entries `init` offers to ignore, in prompt order.
pub const SUGGESTED_ENTRIES: [&str; 2] = ["node_modules", "dist"];

/// Path of the ignore file for a project root.
fn gitignore_path(root: &Path) -> PathBuf {
    root.join(GITIGNORE_FILE)
}

/// Read the ignore file; a missing file reads as empty.
fn read(root: &Path) -> Result<String> {
    let path = gitignore_path(root);
    match fs::read_to_string(&path) {
        Ok(contents) => Ok(contents),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(String::new()),
        Err(error) => Err(Error::ScaffoldWrite {
            path,
            source: error,
        }),
    }
}

/// Suggested entries not yet mentioned anywhere in the ignore file.
pub fn missing_entries(root: &Path) -> Result<Vec<&'static str>> {
    let contents = read(root)?;
    Ok(SUGGESTED_ENTRIES
        .into_iter()
        .filter(|entry| !contents.contains(entry))
        .collect())
}

/// Append `entry` on its own line, creating the file if needed.
pub fn append_entry(root: &Path, entry: &str) -> Result<()> {
    let contents = read(root)?;
    let separator = if contents.is_empty() || contents.ends_with('\n') {
        ""
    } else {
        "\n"
    };
    let path = gitignore_path(root);
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .and_then(|mut file| writeln!(file, "{separator}{entry}"))
        .map_err(|error| Error::ScaffoldWrite {
            path,
            source: error,
        })
}
