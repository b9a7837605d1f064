//! Project root resolution and path display utilities.

use std::{
    env,
    path::{MAIN_SEPARATOR, Path, PathBuf},
};

use path_clean::PathClean;

use crate::error::{Error, Result};

/// Return the default config path for the current platform.
pub fn default_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or(Error::HomeDirMissing)?;
    Ok(home.join(".tpm.toml"))
}

/// Resolve the project root from an optional `--dir` argument.
///
/// Relative paths are taken against the current directory. The result must
/// be an existing directory.
pub fn resolve_project_root(dir: Option<&Path>) -> Result<PathBuf> {
    let cwd = env::current_dir().map_err(|_| Error::ProjectRootMissing {
        path: PathBuf::from("."),
    })?;
    let root = match dir {
        Some(dir) if dir.is_relative() => cwd.join(dir),
        Some(dir) => dir.to_path_buf(),
        None => cwd,
    };
    let root = normalize_path(&root);
    if !root.is_dir() {
        return Err(Error::ProjectRootMissing { path: root });
    }
    Ok(root)
}

/// Normalize a path by cleaning and canonicalizing when possible.
pub fn normalize_path(path: &Path) -> PathBuf {
    match dunce::canonicalize(path) {
        Ok(canonical) => canonical,
        Err(_) => path.clean(),
    }
}

/// Render a path for display, using a tilde prefix for the home directory.
pub fn display_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir()
        && let Ok(stripped) = path.strip_prefix(&home)
    {
        if stripped.as_os_str().is_empty() {
            return "~".to_string();
        }
        return format!("~{}{}", MAIN_SEPARATOR, stripped.display());
    }
    path.display().to_string()
}

/// Render `path` relative to `root` when it lives inside it.
pub fn relative_display(path: &Path, root: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(relative) if !relative.as_os_str().is_empty() => relative.display().to_string(),
        _ => display_path(path),
    }
}
