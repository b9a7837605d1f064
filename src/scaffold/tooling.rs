//! External scaffolding tools for frontend frameworks.
//!
//! Frontend projects are generated by each framework's own CLI. Some of those
//! tools refuse to write into a non-empty directory, so for an in-place
//! project they write into a staging directory whose contents are then moved
//! up into the project root.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::{
    error::{Error, Result},
    manifest::Manifest,
    scaffold::{
        framework::{Framework, Language},
        questionnaire::Metadata,
    },
};

/// Where the frontend project is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetDir {
    /// The project root itself.
    Current,
    /// A new subdirectory named after the project slug.
    Subdirectory,
}

/// A fully planned scaffolding tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldCommand {
    /// Program to run.
    pub program: &'static str,
    /// Arguments passed to the program.
    pub args: Vec<String>,
    /// Framework name for messages.
    pub display_name: &'static str,
    /// Directory the tool writes into, to be moved into the root afterwards.
    pub staging_dir: Option<PathBuf>,
    /// Whether dependencies must be installed after generation.
    pub install_after: bool,
    /// Whether the generated manifest gets the questionnaire metadata.
    pub patch_manifest: bool,
    /// Directory holding the generated project, relative to the root.
    pub project_dir: PathBuf,
}

/// Make a directory-safe name by replacing anything but `[A-Za-z0-9_-]`.
pub fn slug(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// Plan the scaffolding invocation for a frontend framework.
///
/// Returns `None` for frameworks `init` writes itself.
pub fn scaffold_command(
    framework: Framework,
    language: Language,
    target: TargetDir,
    name: &str,
) -> Option<ScaffoldCommand> {
    let slug = slug(name);
    let in_place = target == TargetDir::Current;
    let direct_target = if in_place { ".".to_string() } else { slug.clone() };

    let (program, mut args, staged): (&'static str, Vec<&str>, bool) = match framework {
        Framework::React => ("npx", vec!["create-react-app"], false),
        Framework::Vue => ("npm", vec!["create", "vue@latest"], false),
        Framework::SvelteKit => ("npx", vec!["sv", "create"], in_place),
        Framework::NextJs => ("npx", vec!["create-next-app@latest"], false),
        Framework::Nuxt3 => ("npx", vec!["nuxi", "init"], in_place),
        Framework::SolidJs => {
            let template = if language.is_typescript() {
                "solidjs/templates/ts"
            } else {
                "solidjs/templates/js"
            };
            ("npx", vec!["degit", template], in_place)
        }
        Framework::Astro => ("npm", vec!["create", "astro@latest"], false),
        Framework::Remix => ("npx", vec!["create-remix@latest"], false),
        Framework::Ember if in_place => ("npx", vec!["ember-cli", "init"], false),
        Framework::Ember => ("npx", vec!["ember-cli", "new"], false),
        _ => return None,
    };

    let destination = if staged { slug.as_str() } else { direct_target.as_str() };
    if !(framework == Framework::Ember && in_place) {
        args.push(destination);
    }

    let project_dir = if in_place {
        PathBuf::from(".")
    } else {
        PathBuf::from(&slug)
    };

    Some(ScaffoldCommand {
        program,
        args: args.into_iter().map(str::to_string).collect(),
        display_name: framework.display_name(),
        staging_dir: staged.then(|| PathBuf::from(&slug)),
        install_after: matches!(framework, Framework::Vue | Framework::SolidJs),
        patch_manifest: framework != Framework::Vue,
        project_dir,
    })
}

/// Move everything out of `staging` into `root`, replacing existing entries,
/// then remove `staging`.
pub fn move_from_staging(root: &Path, staging: &Path) -> Result<()> {
    let entries = fs::read_dir(staging).map_err(|error| write_error(staging, error))?;
    for entry in entries {
        let entry = entry.map_err(|error| write_error(staging, error))?;
        let destination = root.join(entry.file_name());
        remove_existing(&destination)?;
        fs::rename(entry.path(), &destination)
            .map_err(|error| write_error(&destination, error))?;
    }
    fs::remove_dir_all(staging).map_err(|error| write_error(staging, error))
}

/// Delete a file or directory if it exists.
fn remove_existing(path: &Path) -> Result<()> {
    let Ok(metadata) = fs::symlink_metadata(path) else {
        return Ok(());
    };
    let removed = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    removed.map_err(|error| write_error(path, error))
}

/// Build a scaffold write error.
fn write_error(path: &Path, source: io::Error) -> Error {
    Error::ScaffoldWrite {
        path: path.to_path_buf(),
        source,
    }
}

/// Copy the questionnaire metadata into a generated manifest.
pub fn patch_manifest(project_dir: &Path, metadata: &Metadata) -> Result<()> {
    let mut manifest = Manifest::load(project_dir)?;
    manifest.set_field("name", &metadata.name);
    manifest.set_field("author", &metadata.author);
    manifest.set_field("license", &metadata.license);
    if !metadata.description.is_empty() {
        manifest.set_field("description", &metadata.description);
    }
    manifest.save(project_dir)
}
