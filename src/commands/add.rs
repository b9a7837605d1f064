//! Implementation of the `tpm add` command.

use std::path::Path;

use crate::{
    commands::Context, error::Result, manifest::Manifest, palette::fmt_script_name, prompt,
};

/// Execute the add command.
pub async fn run(context: &Context, name: String) -> Result<()> {
    // Fail before prompting when the manifest is missing or broken.
    Manifest::load(&context.root)?.scripts()?;
    let command = prompt::text(&format!("What should the \"{name}\" script do?"), None)?;
    add_script(&context.root, &name, &command)?;
    println!(
        "Added \"{}\": \"{command}\"",
        fmt_script_name(&name, context.use_color())
    );
    Ok(())
}

/// Set script `name` to `command` in the manifest under `root`, overwriting
/// any existing command.
pub(crate) fn add_script(root: &Path, name: &str, command: &str) -> Result<()> {
    let mut manifest = Manifest::load(root)?;
    manifest.set_script(name, command)?;
    manifest.save(root)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::add_script;
    use crate::{error::Error, testutil::TestProject};

    #[test]
    fn creates_the_script_table() {
        let project = TestProject::new(json!({ "name": "demo" }));

        add_script(project.root(), "build", "tsc -p .").expect("add");

        assert_eq!(
            project.manifest_json(),
            json!({ "name": "demo", "scripts": { "build": "tsc -p ." } })
        );
    }

    #[test]
    fn overwrites_an_existing_script() {
        let project = TestProject::new(json!({ "scripts": { "build": "tsc", "test": "jest" } }));

        add_script(project.root(), "build", "vite build").expect("add");

        assert_eq!(
            project.manifest_text(),
            "{\n  \"scripts\": {\n    \"build\": \"vite build\",\n    \"test\": \"jest\"\n  }\n}\n"
        );
    }

    #[test]
    fn missing_manifest_is_reported() {
        let project = TestProject::empty();

        let error = add_script(project.root(), "build", "tsc").expect_err("missing");

        assert!(matches!(error, Error::ManifestNotFound { .. }));
        assert!(project.read("package.json").is_none());
    }
}
