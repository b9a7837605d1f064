//! Alias table stored under `tpm.aliases` in the manifest.
//!
//! Aliases are not checked against the script table when created; a target
//! may be declared before the script it names exists.

use std::path::Path;

use serde_json::Value;

use crate::{
    error::{Error, Result},
    manifest::Manifest,
};

/// Add `alias -> script` to an in-memory manifest.
pub fn insert_alias(manifest: &mut Manifest, alias: &str, script: &str) -> Result<()> {
    let aliases = manifest.aliases_mut()?;
    if let Some(existing) = aliases.get(alias) {
        return Err(Error::AliasAlreadyExists {
            alias: alias.to_string(),
            target: target_label(existing),
        });
    }
    aliases.insert(alias.to_string(), Value::String(script.to_string()));
    Ok(())
}

/// Remove `alias` from an in-memory manifest, returning its former target.
pub fn delete_alias(manifest: &mut Manifest, alias: &str) -> Result<String> {
    // Read first so a manifest without an alias table is left untouched.
    if !manifest.aliases()?.contains_key(alias) {
        return Err(Error::AliasNotFound {
            alias: alias.to_string(),
        });
    }
    let removed = manifest.aliases_mut()?.shift_remove(alias);
    Ok(removed.as_ref().map(target_label).unwrap_or_default())
}

/// Declare an alias in the manifest under `root` and persist it.
///
/// When the alias already exists nothing is written.
pub fn add_alias(root: &Path, alias: &str, script: &str) -> Result<()> {
    let mut manifest = Manifest::load(root)?;
    insert_alias(&mut manifest, alias, script)?;
    manifest.save(root)
}

/// Remove an alias from the manifest under `root` and persist it.
///
/// When the alias does not exist nothing is written.
pub fn remove_alias(root: &Path, alias: &str) -> Result<String> {
    let mut manifest = Manifest::load(root)?;
    let target = delete_alias(&mut manifest, alias)?;
    manifest.save(root)?;
    Ok(target)
}

/// Render an alias target for messages.
fn target_label(value: &Value) -> String {
    match value {
        Value::String(target) => target.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{add_alias, remove_alias};
    use crate::{error::Error, testutil::TestProject};

    #[test]
    fn adds_alias_and_preserves_other_fields() {
        let project = TestProject::new(json!({
            "name": "demo",
            "version": "1.0.0",
            "scripts": { "build": "tsc" },
            "dependencies": { "left-pad": "^1.0.0" },
        }));

        add_alias(project.root(), "b", "build").expect("add alias");

        assert_eq!(
            project.manifest_json(),
            json!({
                "name": "demo",
                "version": "1.0.0",
                "scripts": { "build": "tsc" },
                "dependencies": { "left-pad": "^1.0.0" },
                "tpm": { "aliases": { "b": "build" } },
            })
        );
    }

    #[test]
    fn allows_aliases_to_missing_scripts() {
        let project = TestProject::new(json!({ "scripts": {} }));
        add_alias(project.root(), "d", "deploy").expect("add alias");
        assert_eq!(project.manifest_json()["tpm"]["aliases"]["d"], "deploy");
    }

    #[test]
    fn duplicate_alias_leaves_manifest_unchanged() {
        let project = TestProject::new(json!({
            "scripts": { "build": "tsc", "test": "jest" },
            "tpm": { "aliases": { "b": "gone" } },
        }));
        let before = project.manifest_text();

        let error = add_alias(project.root(), "b", "test").expect_err("duplicate alias");

        match error {
            Error::AliasAlreadyExists { alias, target } => {
                assert_eq!(alias, "b");
                assert_eq!(target, "gone");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(project.manifest_text(), before);
    }

    #[test]
    fn removes_existing_alias() {
        let project = TestProject::new(json!({
            "tpm": { "aliases": { "b": "build", "t": "test" } },
        }));

        let target = remove_alias(project.root(), "b").expect("remove alias");

        assert_eq!(target, "build");
        assert_eq!(
            project.manifest_json(),
            json!({ "tpm": { "aliases": { "t": "test" } } })
        );
    }

    #[test]
    fn removing_missing_alias_leaves_manifest_unchanged() {
        let project = TestProject::new(json!({ "name": "demo" }));
        let before = project.manifest_text();

        let error = remove_alias(project.root(), "nope").expect_err("missing alias");

        assert!(matches!(error, Error::AliasNotFound { .. }));
        assert_eq!(project.manifest_text(), before);
    }
}
