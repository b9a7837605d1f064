//! Implementation of the `tpm ln` command.

use crate::{
    alias::add_alias,
    commands::Context,
    error::Result,
    palette::{fmt_alias_name, fmt_script_name},
};

/// Execute the link command: `script` gains the alias `alias`.
pub async fn run(context: &Context, script: String, alias: String) -> Result<()> {
    add_alias(&context.root, &alias, &script)?;
    let use_color = context.use_color();
    println!(
        "Alias '{}' -> '{}' added to .tpm.aliases",
        fmt_alias_name(&alias, use_color),
        fmt_script_name(&script, use_color)
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::run;
    use crate::{commands::test_context, error::Error, testutil::TestProject};

    #[tokio::test]
    async fn source_comes_before_alias() {
        let project = TestProject::new(json!({ "scripts": { "build": "tsc" } }));
        let context = test_context(project.root(), "npm");

        run(&context, "build".to_string(), "b".to_string())
            .await
            .expect("link");

        assert_eq!(
            project.manifest_json()["tpm"],
            json!({ "aliases": { "b": "build" } })
        );
    }

    #[tokio::test]
    async fn duplicate_alias_is_reported() {
        let project = TestProject::new(json!({ "tpm": { "aliases": { "b": "build" } } }));
        let context = test_context(project.root(), "npm");
        let before = project.manifest_text();

        let error = run(&context, "bundle".to_string(), "b".to_string())
            .await
            .expect_err("duplicate");

        assert_eq!(
            error.to_string(),
            "Alias 'b' already exists for script 'build'"
        );
        assert!(matches!(error, Error::AliasAlreadyExists { .. }));
        assert_eq!(project.manifest_text(), before);
    }
}
