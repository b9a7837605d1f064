//! Implementation of the `tpm unlink` command.

use crate::{alias::remove_alias, commands::Context, error::Result, palette::fmt_alias_name};

/// Execute the unlink command.
pub async fn run(context: &Context, alias: String) -> Result<()> {
    let target = remove_alias(&context.root, &alias)?;
    context
        .diagnostics()
        .verbose(format!("Alias '{alias}' pointed at '{target}'"));
    println!(
        "Alias '{}' removed from .tpm.aliases",
        fmt_alias_name(&alias, context.use_color())
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::run;
    use crate::{commands::test_context, testutil::TestProject};

    #[tokio::test]
    async fn removes_only_the_named_alias() {
        let project = TestProject::new(json!({
            "tpm": { "aliases": { "b": "build", "t": "test" }, "other": 1 }
        }));
        let context = test_context(project.root(), "npm");

        run(&context, "b".to_string()).await.expect("unlink");

        assert_eq!(
            project.manifest_json()["tpm"],
            json!({ "aliases": { "t": "test" }, "other": 1 })
        );
    }

    #[tokio::test]
    async fn unknown_alias_is_reported() {
        let project = TestProject::new(json!({ "name": "demo" }));
        let context = test_context(project.root(), "npm");

        let error = run(&context, "b".to_string()).await.expect_err("missing");

        assert_eq!(error.to_string(), "Alias 'b' does not exist");
        assert_eq!(project.manifest_json(), json!({ "name": "demo" }));
    }
}
