//! Implementation of the `tpm run` command.

use crate::{
    commands::Context,
    diagnostics::Diagnostics,
    error::{Error, Result},
    manifest::Manifest,
    palette::{fmt_command, fmt_warning},
    process::PackageManager,
    resolve::resolve,
};

/// Execute the run command.
pub async fn run(context: &Context, names: Vec<String>) -> Result<()> {
    let mut diagnostics = context.diagnostics();
    let failures = run_scripts(context, &names, &mut diagnostics)?;
    if failures > 0 {
        println!(
            "{}",
            fmt_warning(
                &format!("{failures} script(s) failed."),
                context.use_color()
            )
        );
    }
    diagnostics.print_warning_summary();
    Ok(())
}

/// Resolve `names` and run each script in order, returning how many exited
/// unsuccessfully.
///
/// A failing script does not stop the batch; a package manager that cannot
/// be started does.
pub(crate) fn run_scripts(
    context: &Context,
    names: &[String],
    diagnostics: &mut Diagnostics,
) -> Result<usize> {
    let manifest = Manifest::load(&context.root)?;
    let scripts = resolve(names, &manifest.scripts()?, &manifest.aliases()?);
    if scripts.is_empty() {
        return Err(Error::NoValidScripts);
    }
    diagnostics.verbose(format!("Resolved scripts: {}", scripts.join(", ")));

    let package_manager = context.package_manager();
    let use_color = context.use_color();
    let mut failures = 0;
    for script in &scripts {
        let line = package_manager
            .tool()
            .command_line(&PackageManager::run_script_args(script));
        println!("{}", fmt_command(&format!("> {line}"), use_color));

        let status = package_manager.run_script(script)?;
        if !status.success() {
            diagnostics.warn(format!("Script '{script}' exited with {status}"));
            failures += 1;
        }
    }
    Ok(failures)
}

#[cfg(all(test, unix))]
mod tests {
    use serde_json::json;

    use super::{run, run_scripts};
    use crate::{
        commands::test_context, diagnostics::Diagnostics, error::Error, testutil::TestProject,
    };

    fn project() -> TestProject {
        TestProject::new(json!({
            "scripts": { "build": "tsc", "test": "vitest" },
            "tpm": { "aliases": { "t": "test", "gone": "deleted" } }
        }))
    }

    #[tokio::test]
    async fn aliases_run_their_target() {
        let project = project();
        let context = test_context(project.root(), &project.fake_package_manager(0));

        run(&context, vec!["t".to_string()]).await.expect("run");

        assert_eq!(project.recorded_calls(), ["run test"]);
    }

    #[test]
    fn runs_every_resolved_name_in_order() {
        let project = project();
        let context = test_context(project.root(), &project.fake_package_manager(0));
        let mut diagnostics = Diagnostics::new(false);

        let names = ["build", "missing", "t", "gone", "build"].map(String::from);
        let failures = run_scripts(&context, &names, &mut diagnostics).expect("run");

        assert_eq!(failures, 0);
        assert_eq!(project.recorded_calls(), ["run build", "run test", "run build"]);
    }

    #[test]
    fn failures_do_not_stop_the_batch() {
        let project = project();
        let context = test_context(project.root(), &project.fake_package_manager(2));
        let mut diagnostics = Diagnostics::new(false);

        let names = ["build", "test"].map(String::from);
        let failures = run_scripts(&context, &names, &mut diagnostics).expect("run");

        assert_eq!(failures, 2);
        assert_eq!(diagnostics.warning_count(), 2);
        assert_eq!(project.recorded_calls(), ["run build", "run test"]);
    }

    #[tokio::test]
    async fn nothing_resolvable_is_an_error() {
        let project = project();
        let context = test_context(project.root(), &project.fake_package_manager(0));

        let error = run(&context, vec!["gone".to_string(), "nope".to_string()])
            .await
            .expect_err("no scripts");

        assert!(matches!(error, Error::NoValidScripts));
        assert!(project.recorded_calls().is_empty());
    }

    #[test]
    fn missing_package_manager_aborts() {
        let project = project();
        let context = test_context(project.root(), "tpm-definitely-not-installed");
        let mut diagnostics = Diagnostics::new(false);

        let names = ["build".to_string()];
        let error = run_scripts(&context, &names, &mut diagnostics).expect_err("spawn");

        assert!(matches!(error, Error::ProcessSpawn { .. }));
    }
}
