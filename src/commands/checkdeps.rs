//! Implementation of the `tpm checkdeps` command.

use crate::{
    commands::Context,
    depcheck::{DependencyReport, check},
    error::Result,
    manifest::Manifest,
    palette::{fmt_heading, fmt_warning},
    prompt,
};

/// Execute the checkdeps command.
pub async fn run(context: &Context) -> Result<()> {
    let mut diagnostics = context.diagnostics();
    let manifest = Manifest::load(&context.root)?;
    let report = check(&context.root, &manifest, &mut diagnostics)?;
    print!("{}", render_report(&report, context.use_color()));

    let package_manager = context.package_manager();
    if !report.missing.is_empty() {
        let names = report.missing_names();
        let question = format!("Install missing deps? ({})", names.join(" "));
        if prompt::confirm(&question, false)? {
            package_manager.install(&names, false)?;
        }
    }
    if !report.unused.is_empty() && prompt::confirm("Remove unused deps?", false)? {
        package_manager.uninstall(&report.unused)?;
    }

    diagnostics.print_warning_summary();
    Ok(())
}

/// Render the missing and unused sections of a report.
fn render_report(report: &DependencyReport, use_color: bool) -> String {
    if report.is_clean() {
        return "No missing or unused dependencies.\n".to_string();
    }

    let mut output = String::new();
    if !report.missing.is_empty() {
        output.push_str(&format!("{}\n", fmt_heading("Missing deps:", use_color)));
        for (name, files) in &report.missing {
            let files: Vec<String> = files
                .iter()
                .map(|file| file.display().to_string())
                .collect();
            output.push_str(&format!(
                "- {} (used in {})\n",
                fmt_warning(name, use_color),
                files.join(", ")
            ));
        }
    }
    if !report.unused.is_empty() {
        output.push_str(&format!("{}\n", fmt_heading("Unused deps:", use_color)));
        for name in &report.unused {
            output.push_str(&format!("- {}\n", fmt_warning(name, use_color)));
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use std::{
        collections::{BTreeMap, BTreeSet},
        path::PathBuf,
    };

    use super::render_report;
    use crate::depcheck::DependencyReport;

    #[test]
    fn lists_missing_then_unused() {
        let report = DependencyReport {
            missing: BTreeMap::from([(
                "zod".to_string(),
                BTreeSet::from([PathBuf::from("src/a.ts"), PathBuf::from("src/b.ts")]),
            )]),
            unused: vec!["left-pad".to_string()],
        };

        assert_eq!(
            render_report(&report, false),
            "Missing deps:\n- zod (used in src/a.ts, src/b.ts)\nUnused deps:\n- left-pad\n"
        );
    }

    #[test]
    fn clean_projects_say_so() {
        assert_eq!(
            render_report(&DependencyReport::default(), false),
            "No missing or unused dependencies.\n"
        );
    }
}
