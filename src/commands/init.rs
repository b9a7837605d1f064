//! Implementation of the `tpm init` command.
//!
//! The questionnaire and plan are pure; this module asks the questions on the
//! terminal and then applies the plan: project files, dependency installs,
//! git setup, `.gitignore` entries and, for frontend frameworks, the
//! framework's own scaffolding tool.

use std::{fs, path::Path};

use crate::{
    commands::Context,
    diagnostics::Diagnostics,
    error::{Error, Result},
    palette::fmt_success,
    paths::relative_display,
    process::{PackageManager, Tool},
    prompt,
    scaffold::{
        framework::ProjectKind,
        gitignore,
        plan::{DependencyChoice, PlannedFile, ProjectPlan, plan},
        questionnaire::{Answer, Blueprint, Metadata, Prompt, Questionnaire},
        tooling::{self, TargetDir},
    },
};

/// Name suggested when the project directory has no usable name.
const FALLBACK_NAME: &str = "my-project";

/// Execute the init command.
pub async fn run(context: &Context) -> Result<()> {
    match initialize(context) {
        Err(Error::PromptCanceled) => {
            println!("\nInitialization cancelled by user.");
            Ok(())
        }
        result => result,
    }
}

/// Ask the questions and apply the resulting plan.
fn initialize(context: &Context) -> Result<()> {
    let mut diagnostics = context.diagnostics();
    let blueprint = ask(&default_name(&context.root))?;
    let plan = plan(&blueprint)?;
    let package_manager = context.package_manager();

    if plan.writes_files {
        write_project(&context.root, &plan, &diagnostics)?;
    }
    install_dependencies(&package_manager, &plan.dependencies, &mut diagnostics)?;
    if ensure_git(&context.root, &blueprint.metadata, &mut diagnostics)? {
        update_gitignore(&context.root)?;
    }

    if blueprint.kind == ProjectKind::Frontend {
        scaffold_frontend(context, &blueprint, &mut diagnostics)?;
    } else {
        println!(
            "\n{}",
            fmt_success("Project initialized!", context.use_color())
        );
    }
    diagnostics.print_warning_summary();
    Ok(())
}

/// Suggested package name derived from the project directory.
fn default_name(root: &Path) -> String {
    root.file_name()
        .and_then(|name| name.to_str())
        .map(tooling::slug)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| FALLBACK_NAME.to_string())
}

/// Drive the questionnaire on the terminal until it yields a blueprint.
fn ask(default_name: &str) -> Result<Blueprint> {
    let mut questionnaire = Questionnaire::new(default_name);
    while let Some(question) = questionnaire.prompt() {
        let answer = ask_one(question)?;
        questionnaire.answer(answer)?;
    }
    questionnaire.blueprint().ok_or_else(|| Error::PromptFailed {
        message: format!("questions stopped at {:?}", questionnaire.step()),
    })
}

/// Show one prompt and collect the matching answer.
fn ask_one(question: Prompt) -> Result<Answer> {
    let answer = match question {
        Prompt::Select { message, options } => Answer::Choice(prompt::select(message, options, 0)?),
        Prompt::MultiSelect { message, options } => {
            Answer::Choices(prompt::multi_select(message, options, &[])?)
        }
        Prompt::Confirm { message, default } => Answer::Yes(prompt::confirm(message, default)?),
        Prompt::Text {
            message,
            default,
            validate: Some(check),
        } => Answer::Text(prompt::validated_text(message, default.as_deref(), check)?),
        Prompt::Text {
            message,
            default,
            validate: None,
        } => Answer::Text(prompt::text(message, default.as_deref())?),
    };
    Ok(answer)
}

/// Write the manifest, tsconfig and starter file.
fn write_project(root: &Path, plan: &ProjectPlan, diagnostics: &Diagnostics) -> Result<()> {
    plan.manifest.save(root)?;
    if let Some(tsconfig) = &plan.tsconfig {
        write_file(root, tsconfig, diagnostics)?;
    }
    if let Some(dir) = &plan.source_dir {
        let path = root.join(dir);
        fs::create_dir_all(&path).map_err(|error| Error::ScaffoldWrite {
            path,
            source: error,
        })?;
    }
    write_file(root, &plan.starter, diagnostics)
}

/// Write one planned file below `root`, creating parent directories.
fn write_file(root: &Path, file: &PlannedFile, diagnostics: &Diagnostics) -> Result<()> {
    let path = root.join(&file.path);
    let written = match path.parent() {
        Some(parent) => fs::create_dir_all(parent),
        None => Ok(()),
    }
    .and_then(|()| fs::write(&path, &file.contents));
    written.map_err(|error| Error::ScaffoldWrite {
        path: path.clone(),
        source: error,
    })?;
    diagnostics.verbose(format!("Wrote {}", relative_display(&path, root)));
    Ok(())
}

/// Split selected choices into (production, development) package lists.
fn split_selection(
    choices: &[DependencyChoice],
    selected: &[usize],
) -> (Vec<String>, Vec<String>) {
    let mut production = Vec::new();
    let mut development = Vec::new();
    for (index, choice) in choices.iter().enumerate() {
        if !selected.contains(&index) {
            continue;
        }
        if choice.dev {
            development.push(choice.package.clone());
        } else {
            production.push(choice.package.clone());
        }
    }
    (production, development)
}

/// Offer the planned packages and install the selected ones.
///
/// A failed install is reported and the flow continues.
fn install_dependencies(
    package_manager: &PackageManager,
    choices: &[DependencyChoice],
    diagnostics: &mut Diagnostics,
) -> Result<()> {
    if choices.is_empty() {
        return Ok(());
    }
    let labels = choices.iter().map(DependencyChoice::label).collect();
    let checked: Vec<usize> = choices
        .iter()
        .enumerate()
        .filter(|(_, choice)| choice.checked)
        .map(|(index, _)| index)
        .collect();
    let selected = prompt::multi_select("Select dependencies to install now:", labels, &checked)?;
    let (production, development) = split_selection(choices, &selected);

    if !production.is_empty()
        && let Err(error) = package_manager.install(&production, false)
    {
        diagnostics.warn(format!("Failed to install dependencies: {error}"));
    }
    if !development.is_empty()
        && let Err(error) = package_manager.install(&development, true)
    {
        diagnostics.warn(format!("Failed to install devDependencies: {error}"));
    }
    Ok(())
}

/// README written with the initial commit.
fn readme(metadata: &Metadata) -> String {
    format!("# {}\n\n{}\n", metadata.name, metadata.description)
}

/// Make sure the project is inside a git repository, offering to create one.
///
/// Returns whether the project ends up in a repository.
fn ensure_git(root: &Path, metadata: &Metadata, diagnostics: &mut Diagnostics) -> Result<bool> {
    if root.join(".git").exists() {
        return Ok(true);
    }
    if !prompt::confirm("No git repository found. Initialize a new git repo?", true)? {
        return Ok(false);
    }

    let git = Tool::new("git", root);
    if let Err(error) = git.run(&["init"]) {
        diagnostics.warn(format!("Failed to initialize git: {error}"));
        return Ok(false);
    }
    let readme_path = root.join("README.md");
    fs::write(&readme_path, readme(metadata)).map_err(|error| Error::ScaffoldWrite {
        path: readme_path,
        source: error,
    })?;
    if let Err(error) = git
        .run(&["add", "."])
        .and_then(|()| git.run(&["commit", "-m", "Initial commit"]))
    {
        diagnostics.warn(format!("Failed to create the initial commit: {error}"));
    } else {
        println!("Initialized git repository and made initial commit.");
    }
    Ok(true)
}

/// Offer each missing `.gitignore` entry.
fn update_gitignore(root: &Path) -> Result<()> {
    for entry in gitignore::missing_entries(root)? {
        if prompt::confirm(&format!("Add {entry}/ to .gitignore?"), true)? {
            gitignore::append_entry(root, entry)?;
            println!("Added {entry} to .gitignore");
        }
    }
    Ok(())
}

/// Run the frontend framework's scaffolding tool and finish its output.
fn scaffold_frontend(
    context: &Context,
    blueprint: &Blueprint,
    diagnostics: &mut Diagnostics,
) -> Result<()> {
    let root = &context.root;
    let metadata = &blueprint.metadata;
    let slug = tooling::slug(&metadata.name);
    let targets = vec![
        "Current directory".to_string(),
        format!("New subdirectory ./{slug}"),
    ];
    let target = match prompt::select("Where should the project be created?", targets, 0)? {
        0 => TargetDir::Current,
        _ => TargetDir::Subdirectory,
    };
    let Some(command) =
        tooling::scaffold_command(blueprint.framework, blueprint.language, target, &metadata.name)
    else {
        return Ok(());
    };

    let tool = Tool::new(command.program, root);
    println!(
        "Scaffolding {} project with: {}",
        command.display_name,
        tool.command_line(&command.args)
    );
    let status = tool.status(&command.args)?;
    if !status.success() {
        diagnostics.warn(format!(
            "Failed to scaffold {} project: `{}` exited with {status}",
            command.display_name, command.program
        ));
        return Ok(());
    }

    if let Some(staging) = &command.staging_dir {
        tooling::move_from_staging(root, &root.join(staging))?;
    }
    let project_dir = root.join(&command.project_dir);
    if command.install_after {
        let installer = PackageManager::new(context.config.package_manager(), &project_dir);
        println!("Running {} install...", installer.tool().program());
        if let Err(error) = installer.tool().run(&["install"]) {
            diagnostics.warn(format!("Install failed: {error}"));
        }
    }
    if command.patch_manifest
        && let Err(error) = tooling::patch_manifest(&project_dir, metadata)
    {
        diagnostics.warn(format!("Could not patch package.json: {error}"));
    }

    println!(
        "{}",
        fmt_success(
            &format!("{} project created!", command.display_name),
            context.use_color()
        )
    );
    Ok(())
}
