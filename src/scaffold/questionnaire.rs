//! The `init` question flow as an explicit state machine.
//!
//! A [`Questionnaire`] exposes the prompt for its current [`Step`]; feeding
//! an [`Answer`] moves it to the next step. The flow has no side effects, so
//! every path through it can be walked in tests without a terminal.

use crate::{
    error::{Error, Result},
    scaffold::framework::{Framework, Language, Plugin, ProjectKind},
};

/// Default output directory for compiled TypeScript.
pub const DEFAULT_OUT_DIR: &str = "./dist";
/// Default version for new projects.
pub const DEFAULT_VERSION: &str = "1.0.0";
/// Default license for new projects.
pub const DEFAULT_LICENSE: &str = "ISC";

/// Source directory options offered for TypeScript projects.
const SOURCE_DIRS: [(&str, Option<&str>); 3] = [
    ("Current directory (.)", Some(".")),
    ("./src", Some("./src")),
    ("Custom", None),
];

/// A state in the question flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Frontend or backend.
    Kind,
    /// Framework for the chosen kind.
    Framework,
    /// Optional framework plugins.
    Plugins,
    /// SolidJS template language.
    SolidTemplate,
    /// JavaScript or TypeScript for backend frameworks.
    Language,
    /// Whether TypeScript is compiled to JavaScript.
    Compile,
    /// Source directory choice.
    SourceDir,
    /// Free-form source directory.
    CustomSourceDir,
    /// Compiled output directory.
    OutDir,
    /// Package name.
    Name,
    /// Package version.
    Version,
    /// Package author.
    Author,
    /// Package license.
    License,
    /// Package description.
    Description,
    /// Whether to add watch/serve scripts.
    Watch,
    /// All questions answered.
    Done,
}

/// The prompt to show for a step.
#[derive(Debug, Clone)]
pub enum Prompt {
    /// Pick exactly one option.
    Select {
        /// Question text.
        message: &'static str,
        /// Option labels.
        options: Vec<String>,
    },
    /// Pick any number of options.
    MultiSelect {
        /// Question text.
        message: &'static str,
        /// Option labels.
        options: Vec<String>,
    },
    /// Yes or no.
    Confirm {
        /// Question text.
        message: &'static str,
        /// Answer used when the user just presses enter.
        default: bool,
    },
    /// Free text.
    Text {
        /// Question text.
        message: &'static str,
        /// Pre-filled answer.
        default: Option<String>,
        /// Returns an error message for rejected input.
        validate: Option<fn(&str) -> Option<&'static str>>,
    },
}

/// A user's answer to a [`Prompt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Index of the selected option.
    Choice(usize),
    /// Indices of all selected options.
    Choices(Vec<usize>),
    /// Confirmation result.
    Yes(bool),
    /// Entered text.
    Text(String),
}

/// Package metadata collected from the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    /// Package name.
    pub name: String,
    /// Package version.
    pub version: String,
    /// Package author.
    pub author: String,
    /// Package license.
    pub license: String,
    /// Package description.
    pub description: String,
}

/// Everything the questionnaire decided.
#[derive(Debug, Clone, PartialEq)]
pub struct Blueprint {
    /// Frontend or backend.
    pub kind: ProjectKind,
    /// Chosen framework.
    pub framework: Framework,
    /// Chosen plugins, in catalog order.
    pub plugins: Vec<Plugin>,
    /// Source language.
    pub language: Language,
    /// Whether TypeScript is compiled with `tsc`.
    pub compile: bool,
    /// Source root relative to the project.
    pub src_dir: String,
    /// Compiled output directory relative to the project.
    pub out_dir: String,
    /// Package metadata.
    pub metadata: Metadata,
    /// Whether to add `watch` and `serve` scripts.
    pub watch: bool,
}

/// Question flow state machine.
#[derive(Debug, Clone)]
pub struct Questionnaire {
    /// Current step.
    step: Step,
    /// Name suggested when asking for the package name.
    default_name: String,
    /// Chosen kind.
    kind: ProjectKind,
    /// Chosen framework.
    framework: Option<Framework>,
    /// Chosen plugins.
    plugins: Vec<Plugin>,
    /// Chosen language.
    language: Language,
    /// Compile TypeScript?
    compile: bool,
    /// Source directory.
    src_dir: String,
    /// Output directory.
    out_dir: String,
    /// Metadata answers so far.
    metadata: Metadata,
    /// Watch scripts?
    watch: bool,
}

impl Questionnaire {
    /// Start a new flow, suggesting `default_name` as the package name.
    pub fn new(default_name: impl Into<String>) -> Self {
        Self {
            step: Step::Kind,
            default_name: default_name.into(),
            kind: ProjectKind::Backend,
            framework: None,
            plugins: Vec::new(),
            language: Language::JavaScript,
            compile: false,
            src_dir: ".".to_string(),
            out_dir: DEFAULT_OUT_DIR.to_string(),
            metadata: Metadata {
                name: String::new(),
                version: DEFAULT_VERSION.to_string(),
                author: String::new(),
                license: DEFAULT_LICENSE.to_string(),
                description: String::new(),
            },
            watch: false,
        }
    }

    /// Current step.
    pub fn step(&self) -> Step {
        self.step
    }

    /// Prompt for the current step, or `None` once finished.
    pub fn prompt(&self) -> Option<Prompt> {
        let prompt = match self.step {
            Step::Kind => Prompt::Select {
                message: "What kind of project are you building?",
                options: labels(ProjectKind::all().iter().map(|kind| kind.label())),
            },
            Step::Framework => Prompt::Select {
                message: match self.kind {
                    ProjectKind::Frontend => "Frontend framework:",
                    ProjectKind::Backend => "Backend / other / library / CLI / etc:",
                },
                options: labels(self.kind.frameworks().iter().map(|fw| fw.display_name())),
            },
            Step::Plugins => Prompt::MultiSelect {
                message: self.current_framework().plugin_prompt(),
                options: labels(self.current_framework().plugins().iter().map(|p| p.package)),
            },
            Step::SolidTemplate => Prompt::Select {
                message: "SolidJS template:",
                options: labels(["TypeScript", "JavaScript"]),
            },
            Step::Language => Prompt::Select {
                message: "Do you want to use JavaScript or TypeScript?",
                options: labels(["JavaScript", "TypeScript"]),
            },
            Step::Compile => Prompt::Confirm {
                message: "Will you compile your TypeScript to JavaScript?",
                default: true,
            },
            Step::SourceDir => Prompt::Select {
                message: "What should be the root directory for your source files?",
                options: labels(SOURCE_DIRS.iter().map(|(label, _)| *label)),
            },
            Step::CustomSourceDir => Prompt::Text {
                message: "Enter custom source directory:",
                default: None,
                validate: Some(validate_non_empty),
            },
            Step::OutDir => Prompt::Text {
                message: "Where should the compiled output (dist) directory be located?",
                default: Some(DEFAULT_OUT_DIR.to_string()),
                validate: None,
            },
            Step::Name => Prompt::Text {
                message: "Project name:",
                default: Some(self.default_name.clone()),
                validate: Some(validate_name),
            },
            Step::Version => Prompt::Text {
                message: "Version:",
                default: Some(DEFAULT_VERSION.to_string()),
                validate: Some(validate_version),
            },
            Step::Author => Prompt::Text {
                message: "Author:",
                default: None,
                validate: None,
            },
            Step::License => Prompt::Text {
                message: "License:",
                default: Some(DEFAULT_LICENSE.to_string()),
                validate: None,
            },
            Step::Description => Prompt::Text {
                message: "Description:",
                default: None,
                validate: None,
            },
            Step::Watch => Prompt::Confirm {
                message: "Add watch and serve scripts with tsc --watch and nodemon?",
                default: true,
            },
            Step::Done => return None,
        };
        Some(prompt)
    }

    /// Apply an answer to the current step and advance.
    pub fn answer(&mut self, answer: Answer) -> Result<()> {
        self.step = match (self.step, answer) {
            (Step::Kind, Answer::Choice(index)) => {
                self.kind = pick(&ProjectKind::all(), index)?;
                Step::Framework
            }
            (Step::Framework, Answer::Choice(index)) => {
                let framework = pick(self.kind.frameworks(), index)?;
                self.framework = Some(framework);
                if framework.plugins().is_empty() {
                    self.after_framework(framework)
                } else {
                    Step::Plugins
                }
            }
            (Step::Plugins, Answer::Choices(indices)) => {
                let framework = self.current_framework();
                let available = framework.plugins();
                if let Some(bad) = indices.iter().find(|index| **index >= available.len()) {
                    return Err(out_of_range(*bad));
                }
                self.plugins = available
                    .iter()
                    .enumerate()
                    .filter(|(position, _)| indices.contains(position))
                    .map(|(_, plugin)| *plugin)
                    .collect();
                self.after_framework(framework)
            }
            (Step::SolidTemplate, Answer::Choice(index)) => {
                self.language = pick(&[Language::TypeScript, Language::JavaScript], index)?;
                self.compile = self.language.is_typescript();
                self.src_dir = "./src".to_string();
                self.out_dir = DEFAULT_OUT_DIR.to_string();
                Step::Name
            }
            (Step::Language, Answer::Choice(index)) => {
                self.language = pick(&[Language::JavaScript, Language::TypeScript], index)?;
                if self.language.is_typescript() {
                    Step::Compile
                } else {
                    Step::Name
                }
            }
            (Step::Compile, Answer::Yes(compile)) => {
                self.compile = compile;
                Step::SourceDir
            }
            (Step::SourceDir, Answer::Choice(index)) => match pick(&SOURCE_DIRS, index)?.1 {
                Some(dir) => {
                    self.src_dir = dir.to_string();
                    self.after_source_dir()
                }
                None => Step::CustomSourceDir,
            },
            (Step::CustomSourceDir, Answer::Text(dir)) => {
                self.src_dir = dir.trim().to_string();
                self.after_source_dir()
            }
            (Step::OutDir, Answer::Text(dir)) => {
                self.out_dir = or_default(dir, DEFAULT_OUT_DIR);
                Step::Name
            }
            (Step::Name, Answer::Text(name)) => {
                self.metadata.name = or_default(name, &self.default_name);
                Step::Version
            }
            (Step::Version, Answer::Text(version)) => {
                self.metadata.version = or_default(version, DEFAULT_VERSION);
                Step::Author
            }
            (Step::Author, Answer::Text(author)) => {
                self.metadata.author = author.trim().to_string();
                Step::License
            }
            (Step::License, Answer::Text(license)) => {
                self.metadata.license = or_default(license, DEFAULT_LICENSE);
                Step::Description
            }
            (Step::Description, Answer::Text(description)) => {
                self.metadata.description = description.trim().to_string();
                if self.language.is_typescript()
                    && self.compile
                    && self.kind == ProjectKind::Backend
                {
                    Step::Watch
                } else {
                    Step::Done
                }
            }
            (Step::Watch, Answer::Yes(watch)) => {
                self.watch = watch;
                Step::Done
            }
            (step, answer) => {
                return Err(Error::PromptFailed {
                    message: format!("answer {answer:?} does not fit step {step:?}"),
                });
            }
        };
        Ok(())
    }

    /// Return the finished blueprint, or `None` before the flow is done.
    pub fn blueprint(&self) -> Option<Blueprint> {
        if self.step != Step::Done {
            return None;
        }
        Some(Blueprint {
            kind: self.kind,
            framework: self.framework?,
            plugins: self.plugins.clone(),
            language: self.language,
            compile: self.compile,
            src_dir: self.src_dir.clone(),
            out_dir: self.out_dir.clone(),
            metadata: self.metadata.clone(),
            watch: self.watch,
        })
    }

    /// The chosen framework; only called after the framework step.
    fn current_framework(&self) -> Framework {
        self.framework.unwrap_or(Framework::VanillaJs)
    }

    /// Step that follows the framework (and plugin) choice.
    fn after_framework(&mut self, framework: Framework) -> Step {
        match framework {
            Framework::VanillaJs => {
                self.language = Language::JavaScript;
                Step::Name
            }
            Framework::VanillaTs => {
                self.language = Language::TypeScript;
                Step::Compile
            }
            Framework::SolidJs => Step::SolidTemplate,
            _ if framework.kind() == ProjectKind::Frontend => Step::Name,
            _ => Step::Language,
        }
    }

    /// Step that follows the source directory choice.
    fn after_source_dir(&self) -> Step {
        if self.compile { Step::OutDir } else { Step::Name }
    }
}

/// Collect string labels for a prompt.
fn labels<'a>(items: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    items.into_iter().map(str::to_string).collect()
}

/// Pick `items[index]`, rejecting out-of-range indices.
fn pick<T: Copy>(items: &[T], index: usize) -> Result<T> {
    items.get(index).copied().ok_or_else(|| out_of_range(index))
}

/// Error for an option index that does not exist.
fn out_of_range(index: usize) -> Error {
    Error::PromptFailed {
        message: format!("option {index} is out of range"),
    }
}

/// Trim `value`, substituting `default` when it is empty.
fn or_default(value: String, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Package names must be non-empty and URL-safe.
pub fn validate_name(input: &str) -> Option<&'static str> {
    let valid = !input.is_empty()
        && input
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    (!valid).then_some("Name must be non-empty and URL-safe")
}

/// Versions must look like `x.y.z`.
pub fn validate_version(input: &str) -> Option<&'static str> {
    let parts: Vec<&str> = input.split('.').collect();
    let valid = parts.len() == 3
        && parts
            .iter()
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()));
    (!valid).then_some("Version must be in x.y.z format")
}

/// Free text that must not be blank.
fn validate_non_empty(input: &str) -> Option<&'static str> {
    input.trim().is_empty().then_some("A directory is required")
}
