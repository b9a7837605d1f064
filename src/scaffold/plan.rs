//! Turning a [`Blueprint`] into concrete files and install choices.

use std::path::PathBuf;

use serde_json::{Map, Value, json};

use crate::{
    error::{Error, Result},
    manifest::Manifest,
    scaffold::{
        framework::{Framework, ProjectKind},
        questionnaire::Blueprint,
        starter,
    },
};

/// Version range used for packages added by plugins and frameworks.
const LATEST: &str = "latest";

/// A file `init` will write, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    /// Path relative to the project root.
    pub path: PathBuf,
    /// File contents.
    pub contents: String,
}

/// A package offered in the "install now" prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyChoice {
    /// npm package name.
    pub package: String,
    /// Installed as a devDependency.
    pub dev: bool,
    /// Pre-selected in the prompt.
    pub checked: bool,
}

impl DependencyChoice {
    /// Label shown in the install prompt.
    pub fn label(&self) -> String {
        if self.dev {
            format!("{} (dev)", self.package)
        } else {
            self.package.clone()
        }
    }
}

/// Everything `init` writes before running external tools.
#[derive(Debug, Clone)]
pub struct ProjectPlan {
    /// The new manifest.
    pub manifest: Manifest,
    /// Whether `init` writes files itself; frontend tools write their own.
    pub writes_files: bool,
    /// Source directory to create, when not the project root.
    pub source_dir: Option<PathBuf>,
    /// Generated `tsconfig.json`.
    pub tsconfig: Option<PlannedFile>,
    /// Starter source file.
    pub starter: PlannedFile,
    /// Packages offered for immediate installation.
    pub dependencies: Vec<DependencyChoice>,
}

/// Build the plan for a finished blueprint.
pub fn plan(blueprint: &Blueprint) -> Result<ProjectPlan> {
    let typescript = blueprint.language.is_typescript();
    let nested_source = typescript && blueprint.src_dir != ".";

    let tsconfig = if typescript {
        let text = serde_json::to_string_pretty(&tsconfig(blueprint))
            .map_err(|error| Error::ManifestSerialize { source: error })?;
        Some(PlannedFile {
            path: PathBuf::from("tsconfig.json"),
            contents: text,
        })
    } else {
        None
    };

    Ok(ProjectPlan {
        manifest: manifest(blueprint),
        writes_files: blueprint.kind == ProjectKind::Backend,
        source_dir: nested_source.then(|| PathBuf::from(&blueprint.src_dir)),
        tsconfig,
        starter: PlannedFile {
            path: starter_path(blueprint),
            contents: starter::render(blueprint)?,
        },
        dependencies: dependency_choices(blueprint),
    })
}

/// Build the manifest for a new project.
pub fn manifest(blueprint: &Blueprint) -> Manifest {
    let metadata = &blueprint.metadata;
    let mut scripts = Map::new();
    let mut dependencies = Map::new();
    let mut dev_dependencies = Map::new();

    let project_flag = if blueprint.src_dir == "." {
        ""
    } else {
        " --project tsconfig.json"
    };
    let out_dir = &blueprint.out_dir;

    if !blueprint.language.is_typescript() {
        insert(&mut scripts, "start", "node index.js");
    } else if blueprint.compile {
        insert(&mut scripts, "build", &format!("tsc{project_flag}"));
        insert(&mut scripts, "start", &format!("node {out_dir}/index.js"));
        insert(&mut dev_dependencies, "typescript", "^5.0.0");
        if blueprint.watch && blueprint.kind == ProjectKind::Backend {
            insert(&mut scripts, "watch", &format!("tsc --watch{project_flag}"));
            insert(&mut scripts, "serve", &format!("nodemon {out_dir}/index.js"));
            insert(&mut dev_dependencies, "nodemon", "^3.0.0");
        }
    } else {
        insert(
            &mut scripts,
            "start",
            &format!("tsx {}/index.ts", blueprint.src_dir),
        );
        insert(&mut dev_dependencies, "tsx", "^4.0.0");
        insert(&mut dev_dependencies, "typescript", "^5.0.0");
    }

    for package in blueprint.framework.dependencies() {
        insert(&mut dependencies, package, LATEST);
    }
    for package in blueprint.framework.dev_dependencies() {
        insert(&mut dev_dependencies, package, LATEST);
    }
    for plugin in &blueprint.plugins {
        insert(&mut dependencies, plugin.package, LATEST);
        if blueprint.language.is_typescript()
            && let Some(types) = plugin.types
        {
            insert(&mut dev_dependencies, types, LATEST);
        }
    }

    let mut fields = Map::new();
    fields.insert("name".into(), json!(metadata.name));
    fields.insert("version".into(), json!(metadata.version));
    fields.insert("author".into(), json!(metadata.author));
    fields.insert("license".into(), json!(metadata.license));
    fields.insert("description".into(), json!(metadata.description));
    fields.insert("scripts".into(), Value::Object(scripts));
    fields.insert("dependencies".into(), Value::Object(dependencies));
    fields.insert("devDependencies".into(), Value::Object(dev_dependencies));
    if blueprint.language.is_typescript() && blueprint.kind == ProjectKind::Backend {
        fields.insert("type".into(), json!("module"));
    }
    Manifest::from_fields(fields)
}

/// Insert a string value into a JSON object.
fn insert(map: &mut Map<String, Value>, key: &str, value: &str) {
    map.insert(key.to_string(), Value::String(value.to_string()));
}

/// Build the `tsconfig.json` contents.
fn tsconfig(blueprint: &Blueprint) -> Value {
    let mut options = Map::new();
    options.insert("target".into(), json!("esnext"));
    options.insert("module".into(), json!("esnext"));
    options.insert("moduleResolution".into(), json!("node"));
    if blueprint.compile {
        options.insert("outDir".into(), json!(blueprint.out_dir));
    }
    options.insert("rootDir".into(), json!(blueprint.src_dir));
    options.insert("esModuleInterop".into(), json!(true));
    options.insert("strict".into(), json!(true));
    options.insert("skipLibCheck".into(), json!(true));
    json!({
        "compilerOptions": options,
        "include": [format!("{}/**/*", blueprint.src_dir)],
    })
}

/// Relative path of the starter file.
fn starter_path(blueprint: &Blueprint) -> PathBuf {
    if blueprint.language.is_typescript() {
        PathBuf::from(&blueprint.src_dir).join("index.ts")
    } else {
        PathBuf::from("index.js")
    }
}

/// Packages to offer in the install prompt.
fn dependency_choices(blueprint: &Blueprint) -> Vec<DependencyChoice> {
    let typescript = blueprint.language.is_typescript();
    let mut choices = Vec::new();
    let mut push = |package: &str, dev: bool, checked: bool| {
        if !choices
            .iter()
            .any(|choice: &DependencyChoice| choice.package == package)
        {
            choices.push(DependencyChoice {
                package: package.to_string(),
                dev,
                checked,
            });
        }
    };

    for package in blueprint.framework.dependencies() {
        push(package, false, true);
    }
    for plugin in &blueprint.plugins {
        push(plugin.package, false, true);
    }
    for package in blueprint.framework.dev_dependencies() {
        push(package, true, true);
    }
    if typescript {
        for plugin in &blueprint.plugins {
            if let Some(types) = plugin.types {
                push(types, true, true);
            }
        }
        push("typescript", true, true);
        if !blueprint.compile {
            push("tsx", true, true);
        }
        push("@types/node", true, false);
        let web_framework = matches!(blueprint.framework, Framework::React | Framework::Vue);
        if blueprint.kind == ProjectKind::Frontend || web_framework {
            push("@types/web", true, false);
        }
    }
    choices
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use serde_json::json;

    use super::plan;
    use crate::scaffold::{
        framework::{Framework, Language, ProjectKind},
        questionnaire::{Blueprint, Metadata},
    };

    fn blueprint(framework: Framework, language: Language, compile: bool) -> Blueprint {
        Blueprint {
            kind: framework.kind(),
            framework,
            plugins: Vec::new(),
            language,
            compile,
            src_dir: if language.is_typescript() { "./src" } else { "." }.to_string(),
            out_dir: "./dist".to_string(),
            metadata: Metadata {
                name: "demo".to_string(),
                version: "1.0.0".to_string(),
                author: "Ada".to_string(),
                license: "ISC".to_string(),
                description: String::new(),
            },
            watch: false,
        }
    }

    #[test]
    fn javascript_backend_runs_index() {
        let plan = plan(&blueprint(Framework::VanillaJs, Language::JavaScript, false)).expect("plan");
        let manifest = plan.manifest.fields();

        assert_eq!(manifest["scripts"], json!({ "start": "node index.js" }));
        assert!(manifest.get("type").is_none());
        assert!(plan.tsconfig.is_none());
        assert!(plan.source_dir.is_none());
        assert_eq!(plan.starter.path, PathBuf::from("index.js"));
        assert!(plan.dependencies.is_empty());
        assert!(plan.writes_files);
    }

    #[test]
    fn compiled_typescript_backend_with_watch() {
        let mut blueprint = blueprint(Framework::Express, Language::TypeScript, true);
        blueprint.watch = true;
        blueprint.plugins = Framework::Express.plugins()[..1].to_vec();

        let plan = plan(&blueprint).expect("plan");
        let manifest = plan.manifest.fields();

        assert_eq!(
            manifest["scripts"],
            json!({
                "build": "tsc --project tsconfig.json",
                "start": "node ./dist/index.js",
                "watch": "tsc --watch --project tsconfig.json",
                "serve": "nodemon ./dist/index.js",
            })
        );
        assert_eq!(manifest["dependencies"], json!({ "express": "latest", "cors": "latest" }));
        assert_eq!(manifest["devDependencies"]["@types/cors"], "latest");
        assert_eq!(manifest["devDependencies"]["nodemon"], "^3.0.0");
        assert_eq!(manifest["type"], "module");
        assert_eq!(plan.source_dir, Some(PathBuf::from("./src")));
        assert_eq!(plan.starter.path, PathBuf::from("./src").join("index.ts"));

        let tsconfig = plan.tsconfig.expect("tsconfig");
        assert!(tsconfig.contents.contains("\"outDir\": \"./dist\""));
        assert!(tsconfig.contents.contains("\"./src/**/*\""));

        let labels: Vec<String> = plan.dependencies.iter().map(|d| d.label()).collect();
        assert_eq!(
            labels,
            [
                "express",
                "cors",
                "@types/express (dev)",
                "@types/cors (dev)",
                "typescript (dev)",
                "@types/node (dev)",
            ]
        );
    }

    #[test]
    fn uncompiled_typescript_uses_tsx() {
        let plan = plan(&blueprint(Framework::VanillaTs, Language::TypeScript, false)).expect("plan");
        let manifest = plan.manifest.fields();

        assert_eq!(manifest["scripts"], json!({ "start": "tsx ./src/index.ts" }));
        assert_eq!(manifest["devDependencies"]["tsx"], "^4.0.0");
        assert!(plan.dependencies.iter().any(|d| d.package == "tsx" && d.checked));
        assert!(!plan.tsconfig.expect("tsconfig").contents.contains("outDir"));
    }

    #[test]
    fn frontend_projects_leave_files_to_their_tool() {
        let mut blueprint = blueprint(Framework::SolidJs, Language::TypeScript, true);
        blueprint.kind = ProjectKind::Frontend;

        let plan = plan(&blueprint).expect("plan");

        assert!(!plan.writes_files);
        assert!(plan.manifest.get("type").is_none());
        assert!(plan.dependencies.iter().any(|d| d.package == "@types/web" && !d.checked));
    }
}
