//! Finding missing and unused dependencies by scanning source imports.
//!
//! This is a best-effort text scan, not a module resolver: every
//! `import`/`export ... from`/`require`/dynamic `import()` string literal in
//! the project's JavaScript and TypeScript sources counts as a use of the
//! package it names. Comments are stripped before scanning. A dependency whose
//! binary is invoked from a manifest script also counts as used.

use std::{
    borrow::Cow,
    collections::{BTreeMap, BTreeSet},
    fs,
    path::{Path, PathBuf},
};

use regex::{Captures, Regex};
use serde_json::Value;
use walkdir::{DirEntry, WalkDir};

use crate::{
    diagnostics::Diagnostics,
    error::{Error, Result},
    manifest::Manifest,
    paths::display_path,
};

/// TypeScript project file holding path aliases.
const TSCONFIG_FILE: &str = "tsconfig.json";

/// Directory names never scanned.
const SKIPPED_DIRS: [&str; 5] = ["node_modules", "dist", "build", "coverage", ".git"];

/// File extensions scanned for imports.
const SOURCE_EXTENSIONS: [&str; 8] = ["js", "jsx", "mjs", "cjs", "ts", "tsx", "mts", "cts"];

/// Manifest fields that declare dependencies.
const DECLARING_FIELDS: [&str; 4] = [
    "dependencies",
    "devDependencies",
    "peerDependencies",
    "optionalDependencies",
];

/// Field whose entries are reported when unused.
const RUNTIME_FIELD: &str = "dependencies";

/// Node built-in modules, importable without the `node:` prefix.
const BUILTIN_MODULES: &[&str] = &[
    "assert",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "diagnostics_channel",
    "dns",
    "domain",
    "events",
    "fs",
    "http",
    "http2",
    "https",
    "inspector",
    "module",
    "net",
    "os",
    "path",
    "perf_hooks",
    "process",
    "punycode",
    "querystring",
    "readline",
    "repl",
    "stream",
    "string_decoder",
    "sys",
    "timers",
    "tls",
    "trace_events",
    "tty",
    "url",
    "util",
    "v8",
    "vm",
    "wasi",
    "worker_threads",
    "zlib",
];

/// String literals (group 1, kept) or line and block comments (dropped).
const COMMENT_PATTERN: &str =
    r#"("(?:[^"\\\n]|\\.)*"|'(?:[^'\\\n]|\\.)*'|`(?:[^`\\]|\\.)*`)|//[^\n]*|/\*(?s:.*?)\*/"#;

/// Operators chaining commands inside a script.
const COMMAND_SEPARATORS: &str = r"&&|\|\||[;|]";

/// Runners whose first argument is the binary actually invoked.
const BINARY_RUNNERS: [&str; 2] = ["npx", "exec"];

/// Statement forms that reference a module specifier in capture group 1.
const IMPORT_PATTERNS: [&str; 4] = [
    r#"\bimport\s+(?:[\w*${}\s,]+?\s+from\s+)?['"]([^'"\n]+)['"]"#,
    r#"\bexport\s+[\w*${}\s,]*?\bfrom\s+['"]([^'"\n]+)['"]"#,
    r#"\brequire\s*\(\s*['"]([^'"\n]+)['"]\s*\)"#,
    r#"\bimport\s*\(\s*['"]([^'"\n]+)['"]\s*\)"#,
];

/// Extracts module specifiers from source text.
#[derive(Debug)]
pub struct ImportScanner {
    /// Compiled [`IMPORT_PATTERNS`].
    patterns: Vec<Regex>,
    /// Compiled [`COMMENT_PATTERN`].
    comments: Regex,
}

/// Compile a built-in pattern.
fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|error| Error::InvalidPattern {
        pattern: pattern.to_string(),
        source: error,
    })
}

impl ImportScanner {
    /// Compile the import patterns.
    pub fn new() -> Result<Self> {
        let patterns = IMPORT_PATTERNS
            .iter()
            .map(|pattern| compile(pattern))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            patterns,
            comments: compile(COMMENT_PATTERN)?,
        })
    }

    /// `source` with comments removed and string literals left intact.
    fn strip_comments<'a>(&self, source: &'a str) -> Cow<'a, str> {
        self.comments.replace_all(source, |captures: &Captures<'_>| {
            captures
                .get(1)
                .map_or_else(String::new, |literal| literal.as_str().to_string())
        })
    }

    /// Every specifier referenced in `source`, deduplicated and sorted.
    pub fn specifiers(&self, source: &str) -> BTreeSet<String> {
        let code = self.strip_comments(source);
        self.patterns
            .iter()
            .flat_map(|pattern| pattern.captures_iter(&code))
            .filter_map(|captures| captures.get(1))
            .map(|specifier| specifier.as_str().to_string())
            .collect()
    }
}

/// Package name a specifier refers to, or `None` for relative paths, URLs
/// and Node built-ins.
pub fn package_name(specifier: &str) -> Option<String> {
    if specifier.is_empty()
        || specifier.starts_with('.')
        || specifier.starts_with('/')
        || specifier.starts_with('#')
        || specifier.contains(':')
    {
        return None;
    }
    let mut segments = specifier.split('/');
    let first = segments.next()?;
    let name = if first.starts_with('@') {
        let second = segments.next().filter(|segment| !segment.is_empty())?;
        format!("{first}/{second}")
    } else {
        first.to_string()
    };
    (!BUILTIN_MODULES.contains(&name.as_str())).then_some(name)
}

/// Path alias patterns from `compilerOptions.paths`.
///
/// Each key becomes `^key` with its first `/*` widened to `/.+`. Keys that
/// do not compile are skipped.
pub fn alias_patterns(tsconfig: &Value) -> Vec<Regex> {
    tsconfig
        .pointer("/compilerOptions/paths")
        .and_then(Value::as_object)
        .map(|paths| {
            paths
                .keys()
                .filter_map(|key| Regex::new(&format!("^{}", key.replacen("/*", "/.+", 1))).ok())
                .collect()
        })
        .unwrap_or_default()
}

/// Load alias patterns from the project's `tsconfig.json`, if any.
fn load_alias_patterns(root: &Path, diagnostics: &mut Diagnostics) -> Vec<Regex> {
    let path = root.join(TSCONFIG_FILE);
    let Ok(text) = fs::read_to_string(&path) else {
        return Vec::new();
    };
    match serde_json::from_str::<Value>(&text) {
        Ok(tsconfig) => alias_patterns(&tsconfig),
        Err(error) => {
            diagnostics.warn(format!(
                "Ignoring path aliases in {}: {error}",
                display_path(&path)
            ));
            Vec::new()
        }
    }
}

/// Whether a directory entry is pruned from the walk.
fn is_skipped(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.') || SKIPPED_DIRS.contains(&name))
}

/// Whether a path has a scanned extension.
fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| SOURCE_EXTENSIONS.contains(&extension))
}

/// All source files under `root`, sorted.
pub fn source_files(root: &Path, diagnostics: &mut Diagnostics) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).into_iter().filter_entry(|entry| !is_skipped(entry)) {
        match entry {
            Ok(entry) if entry.file_type().is_file() && is_source_file(entry.path()) => {
                files.push(entry.into_path());
            }
            Ok(_) => {}
            Err(error) => diagnostics.warn(format!("Skipping unreadable path: {error}")),
        }
    }
    files.sort();
    files
}

/// Names declared in a dependency table of the manifest.
fn declared(manifest: &Manifest, field: &str) -> Result<Vec<String>> {
    match manifest.get(field) {
        None => Ok(Vec::new()),
        Some(Value::Object(table)) => Ok(table.keys().cloned().collect()),
        Some(_) => Err(Error::InvalidManifestField {
            field: field.to_string(),
            expected: "an object",
        }),
    }
}

/// Binaries invoked by the manifest's scripts.
///
/// Each script is split on `&&`, `||`, `;` and `|`; the first word of every
/// command, after any `VAR=value` assignments and an `npx`/`exec` runner,
/// is the binary.
fn script_binaries(manifest: &Manifest) -> Result<BTreeSet<String>> {
    let separators = compile(COMMAND_SEPARATORS)?;
    let mut binaries = BTreeSet::new();
    for command in manifest.scripts()?.values().filter_map(Value::as_str) {
        for segment in separators.split(command) {
            let mut words = segment
                .split_whitespace()
                .skip_while(|word| word.contains('='));
            let binary = match words.next() {
                Some(runner) if BINARY_RUNNERS.contains(&runner) => {
                    words.find(|word| !word.starts_with('-'))
                }
                first => first,
            };
            if let Some(binary) = binary {
                binaries.insert(binary.to_string());
            }
        }
    }
    Ok(binaries)
}

/// Binary names an installed package declares in its `bin` field.
fn bin_names(root: &Path, package: &str) -> Vec<String> {
    let path = root.join("node_modules").join(package).join("package.json");
    let Some(manifest) = fs::read_to_string(path)
        .ok()
        .and_then(|text| serde_json::from_str::<Value>(&text).ok())
    else {
        return Vec::new();
    };
    match manifest.get("bin") {
        Some(Value::String(_)) => package
            .rsplit('/')
            .next()
            .map(|name| vec![name.to_string()])
            .unwrap_or_default(),
        Some(Value::Object(bins)) => bins.keys().cloned().collect(),
        _ => Vec::new(),
    }
}

/// Outcome of a dependency check.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DependencyReport {
    /// Used but undeclared packages, with the files (relative to the root)
    /// that use them.
    pub missing: BTreeMap<String, BTreeSet<PathBuf>>,
    /// Entries of `dependencies` no source file imports and no script runs.
    pub unused: Vec<String>,
}

impl DependencyReport {
    /// Whether nothing needs attention.
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.unused.is_empty()
    }

    /// Names of the missing packages.
    pub fn missing_names(&self) -> Vec<String> {
        self.missing.keys().cloned().collect()
    }
}

/// Scan the project at `root` against its manifest.
pub fn check(
    root: &Path,
    manifest: &Manifest,
    diagnostics: &mut Diagnostics,
) -> Result<DependencyReport> {
    let scanner = ImportScanner::new()?;
    let aliases = load_alias_patterns(root, diagnostics);
    let is_alias = |name: &str| aliases.iter().any(|pattern| pattern.is_match(name));

    let mut declared_names = BTreeSet::new();
    for field in DECLARING_FIELDS {
        declared_names.extend(declared(manifest, field)?);
    }
    if let Some(Value::String(own_name)) = manifest.get("name") {
        declared_names.insert(own_name.clone());
    }

    let mut used: BTreeMap<String, BTreeSet<PathBuf>> = BTreeMap::new();
    for file in source_files(root, diagnostics) {
        let source = match fs::read_to_string(&file) {
            Ok(source) => source,
            Err(error) => {
                diagnostics.warn(format!("Skipping {}: {error}", display_path(&file)));
                continue;
            }
        };
        let relative = file.strip_prefix(root).unwrap_or(&file).to_path_buf();
        for specifier in scanner.specifiers(&source) {
            if is_alias(&specifier) {
                continue;
            }
            if let Some(name) = package_name(&specifier) {
                used.entry(name).or_default().insert(relative.clone());
            }
        }
    }
    diagnostics.verbose(format!("Found {} imported package(s)", used.len()));

    let binaries = script_binaries(manifest)?;
    let runs_binary = |name: &str| {
        binaries.contains(name)
            || bin_names(root, name)
                .iter()
                .any(|binary| binaries.contains(binary))
    };
    let unused = declared(manifest, RUNTIME_FIELD)?
        .into_iter()
        .filter(|name| !used.contains_key(name) && !runs_binary(name))
        .collect();
    let missing = used
        .into_iter()
        .filter(|(name, _)| !declared_names.contains(name) && !is_alias(name))
        .collect();

    Ok(DependencyReport { missing, unused })
}
