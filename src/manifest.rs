//! Loading, saving, and typed access to the project's `package.json`.
//!
//! The manifest is kept as an ordered JSON object so fields this tool never
//! touches survive a rewrite unchanged and in their original order. Saves
//! overwrite the file in place: a crash mid-write can leave it truncated.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// File name of the manifest inside a project root.
pub const MANIFEST_FILE_NAME: &str = "package.json";
/// Top-level key reserved for this tool's own settings.
pub const TOOL_NAMESPACE: &str = "tpm";
/// Key under [`TOOL_NAMESPACE`] holding the alias table.
pub const ALIASES_KEY: &str = "aliases";
/// Top-level key holding script commands.
pub const SCRIPTS_KEY: &str = "scripts";

/// In-memory copy of a project manifest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    /// Top-level manifest fields in file order.
    fields: Map<String, Value>,
}

impl Manifest {
    /// Return the manifest path for a project root.
    pub fn path(root: &Path) -> PathBuf {
        root.join(MANIFEST_FILE_NAME)
    }

    /// Wrap an existing JSON object.
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Read and parse the manifest in `root`.
    pub fn load(root: &Path) -> Result<Self> {
        let path = Self::path(root);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                return Err(Error::ManifestNotFound { path });
            }
            Err(error) => return Err(Error::ManifestRead { path, source: error }),
        };
        Self::parse(&contents, &path)
    }

    /// Parse manifest text, using `path` for error reporting.
    fn parse(contents: &str, path: &Path) -> Result<Self> {
        let value: Value = serde_json::from_str(contents).map_err(|error| Error::ManifestParse {
            path: path.to_path_buf(),
            source: error,
        })?;
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            _ => Err(Error::ManifestNotObject {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Serialize with two-space indentation and a trailing newline.
    pub fn to_pretty_string(&self) -> Result<String> {
        let mut text = serde_json::to_string_pretty(self.fields())
            .map_err(|error| Error::ManifestSerialize { source: error })?;
        text.push('\n');
        Ok(text)
    }

    /// Overwrite the manifest in `root` with this content.
    pub fn save(&self, root: &Path) -> Result<()> {
        let path = Self::path(root);
        let text = self.to_pretty_string()?;
        fs::write(&path, text).map_err(|error| Error::ManifestWrite { path, source: error })
    }

    /// Return a top-level field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Return all top-level fields.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Set a top-level field to a literal string, creating it if needed.
    ///
    /// Keys are never interpreted as paths: `a.b` is a single key.
    pub fn set_field(&mut self, key: &str, value: &str) {
        self.fields
            .insert(key.to_string(), Value::String(value.to_string()));
    }

    /// Return the script table, or an empty table when none is declared.
    pub fn scripts(&self) -> Result<Map<String, Value>> {
        match self.fields.get(SCRIPTS_KEY) {
            None => Ok(Map::new()),
            Some(Value::Object(scripts)) => Ok(scripts.clone()),
            Some(_) => Err(invalid_object(SCRIPTS_KEY)),
        }
    }

    /// Insert or overwrite a script command, returning the previous command.
    pub fn set_script(&mut self, name: &str, command: &str) -> Result<Option<Value>> {
        let scripts = child_object_mut(&mut self.fields, SCRIPTS_KEY, SCRIPTS_KEY)?;
        Ok(scripts.insert(name.to_string(), Value::String(command.to_string())))
    }

    /// Return the alias table, or an empty table when none is declared.
    pub fn aliases(&self) -> Result<Map<String, Value>> {
        let namespace = match self.fields.get(TOOL_NAMESPACE) {
            None => return Ok(Map::new()),
            Some(Value::Object(namespace)) => namespace,
            Some(_) => return Err(invalid_object(TOOL_NAMESPACE)),
        };
        match namespace.get(ALIASES_KEY) {
            None => Ok(Map::new()),
            Some(Value::Object(aliases)) => Ok(aliases.clone()),
            Some(_) => Err(invalid_object(&aliases_field())),
        }
    }

    /// Return the alias table for mutation, creating missing levels.
    pub(crate) fn aliases_mut(&mut self) -> Result<&mut Map<String, Value>> {
        let namespace = child_object_mut(&mut self.fields, TOOL_NAMESPACE, TOOL_NAMESPACE)?;
        child_object_mut(namespace, ALIASES_KEY, &aliases_field())
    }
}

/// Dotted name of the alias table for messages.
fn aliases_field() -> String {
    format!("{TOOL_NAMESPACE}.{ALIASES_KEY}")
}

/// Build the error for a field that should hold an object.
fn invalid_object(field: &str) -> Error {
    Error::InvalidManifestField {
        field: field.to_string(),
        expected: "an object",
    }
}

/// Return `parent[key]` as an object, inserting an empty one when absent.
fn child_object_mut<'a>(
    parent: &'a mut Map<String, Value>,
    key: &str,
    field: &str,
) -> Result<&'a mut Map<String, Value>> {
    let entry = parent
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    entry.as_object_mut().ok_or_else(|| invalid_object(field))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::json;
    use tempfile::tempdir;

    use super::Manifest;
    use crate::{error::Error, testutil::TestProject};

    #[test]
    fn errors_when_manifest_missing() {
        let dir = tempdir().expect("tempdir");
        let error = Manifest::load(dir.path()).expect_err("load should fail");
        assert!(matches!(error, Error::ManifestNotFound { .. }));
    }

    #[test]
    fn errors_when_manifest_is_not_json() {
        let project = TestProject::with_raw_manifest("{ not json");
        let error = Manifest::load(project.root()).expect_err("load should fail");
        assert!(matches!(error, Error::ManifestParse { .. }));
    }

    #[test]
    fn errors_when_manifest_is_not_an_object() {
        let project = TestProject::with_raw_manifest("[1, 2]");
        let error = Manifest::load(project.root()).expect_err("load should fail");
        assert!(matches!(error, Error::ManifestNotObject { .. }));
    }

    #[test]
    fn save_preserves_field_order_and_formatting() {
        let project = TestProject::new(json!({
            "version": "1.0.0",
            "name": "demo",
            "scripts": { "test": "jest" },
        }));
        let manifest = Manifest::load(project.root()).expect("load");
        manifest.save(project.root()).expect("save");

        let text = fs::read_to_string(Manifest::path(project.root())).expect("read");
        assert_eq!(
            text,
            "{\n  \"version\": \"1.0.0\",\n  \"name\": \"demo\",\n  \"scripts\": {\n    \"test\": \"jest\"\n  }\n}\n"
        );
    }

    #[test]
    fn set_field_treats_dotted_keys_literally() {
        let mut manifest = Manifest::default();
        manifest.set_field("a.b", "c");
        assert_eq!(manifest.get("a.b"), Some(&json!("c")));
        assert_eq!(manifest.get("a"), None);
    }

    #[test]
    fn missing_tables_read_as_empty() {
        let manifest = Manifest::default();
        assert!(manifest.scripts().expect("scripts").is_empty());
        assert!(manifest.aliases().expect("aliases").is_empty());
    }

    #[test]
    fn rejects_non_object_scripts() {
        let project = TestProject::new(json!({ "scripts": "tsc" }));
        let mut manifest = Manifest::load(project.root()).expect("load");
        assert!(matches!(
            manifest.scripts(),
            Err(Error::InvalidManifestField { .. })
        ));
        assert!(matches!(
            manifest.set_script("build", "tsc"),
            Err(Error::InvalidManifestField { .. })
        ));
    }

    #[test]
    fn rejects_non_object_alias_namespace() {
        let project = TestProject::new(json!({ "tpm": true }));
        let mut manifest = Manifest::load(project.root()).expect("load");
        assert!(manifest.aliases().is_err());
        assert!(manifest.aliases_mut().is_err());
    }
}
