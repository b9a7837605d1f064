//! Mapping user-supplied names to canonical script names.

use serde_json::{Map, Value};

/// Resolve `names` against the script and alias tables.
///
/// A name matching a script resolves to itself; otherwise an alias whose
/// target is a declared script resolves to that target. Anything else,
/// including an alias to a missing script, is dropped. Order and duplicates
/// are kept.
pub fn resolve<S: AsRef<str>>(
    names: &[S],
    scripts: &Map<String, Value>,
    aliases: &Map<String, Value>,
) -> Vec<String> {
    names
        .iter()
        .filter_map(|name| resolve_one(name.as_ref(), scripts, aliases))
        .collect()
}

/// Resolve a single name, or `None` when it matches nothing runnable.
pub fn resolve_one(
    name: &str,
    scripts: &Map<String, Value>,
    aliases: &Map<String, Value>,
) -> Option<String> {
    if scripts.contains_key(name) {
        return Some(name.to_string());
    }
    let target = aliases.get(name)?.as_str()?;
    scripts.contains_key(target).then(|| target.to_string())
}

#[cfg(test)]
mod tests {
    use serde_json::{Map, Value, json};

    use super::resolve;

    fn table(value: Value) -> Map<String, Value> {
        value.as_object().cloned().expect("object")
    }

    #[test]
    fn resolves_scripts_and_aliases_in_order() {
        let scripts = table(json!({ "build": "tsc" }));
        let aliases = table(json!({ "b": "build", "x": "missing" }));

        let resolved = resolve(&["build", "b", "x", "y"], &scripts, &aliases);

        assert_eq!(resolved, ["build", "build"]);
    }

    #[test]
    fn empty_input_resolves_to_nothing() {
        let resolved = resolve::<&str>(&[], &Map::new(), &Map::new());
        assert!(resolved.is_empty());
    }

    #[test]
    fn script_names_take_priority_over_aliases() {
        let scripts = table(json!({ "test": "jest", "lint": "eslint ." }));
        let aliases = table(json!({ "test": "lint" }));

        let resolved = resolve(&["test"], &scripts, &aliases);

        assert_eq!(resolved, ["test"]);
    }

    #[test]
    fn ignores_non_string_alias_targets() {
        let scripts = table(json!({ "build": "tsc" }));
        let aliases = table(json!({ "b": ["build"] }));

        assert!(resolve(&["b"], &scripts, &aliases).is_empty());
    }
}
