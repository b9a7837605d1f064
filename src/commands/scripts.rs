//! Implementation of the `tpm scripts` command.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::{
    commands::Context,
    error::Result,
    manifest::Manifest,
    palette::{fmt_alias_name, fmt_heading, fmt_script_name, fmt_warning},
};

/// Execute the scripts command.
pub async fn run(context: &Context) -> Result<()> {
    let manifest = Manifest::load(&context.root)?;
    let listing = render_listing(
        &manifest.scripts()?,
        &manifest.aliases()?,
        context.use_color(),
    );
    print!("{listing}");
    Ok(())
}

/// Text form of a JSON value for display.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Render scripts with the aliases pointing at them, then dangling aliases.
///
/// An alias counts as dangling unless its target is the name of a declared
/// script, matching how `run` resolves it.
fn render_listing(
    scripts: &Map<String, Value>,
    aliases: &Map<String, Value>,
    use_color: bool,
) -> String {
    let mut by_target: BTreeMap<String, Vec<&str>> = BTreeMap::new();
    let mut dangling = Vec::new();
    for (alias, target) in aliases {
        match target {
            Value::String(name) if scripts.contains_key(name) => {
                by_target.entry(name.clone()).or_default().push(alias.as_str());
            }
            other => dangling.push((alias.as_str(), value_text(other))),
        }
    }

    let mut output = String::new();
    if scripts.is_empty() {
        output.push_str("No scripts defined.\n");
    } else {
        output.push_str(&format!("{}\n", fmt_heading("Scripts:", use_color)));
        let width = scripts.keys().map(String::len).max().unwrap_or_default();
        for (name, command) in scripts {
            let padding = " ".repeat(width - name.len());
            output.push_str(&format!(
                "  {}{padding}  {}",
                fmt_script_name(name, use_color),
                value_text(command)
            ));
            if let Some(names) = by_target.get(name) {
                let names: Vec<String> = names
                    .iter()
                    .map(|alias| fmt_alias_name(alias, use_color))
                    .collect();
                output.push_str(&format!("  (aliases: {})", names.join(", ")));
            }
            output.push('\n');
        }
    }

    if !dangling.is_empty() {
        output.push_str(&format!(
            "{}\n",
            fmt_heading("Aliases without a script:", use_color)
        ));
        for (alias, target) in dangling {
            output.push_str(&format!(
                "  {} -> {}\n",
                fmt_alias_name(alias, use_color),
                fmt_warning(&target, use_color)
            ));
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::render_listing;

    fn object(value: Value) -> serde_json::Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn lists_scripts_with_aliases_and_dangling_entries() {
        let scripts = object(json!({ "build": "tsc", "test:unit": "vitest run" }));
        let aliases = object(json!({ "b": "build", "bld": "build", "d": "deploy" }));

        let listing = render_listing(&scripts, &aliases, false);

        assert_eq!(
            listing,
            "Scripts:\n  build      tsc  (aliases: b, bld)\n  test:unit  vitest run\nAliases without a script:\n  d -> deploy\n"
        );
    }

    #[test]
    fn non_string_targets_are_dangling() {
        let scripts = object(json!({ "1": "echo one", "true": "echo yes" }));
        let aliases = object(json!({ "one": 1, "yes": true }));

        let listing = render_listing(&scripts, &aliases, false);

        assert_eq!(
            listing,
            "Scripts:\n  1     echo one\n  true  echo yes\nAliases without a script:\n  one -> 1\n  yes -> true\n"
        );
    }

    #[test]
    fn reports_an_empty_manifest() {
        let listing = render_listing(&object(json!({})), &object(json!({})), false);
        assert_eq!(listing, "No scripts defined.\n");
    }
}
