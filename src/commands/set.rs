//! Implementation of the `tpm set` command.

use std::path::Path;

use crate::{commands::Context, error::Result, manifest::Manifest};

/// Execute the set command.
pub async fn run(context: &Context, key: String, value: String) -> Result<()> {
    set_field(&context.root, &key, &value)?;
    println!("Set {key} to {value}");
    Ok(())
}

/// Set top-level field `key` to the string `value` and persist it.
pub(crate) fn set_field(root: &Path, key: &str, value: &str) -> Result<()> {
    let mut manifest = Manifest::load(root)?;
    manifest.set_field(key, value);
    manifest.save(root)
}
