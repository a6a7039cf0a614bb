use std::str::FromStr;

use anyhow::{Context, Result};

use crate::hashing::Hash;
use crate::object::split;
use crate::repo::{Repository, store};
use crate::Error;

/// Shows the object stored under `hash_str`: its payload (`-p`), payload size in
/// bytes (`-s`) or kind (`-t`).
pub fn cat_file(
    repo: &Repository,
    pretty: bool,
    size: bool,
    kind: bool,
    hash_str: &str,
) -> Result<String> {
    if [pretty, size, kind].iter().filter(|set| **set).count() != 1 {
        return Err(Error::invalid("exactly one of -p, -s or -t is required").into());
    }

    let hash = Hash::from_str(hash_str).context("object hash was invalid")?;
    let serialized = store::get(repo, &hash).context("could not read object")?;
    let (object_kind, payload) = split(&serialized).context("could not parse object")?;

    if kind {
        return Ok(object_kind.to_string());
    }
    if size {
        return Ok(payload.len().to_string());
    }

    let mut text = String::from_utf8_lossy(payload).to_string();
    if text.ends_with('\n') {
        text.pop(); // printing adds the final newline back
    }
    Ok(text)
}
