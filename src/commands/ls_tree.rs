use std::str::FromStr;

use anyhow::{Context, Result};

use crate::hashing::Hash;
use crate::object::tree;
use crate::repo::{Repository, store};

/// Lists the entries of the tree stored under `hash_str`, one per line.
pub fn ls_tree(repo: &Repository, name_only: bool, hash_str: &str) -> Result<String> {
    let hash = Hash::from_str(hash_str).context("tree hash was invalid")?;
    let serialized = store::get(repo, &hash).context("could not read tree")?;
    let entries = tree::decode(&serialized).context("could not decode tree")?;

    let mut formatted = String::new();
    for e in entries {
        if name_only {
            formatted.push_str(&e.name);
        } else {
            formatted.push_str(&e.to_string());
        }
        formatted.push('\n');
    }
    formatted.pop(); // removing trailing newline

    Ok(formatted)
}
