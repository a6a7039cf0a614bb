use anyhow::{Context, Result};

use crate::index::Index;
use crate::repo::Repository;

/// Shows the entries currently staged in the index.
pub fn ls_files(repo: &Repository, debug: bool) -> Result<String> {
    let index = Index::load(repo).context("could not read from index file")?;

    let mut formatted = String::new();
    for e in index.entries() {
        if debug {
            formatted.push_str(format!("{e:?}").as_str());
        } else {
            formatted.push_str(format!("{e}").as_str());
        }
        formatted.push('\n');
    }
    formatted.pop();

    Ok(formatted)
}
