use std::ffi::OsString;
use std::path::Path;

use anyhow::{Context, Result};

use crate::index::Index;
use crate::repo::Repository;
use crate::worktree::snapshot;

/// Stages the given paths for the next commit, recursing into directories.
pub fn add(repo: &Repository, paths: &[OsString]) -> Result<String> {
    if paths.is_empty() {
        return Ok("There were no files to add".into());
    }

    let mut index = Index::load(repo).context("could not read index file")?;

    for path in paths {
        snapshot::stage(repo, &mut index, Path::new(path))
            .context(format!("could not stage {path:?}"))?;
    }

    index.save(repo).context("could not write index file")?;

    Ok(String::new())
}
