use anyhow::{Context, Result};

use crate::repo::Repository;
use crate::worktree::snapshot;

/// Snapshots the working directory as a tree and prints its digest.
pub fn write_tree(repo: &Repository) -> Result<String> {
    let hash = snapshot::write_tree(repo, repo.root())
        .context("could not snapshot working directory")?;
    Ok(hash.to_string())
}
