use anyhow::Result;

use crate::repo::Repository;
use crate::worktree::snapshot;

/// Commits the staged state and prints the new commit's digest.
pub fn commit(repo: &Repository, message: &str) -> Result<String> {
    let hash = snapshot::create_commit(repo, message)?;
    Ok(hash.to_string())
}
