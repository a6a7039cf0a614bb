use std::str::FromStr;

use anyhow::{Context, Result};

use crate::hashing::Hash;
use crate::repo::Repository;
use crate::worktree::restore;

/// Restores the working directory to the commit named by `reference` and moves HEAD
/// to it.
pub fn checkout(repo: &Repository, reference: &str) -> Result<String> {
    let hash = Hash::from_str(reference).context("commit hash was invalid")?;
    restore::checkout(repo, &hash)?;
    Ok(format!("Checked out commit {hash}"))
}
