use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::constants::Constants;
use crate::hashing::Hash;
use crate::object::{blob, commit, tree};
use crate::repo::{Repository, refs, store};
use crate::Error;

/// Entries in the working directory root that the clear step must never delete.
const PROTECTED: &[&str] = &[Constants::REPOSITORY_FOLDER_NAME];

/// Reads a referenced object, reporting an absent one as corruption: a stored commit
/// or tree pointing at a missing object means the store itself is damaged.
fn get_referenced(repo: &Repository, hash: &Hash) -> crate::Result<std::rc::Rc<[u8]>> {
    store::get(repo, hash).map_err(|e| {
        if e.is_not_found() {
            Error::corrupt(format!("referenced object {hash} is missing"))
        } else {
            e
        }
    })
}

/// Restores the working directory to the state of the commit with `commit_hash`, then
/// moves HEAD to it.
///
/// The restore is not atomic: a failure after the clear step leaves the working tree
/// partially rewritten, keeping whatever files were already restored.
pub fn checkout(repo: &Repository, commit_hash: &Hash) -> Result<()> {
    let serialized = store::get(repo, commit_hash)
        .context(format!("could not read commit {commit_hash}"))?;
    let commit = commit::decode(&serialized)
        .context(format!("could not decode commit {commit_hash}"))?;

    clear_worktree(repo).context("could not clear working directory")?;
    restore_tree(repo, &commit.tree, Path::new(""))
        .context("could not restore working directory")?;

    refs::update_head(repo, commit_hash).context("could not move HEAD")?;

    Ok(())
}

/// Deletes every immediate child of the working directory root except the protected
/// set.
///
/// A child that cannot be removed is reported as a warning and skipped, so a partially
/// locked working tree does not abort the restore.
fn clear_worktree(repo: &Repository) -> Result<()> {
    for entry in fs::read_dir(repo.root()).context("could not read working directory")? {
        let entry = entry.context("could not read directory entry")?;
        if PROTECTED.iter().any(|p| entry.file_name() == *p) {
            continue;
        }

        let path = entry.path();
        let removed = if path.is_dir() {
            fs::remove_dir_all(&path)
        } else {
            fs::remove_file(&path)
        };
        if let Err(error) = removed {
            eprintln!(
                "{} could not remove {:?} during checkout: {}",
                "Warning:".yellow(),
                path,
                error
            );
        }
    }

    Ok(())
}

/// Recreates the tree with `tree_hash` under `prefix`, recursing into subtrees.
fn restore_tree(repo: &Repository, tree_hash: &Hash, prefix: &Path) -> Result<()> {
    let serialized = get_referenced(repo, tree_hash)?;
    let entries = tree::decode(&serialized)
        .context(format!("could not decode tree {tree_hash}"))?;

    for entry in entries {
        let path = repo.root().join(prefix.join(&entry.name));

        if entry.is_subtree() {
            fs::create_dir_all(&path)
                .context(format!("could not create directory {path:?}"))?;
            restore_tree(repo, &entry.hash, &prefix.join(&entry.name))?;
        } else {
            let content = blob::decode(&get_referenced(repo, &entry.hash)?)
                .context(format!("could not decode blob for {path:?}"))?;
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .context(format!("could not create directory {parent:?}"))?;
            }
            fs::write(&path, content).context(format!("could not write file {path:?}"))?;
        }
    }

    Ok(())
}

// Tests
