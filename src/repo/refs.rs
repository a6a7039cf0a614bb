use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use crate::constants::Constants;
use crate::hashing::Hash;
use crate::repo::Repository;
use crate::{Error, Result};

/// Reads the path stored inside the HEAD file.
///
/// Only the indirect form `ref: {relative_path}` is ever written, and only one level
/// of indirection is followed.
///
/// # Errors
///
/// This function will fail if the HEAD file could not be read or had no `ref:` header.
pub fn head_target(repo: &Repository) -> Result<PathBuf> {
    let head_path = repo.head_path();
    if !head_path.exists() {
        return Err(Error::not_found("HEAD file"));
    }

    let content = String::from_utf8(fs::read(head_path)?)?;
    let target = content
        .trim_end() // important to remove the ending newline
        .strip_prefix(Constants::HEAD_CONTENT_HEADER)
        .ok_or_else(|| Error::corrupt("HEAD file had an incorrect header"))?;

    Ok(repo.repository_path().join(target))
}

/// Returns the digest of the commit HEAD currently points to.
///
/// HEAD is either empty, a digest, or an indirection to a branch ref file; the
/// indirection is followed one level.
///
/// # Returns
///
/// `None` if HEAD is empty or the target ref file does not exist yet, which means no
/// commit has been written on this branch.
pub fn resolve_head(repo: &Repository) -> Result<Option<Hash>> {
    let head_path = repo.head_path();
    if !head_path.exists() {
        return Ok(None);
    }

    let content = String::from_utf8(fs::read(head_path)?)?;
    let trimmed = content.trim_end();
    if trimmed.is_empty() {
        return Ok(None);
    }

    // a HEAD without the indirection header holds the digest itself
    if !trimmed.starts_with(Constants::HEAD_CONTENT_HEADER) {
        return Ok(Some(Hash::from_str(trimmed)?));
    }

    let target = head_target(repo)?;
    if !target.exists() {
        return Ok(None);
    }

    let ref_content = String::from_utf8(fs::read(target)?)?;
    Ok(Some(Hash::from_str(ref_content.trim())?))
}

/// Writes `hash` to the ref file HEAD points to, creating parent directories as
/// needed.
pub fn update_head(repo: &Repository, hash: &Hash) -> Result<()> {
    let target = head_target(repo)?;
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(target, format!("{hash}\n"))?;
    Ok(())
}

// Tests
