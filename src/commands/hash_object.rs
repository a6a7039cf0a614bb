use std::ffi::OsStr;
use std::fs;

use anyhow::{Context, Result};

use crate::object::blob;
use crate::repo::{Repository, store};
use crate::Error;

/// Creates a blob from `file` and prints its digest.
///
/// The blob is always written to the store; the `-w` flag exists only for
/// compatibility.
pub fn hash_object(repo: &Repository, file: &OsStr) -> Result<String> {
    let path = repo.root().join(file);
    if !path.is_file() {
        return Err(Error::not_found(format!("file {}", path.display())).into());
    }

    let content = fs::read(&path).context(format!("could not read file {path:?}"))?;
    let (hash, serialized) = blob::encode(&content);
    store::put(repo, &hash, &serialized).context("could not write blob")?;

    Ok(hash.to_string())
}
