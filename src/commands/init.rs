use anyhow::{Context, Result};

use crate::repo::Repository;

/// Creates the repository layout under the working directory.
///
/// Running it inside an existing repository is harmless and only reports so.
pub fn init(repo: &Repository) -> Result<String> {
    if repo
        .init()
        .context("could not create repository layout")?
    {
        Ok(format!(
            "Initialized empty repository in {}",
            repo.repository_path().display()
        ))
    } else {
        Ok("Repository already initialized".into())
    }
}
