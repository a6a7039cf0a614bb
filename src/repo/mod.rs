pub mod log;
pub mod refs;
pub mod store;

use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::Constants;
use crate::Result;

/// A repository rooted at a working directory, with the repository folder directly
/// inside of it. All layout paths are derived from the root.
#[derive(Debug, Clone)]
pub struct Repository {
    root: PathBuf,
}

impl Repository {
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Repository { root: root.into() }
    }

    /// Whether the repository folder exists under the root.
    pub fn exists(&self) -> bool {
        self.repository_path().is_dir()
    }

    /// Creates the repository layout under the root.
    ///
    /// # Returns
    ///
    /// `false` if the repository already existed, `true` if it was created.
    ///
    /// # Errors
    ///
    /// This function will fail if any of the directories or files could not be created.
    pub fn init(&self) -> Result<bool> {
        if self.exists() {
            return Ok(false);
        }

        for p in [
            self.objects_path(),
            self.heads_path(),
            self.logs_path(),
        ] {
            fs::create_dir_all(&p)?;
        }

        fs::write(
            self.head_path(),
            format!(
                "{}{}\n",
                Constants::HEAD_CONTENT_HEADER,
                Constants::DEFAULT_BRANCH_REF
            ),
        )?;
        fs::write(self.index_path(), "")?;

        Ok(true)
    }

    /// The root folder of the repository (the working directory).
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The location of the repository folder itself.
    pub fn repository_path(&self) -> PathBuf {
        self.root.join(Constants::REPOSITORY_FOLDER_NAME)
    }

    pub fn objects_path(&self) -> PathBuf {
        self.repository_path().join(Constants::OBJECTS_FOLDER_NAME)
    }

    pub fn refs_path(&self) -> PathBuf {
        self.repository_path().join(Constants::REFS_FOLDER_NAME)
    }

    pub fn heads_path(&self) -> PathBuf {
        self.refs_path().join(Constants::HEADS_FOLDER_NAME)
    }

    pub fn logs_path(&self) -> PathBuf {
        self.repository_path().join(Constants::LOGS_FOLDER_NAME)
    }

    pub fn head_path(&self) -> PathBuf {
        self.repository_path().join(Constants::HEAD_NAME)
    }

    pub fn head_log_path(&self) -> PathBuf {
        self.logs_path().join(Constants::HEAD_NAME)
    }

    pub fn index_path(&self) -> PathBuf {
        self.repository_path().join(Constants::INDEX_NAME)
    }
}

// Tests
