use std::fmt::Display;
use std::fs::Metadata;
use std::os::unix::fs::PermissionsExt;
use std::str::FromStr;

use crate::{Error, Result};

/// Represents the mode of a tree or index entry.
///
/// Only three modes exist: subtrees, executable files and regular files. The single
/// permission bit modeled is the owner-executable one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileMode {
    Tree,
    Executable,
    Regular,
}

impl FileMode {
    const TREE_STRING: &'static str = "040000";
    const EXECUTABLE_STRING: &'static str = "100755";
    const REGULAR_STRING: &'static str = "100644";

    const OWNER_EXECUTE: u32 = 0o100;

    /// Derives the mode for a filesystem entry from its metadata.
    pub fn from_metadata(metadata: &Metadata) -> Self {
        if metadata.is_dir() {
            FileMode::Tree
        } else if metadata.permissions().mode() & Self::OWNER_EXECUTE != 0 {
            FileMode::Executable
        } else {
            FileMode::Regular
        }
    }

    pub fn is_tree(&self) -> bool {
        matches!(self, FileMode::Tree)
    }
}

impl Display for FileMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            FileMode::Tree => FileMode::TREE_STRING,
            FileMode::Executable => FileMode::EXECUTABLE_STRING,
            FileMode::Regular => FileMode::REGULAR_STRING,
        })
    }
}

impl FromStr for FileMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            FileMode::TREE_STRING => Ok(FileMode::Tree),
            FileMode::EXECUTABLE_STRING => Ok(FileMode::Executable),
            FileMode::REGULAR_STRING => Ok(FileMode::Regular),
            _ => Err(Error::invalid(format!("{s:?} is not a valid file mode"))),
        }
    }
}

// Tests
