use std::fmt::Display;
use std::fs;
use std::str::FromStr;

use crate::hashing::Hash;
use crate::object::mode::FileMode;
use crate::repo::Repository;
use crate::{Error, Result};

/// Represents an entry for a staged file. It contains all the information needed to
/// recreate the file in a tree object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub mode: FileMode,
    pub hash: Hash,
    /// Working-directory-relative location of the staged file
    pub path: String,
}

impl IndexEntry {
    /// Builds an entry, rejecting paths the single-space-delimited index format cannot
    /// round-trip.
    pub fn new(mode: FileMode, hash: Hash, path: String) -> Result<Self> {
        if path.is_empty() {
            return Err(Error::invalid("index entry path is empty"));
        }
        if path.chars().any(char::is_whitespace) {
            return Err(Error::invalid(format!(
                "path {path:?} contains whitespace, which the index format cannot store"
            )));
        }
        Ok(IndexEntry { mode, hash, path })
    }

    /// The terminal component of the entry's path, used as its tree entry name.
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().expect("rsplit always yields")
    }
}

impl Display for IndexEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{} {} {}", self.mode, self.hash, self.path))
    }
}

impl FromStr for IndexEntry {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut fields = line.splitn(3, ' ');
        let (Some(mode), Some(hash), Some(path)) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(Error::invalid(format!("malformed index record {line:?}")));
        };
        IndexEntry::new(
            FileMode::from_str(mode)?,
            Hash::from_str(hash)?,
            path.to_owned(),
        )
    }
}

/// The staging area: a flat list of entries, one per staged path, stored as one
/// plain-text record per line.
#[derive(Debug, Default)]
pub struct Index {
    entries: Vec<IndexEntry>,
}

impl Index {
    /// Reads the index file of `repo`, returning an empty index if the file is absent.
    ///
    /// # Errors
    ///
    /// This function will fail if the file could not be read or a record is malformed.
    pub fn load(repo: &Repository) -> Result<Self> {
        let index_path = repo.index_path();

        if !index_path.exists() {
            return Ok(Index::default());
        }

        let data = String::from_utf8(fs::read(index_path)?)?;
        let mut entries = Vec::new();
        for line in data.lines().filter(|l| !l.is_empty()) {
            entries.push(IndexEntry::from_str(line)?);
        }

        Ok(Index { entries })
    }

    /// Overwrites the index file of `repo` with this index's entries.
    pub fn save(&self, repo: &Repository) -> Result<()> {
        let mut data = String::new();
        for e in &self.entries {
            data.push_str(&e.to_string());
            data.push('\n');
        }
        fs::write(repo.index_path(), data)?;
        Ok(())
    }

    /// Truncates the index file of `repo` to empty.
    pub fn clear(repo: &Repository) -> Result<()> {
        fs::write(repo.index_path(), "")?;
        Ok(())
    }

    /// Adds `entry`, removing any existing entry with the same path first so the index
    /// never holds two entries for one path.
    pub fn upsert(&mut self, entry: IndexEntry) {
        self.entries.retain(|e| e.path != entry.path);
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Tests
