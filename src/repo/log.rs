use std::fs::{self, OpenOptions};
use std::io::Write;

use crate::hashing::Hash;
use crate::repo::Repository;
use crate::Result;

const RECORD_SEPARATOR: &str = "---";

/// Appends one record to the HEAD log of `repo`:
///
/// ```text
/// commit {digest}
/// parent {digest}      (omitted for a root commit)
/// message {text}
/// timestamp {unix_seconds}
/// ---
/// ```
///
/// The timestamp is the one recorded in the commit itself, so a commit and its log
/// record can never disagree.
pub fn append(
    repo: &Repository,
    commit: &Hash,
    parent: Option<&Hash>,
    message: &str,
    timestamp: u64,
) -> Result<()> {
    let mut record = format!("commit {commit}\n");
    if let Some(parent) = parent {
        record.push_str(&format!("parent {parent}\n"));
    }
    record.push_str(&format!("message {message}\n"));
    record.push_str(&format!("timestamp {timestamp}\n"));
    record.push_str(RECORD_SEPARATOR);
    record.push('\n');

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(repo.head_log_path())?;
    file.write_all(record.as_bytes())?;

    Ok(())
}

/// Reads the whole HEAD log back, line for line.
///
/// # Returns
///
/// `None` if the log file does not exist yet, which means nothing has been committed.
pub fn read(repo: &Repository) -> Result<Option<String>> {
    let log_path = repo.head_log_path();
    if !log_path.exists() {
        return Ok(None);
    }

    let content = String::from_utf8(fs::read(log_path)?)?;
    Ok(Some(content))
}

// Tests
