use std::rc::Rc;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

use time::UtcOffset;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::constants::Constants;
use crate::hashing::Hash;
use crate::{Error, Result};

use super::{ObjectKind, serialize, split};

pub const TREE_STR: &str = "tree";
pub const PARENT_STR: &str = "parent";
pub const AUTHOR_STR: &str = "author";
pub const COMMITTER_STR: &str = "committer";
const TIMEZONE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[offset_hour sign:mandatory][offset_minute]");

/// The identity and time attached to a commit, used for both the author and committer
/// lines.
#[derive(Debug, Clone)]
pub struct Signature {
    /// Generally name and email, as `Name <email>`
    pub identity: String,
    /// Whole seconds since the epoch
    pub timestamp: u64,
    pub offset: UtcOffset,
}

impl Signature {
    /// Returns the default identity stamped with the current wall-clock time.
    ///
    /// Commit times are never localized; the offset is always UTC.
    pub fn now() -> Result<Self> {
        let timestamp = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
        Ok(Signature {
            identity: Constants::DEFAULT_IDENTITY.to_owned(),
            timestamp,
            offset: UtcOffset::UTC,
        })
    }

    fn render(&self) -> String {
        format!(
            "{} {} {}",
            self.identity,
            self.timestamp,
            self.offset
                .format(TIMEZONE_FORMAT)
                .expect("fixed offset format never fails"),
        )
    }
}

/// A decoded commit object.
#[derive(Debug)]
pub struct Commit {
    pub tree: Hash,
    pub parent: Option<Hash>,
    pub author: String,
    pub committer: String,
    /// The committer timestamp, in whole seconds since the epoch
    pub timestamp: u64,
    pub message: String,
}

/// Encodes a commit into its digest and canonical serialization. The payload follows
/// this grammar, with a trailing newline always produced after the message:
///
/// ```text
/// tree {tree_hash}
/// parent {parent_hash}      (omitted for a root commit)
/// author {identity} {timestamp} +0000
/// committer {identity} {timestamp} +0000
///
/// {message}
/// ```
///
/// A parent equal to the all-zero digest counts as absent.
pub fn encode(
    tree: &Hash,
    parent: Option<&Hash>,
    signature: &Signature,
    message: &str,
) -> (Hash, Rc<[u8]>) {
    let mut payload = format!("{} {}\n", TREE_STR, tree);
    if let Some(parent) = parent.filter(|p| !p.is_zero()) {
        payload.push_str(&format!("{} {}\n", PARENT_STR, parent));
    }
    payload.push_str(&format!("{} {}\n", AUTHOR_STR, signature.render()));
    payload.push_str(&format!("{} {}\n", COMMITTER_STR, signature.render()));
    payload.push_str(&format!("\n{}\n", message));

    let serialized = serialize(ObjectKind::Commit, payload.as_bytes());
    let hash = Hash::new(&serialized);
    (hash, serialized)
}

/// Parses a serialized commit object.
///
/// Header lines are read until the first blank line and everything after it is the
/// message. Unknown header keys are ignored. The committer timestamp is the last
/// whitespace-separated token on the committer line before the offset.
///
/// # Errors
///
/// This function will fail with `CorruptObject` if the serialization is not a commit,
/// is not UTF-8, or is missing its tree line.
pub fn decode(serialized: &[u8]) -> Result<Commit> {
    let (kind, payload) = split(serialized)?;
    if kind != ObjectKind::Commit {
        return Err(Error::corrupt(format!(
            "object is not a {}, but a {}",
            ObjectKind::Commit,
            kind
        )));
    }

    let text = std::str::from_utf8(payload)
        .map_err(|_| Error::corrupt("commit payload is not valid utf-8"))?;

    let mut tree = None;
    let mut parent = None;
    let mut author = String::new();
    let mut committer = String::new();
    let mut timestamp = 0u64;

    let mut lines = text.lines();
    for line in lines.by_ref() {
        if line.is_empty() {
            break;
        }

        let (key, value) = line.split_once(' ').unwrap_or((line, ""));
        match key {
            TREE_STR => {
                tree = Some(Hash::from_str(value).map_err(|_| {
                    Error::corrupt(format!("commit has a malformed {} digest", TREE_STR))
                })?);
            }
            PARENT_STR => {
                parent = Some(Hash::from_str(value).map_err(|_| {
                    Error::corrupt(format!("commit has a malformed {} digest", PARENT_STR))
                })?);
            }
            AUTHOR_STR => author = value.to_owned(),
            COMMITTER_STR => {
                committer = value.to_owned();
                let mut tokens = value.split_whitespace().rev();
                tokens.next(); // the timezone offset
                if let Some(seconds) = tokens.next() {
                    timestamp = seconds.parse().map_err(|_| {
                        Error::corrupt("committer timestamp is not a number")
                    })?;
                }
            }
            // unknown header keys are ignored
            _ => {}
        }
    }

    let message = lines.collect::<Vec<&str>>().join("\n");

    Ok(Commit {
        tree: tree.ok_or_else(|| Error::corrupt("commit is missing its tree line"))?,
        parent,
        author,
        committer,
        timestamp,
        message,
    })
}

// Tests
