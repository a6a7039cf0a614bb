pub mod blob;
pub mod commit;
pub mod mode;
pub mod tree;

use std::fmt::Display;
use std::io::Cursor;
use std::rc::Rc;

use crate::utils::cursor::EasyRead;
use crate::{Error, Result};

pub const SPACE_BYTE: u8 = b' ';
pub const NULL_BYTE: u8 = b'\0';

/// Represents the different type of objects there can be: Blobs, Trees and Commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Blob,
    Tree,
    Commit,
}

impl ObjectKind {
    const BLOB_STRING: &'static str = "blob";
    const TREE_STRING: &'static str = "tree";
    const COMMIT_STRING: &'static str = "commit";
}

impl Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Blob => ObjectKind::BLOB_STRING,
            Self::Tree => ObjectKind::TREE_STRING,
            Self::Commit => ObjectKind::COMMIT_STRING,
        })
    }
}

impl TryFrom<&str> for ObjectKind {
    type Error = crate::Error;

    fn try_from(value: &str) -> Result<Self> {
        match value {
            ObjectKind::BLOB_STRING => Ok(ObjectKind::Blob),
            ObjectKind::TREE_STRING => Ok(ObjectKind::Tree),
            ObjectKind::COMMIT_STRING => Ok(ObjectKind::Commit),
            _ => Err(Error::corrupt(format!(
                "{value:?} does not match any object kind"
            ))),
        }
    }
}

/// Builds the canonical serialization of an object:
///
/// `{kind} {payload_length}\0{payload}`
///
/// The digest of an object is always taken over this whole form.
pub fn serialize(kind: ObjectKind, payload: &[u8]) -> Rc<[u8]> {
    let mut bytes = format!("{} {}\0", kind, payload.len()).into_bytes();
    bytes.extend_from_slice(payload);
    bytes.into()
}

/// Splits a canonical serialization back into its kind and payload, checking that the
/// declared payload length matches the bytes actually present.
///
/// # Errors
///
/// This function will fail with `CorruptObject` if the header does not parse or the
/// length does not match.
pub fn split(serialized: &[u8]) -> Result<(ObjectKind, &[u8])> {
    let mut cursor = Cursor::new(serialized);

    let kind_buf = cursor.read_until_checked(SPACE_BYTE)?;
    let kind = ObjectKind::try_from(String::from_utf8_lossy(&kind_buf).as_ref())?;

    let len_buf = cursor.read_until_checked(NULL_BYTE)?;
    let declared_len: usize = String::from_utf8_lossy(&len_buf)
        .parse()
        .map_err(|_| Error::corrupt("object header length is not a number"))?;

    let payload = &serialized[cursor.position() as usize..];
    if payload.len() != declared_len {
        return Err(Error::corrupt(format!(
            "declared payload length {} did not match actual length {}",
            declared_len,
            payload.len()
        )));
    }

    Ok((kind, payload))
}

// Tests
