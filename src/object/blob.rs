use std::rc::Rc;

use crate::hashing::Hash;
use crate::{Error, Result};

use super::{ObjectKind, serialize, split};

/// Returns the digest and canonical serialization of a blob holding `content`:
///
/// `blob {content_length}\0{content}`
pub fn encode(content: &[u8]) -> (Hash, Rc<[u8]>) {
    let serialized = serialize(ObjectKind::Blob, content);
    let hash = Hash::new(&serialized);
    (hash, serialized)
}

/// Strips the header from a serialized blob, returning the raw content bytes.
///
/// # Errors
///
/// This function will fail with `CorruptObject` if the header does not parse or the
/// serialization is not a blob.
pub fn decode(serialized: &[u8]) -> Result<Rc<[u8]>> {
    let (kind, payload) = split(serialized)?;
    if kind != ObjectKind::Blob {
        return Err(Error::corrupt(format!(
            "object is not a {}, but a {}",
            ObjectKind::Blob,
            kind
        )));
    }
    Ok(payload.into())
}

// Tests
