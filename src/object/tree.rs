use std::fmt::Display;
use std::io::{Cursor, Read};
use std::rc::Rc;
use std::str::FromStr;

use crate::hashing::{HASH_HEX_LEN, Hash};
use crate::{Error, Result};

use super::mode::FileMode;
use super::{NULL_BYTE, ObjectKind, SPACE_BYTE, serialize, split};

/// Struct that represents a single tree entry in a tree object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub mode: FileMode,
    /// A single path component, never containing `/` or a null byte.
    pub name: String,
    pub hash: Hash,
}

impl TreeEntry {
    pub fn is_subtree(&self) -> bool {
        self.mode.is_tree()
    }

    fn kind(&self) -> ObjectKind {
        if self.is_subtree() {
            ObjectKind::Tree
        } else {
            ObjectKind::Blob
        }
    }
}

impl Display for TreeEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "{} {} {}\t{}",
            self.mode,
            self.kind(),
            self.hash,
            self.name,
        ))
    }
}

fn check_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::invalid("tree entry name is empty"));
    }
    if name.contains('/') || name.contains('\0') {
        return Err(Error::invalid(format!(
            "tree entry name {name:?} contains an illegal character"
        )));
    }
    Ok(())
}

/// Encodes `entries` into the digest and canonical serialization of a tree object:
///
/// `tree {body_length}\0{body}`
///
/// Where the body is one record per entry, sorted by name in byte order:
///
/// `{mode} {name}\0{digest_hex}`
///
/// The digest is stored as its 40 character hexadecimal rendering, not packed bytes.
///
/// # Errors
///
/// This function will fail with `InvalidArgument` if an entry name is empty, contains
/// `/` or a null byte, or appears more than once.
pub fn encode(mut entries: Vec<TreeEntry>) -> Result<(Hash, Rc<[u8]>)> {
    for e in &entries {
        check_name(&e.name)?;
    }

    entries.sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));
    for pair in entries.windows(2) {
        if pair[0].name == pair[1].name {
            return Err(Error::invalid(format!(
                "duplicate tree entry name {:?}",
                pair[0].name
            )));
        }
    }

    let mut body: Vec<u8> = Vec::new();
    for e in &entries {
        body.extend(format!("{} {}\0{}", e.mode, e.name, e.hash).as_bytes());
    }

    let serialized = serialize(ObjectKind::Tree, &body);
    let hash = Hash::new(&serialized);
    Ok((hash, serialized))
}

/// Parses a serialized tree object back into its entries.
///
/// # Errors
///
/// This function will fail with `CorruptObject` if the serialization is not a tree or
/// a record is cut short, and with `InvalidArgument` if an entry mode is malformed.
pub fn decode(serialized: &[u8]) -> Result<Vec<TreeEntry>> {
    let (kind, payload) = split(serialized)?;
    if kind != ObjectKind::Tree {
        return Err(Error::corrupt(format!(
            "object is not a {}, but a {}",
            ObjectKind::Tree,
            kind
        )));
    }

    let mut cursor = Cursor::new(payload);
    let mut entries = Vec::new();
    let mut hash_buf = [0u8; HASH_HEX_LEN];
    loop {
        // reading mode
        let mut mode_buf = Vec::new();
        let bytes_read = std::io::BufRead::read_until(&mut cursor, SPACE_BYTE, &mut mode_buf)
            .map_err(|_| Error::corrupt("could not read tree entry mode"))?;

        // If this returned 0, the payload has ended
        if bytes_read == 0 {
            break;
        }

        if mode_buf.pop() != Some(SPACE_BYTE) {
            return Err(Error::corrupt("tree entry cut short before its name"));
        }
        let mode = FileMode::from_str(String::from_utf8_lossy(&mode_buf).as_ref())?;

        // reading name
        let mut name_buf = Vec::new();
        std::io::BufRead::read_until(&mut cursor, NULL_BYTE, &mut name_buf)
            .map_err(|_| Error::corrupt("could not read tree entry name"))?;
        if name_buf.pop() != Some(NULL_BYTE) {
            return Err(Error::corrupt("tree entry cut short before its digest"));
        }
        let name = String::from_utf8(name_buf)
            .map_err(|_| Error::corrupt("tree entry name is not valid utf-8"))?;

        // reading digest, stored as exactly 40 hexadecimal bytes
        cursor
            .read_exact(&mut hash_buf)
            .map_err(|_| Error::corrupt("tree entry has a partial digest"))?;
        let hash = Hash::from_str(std::str::from_utf8(&hash_buf).map_err(|_| {
            Error::corrupt("tree entry digest is not valid utf-8")
        })?)
        .map_err(|_| Error::corrupt("tree entry digest is not hexadecimal"))?;

        entries.push(TreeEntry { mode, name, hash });
    }

    Ok(entries)
}

// Tests

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_HASH_1: &str = "99ad2293829e9638b4dfeeb7bc405a4d140e84e3";
    const TEST_HASH_2: &str = "3e9713cc8320cc020e39b53566b2a34022608edc";
    const TEST_HASH_3: &str = "99800b85d3383e3a2fb45eb7d0066a4879a9dad0";

    fn create_test_entry(mode: FileMode, name: &str, hash: &str) -> TreeEntry {
        TreeEntry {
            mode,
            name: name.to_owned(),
            hash: Hash::from_str(hash).unwrap(),
        }
    }

    #[test]
    fn test_encode_empty_tree() {
        let (_, serialized) = encode(Vec::new()).unwrap();
        assert_eq!(serialized.as_ref(), b"tree 0\0");
    }

    #[test]
    fn test_encode_single_entry() {
        let entries = vec![create_test_entry(FileMode::Regular, "file.txt", TEST_HASH_1)];
        let (_, serialized) = encode(entries).unwrap();
        let expected = format!("tree 56\0100644 file.txt\0{TEST_HASH_1}");
        assert_eq!(serialized.as_ref(), expected.as_bytes());
    }

    #[test]
    fn test_encode_sorts_by_name() {
        let entries = vec![
            create_test_entry(FileMode::Regular, "b", TEST_HASH_1),
            create_test_entry(FileMode::Regular, "a", TEST_HASH_2),
            create_test_entry(FileMode::Regular, "aa", TEST_HASH_3),
        ];
        let (_, serialized) = encode(entries).unwrap();
        let decoded = decode(&serialized).unwrap();
        let names: Vec<&str> = decoded.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["a", "aa", "b"]);
    }

    #[test]
    fn test_encode_is_order_independent() {
        let forward = vec![
            create_test_entry(FileMode::Regular, "a", TEST_HASH_1),
            create_test_entry(FileMode::Tree, "dir", TEST_HASH_2),
        ];
        let backward = vec![
            create_test_entry(FileMode::Tree, "dir", TEST_HASH_2),
            create_test_entry(FileMode::Regular, "a", TEST_HASH_1),
        ];
        assert_eq!(encode(forward).unwrap().0, encode(backward).unwrap().0);
    }

    #[test]
    fn test_encode_rejects_duplicate_names() {
        let entries = vec![
            create_test_entry(FileMode::Regular, "same", TEST_HASH_1),
            create_test_entry(FileMode::Executable, "same", TEST_HASH_2),
        ];
        assert!(matches!(
            encode(entries),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_encode_rejects_illegal_names() {
        for name in ["", "a/b", "nul\0byte"] {
            let entries = vec![create_test_entry(FileMode::Regular, name, TEST_HASH_1)];
            assert!(
                matches!(encode(entries), Err(Error::InvalidArgument(_))),
                "name {name:?} should have been rejected"
            );
        }
    }

    #[test]
    fn test_roundtrip() {
        let entries = vec![
            create_test_entry(FileMode::Regular, "file1.txt", TEST_HASH_1),
            create_test_entry(FileMode::Executable, "script.sh", TEST_HASH_2),
            create_test_entry(FileMode::Tree, "subdir", TEST_HASH_3),
        ];
        let (_, serialized) = encode(entries.clone()).unwrap();
        let decoded = decode(&serialized).unwrap();
        assert_eq!(decoded, entries);
    }

    #[test]
    fn test_is_subtree_derived_from_mode() {
        let entries = vec![
            create_test_entry(FileMode::Tree, "subdir", TEST_HASH_1),
            create_test_entry(FileMode::Executable, "script.sh", TEST_HASH_2),
        ];
        let (_, serialized) = encode(entries).unwrap();
        let decoded = decode(&serialized).unwrap();
        assert!(decoded[1].is_subtree());
        assert!(!decoded[0].is_subtree());
    }

    #[test]
    fn test_decode_partial_trailing_record() {
        let body = format!("100644 file.txt\0{}100644 cut", TEST_HASH_1);
        let serialized = serialize(ObjectKind::Tree, body.as_bytes());
        assert!(matches!(
            decode(&serialized),
            Err(Error::CorruptObject(_))
        ));
    }

    #[test]
    fn test_decode_short_digest() {
        let serialized = serialize(ObjectKind::Tree, b"100644 file.txt\0deadbeef");
        assert!(matches!(
            decode(&serialized),
            Err(Error::CorruptObject(_))
        ));
    }

    #[test]
    fn test_decode_rejects_malformed_mode() {
        let body = format!("777777 file.txt\0{TEST_HASH_1}");
        let serialized = serialize(ObjectKind::Tree, body.as_bytes());
        assert!(matches!(
            decode(&serialized),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_display_row() {
        let entry = create_test_entry(FileMode::Regular, "file.txt", TEST_HASH_1);
        assert_eq!(
            entry.to_string(),
            format!("100644 blob {TEST_HASH_1}\tfile.txt")
        );
        let subdir = create_test_entry(FileMode::Tree, "subdir", TEST_HASH_2);
        assert_eq!(
            subdir.to_string(),
            format!("040000 tree {TEST_HASH_2}\tsubdir")
        );
    }
}
