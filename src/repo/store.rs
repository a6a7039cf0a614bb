use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use crate::hashing::Hash;
use crate::repo::Repository;
use crate::utils::zlib;
use crate::{Error, Result};

/// The path of the object file for `hash`, fanned out on the first two hexadecimal
/// characters of the digest.
fn object_path(repo: &Repository, hash: &Hash) -> PathBuf {
    let hash_str = hash.to_string();
    repo.objects_path()
        .join(&hash_str[0..2])
        .join(&hash_str[2..])
}

/// Compresses `data` and writes it to the object directory of `repo` under `hash`,
/// creating the fan-out directory as needed.
///
/// Objects are immutable, so writing to an already existing path is skipped.
///
/// # Errors
///
/// This function will fail if the data could not be compressed or written.
pub fn put(repo: &Repository, hash: &Hash, data: &[u8]) -> Result<()> {
    // avoiding writing to an already existing object file
    if exists(repo, hash) {
        return Ok(());
    }

    let file_path = object_path(repo, hash);
    let compressed = zlib::compress(data)?;
    let folder_path = file_path
        .parent()
        .expect("object path always has a fan-out parent")
        .to_owned();
    fs::create_dir_all(folder_path)?;
    fs::write(&file_path, compressed)?;

    Ok(())
}

/// Reads and decompresses the object stored under `hash`, returning its canonical
/// serialization.
///
/// # Errors
///
/// This function will fail with `NotFound` if there is no such object and with
/// `CorruptObject` if the stored bytes do not decompress.
pub fn get(repo: &Repository, hash: &Hash) -> Result<Rc<[u8]>> {
    let file_path = object_path(repo, hash);

    if !file_path.exists() {
        return Err(Error::not_found(format!("object {hash}")));
    }

    let compressed = fs::read(file_path)?;
    zlib::decompress(&compressed)
}

/// Whether an object is stored under `hash`.
pub fn exists(repo: &Repository, hash: &Hash) -> bool {
    object_path(repo, hash).exists()
}

// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::blob;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, Repository) {
        let dir = TempDir::new().unwrap();
        let repo = Repository::at(dir.path());
        repo.init().unwrap();
        (dir, repo)
    }

    #[test]
    fn test_put_get_roundtrip() {
        let (_dir, repo) = create_test_repo();
        let (hash, serialized) = blob::encode(b"hi\n");

        put(&repo, &hash, &serialized).unwrap();
        let read_back = get(&repo, &hash).unwrap();
        assert_eq!(read_back, serialized);
    }

    #[test]
    fn test_store_preserves_identity() {
        let (_dir, repo) = create_test_repo();
        let (hash, serialized) = blob::encode(b"identity check");

        put(&repo, &hash, &serialized).unwrap();
        assert_eq!(Hash::new(&get(&repo, &hash).unwrap()), hash);
    }

    #[test]
    fn test_fan_out_layout() {
        let (_dir, repo) = create_test_repo();
        let (hash, serialized) = blob::encode(b"fan out");
        put(&repo, &hash, &serialized).unwrap();

        let hash_str = hash.to_string();
        let expected = repo
            .objects_path()
            .join(&hash_str[0..2])
            .join(&hash_str[2..]);
        assert!(expected.is_file());
        assert_eq!(hash_str[2..].len(), 38);
    }

    #[test]
    fn test_put_twice_is_noop() {
        let (_dir, repo) = create_test_repo();
        let (hash, serialized) = blob::encode(b"again");
        put(&repo, &hash, &serialized).unwrap();
        put(&repo, &hash, &serialized).unwrap();
        assert_eq!(get(&repo, &hash).unwrap(), serialized);
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let (_dir, repo) = create_test_repo();
        let (hash, _) = blob::encode(b"never stored");
        assert!(!exists(&repo, &hash));
        assert!(matches!(get(&repo, &hash), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_truncated_object_is_corrupt() {
        let (_dir, repo) = create_test_repo();
        let (hash, serialized) = blob::encode(b"soon to be truncated");
        put(&repo, &hash, &serialized).unwrap();

        let path = object_path(&repo, &hash);
        let stored = std::fs::read(&path).unwrap();
        std::fs::write(&path, &stored[..stored.len() - 1]).unwrap();

        assert!(matches!(get(&repo, &hash), Err(Error::CorruptObject(_))));
    }
}
