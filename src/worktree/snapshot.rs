use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::constants::Constants;
use crate::hashing::Hash;
use crate::index::{Index, IndexEntry};
use crate::object::mode::FileMode;
use crate::object::tree::TreeEntry;
use crate::object::{blob, commit, tree};
use crate::repo::{Repository, log, refs, store};
use crate::Error;

/// Reads the file at `path`, writes it to the object store as a blob and returns its
/// mode and digest.
fn write_blob(repo: &Repository, path: &Path) -> Result<(FileMode, Hash)> {
    let metadata = fs::metadata(path)
        .context(format!("could not read metadata of {path:?}"))?;
    let content = fs::read(path).context(format!("could not read file {path:?}"))?;

    let (hash, serialized) = blob::encode(&content);
    store::put(repo, &hash, &serialized)
        .context(format!("could not write blob for {path:?}"))?;

    Ok((FileMode::from_metadata(&metadata), hash))
}

/// Returns `path` as a forward-slash string relative to the repository root.
fn relative_name(repo: &Repository, path: &Path) -> Result<String> {
    let relative = path.strip_prefix(repo.root()).unwrap_or(path);
    let mut name = String::new();
    for component in relative.components() {
        let Some(part) = component.as_os_str().to_str() else {
            bail!("path {path:?} is not valid utf-8");
        };
        if !name.is_empty() {
            name.push('/');
        }
        name.push_str(part);
    }
    Ok(name)
}

/// Stages `path` into `index`, relative to the repository root.
///
/// A directory is expanded into its immediate children (skipping the repository
/// directory) and each one staged in turn; a file becomes a blob in the object store
/// and one index entry, replacing any previous entry for the same path.
///
/// # Errors
///
/// This function will fail with `NotFound` if `path` does not exist.
pub fn stage(repo: &Repository, index: &mut Index, path: &Path) -> Result<()> {
    let full_path = repo.root().join(path);
    if !full_path.exists() {
        return Err(Error::not_found(format!("file {}", path.display())).into());
    }

    if full_path.is_dir() {
        for entry in fs::read_dir(&full_path)
            .context(format!("could not read directory {full_path:?}"))?
        {
            let entry = entry.context("could not read directory entry")?;
            if entry.file_name() == Constants::REPOSITORY_FOLDER_NAME {
                continue;
            }
            stage(repo, index, &path.join(entry.file_name()))?;
        }
        return Ok(());
    }

    let (mode, hash) = write_blob(repo, &full_path)?;
    let entry = IndexEntry::new(mode, hash, relative_name(repo, &full_path)?)
        .context(format!("could not stage {}", path.display()))?;
    index.upsert(entry);

    Ok(())
}

/// Snapshots `dir` as a tree object, recursing into subdirectories.
///
/// Every file becomes a blob and every subdirectory a subtree, all written to the
/// object store; the repository directory is skipped. Entries are sorted by name, so
/// an unchanged directory always produces the same digest.
pub fn write_tree(repo: &Repository, dir: &Path) -> Result<Hash> {
    let mut entries: Vec<TreeEntry> = Vec::new();

    for entry in fs::read_dir(dir).context(format!("could not read directory {dir:?}"))? {
        let entry = entry.context("could not read directory entry")?;
        let file_name = entry.file_name();
        if file_name == Constants::REPOSITORY_FOLDER_NAME {
            continue;
        }
        let Some(name) = file_name.to_str().map(str::to_owned) else {
            bail!("file name {file_name:?} is not valid utf-8");
        };

        let child: PathBuf = entry.path();
        let (mode, hash) = if child.is_dir() {
            (FileMode::Tree, write_tree(repo, &child)?)
        } else {
            write_blob(repo, &child)?
        };

        entries.push(TreeEntry { mode, name, hash });
    }

    let (hash, serialized) =
        tree::encode(entries).context(format!("could not encode tree for {dir:?}"))?;
    store::put(repo, &hash, &serialized).context("could not write tree object")?;

    Ok(hash)
}

/// Builds one flat tree object from the index, using only the terminal path component
/// of every entry as its name.
///
/// Nested paths are deliberately not grouped into subtrees; two staged paths whose
/// file names collide are rejected when the tree is encoded.
pub fn tree_from_index(repo: &Repository, index: &Index) -> Result<Hash> {
    let entries: Vec<TreeEntry> = index
        .entries()
        .iter()
        .map(|e| TreeEntry {
            mode: e.mode,
            name: e.file_name().to_owned(),
            hash: e.hash.clone(),
        })
        .collect();

    let (hash, serialized) =
        tree::encode(entries).context("could not encode tree from index")?;
    store::put(repo, &hash, &serialized).context("could not write tree object")?;

    Ok(hash)
}

/// Commits the staged state: builds the index tree, writes a commit whose parent is
/// the current HEAD digest, updates the branch ref, appends to the log and clears the
/// index, in that order.
///
/// # Errors
///
/// This function will fail with `NothingToCommit` if the index is empty.
pub fn create_commit(repo: &Repository, message: &str) -> Result<Hash> {
    let index = Index::load(repo).context("could not read index file")?;
    if index.is_empty() {
        return Err(Error::NothingToCommit.into());
    }

    let tree_hash = tree_from_index(repo, &index)?;

    // a missing branch ref file means this is the first commit and there is no parent
    let parent = refs::resolve_head(repo).context("could not resolve HEAD")?;

    let signature = commit::Signature::now().context("could not build signature")?;
    let (commit_hash, serialized) =
        commit::encode(&tree_hash, parent.as_ref(), &signature, message);
    store::put(repo, &commit_hash, &serialized).context("could not write commit object")?;

    refs::update_head(repo, &commit_hash).context("could not update HEAD ref")?;
    log::append(repo, &commit_hash, parent.as_ref(), message, signature.timestamp)
        .context("could not append to log")?;
    Index::clear(repo).context("could not clear index")?;

    Ok(commit_hash)
}

// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, Repository) {
        let dir = TempDir::new().unwrap();
        let repo = Repository::at(dir.path());
        repo.init().unwrap();
        (dir, repo)
    }

    fn write_file(repo: &Repository, name: &str, content: &[u8]) {
        let path = repo.root().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_write_tree_is_deterministic() {
        let (_dir, repo) = create_test_repo();
        write_file(&repo, "a", b"A");
        write_file(&repo, "b", b"B");

        let first = write_tree(&repo, repo.root()).unwrap();
        let second = write_tree(&repo, repo.root()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_write_tree_skips_repository_directory() {
        let (_dir, repo) = create_test_repo();
        let empty = write_tree(&repo, repo.root()).unwrap();

        // a worktree holding only the repository directory is an empty tree
        let serialized = store::get(&repo, &empty).unwrap();
        assert_eq!(serialized.as_ref(), b"tree 0\0");
    }

    #[test]
    fn test_write_tree_nests_subtrees() {
        let (_dir, repo) = create_test_repo();
        write_file(&repo, "top.txt", b"top");
        write_file(&repo, "sub/inner.txt", b"inner");

        let root = write_tree(&repo, repo.root()).unwrap();
        let entries = tree::decode(&store::get(&repo, &root).unwrap()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "sub");
        assert!(entries[0].is_subtree());
        assert_eq!(entries[1].name, "top.txt");

        let sub = tree::decode(&store::get(&repo, &entries[0].hash).unwrap()).unwrap();
        assert_eq!(sub.len(), 1);
        assert_eq!(sub[0].name, "inner.txt");
        assert!(!sub[0].is_subtree());
    }

    #[test]
    fn test_write_tree_encodes_executable_bit() {
        let (_dir, repo) = create_test_repo();
        write_file(&repo, "plain.sh", b"#!/bin/sh\n");
        write_file(&repo, "run.sh", b"#!/bin/sh\n");
        let run_path = repo.root().join("run.sh");
        let mut permissions = fs::metadata(&run_path).unwrap().permissions();
        permissions.set_mode(0o755);
        fs::set_permissions(&run_path, permissions).unwrap();

        let root = write_tree(&repo, repo.root()).unwrap();
        let entries = tree::decode(&store::get(&repo, &root).unwrap()).unwrap();
        assert_eq!(entries[0].mode, FileMode::Regular);
        assert_eq!(entries[1].mode, FileMode::Executable);
    }

    #[test]
    fn test_stage_file_and_directory() {
        let (_dir, repo) = create_test_repo();
        write_file(&repo, "hello.txt", b"hi\n");
        write_file(&repo, "sub/inner.txt", b"inner");

        let mut index = Index::load(&repo).unwrap();
        stage(&repo, &mut index, Path::new("hello.txt")).unwrap();
        stage(&repo, &mut index, Path::new("sub")).unwrap();

        let paths: Vec<&str> = index.entries().iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, ["hello.txt", "sub/inner.txt"]);
        for e in index.entries() {
            assert!(store::exists(&repo, &e.hash));
        }
    }

    #[test]
    fn test_stage_missing_path_is_not_found() {
        let (_dir, repo) = create_test_repo();
        let mut index = Index::default();
        let error = stage(&repo, &mut index, Path::new("absent.txt")).unwrap_err();
        assert!(matches!(
            error.downcast_ref::<Error>(),
            Some(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_stage_same_file_twice_keeps_one_entry() {
        let (_dir, repo) = create_test_repo();
        write_file(&repo, "hello.txt", b"v1");

        let mut index = Index::default();
        stage(&repo, &mut index, Path::new("hello.txt")).unwrap();
        write_file(&repo, "hello.txt", b"v2");
        stage(&repo, &mut index, Path::new("hello.txt")).unwrap();

        assert_eq!(index.entries().len(), 1);
        let (expected_hash, _) = blob::encode(b"v2");
        assert_eq!(index.entries()[0].hash, expected_hash);
    }

    #[test]
    fn test_tree_from_index_flattens_paths() {
        let (_dir, repo) = create_test_repo();
        write_file(&repo, "sub/inner.txt", b"inner");

        let mut index = Index::default();
        stage(&repo, &mut index, Path::new("sub/inner.txt")).unwrap();

        let tree_hash = tree_from_index(&repo, &index).unwrap();
        let entries = tree::decode(&store::get(&repo, &tree_hash).unwrap()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "inner.txt");
    }

    #[test]
    fn test_create_commit_postconditions() {
        let (_dir, repo) = create_test_repo();
        write_file(&repo, "hello.txt", b"hi\n");

        let mut index = Index::load(&repo).unwrap();
        stage(&repo, &mut index, Path::new("hello.txt")).unwrap();
        index.save(&repo).unwrap();

        let commit_hash = create_commit(&repo, "first").unwrap();

        // the commit is stored and its tree resolves
        let decoded = commit::decode(&store::get(&repo, &commit_hash).unwrap()).unwrap();
        assert!(store::exists(&repo, &decoded.tree));
        assert_eq!(decoded.parent, None);
        assert_eq!(decoded.message, "first");

        // HEAD's target ref holds the new digest and the index is cleared
        assert_eq!(refs::resolve_head(&repo).unwrap(), Some(commit_hash.clone()));
        assert!(Index::load(&repo).unwrap().is_empty());

        // the log's first record names the commit and the message
        let log_text = log::read(&repo).unwrap().unwrap();
        assert!(log_text.contains(&format!("commit {commit_hash}")));
        assert!(log_text.contains("message first"));
    }

    #[test]
    fn test_second_commit_has_parent() {
        let (_dir, repo) = create_test_repo();
        write_file(&repo, "hello.txt", b"v1");
        let mut index = Index::load(&repo).unwrap();
        stage(&repo, &mut index, Path::new("hello.txt")).unwrap();
        index.save(&repo).unwrap();
        let first = create_commit(&repo, "first").unwrap();

        write_file(&repo, "hello.txt", b"v2");
        let mut index = Index::load(&repo).unwrap();
        stage(&repo, &mut index, Path::new("hello.txt")).unwrap();
        index.save(&repo).unwrap();
        let second = create_commit(&repo, "second").unwrap();

        let decoded = commit::decode(&store::get(&repo, &second).unwrap()).unwrap();
        assert_eq!(decoded.parent, Some(first));
    }

    #[test]
    fn test_commit_with_empty_index_fails() {
        let (_dir, repo) = create_test_repo();
        let error = create_commit(&repo, "nothing").unwrap_err();
        assert!(matches!(
            error.downcast_ref::<Error>(),
            Some(Error::NothingToCommit)
        ));
    }

    #[test]
    fn test_identical_content_shares_a_blob() {
        let (_dir, repo) = create_test_repo();
        write_file(&repo, "one.txt", b"same");
        write_file(&repo, "two.txt", b"same");

        let mut index = Index::default();
        stage(&repo, &mut index, Path::new("one.txt")).unwrap();
        stage(&repo, &mut index, Path::new("two.txt")).unwrap();

        assert_eq!(index.entries()[0].hash, index.entries()[1].hash);
    }
}
