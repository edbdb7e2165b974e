//! applies a computed `Diff` to the working copy: writes, overwrites, deletes, and
//! conflict-marker materialization, followed by a sweep for directories left empty.
//!
//! Drives off a single flat action table keyed by diff status rather than a tree-walking
//! iterator, since the working copy has already been reduced to a path-by-path diff by
//! the time this runs.

use crate::diff::{Diff, Status};
use crate::error::{EnkelErrorKind, Result};
use crate::odb::ObjectStore;
use anyhow::anyhow;
use std::fs;
use std::path::Path;

const CONFLICT_START: &[u8] = b"<<<<<<\n";
const CONFLICT_MID: &[u8] = b"======\n";
const CONFLICT_END: &[u8] = b">>>>>>\n";

/// apply every entry of `diff` to files under `worktree`, then remove directories left
/// empty by the application (never touching `metadata_dir`, the repository's own data).
pub fn apply_diff(objects: &ObjectStore, worktree: &Path, metadata_dir: &Path, diff: &Diff) -> Result<()> {
    for (path, entry) in diff {
        let full = worktree.join(path);
        match entry.status {
            Status::Add => {
                let oid = entry.receiver.or(entry.giver).expect("ADD always carries receiver or giver");
                write_blob(objects, &full, oid)?;
            }
            Status::Modify => {
                let oid = entry.giver.expect("MODIFY always carries a giver hash");
                write_blob(objects, &full, oid)?;
            }
            Status::Delete => {
                if full.exists() {
                    fs::remove_file(&full)?;
                }
            }
            Status::Conflict => {
                let r = entry.receiver.expect("CONFLICT always carries a receiver hash");
                let g = entry.giver.expect("CONFLICT always carries a giver hash");
                write_conflict_marker(objects, &full, r, g)?;
            }
            Status::Same => {}
        }
    }
    remove_empty_dirs(worktree, metadata_dir)?;
    Ok(())
}

fn write_blob(objects: &ObjectStore, path: &Path, oid: crate::hash::ObjectId) -> Result<()> {
    let bytes = objects
        .read(oid)?
        .ok_or_else(|| anyhow!(EnkelErrorKind::ObjectNotFound(oid.to_hex())))?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, bytes)?;
    Ok(())
}

fn write_conflict_marker(
    objects: &ObjectStore,
    path: &Path,
    receiver: crate::hash::ObjectId,
    giver: crate::hash::ObjectId,
) -> Result<()> {
    let r_bytes = objects
        .read(receiver)?
        .ok_or_else(|| anyhow!(EnkelErrorKind::ObjectNotFound(receiver.to_hex())))?;
    let g_bytes = objects
        .read(giver)?
        .ok_or_else(|| anyhow!(EnkelErrorKind::ObjectNotFound(giver.to_hex())))?;

    let mut buf = Vec::with_capacity(r_bytes.len() + g_bytes.len() + 32);
    buf.extend_from_slice(CONFLICT_START);
    buf.extend_from_slice(&r_bytes);
    if !r_bytes.ends_with(b"\n") {
        buf.push(b'\n');
    }
    buf.extend_from_slice(CONFLICT_MID);
    buf.extend_from_slice(&g_bytes);
    if !g_bytes.ends_with(b"\n") {
        buf.push(b'\n');
    }
    buf.extend_from_slice(CONFLICT_END);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, buf)?;
    Ok(())
}

/// remove directories left empty after applying a diff, bottom-up, never descending
/// into or removing `exclude` and never removing `dir` itself.
pub fn remove_empty_dirs(dir: &Path, exclude: &Path) -> Result<bool> {
    if !dir.exists() {
        return Ok(false);
    }
    let mut all_empty = true;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path == exclude {
            all_empty = false;
            continue;
        }
        if entry.file_type()?.is_dir() {
            if remove_empty_dirs(&path, exclude)? {
                fs::remove_dir(&path)?;
            } else {
                all_empty = false;
            }
        } else {
            all_empty = false;
        }
    }
    Ok(all_empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::DiffEntry;
    use crate::hash::hash_bytes;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn setup() -> (TempDir, ObjectStore) {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("work")).unwrap();
        (dir, ObjectStore::new(dir.path().join("objects")))
    }

    #[test]
    fn add_writes_receiver_content_preferring_receiver_over_giver() {
        let (dir, objects) = setup();
        let oid = objects.write(b"new file").unwrap();
        let mut diff = Diff::new();
        diff.insert(
            PathBuf::from("a.txt"),
            DiffEntry { status: Status::Add, receiver: Some(oid), base: None, giver: None },
        );
        apply_diff(&objects, &dir.path().join("work"), &dir.path().join(".enkelgit"), &diff).unwrap();
        assert_eq!(fs::read(dir.path().join("work/a.txt")).unwrap(), b"new file");
    }

    #[test]
    fn modify_overwrites_with_giver_content() {
        let (dir, objects) = setup();
        fs::write(dir.path().join("work/a.txt"), b"old").unwrap();
        let oid = objects.write(b"new").unwrap();
        let mut diff = Diff::new();
        diff.insert(
            PathBuf::from("a.txt"),
            DiffEntry { status: Status::Modify, receiver: Some(hash_bytes(b"old")), base: None, giver: Some(oid) },
        );
        apply_diff(&objects, &dir.path().join("work"), &dir.path().join(".enkelgit"), &diff).unwrap();
        assert_eq!(fs::read(dir.path().join("work/a.txt")).unwrap(), b"new");
    }

    #[test]
    fn delete_unlinks_the_file() {
        let (dir, objects) = setup();
        fs::write(dir.path().join("work/a.txt"), b"bye").unwrap();
        let mut diff = Diff::new();
        diff.insert(
            PathBuf::from("a.txt"),
            DiffEntry { status: Status::Delete, receiver: None, base: Some(hash_bytes(b"bye")), giver: None },
        );
        apply_diff(&objects, &dir.path().join("work"), &dir.path().join(".enkelgit"), &diff).unwrap();
        assert!(!dir.path().join("work/a.txt").exists());
    }

    #[test]
    fn conflict_writes_marker_with_both_sides() {
        let (dir, objects) = setup();
        let r = objects.write(b"mine").unwrap();
        let g = objects.write(b"theirs").unwrap();
        let mut diff = Diff::new();
        diff.insert(
            PathBuf::from("a.txt"),
            DiffEntry { status: Status::Conflict, receiver: Some(r), base: Some(hash_bytes(b"base")), giver: Some(g) },
        );
        apply_diff(&objects, &dir.path().join("work"), &dir.path().join(".enkelgit"), &diff).unwrap();
        let content = fs::read_to_string(dir.path().join("work/a.txt")).unwrap();
        assert_eq!(content, "<<<<<<\nmine\n======\ntheirs\n>>>>>>\n");
    }

    #[test]
    fn empty_directories_left_behind_by_deletes_are_removed_but_metadata_dir_is_spared() {
        let (dir, objects) = setup();
        fs::create_dir_all(dir.path().join("work/nested")).unwrap();
        fs::write(dir.path().join("work/nested/a.txt"), b"bye").unwrap();
        fs::create_dir_all(dir.path().join("work/.enkelgit/objects")).unwrap();

        let mut diff = Diff::new();
        diff.insert(
            PathBuf::from("nested/a.txt"),
            DiffEntry { status: Status::Delete, receiver: None, base: Some(hash_bytes(b"bye")), giver: None },
        );
        apply_diff(&objects, &dir.path().join("work"), &dir.path().join("work/.enkelgit"), &diff).unwrap();

        assert!(!dir.path().join("work/nested").exists());
        assert!(dir.path().join("work/.enkelgit").exists());
    }
}
