//! `rm <path> [-r] [-f]`.

use crate::error::{EnkelErrorKind, Result};
use crate::hash::hash_bytes;
use crate::repo::Repository;
use anyhow::bail;
use std::fs;
use std::path::{Path, PathBuf};

/// remove every indexed path starting with `pathspec` (already resolved to a
/// repo-root-relative prefix by the caller) from the index and, if present, disk.
pub fn run(repo: &Repository, pathspec: &Path, recursive: bool, force: bool) -> Result<Vec<PathBuf>> {
    repo.assert_not_bare()?;
    let matches = repo.index().matching_files(pathspec)?;
    if matches.is_empty() {
        bail!(EnkelErrorKind::NoFilesMatched(pathspec.display().to_string()));
    }
    if !recursive && matches.len() > 1 {
        bail!(EnkelErrorKind::IsADirectory(pathspec.display().to_string()));
    }

    if !force {
        let index_toc = repo.index().toc()?;
        for path in &matches {
            let Some(&indexed) = index_toc.get(path) else { continue };
            let full = repo.worktree().join(path);
            if let Ok(content) = fs::read(&full) {
                if hash_bytes(&content) != indexed {
                    bail!(EnkelErrorKind::ChangedFileRemoval(path.display().to_string()));
                }
            }
        }
    }

    for path in &matches {
        repo.index().write_rm(path)?;
        let full = repo.worktree().join(path);
        if full.exists() {
            fs::remove_file(&full)?;
        }
    }
    log::info!("removed {} file(s) matching `{}`", matches.len(), pathspec.display());
    Ok(matches)
}
