//! `add <path>`.

use crate::error::{EnkelErrorKind, Result};
use crate::repo::{Repository, METADATA_DIR_NAME};
use anyhow::bail;
use itertools::Itertools;
use std::path::PathBuf;
use walkdir::WalkDir;

/// stage every file under each of `pathspecs` (a single file, or a directory walked
/// recursively), returning the repo-relative paths actually staged.
pub fn run(repo: &Repository, pathspecs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    repo.assert_not_bare()?;
    let mut staged = Vec::new();
    for spec in pathspecs {
        let full = repo.worktree().join(spec);
        let files: Vec<PathBuf> = WalkDir::new(&full)
            .into_iter()
            .filter_entry(|entry| entry.file_name() != METADATA_DIR_NAME)
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .sorted()
            .collect();

        if files.is_empty() {
            bail!(EnkelErrorKind::NoFilesMatched(spec.display().to_string()));
        }
        for file in files {
            let rel = file.strip_prefix(repo.worktree()).unwrap_or(&file).to_owned();
            repo.stage_path(&rel)?;
            staged.push(rel);
        }
    }
    staged.sort();
    log::info!("staged {} file(s)", staged.len());
    Ok(staged)
}
