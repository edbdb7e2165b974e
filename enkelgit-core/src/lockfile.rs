//! "atomic in spirit" file writes: write to a sibling temp file, then rename over the
//! target. A crash between the two loses nothing already committed and never leaves a
//! half-written file in place. No cross-process locking beyond that.

use crate::error::Result;
use anyhow::Context;
use std::fs;
use std::path::Path;

pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create directory `{}`", dir.display()))?;

    let tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temp file next to `{}`", path.display()))?;
    fs::write(tmp.path(), bytes)?;
    tmp.persist(path).map_err(|err| err.error).with_context(|| {
        format!("failed to write `{}`", path.display())
    })?;
    Ok(())
}
