//! `diff [<ref1> [<ref2>]]`.

use crate::diff::Diff;
use crate::error::Result;
use crate::repo::Repository;

pub fn run(repo: &Repository, rev1: Option<&str>, rev2: Option<&str>) -> Result<Diff> {
    repo.diff(rev1, rev2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::Status;
    use std::path::Path;
    use tempfile::TempDir;

    #[test]
    fn diffing_two_commits_reports_the_changed_path() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path(), false).unwrap();
        std::fs::write(dir.path().join("a.txt"), b"v1").unwrap();
        repo.stage_path(Path::new("a.txt")).unwrap();
        let first = repo.commit(Some("first".into())).unwrap();

        std::fs::write(dir.path().join("a.txt"), b"v2").unwrap();
        repo.stage_path(Path::new("a.txt")).unwrap();
        repo.commit(Some("second".into())).unwrap();

        let diff = run(&repo, Some(&first.to_hex()), Some("HEAD")).unwrap();
        assert_eq!(diff[Path::new("a.txt")].status, Status::Modify);
    }
}
