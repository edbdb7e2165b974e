use super::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn init_creates_a_non_bare_repository_with_master_head() {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path(), false).unwrap();
    assert!(!repo.is_bare());
    assert!(repo.refs().is_head_detached().unwrap() == false);
    assert_eq!(repo.refs().head_branch_name().unwrap().as_deref(), Some("master"));
}

#[test]
fn init_is_idempotent_on_an_existing_repository() {
    let dir = TempDir::new().unwrap();
    Repository::init(dir.path(), false).unwrap();
    let repo = Repository::init(dir.path(), false).unwrap();
    assert!(!repo.is_bare());
}

#[test]
fn discover_walks_up_from_a_nested_directory() {
    let dir = TempDir::new().unwrap();
    Repository::init(dir.path(), false).unwrap();
    let nested = dir.path().join("a/b/c");
    fs::create_dir_all(&nested).unwrap();

    let repo = Repository::discover(&nested).unwrap();
    assert_eq!(repo.worktree(), dir.path().canonicalize().unwrap());
}

#[test]
fn discover_outside_any_repository_fails() {
    let dir = TempDir::new().unwrap();
    assert!(Repository::discover(dir.path()).is_err());
}

#[test]
fn stage_and_commit_records_the_first_commit() {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path(), false).unwrap();
    fs::write(dir.path().join("a.txt"), b"hello").unwrap();

    repo.stage_path(Path::new("a.txt")).unwrap();
    let commit_oid = repo.commit(Some("first".into())).unwrap();

    assert_eq!(repo.head_commit().unwrap(), Some(commit_oid));
    let commit = repo.objects().read_commit(commit_oid).unwrap();
    assert!(commit.parents.is_empty());
}

#[test]
fn committing_with_no_changes_is_rejected() {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path(), false).unwrap();
    fs::write(dir.path().join("a.txt"), b"hello").unwrap();
    repo.stage_path(Path::new("a.txt")).unwrap();
    repo.commit(Some("first".into())).unwrap();

    let err = repo.commit(Some("again".into())).unwrap_err();
    assert!(matches!(err.downcast_ref::<EnkelErrorKind>(), Some(EnkelErrorKind::NothingToCommit)));
}

#[test]
fn committing_with_unresolved_conflicts_is_rejected() {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path(), false).unwrap();
    repo.index().write_conflict(repo.objects(), Path::new("a.txt"), b"r", b"g", None).unwrap();

    let err = repo.commit(Some("msg".into())).unwrap_err();
    assert!(matches!(err.downcast_ref::<EnkelErrorKind>(), Some(EnkelErrorKind::UnresolvedConflicts)));
}

#[test]
fn diff_with_no_args_compares_index_against_working_copy() {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path(), false).unwrap();
    fs::write(dir.path().join("a.txt"), b"v1").unwrap();
    repo.stage_path(Path::new("a.txt")).unwrap();
    fs::write(dir.path().join("a.txt"), b"v2").unwrap();

    let diff = repo.diff(None, None).unwrap();
    assert_eq!(diff[Path::new("a.txt")].status, Status::Modify);
}

#[test]
fn changed_files_commit_would_overwrite_is_empty_before_any_commit() {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path(), false).unwrap();
    let fake = crate::hash::hash_bytes(b"nonexistent");
    assert!(repo.changed_files_commit_would_overwrite(fake).unwrap().is_empty());
}
