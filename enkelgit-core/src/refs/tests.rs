use super::*;
use crate::hash::hash_bytes;
use tempfile::TempDir;

fn stores() -> (TempDir, ObjectStore, RefStore) {
    let dir = TempDir::new().unwrap();
    let store = ObjectStore::new(dir.path().join("objects"));
    let refs = RefStore::new(dir.path().to_owned());
    (dir, store, refs)
}

#[test]
fn branch_name_rejects_digits_and_slashes() {
    assert!(is_valid_name("feature-x"));
    assert!(!is_valid_name("feature-1"));
    assert!(!is_valid_name("feature/x"));
}

#[test]
fn is_ref_recognizes_qualified_forms() {
    assert!(is_ref("HEAD"));
    assert!(is_ref("FETCH_HEAD"));
    assert!(is_ref("MERGE_HEAD"));
    assert!(is_ref("refs/heads/main"));
    assert!(is_ref("refs/remotes/origin/main"));
    assert!(!is_ref("main"));
    assert!(!is_ref("refs/heads/1"));
}

#[test]
fn unborn_head_resolves_to_no_hash() {
    let (_dir, store, refs) = stores();
    refs.write(HEAD, &RefValue::Symbolic(to_local_ref("master"))).unwrap();
    assert_eq!(refs.hash(&store, HEAD).unwrap(), None);
    assert!(!refs.is_head_detached().unwrap());
    assert_eq!(refs.head_branch_name().unwrap().as_deref(), Some("master"));
}

#[test]
fn attached_head_resolves_through_branch() {
    let (_dir, store, refs) = stores();
    let oid = store.write(b"commit bytes").unwrap();
    refs.write(&to_local_ref("master"), &RefValue::Hash(oid)).unwrap();
    refs.write(HEAD, &RefValue::Symbolic(to_local_ref("master"))).unwrap();

    assert_eq!(refs.hash(&store, HEAD).unwrap(), Some(oid));
    assert_eq!(refs.hash(&store, "master").unwrap(), Some(oid));
    assert!(refs.is_checked_out("master").unwrap());
}

#[test]
fn detached_head_resolves_directly() {
    let (_dir, store, refs) = stores();
    let oid = hash_bytes(b"whatever");
    refs.write(HEAD, &RefValue::Hash(oid)).unwrap();

    assert!(refs.is_head_detached().unwrap());
    assert_eq!(refs.head_branch_name().unwrap(), None);
    assert_eq!(refs.terminal_ref(HEAD).unwrap(), HEAD);
}

#[test]
fn hash_prefers_a_literal_existing_object_hash() {
    let (_dir, store, refs) = stores();
    let oid = store.write(b"literal").unwrap();
    assert_eq!(refs.hash(&store, &oid.to_hex()).unwrap(), Some(oid));
}

#[test]
fn commit_parent_hashes_includes_merge_head_when_present() {
    let (_dir, store, refs) = stores();
    let head_oid = store.write(b"head commit").unwrap();
    let merge_oid = store.write(b"merge commit").unwrap();
    refs.write(&to_local_ref("master"), &RefValue::Hash(head_oid)).unwrap();
    refs.write(HEAD, &RefValue::Symbolic(to_local_ref("master"))).unwrap();

    assert_eq!(refs.commit_parent_hashes(&store).unwrap(), vec![head_oid]);

    refs.write(MERGE_HEAD, &RefValue::Hash(merge_oid)).unwrap();
    assert_eq!(refs.commit_parent_hashes(&store).unwrap(), vec![head_oid, merge_oid]);
}

#[test]
fn local_heads_lists_every_branch() {
    let (_dir, store, refs) = stores();
    let a = store.write(b"a").unwrap();
    let b = store.write(b"b").unwrap();
    refs.write(&to_local_ref("master"), &RefValue::Hash(a)).unwrap();
    refs.write(&to_local_ref("feature"), &RefValue::Hash(b)).unwrap();

    let heads = refs.local_heads().unwrap();
    assert_eq!(heads.get("master"), Some(&a));
    assert_eq!(heads.get("feature"), Some(&b));
}

#[test]
fn fetch_head_resolves_by_branch_name() {
    let (_dir, _store, refs) = stores();
    let oid = hash_bytes(b"fetched");
    refs.append_fetch_head(oid, "master", "https://example.test/repo").unwrap();
    refs.append_fetch_head(hash_bytes(b"other"), "other", "https://example.test/repo").unwrap();

    assert_eq!(refs.fetch_head_branch_to_merge("master").unwrap(), Some(oid));
    assert_eq!(refs.fetch_head_branch_to_merge("nonexistent").unwrap(), None);
}

#[test]
fn remove_deletes_a_ref_file() {
    let (_dir, _store, refs) = stores();
    refs.write(&to_local_ref("doomed"), &RefValue::Hash(hash_bytes(b"x"))).unwrap();
    assert!(refs.exists(&to_local_ref("doomed")));
    refs.remove(&to_local_ref("doomed")).unwrap();
    assert!(!refs.exists(&to_local_ref("doomed")));
}
