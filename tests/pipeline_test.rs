//! End-to-end tests for walk -> hash -> group
//!
//! Each test builds a small tree in a temporary directory and checks the
//! catalog and the duplicate groups produced from it.

use dupe_finder_rs::prelude::*;
use indicatif::ProgressBar;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn scan(root: &Path) -> Result<Catalog> {
    scan_directory(root, &ScanOptions::default(), &ProgressBar::hidden())
}

/// Two files with different bytes produce no groups
#[test]
fn test_no_duplicates() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("A"), b"x").unwrap();
    fs::write(temp_dir.path().join("B"), b"y").unwrap();

    let catalog = scan(temp_dir.path()).unwrap();
    assert_eq!(catalog.len(), 2);
    assert!(find_duplicates(&catalog).is_empty());
}

/// A and B share bytes; A is visited first and represents the group
#[test]
fn test_one_duplicate_pair() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("A"), b"x").unwrap();
    fs::write(temp_dir.path().join("B"), b"x").unwrap();
    fs::write(temp_dir.path().join("C"), b"z").unwrap();

    let catalog = scan(temp_dir.path()).unwrap();
    let groups = find_duplicates(&catalog);

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].digest, digest_bytes(b"x"));
    assert_eq!(groups[0].count, 2);

    let expected = fs::canonicalize(temp_dir.path().join("A")).unwrap();
    assert_eq!(groups[0].representative, expected);
}

/// Empty root yields an empty catalog and no error
#[test]
fn test_empty_directory() {
    let temp_dir = TempDir::new().unwrap();

    let catalog = scan(temp_dir.path()).unwrap();
    assert!(catalog.is_empty());
    assert!(find_duplicates(&catalog).is_empty());
}

/// Missing root fails before any catalog exists
#[test]
fn test_unreadable_root() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nowhere");

    let err = scan(&missing).unwrap_err();
    assert!(matches!(err, DedupError::RootInaccessible { .. }));
    assert!(err.to_string().contains("nowhere"));
}

/// Every regular file below the root is cataloged exactly once
#[test]
fn test_completeness_in_nested_tree() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("a/b/c")).unwrap();
    fs::create_dir_all(root.join("d/empty")).unwrap();

    let files = ["top.txt", "a/one.txt", "a/b/two.txt", "a/b/c/three.txt", "d/four.txt"];
    for (i, file) in files.iter().enumerate() {
        fs::write(root.join(file), format!("file {}", i)).unwrap();
    }

    let catalog = scan(root).unwrap();
    assert_eq!(catalog.len(), files.len());

    let mut paths: Vec<_> = catalog.iter().map(|r| r.path.clone()).collect();
    paths.sort();
    paths.dedup();
    assert_eq!(paths.len(), files.len());
    assert!(catalog.iter().all(|r| r.path.is_absolute()));
}

/// Repeated scans give identical digests in identical order
#[test]
fn test_determinism_across_runs() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir(root.join("sub")).unwrap();
    fs::write(root.join("one"), b"same").unwrap();
    fs::write(root.join("sub/two"), b"same").unwrap();
    fs::write(root.join("three"), b"other").unwrap();

    let first = scan(root).unwrap();
    let second = scan(root).unwrap();

    let a: Vec<_> = first.iter().map(|r| (&r.path, &r.digest, r.size_bytes)).collect();
    let b: Vec<_> = second.iter().map(|r| (&r.path, &r.digest, r.size_bytes)).collect();
    assert_eq!(a, b);
    assert_eq!(find_duplicates(&first), find_duplicates(&second));
}

/// Representative is the earliest file in traversal order, even in a subdirectory
#[test]
fn test_representative_is_first_visited() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir(root.join("a_dir")).unwrap();
    fs::write(root.join("a_dir/inner"), b"dup").unwrap();
    fs::write(root.join("b_file"), b"dup").unwrap();
    fs::write(root.join("c_file"), b"dup").unwrap();

    let catalog = scan(root).unwrap();
    let groups = find_duplicates(&catalog);

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].count, 3);
    assert_eq!(groups[0].representative, catalog.records()[0].path);
    assert!(groups[0].representative.ends_with("a_dir/inner"));
}

/// Parallel hashing keeps traversal order and the same groups
#[test]
fn test_parallel_scan_matches_sequential() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    for dir in 0..4 {
        let sub = root.join(format!("dir{}", dir));
        fs::create_dir(&sub).unwrap();
        for file in 0..10 {
            fs::write(sub.join(format!("f{}", file)), format!("{}", (dir * file) % 5)).unwrap();
        }
    }

    let sequential = scan(root).unwrap();
    let parallel = scan_directory(root, &ScanOptions { workers: 4 }, &ProgressBar::hidden()).unwrap();

    let seq: Vec<_> = sequential.iter().map(|r| (&r.path, &r.digest)).collect();
    let par: Vec<_> = parallel.iter().map(|r| (&r.path, &r.digest)).collect();
    assert_eq!(seq, par);
    assert_eq!(find_duplicates(&sequential), find_duplicates(&parallel));
}

/// Recorded size matches the bytes on disk
#[test]
fn test_record_fields() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("data.bin"), vec![7u8; 20_000]).unwrap();

    let catalog = scan(temp_dir.path()).unwrap();
    let record = &catalog.records()[0];

    assert_eq!(record.name, "data.bin");
    assert_eq!(record.size_bytes, 20_000);
    assert_eq!(record.digest, digest_bytes(&vec![7u8; 20_000]));
    assert_eq!(record.digest.len(), 64);
}

#[cfg(unix)]
#[test]
fn test_unreadable_subdirectory_aborts() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let locked = temp_dir.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::write(locked.join("secret"), b"s").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Root ignores permission bits; nothing to check in that case
    let readable = fs::read_dir(&locked).is_ok();
    let result = scan(temp_dir.path());
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    if !readable {
        assert!(matches!(result.unwrap_err(), DedupError::Walk { .. }));
    }
}
