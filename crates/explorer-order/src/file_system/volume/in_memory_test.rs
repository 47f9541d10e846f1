//! Tests for InMemoryVolume.

use super::{InMemoryVolume, Volume, VolumeError};
use crate::file_system::EntryKind;
use std::path::{Path, PathBuf};

fn names(volume: &InMemoryVolume, dir: &str) -> Vec<String> {
    volume
        .list_directory(Path::new(dir))
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect()
}

#[test]
fn test_with_paths_creates_parents_and_keeps_creation_order() {
    let volume = InMemoryVolume::with_paths("work", "/work", &["zeta.txt", "src/main.rs", "alpha/"]);

    assert_eq!(names(&volume, ""), vec!["zeta.txt", "src", "alpha"]);
    assert_eq!(names(&volume, "src"), vec!["main.rs"]);
    assert!(volume.is_directory(Path::new("src")).unwrap());
    assert!(volume.is_directory(Path::new("alpha")).unwrap());
    assert!(!volume.is_directory(Path::new("zeta.txt")).unwrap());
}

#[test]
fn test_entries_carry_absolute_paths() {
    let volume = InMemoryVolume::with_paths("work", "/work", &["src/lib.rs"]);

    let entries = volume.list_directory(Path::new("/work/src")).unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].path, PathBuf::from("/work/src/lib.rs"));
    assert_eq!(entries[0].kind, EntryKind::File);
}

#[test]
fn test_list_missing_directory_is_not_found() {
    let volume = InMemoryVolume::new("work", "/work");
    assert!(matches!(
        volume.list_directory(Path::new("missing")),
        Err(VolumeError::NotFound(_))
    ));
}

#[test]
fn test_list_file_is_not_a_directory() {
    let volume = InMemoryVolume::with_paths("work", "/work", &["README.md"]);
    assert!(matches!(
        volume.list_directory(Path::new("README.md")),
        Err(VolumeError::NotADirectory(_))
    ));
}

#[test]
fn test_create_and_delete_sequence() {
    let volume = InMemoryVolume::new("work", "/work");

    volume.create_directory(Path::new("docs")).unwrap();
    volume.create_file(Path::new("docs/guide.md"), b"# Guide").unwrap();
    assert_eq!(names(&volume, "docs"), vec!["guide.md"]);

    volume.delete(Path::new("docs")).unwrap();
    assert!(!volume.exists(Path::new("docs")));
    assert!(!volume.exists(Path::new("docs/guide.md")));
}

#[test]
fn test_create_existing_path_fails() {
    let volume = InMemoryVolume::with_paths("work", "/work", &["a.txt"]);
    assert!(matches!(
        volume.create_file(Path::new("a.txt"), b""),
        Err(VolumeError::AlreadyExists(_))
    ));
}

#[test]
fn test_create_in_missing_parent_fails() {
    let volume = InMemoryVolume::new("work", "/work");
    assert!(matches!(
        volume.create_file(Path::new("nope/a.txt"), b""),
        Err(VolumeError::NotFound(_))
    ));
}

#[test]
fn test_rename_moves_descendants() {
    let volume = InMemoryVolume::with_paths("work", "/work", &["old/sub/file.txt"]);

    volume.rename(Path::new("old"), Path::new("new")).unwrap();

    assert!(!volume.exists(Path::new("old")));
    assert!(volume.exists(Path::new("new/sub/file.txt")));
}

#[test]
fn test_rename_onto_existing_fails() {
    let volume = InMemoryVolume::with_paths("work", "/work", &["a.txt", "b.txt"]);
    assert!(matches!(
        volume.rename(Path::new("a.txt"), Path::new("b.txt")),
        Err(VolumeError::AlreadyExists(_))
    ));
    assert!(volume.exists(Path::new("a.txt")));
}

#[test]
fn test_rename_into_itself_fails() {
    let volume = InMemoryVolume::with_paths("work", "/work", &["dir/"]);
    assert!(volume.rename(Path::new("dir"), Path::new("dir/inner")).is_err());
    assert!(volume.exists(Path::new("dir")));
}

#[test]
fn test_delete_root_is_refused() {
    let volume = InMemoryVolume::new("work", "/work");
    assert!(matches!(volume.delete(Path::new("")), Err(VolumeError::PermissionDenied(_))));
}

#[test]
fn test_does_not_support_watching() {
    let volume = InMemoryVolume::new("work", "/work");
    assert!(!volume.supports_watching());
}
