//! Tests for LocalVolume.

use super::*;
use std::path::Path;
use crate::file_system::EntryKind;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_new_names_volume_after_root() {
    let volume = LocalVolume::new("/tmp/project");
    assert_eq!(volume.name(), "project");
    assert_eq!(volume.root(), Path::new("/tmp/project"));
}

#[test]
fn test_resolve_empty_and_dot_return_root() {
    let volume = LocalVolume::new("/tmp");
    assert_eq!(volume.resolve(Path::new("")), Path::new("/tmp"));
    assert_eq!(volume.resolve(Path::new(".")), Path::new("/tmp"));
}

#[test]
fn test_resolve_relative_path_joins_with_root() {
    let volume = LocalVolume::new("/tmp");
    assert_eq!(volume.resolve(Path::new("src/main.rs")), Path::new("/tmp/src/main.rs"));
}

#[test]
fn test_resolve_absolute_path_inside_root_is_kept() {
    let volume = LocalVolume::new("/tmp/work");
    assert_eq!(volume.resolve(Path::new("/tmp/work/a")), Path::new("/tmp/work/a"));
}

#[test]
fn test_resolve_absolute_path_outside_root_is_treated_as_relative() {
    let volume = LocalVolume::new("/tmp/work");
    assert_eq!(volume.resolve(Path::new("/src/a")), Path::new("/tmp/work/src/a"));
}

#[test]
fn test_list_directory_reports_kinds() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("src")).unwrap();
    fs::write(temp.path().join("README.md"), "hi").unwrap();
    let volume = LocalVolume::new(temp.path());

    let mut entries = volume.list_directory(Path::new("")).unwrap();
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name, "README.md");
    assert_eq!(entries[0].kind, EntryKind::File);
    assert_eq!(entries[0].path, temp.path().join("README.md"));
    assert_eq!(entries[1].name, "src");
    assert_eq!(entries[1].kind, EntryKind::Directory);
}

#[cfg(unix)]
#[test]
fn test_symlink_to_directory_lists_as_directory() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("real")).unwrap();
    std::os::unix::fs::symlink(temp.path().join("real"), temp.path().join("link")).unwrap();
    std::os::unix::fs::symlink(temp.path().join("gone"), temp.path().join("broken")).unwrap();
    let volume = LocalVolume::new(temp.path());

    let entries = volume.list_directory(Path::new("")).unwrap();
    let kind_of = |name: &str| entries.iter().find(|e| e.name == name).unwrap().kind;

    assert_eq!(kind_of("link"), EntryKind::Directory);
    assert_eq!(kind_of("broken"), EntryKind::File);
}

#[test]
fn test_list_directory_nonexistent_returns_error() {
    let volume = LocalVolume::new("/definitely_does_not_exist_12345");
    let result = volume.list_directory(Path::new(""));

    match result {
        Err(VolumeError::NotFound(_)) => (),
        other => panic!("Expected NotFound, got: {:?}", other),
    }
}

#[test]
fn test_create_file_refuses_to_overwrite() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.txt"), "keep").unwrap();
    let volume = LocalVolume::new(temp.path());

    let result = volume.create_file(Path::new("a.txt"), b"replace");

    assert!(matches!(result, Err(VolumeError::AlreadyExists(_))));
    assert_eq!(fs::read_to_string(temp.path().join("a.txt")).unwrap(), "keep");
}

#[test]
fn test_delete_directory_removes_contents() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("dir/sub")).unwrap();
    fs::write(temp.path().join("dir/sub/file.txt"), "").unwrap();
    let volume = LocalVolume::new(temp.path());

    volume.delete(Path::new("dir")).unwrap();

    assert!(!volume.exists(Path::new("dir")));
}

#[test]
fn test_rename_refuses_to_replace() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.txt"), "a").unwrap();
    fs::write(temp.path().join("b.txt"), "b").unwrap();
    let volume = LocalVolume::new(temp.path());

    let result = volume.rename(Path::new("a.txt"), Path::new("b.txt"));

    assert!(matches!(result, Err(VolumeError::AlreadyExists(_))));
    assert_eq!(fs::read_to_string(temp.path().join("b.txt")).unwrap(), "b");
}

#[test]
fn test_rename_moves_file() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.txt"), "a").unwrap();
    let volume = LocalVolume::new(temp.path());

    volume.rename(Path::new("a.txt"), Path::new("c.txt")).unwrap();

    assert!(!volume.exists(Path::new("a.txt")));
    assert!(volume.exists(Path::new("c.txt")));
}

#[test]
fn test_supports_watching() {
    assert!(LocalVolume::new("/tmp").supports_watching());
}
