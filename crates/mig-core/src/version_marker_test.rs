use super::*;
use crate::migration_set::MigrationFile;
use crate::naming::NamingScheme;
use tempfile::tempdir;

fn set_with_versions(versions: &[Version]) -> MigrationSet {
    let scheme = NamingScheme::default();
    let files = versions
        .iter()
        .map(|v| {
            MigrationFile::new(
                Path::new("migrations"),
                &scheme.file_name_for(*v, "m"),
                &scheme,
            )
        })
        .collect();
    MigrationSet::from_files(files)
}

#[test]
fn test_read_missing_marker_is_zero() {
    let temp = tempdir().unwrap();
    let marker = VersionMarker::new(temp.path().join(DEFAULT_VERSION_FILE));
    assert_eq!(marker.read().unwrap(), 0);
    assert!(!marker.path().exists());
}

#[test]
fn test_write_then_read() {
    let temp = tempdir().unwrap();
    let marker = VersionMarker::new(temp.path().join(DEFAULT_VERSION_FILE));

    marker.write(5).unwrap();
    assert_eq!(marker.read().unwrap(), 5);
    assert_eq!(fs::read_to_string(marker.path()).unwrap(), "5");
}

#[test]
fn test_write_overwrites_previous_value() {
    let temp = tempdir().unwrap();
    let marker = VersionMarker::new(temp.path().join(DEFAULT_VERSION_FILE));

    marker.write(123).unwrap();
    marker.write(7).unwrap();
    assert_eq!(fs::read_to_string(marker.path()).unwrap(), "7");
}

#[test]
fn test_read_tolerates_trailing_content() {
    let temp = tempdir().unwrap();
    let path = temp.path().join(DEFAULT_VERSION_FILE);
    fs::write(&path, "12\nsomething else\n").unwrap();
    assert_eq!(VersionMarker::new(&path).read().unwrap(), 12);
}

#[test]
fn test_read_garbage_is_zero() {
    let temp = tempdir().unwrap();
    let path = temp.path().join(DEFAULT_VERSION_FILE);
    fs::write(&path, "not a number").unwrap();
    assert_eq!(VersionMarker::new(&path).read().unwrap(), 0);

    fs::write(&path, "").unwrap();
    assert_eq!(VersionMarker::new(&path).read().unwrap(), 0);
}

#[test]
fn test_read_tolerates_invalid_utf8() {
    let temp = tempdir().unwrap();
    let path = temp.path().join(DEFAULT_VERSION_FILE);
    fs::write(&path, b"5\xff\n").unwrap();
    assert_eq!(VersionMarker::new(&path).read().unwrap(), 5);

    fs::write(&path, b"\xfe\xff").unwrap();
    assert_eq!(VersionMarker::new(&path).read().unwrap(), 0);
}

#[test]
fn test_write_into_missing_directory_fails() {
    let temp = tempdir().unwrap();
    let marker = VersionMarker::new(temp.path().join("missing").join(".version"));
    let err = marker.write(1).unwrap_err();
    assert!(matches!(err, CoreError::IoWithPath { .. }));
}

#[test]
fn test_next_version_follows_marker() {
    assert_eq!(next_version(4, &set_with_versions(&[1, 2, 3, 4])).unwrap(), 5);
}

#[test]
fn test_next_version_follows_unapplied_files() {
    assert_eq!(next_version(2, &set_with_versions(&[1, 2, 7])).unwrap(), 8);
}

#[test]
fn test_next_version_with_no_files() {
    assert_eq!(next_version(0, &MigrationSet::default()).unwrap(), 1);
    assert_eq!(next_version(3, &MigrationSet::default()).unwrap(), 4);
}

#[test]
fn test_next_version_exhausted() {
    let err = next_version(u64::MAX, &MigrationSet::default()).unwrap_err();
    assert!(matches!(err, CoreError::VersionExhausted { version } if version == u64::MAX));

    let files = set_with_versions(&[1, u64::MAX]);
    assert!(matches!(
        next_version(3, &files),
        Err(CoreError::VersionExhausted { .. })
    ));
}
