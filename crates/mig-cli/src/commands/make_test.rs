use super::*;
use mig_core::{NamingScheme, VersionMarker};
use tempfile::{tempdir, TempDir};

fn layout(temp: &TempDir) -> ProjectLayout {
    ProjectLayout {
        migrations_dir: temp.path().join("migrations"),
        marker: VersionMarker::new(temp.path().join(".version")),
        scheme: NamingScheme::default(),
    }
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

#[test]
fn test_make_first_migration_creates_directory() {
    let temp = tempdir().unwrap();
    let layout = layout(&temp);
    assert!(!layout.migrations_dir.exists());

    let path = make_migration(&layout, "create users").unwrap();

    assert_eq!(
        path,
        temp.path().join("migrations").join("migrate-0001-create-users.sql")
    );
    assert_eq!(fs::read_to_string(&path).unwrap(), PLACEHOLDER);
    // make never writes the marker
    assert!(!layout.marker.path().exists());
}

#[test]
fn test_make_follows_marker_version() {
    let temp = tempdir().unwrap();
    let layout = layout(&temp);
    fs::create_dir_all(&layout.migrations_dir).unwrap();
    for v in 1..=4 {
        fs::write(
            layout.migrations_dir.join(layout.scheme.file_name_for(v, "m")),
            "SELECT 1;",
        )
        .unwrap();
    }
    layout.marker.write(4).unwrap();

    let path = make_migration(&layout, "add-users").unwrap();
    assert!(path.ends_with("migrate-0005-add-users.sql"));
}

#[test]
fn test_make_follows_unapplied_files() {
    let temp = tempdir().unwrap();
    let layout = layout(&temp);
    fs::create_dir_all(&layout.migrations_dir).unwrap();
    fs::write(layout.migrations_dir.join("migrate-0007-later.sql"), "").unwrap();
    layout.marker.write(2).unwrap();

    let path = make_migration(&layout, "x").unwrap();
    assert!(path.ends_with("migrate-0008-x.sql"));
}

#[test]
fn test_make_follows_marker_ahead_of_files() {
    let temp = tempdir().unwrap();
    let layout = layout(&temp);
    layout.marker.write(9).unwrap();

    let path = make_migration(&layout, "x").unwrap();
    assert!(path.ends_with("migrate-0010-x.sql"));
}

#[test]
fn test_make_sequential_calls_increment() {
    let temp = tempdir().unwrap();
    let layout = layout(&temp);

    make_migration(&layout, "one").unwrap();
    make_migration(&layout, "two").unwrap();
    make_migration(&layout, "Three Words Here").unwrap();

    assert_eq!(
        file_names(&layout.migrations_dir),
        vec![
            "migrate-0001-one.sql",
            "migrate-0002-two.sql",
            "migrate-0003-three-words-here.sql",
        ]
    );
}

#[test]
fn test_make_uses_custom_scheme() {
    let temp = tempdir().unwrap();
    let mut layout = layout(&temp);
    layout.scheme = NamingScheme {
        prefix: "V".to_string(),
        suffix: ".ddl".to_string(),
        min_width: 3,
    };

    let path = make_migration(&layout, "init").unwrap();
    assert!(path.ends_with("V001-init.ddl"));
}

#[test]
fn test_make_rejects_path_traversal() {
    let temp = tempdir().unwrap();
    let layout = layout(&temp);

    assert!(make_migration(&layout, "../../etc/passwd").is_err());
    assert!(!layout.migrations_dir.exists());
}

#[test]
fn test_make_refuses_when_versions_are_exhausted() {
    let temp = tempdir().unwrap();
    let layout = layout(&temp);
    layout.marker.write(u64::MAX).unwrap();

    let err = make_migration(&layout, "one more").unwrap_err();
    assert!(err.to_string().contains("[E007]"));
    assert!(!layout.migrations_dir.exists());
}

#[test]
fn test_write_new_file_refuses_to_overwrite() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("existing.sql");
    fs::write(&path, "keep me").unwrap();

    assert!(write_new_file(&path, PLACEHOLDER).is_err());
    assert_eq!(fs::read_to_string(&path).unwrap(), "keep me");
}

#[test]
fn test_make_reports_write_failure() {
    let temp = tempdir().unwrap();
    let layout = layout(&temp);
    // A directory with the exact target name makes the create fail
    fs::create_dir_all(layout.migrations_dir.join("migrate-0001-blocked.sql")).unwrap();

    // Directories are not part of the set, so version 1 is picked again
    let err = make_migration(&layout, "blocked").unwrap_err();
    assert!(err.downcast_ref::<ExitCode>().is_some());
}
