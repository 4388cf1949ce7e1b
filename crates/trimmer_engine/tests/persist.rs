use std::fs;

use tempfile::TempDir;
use trimmer_engine::{ensure_output_dir, AtomicFileWriter, PersistError};

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("out");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn write_replaces_existing_file() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("page.html", "<p>old</p>").unwrap();
    assert_eq!(first.path.file_name().unwrap(), "page.html");
    assert_eq!(first.bytes, 10);
    assert_eq!(fs::read_to_string(&first.path).unwrap(), "<p>old</p>");

    let second = writer.write("page.html", "<p>new!</p>").unwrap();
    assert_eq!(first.path, second.path);
    assert_eq!(fs::read_to_string(&second.path).unwrap(), "<p>new!</p>");

    // No temp files left next to the target.
    let entries = fs::read_dir(temp.path()).unwrap().count();
    assert_eq!(entries, 1);
}

#[test]
fn no_partial_file_on_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("not_a_dir");
    fs::write(&file_path, "x").unwrap();

    let writer = AtomicFileWriter::new(file_path.clone());
    let result = writer.write("page.html", "data");
    assert!(matches!(result, Err(PersistError::OutputDir { .. })));
    assert!(!file_path.with_file_name("page.html").exists());
}

#[test]
fn rejects_names_that_escape_the_directory() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    for name in ["", ".", "..", "../escape.html", "nested/page.html"] {
        let result = writer.write(name, "data");
        assert!(
            matches!(result, Err(PersistError::InvalidFileName(_))),
            "accepted {name:?}"
        );
    }
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}
