//! Reading optional project files

use std::fs;
use std::io;
use std::path::Path;

/// Read `path` to a string. `Ok(None)` only when nothing exists at `path`;
/// any other failure, including a directory in its place, is an error.
pub fn read_if_exists(path: &Path) -> io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_none() {
        let tmp = TempDir::new().expect("tmp");
        assert_eq!(read_if_exists(&tmp.path().join("absent")).expect("read"), None);
    }

    #[test]
    fn test_existing_file_is_read() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("present"), "hello").expect("write");
        let content = read_if_exists(&tmp.path().join("present")).expect("read");
        assert_eq!(content.as_deref(), Some("hello"));
    }

    #[test]
    fn test_directory_is_an_error() {
        let tmp = TempDir::new().expect("tmp");
        fs::create_dir(tmp.path().join("taken")).expect("mkdir");
        assert!(read_if_exists(&tmp.path().join("taken")).is_err());
    }
}
