//! # Path Utilities

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

/// Suffix for files which are still being downloaded.
pub const PARTIAL_SUFFIX: &str = "partial";

/// Extend a path with a context and filename.
///
/// * Does not check that the path exists.
/// * Does not initialize the containing directories.
///
/// # Arguments
/// * `context` - prefix dirs, inserted between `path` and `filename`.
/// * `filename` - the final file name.
pub fn extend_path<P, S, F>(
    path: P,
    context: &[S],
    filename: F,
) -> PathBuf
where
    P: AsRef<Path>,
    S: AsRef<Path>,
    F: AsRef<Path>,
{
    let mut path = path.as_ref().to_path_buf();
    path.extend(context.iter().map(|s| s.as_ref()));
    path.push(filename.as_ref());
    path
}

/// The in-flight download path for `path`: `{path}.partial`.
pub fn partial_path<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".");
    name.push(PARTIAL_SUFFIX);
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extend_path() {
        let path = extend_path("/tmp/precis", &["models", "allenai"], "vocab.txt");
        assert_eq!(path, PathBuf::from("/tmp/precis/models/allenai/vocab.txt"));
    }

    #[test]
    fn test_extend_path_no_context() {
        let context: &[&str] = &[];
        let path = extend_path("/tmp/precis", context, "index.noun");
        assert_eq!(path, PathBuf::from("/tmp/precis/index.noun"));
    }

    #[test]
    fn test_partial_path() {
        assert_eq!(
            partial_path("/tmp/precis/rust_model.ot"),
            PathBuf::from("/tmp/precis/rust_model.ot.partial")
        );
    }
}
