//! # External Resource Management
//!
//! A [`KeyedResource`] names a remote file by a cache key and a set of
//! mirror urls; a [`ResourceLoader`] turns it into a local path.

use std::path::PathBuf;

use crate::{PrecisError, PrecisResult};

/// A remote file with a cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyedResource {
    /// Cache sub-directories for the file.
    ///
    /// This is used in place of a URI for internal caching
    /// and fetch unification.
    pub key: Vec<String>,

    /// Mirror urls; the file name is the last path segment.
    pub urls: Vec<String>,
}

impl KeyedResource {
    /// The file name of the resource; the last segment of the first url.
    pub fn file_name(&self) -> Option<&str> {
        self.urls
            .first()
            .and_then(|url| url.rsplit('/').next())
            .filter(|name| !name.is_empty())
    }
}

/// A trait for loading resources.
pub trait ResourceLoader {
    /// Resolve a resource to a local path, fetching it if needed.
    fn load_resource_path(
        &mut self,
        resource: &KeyedResource,
    ) -> PrecisResult<PathBuf>;
}

#[cfg(feature = "download")]
impl ResourceLoader for crate::disk_cache::PrecisDiskCache {
    fn load_resource_path(
        &mut self,
        resource: &KeyedResource,
    ) -> PrecisResult<PathBuf> {
        self.load_cached_path(&resource.key, &resource.urls, true)
            .map_err(PrecisError::external)
    }
}

/// A [`ResourceLoader`] over a flat local directory of already-fetched files.
///
/// Resources resolve to `{root}/{file_name}`; nothing is downloaded.
#[derive(Debug, Clone)]
pub struct LocalDirLoader {
    root: PathBuf,
}

impl LocalDirLoader {
    /// Create a loader rooted at `root`.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }
}

impl ResourceLoader for LocalDirLoader {
    fn load_resource_path(
        &mut self,
        resource: &KeyedResource,
    ) -> PrecisResult<PathBuf> {
        let name = resource
            .file_name()
            .ok_or_else(|| PrecisError::ResourceNotFound(format!("{resource:?}")))?;
        let path = self.root.join(name);
        if !path.is_file() {
            return Err(PrecisError::ResourceNotFound(path.display().to_string()));
        }
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempdir::TempDir;

    use super::*;

    fn resource(url: &str) -> KeyedResource {
        KeyedResource {
            key: vec!["models".to_string()],
            urls: vec![url.to_string()],
        }
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            resource("https://huggingface.co/a/b/resolve/main/vocab.txt").file_name(),
            Some("vocab.txt")
        );
        assert_eq!(resource("https://huggingface.co/a/").file_name(), None);

        let empty = KeyedResource {
            key: vec![],
            urls: vec![],
        };
        assert_eq!(empty.file_name(), None);
    }

    #[test]
    fn test_local_dir_loader() {
        let dir = TempDir::new("precis-local").unwrap();
        fs::write(dir.path().join("vocab.txt"), "[PAD]\n").unwrap();

        let mut loader = LocalDirLoader::new(dir.path());
        let path = loader
            .load_resource_path(&resource("https://example.invalid/vocab.txt"))
            .unwrap();
        assert_eq!(path, dir.path().join("vocab.txt"));

        let missing = loader.load_resource_path(&resource("https://example.invalid/config.json"));
        assert!(matches!(missing, Err(PrecisError::ResourceNotFound(_))));
    }
}
