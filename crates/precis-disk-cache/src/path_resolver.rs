//! # App Path Resolver
//!
//! Static defaults for cache/data directory resolution.

use std::{
    env,
    path::{Path, PathBuf},
};

use directories_next::ProjectDirs;

/// The kind of directory being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirKind {
    /// Re-downloadable files; pretrained model weights and vocabularies.
    Cache,

    /// Unpacked data sets; the lexical database.
    Data,
}

/// Static configuration for application path resolution.
pub struct PathResolver {
    /// The qualifier for [`ProjectDirs`].
    pub qualifier: &'static str,

    /// The organization for [`ProjectDirs`].
    pub organization: &'static str,

    /// The application for [`ProjectDirs`].
    pub application: &'static str,

    /// The resolution order for cache directories environment variables.
    pub cache_env_vars: &'static [&'static str],

    /// The resolution order for data directories environment variables.
    pub data_env_vars: &'static [&'static str],
}

impl PathResolver {
    /// Get the [`ProjectDirs`] for this config.
    pub fn project_dirs(&self) -> Option<ProjectDirs> {
        ProjectDirs::from(self.qualifier, self.organization, self.application)
    }

    /// The environment variables consulted for `kind`, in priority order.
    pub fn env_vars(
        &self,
        kind: DirKind,
    ) -> &'static [&'static str] {
        match kind {
            DirKind::Cache => self.cache_env_vars,
            DirKind::Data => self.data_env_vars,
        }
    }

    /// Resolve a directory of the given kind.
    ///
    /// Resolution Order:
    /// 1. `path`, if present.
    /// 2. ``env[$VAR]`` for each of [`Self::env_vars`]; in order.
    /// 3. the matching [`ProjectDirs`] directory, if present.
    /// 4. `None`
    pub fn resolve_dir<P: AsRef<Path>>(
        &self,
        kind: DirKind,
        path: Option<P>,
    ) -> Option<PathBuf> {
        if let Some(path) = path {
            return Some(path.as_ref().to_path_buf());
        }

        if let Some(path) = self
            .env_vars(kind)
            .iter()
            .find_map(|var| env::var_os(var).filter(|v| !v.is_empty()))
        {
            return Some(PathBuf::from(path));
        }

        self.project_dirs().map(|pds| match kind {
            DirKind::Cache => pds.cache_dir().to_path_buf(),
            DirKind::Data => pds.data_dir().to_path_buf(),
        })
    }

    /// Resolve the cache directory for this config.
    ///
    /// ## Project Dirs Behavior
    ///
    /// |Platform | Value                                                                 | Example                       |
    /// | ------- | --------------------------------------------------------------------- | ----------------------------- |
    /// | Linux   | `$XDG_CACHE_HOME`/`_project_path_` or `$HOME`/.cache/`_project_path_` | /home/alice/.cache/precis     |
    /// | macOS   | `$HOME`/Library/Caches/`_project_path_`                               | /Users/Alice/Library/Caches/… |
    /// | Windows | `{FOLDERID_LocalAppData}`\\`_project_path_`\\cache                    | C:\Users\Alice\AppData\Local… |
    pub fn resolve_cache_dir<P: AsRef<Path>>(
        &self,
        path: Option<P>,
    ) -> Option<PathBuf> {
        self.resolve_dir(DirKind::Cache, path)
    }

    /// Resolve the data directory for this config.
    ///
    /// ## Project Dirs Behavior
    ///
    /// |Platform | Value                                                                      | Example                          |
    /// | ------- | -------------------------------------------------------------------------- | -------------------------------- |
    /// | Linux   | `$XDG_DATA_HOME`/`_project_path_` or `$HOME`/.local/share/`_project_path_` | /home/alice/.local/share/precis  |
    /// | macOS   | `$HOME`/Library/Application Support/`_project_path_`                       | /Users/Alice/Library/Application… |
    /// | Windows | `{FOLDERID_LocalAppData}`\\`_project_path_`\\data                          | C:\Users\Alice\AppData\Local…    |
    pub fn resolve_data_dir<P: AsRef<Path>>(
        &self,
        path: Option<P>,
    ) -> Option<PathBuf> {
        self.resolve_dir(DirKind::Data, path)
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    const CACHE_ENV1: &str = "_PRECIS_PATH_CACHE_ENV1";
    const CACHE_ENV2: &str = "_PRECIS_PATH_CACHE_ENV2";
    const DATA_ENV1: &str = "_PRECIS_PATH_DATA_ENV1";

    const TEST_CONFIG: PathResolver = PathResolver {
        qualifier: "io",
        organization: "crates",
        application: "precis-test",
        cache_env_vars: &[CACHE_ENV1, CACHE_ENV2],
        data_env_vars: &[DATA_ENV1],
    };

    fn clear_env() {
        unsafe {
            for v in TEST_CONFIG.cache_env_vars {
                env::remove_var(v);
            }
            for v in TEST_CONFIG.data_env_vars {
                env::remove_var(v);
            }
        }
    }

    #[test]
    #[serial]
    fn test_explicit_path_wins() {
        clear_env();
        unsafe {
            env::set_var(CACHE_ENV1, "/tmp/precis/env_cache");
        }

        let explicit = PathBuf::from("/tmp/precis/explicit");
        assert_eq!(
            TEST_CONFIG.resolve_cache_dir(Some(&explicit)),
            Some(explicit.clone())
        );
        assert_eq!(
            TEST_CONFIG.resolve_data_dir(Some(&explicit)),
            Some(explicit)
        );

        clear_env();
    }

    #[test]
    #[serial]
    fn test_env_var_priority() {
        clear_env();
        let no_path: Option<PathBuf> = None;

        unsafe {
            env::set_var(CACHE_ENV2, "/tmp/precis/cache.2");
        }
        assert_eq!(
            TEST_CONFIG.resolve_cache_dir(no_path.clone()),
            Some(PathBuf::from("/tmp/precis/cache.2"))
        );

        unsafe {
            env::set_var(CACHE_ENV1, "/tmp/precis/cache.1");
        }
        assert_eq!(
            TEST_CONFIG.resolve_cache_dir(no_path.clone()),
            Some(PathBuf::from("/tmp/precis/cache.1"))
        );

        // Empty values are skipped.
        unsafe {
            env::set_var(CACHE_ENV1, "");
        }
        assert_eq!(
            TEST_CONFIG.resolve_cache_dir(no_path),
            Some(PathBuf::from("/tmp/precis/cache.2"))
        );

        clear_env();
    }

    #[test]
    #[serial]
    fn test_project_dirs_fallback() {
        clear_env();
        let no_path: Option<PathBuf> = None;

        let pds = TEST_CONFIG
            .project_dirs()
            .expect("failed to get project dirs");

        assert_eq!(
            TEST_CONFIG.resolve_cache_dir(no_path.clone()),
            Some(pds.cache_dir().to_path_buf())
        );
        assert_eq!(
            TEST_CONFIG.resolve_data_dir(no_path),
            Some(pds.data_dir().to_path_buf())
        );
    }
}
