//! # Precis Disk Cache

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use downloader::{Download, Downloader};

use crate::{PRECIS_CACHE_CONFIG, path_utils};

/// Options for [`PrecisDiskCache`].
#[derive(Clone, Default, Debug)]
pub struct PrecisDiskCacheOptions {
    /// Optional path to the cache directory.
    pub cache_dir: Option<PathBuf>,

    /// Optional path to the data directory.
    pub data_dir: Option<PathBuf>,

    /// Optional [`Downloader`] builder.
    pub downloader: Option<fn() -> Downloader>,

    /// Never touch the network; only serve files already on disk.
    pub offline: bool,
}

impl PrecisDiskCacheOptions {
    /// Set the cache directory.
    pub fn with_cache_dir<P: AsRef<Path>>(
        mut self,
        cache_dir: Option<P>,
    ) -> Self {
        self.cache_dir = cache_dir.map(|p| p.as_ref().to_path_buf());
        self
    }

    /// Set the data directory.
    pub fn with_data_dir<P: AsRef<Path>>(
        mut self,
        data_dir: Option<P>,
    ) -> Self {
        self.data_dir = data_dir.map(|p| p.as_ref().to_path_buf());
        self
    }

    /// Set the downloader builder.
    pub fn with_downloader(
        mut self,
        downloader: Option<fn() -> Downloader>,
    ) -> Self {
        self.downloader = downloader;
        self
    }

    /// Set offline mode.
    pub fn with_offline(
        mut self,
        offline: bool,
    ) -> Self {
        self.offline = offline;
        self
    }
}

/// Disk cache for downloaded model files and data sets.
///
/// Leverages [`Downloader`] for downloading files,
/// and [`PathResolver`](`crate::path_resolver::PathResolver`) for resolving cache
/// and data paths appropriate for a user/system combo, and any environment overrides.
pub struct PrecisDiskCache {
    cache_dir: PathBuf,
    data_dir: PathBuf,
    offline: bool,

    /// Connection pool for downloading files.
    downloader: Downloader,
}

impl PrecisDiskCache {
    /// Construct a new [`PrecisDiskCache`].
    pub fn new(options: PrecisDiskCacheOptions) -> anyhow::Result<Self> {
        let cache_dir = PRECIS_CACHE_CONFIG
            .resolve_cache_dir(options.cache_dir)
            .context("failed to resolve cache directory")?;

        let data_dir = PRECIS_CACHE_CONFIG
            .resolve_data_dir(options.data_dir)
            .context("failed to resolve data directory")?;

        let downloader = match options.downloader {
            Some(builder) => builder(),
            None => Downloader::builder().build()?,
        };

        log::debug!(
            "disk cache: cache_dir={} data_dir={} offline={}",
            cache_dir.display(),
            data_dir.display(),
            options.offline
        );

        Ok(Self {
            cache_dir,
            data_dir,
            offline: options.offline,
            downloader,
        })
    }

    /// Get the cache directory.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Get the data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Is this cache restricted to files already on disk?
    pub fn is_offline(&self) -> bool {
        self.offline
    }

    /// Get the cache path for the given key.
    ///
    /// * Does not check that the path exists.
    /// * Does not initialize the containing directories.
    ///
    /// # Arguments
    /// * `context` - prefix dirs, inserted between `self.cache_dir` and `file`.
    /// * `file` - the final file name.
    pub fn cache_path<C, F>(
        &self,
        context: &[C],
        file: F,
    ) -> PathBuf
    where
        C: AsRef<Path>,
        F: AsRef<Path>,
    {
        path_utils::extend_path(&self.cache_dir, context, file)
    }

    /// Get the data path for the given key.
    ///
    /// * Does not check that the path exists.
    /// * Does not initialize the containing directories.
    ///
    /// # Arguments
    /// * `context` - prefix dirs, inserted between `self.data_dir` and `file`.
    /// * `file` - the final file name.
    pub fn data_path<C, F>(
        &self,
        context: &[C],
        file: F,
    ) -> PathBuf
    where
        C: AsRef<Path>,
        F: AsRef<Path>,
    {
        path_utils::extend_path(&self.data_dir, context, file)
    }

    /// Loads a cached file, downloading it first if it does not exist.
    ///
    /// The file name is taken from the last segment of the first url.
    /// Downloads land in a `.partial` sibling and are renamed into place
    /// once complete, so an interrupted download is never served.
    ///
    /// # Arguments
    /// * `context`: cache sub-directories for the file.
    /// * `urls`: mirrors to download the file from.
    /// * `download`: whether a missing file may be downloaded.
    ///
    /// # Errors
    /// * the cached file does not exist and `download` is `false`,
    ///   or the cache is offline.
    /// * the download fails.
    pub fn load_cached_path<C, S>(
        &mut self,
        context: &[C],
        urls: &[S],
        download: bool,
    ) -> anyhow::Result<PathBuf>
    where
        C: AsRef<Path>,
        S: AsRef<str>,
    {
        let urls: Vec<_> = urls.iter().map(|s| s.as_ref()).collect();
        anyhow::ensure!(!urls.is_empty(), "no urls given for cached file");

        let mut dl = Download::new_mirrored(&urls);
        let path = self.cache_path(context, &dl.file_name);

        if path.exists() {
            log::debug!("cache hit: {}", path.display());
            return Ok(path);
        }

        if !download || self.offline {
            anyhow::bail!("cached file not found: {}", path.display());
        }

        let parent = path
            .parent()
            .context("cache path has no parent directory")?;
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;

        let partial = path_utils::partial_path(&path);
        dl.file_name = partial.clone();

        log::info!("downloading {} -> {}", urls[0], path.display());
        for summary in self.downloader.download(&[dl])? {
            summary.with_context(|| format!("failed to download {}", urls[0]))?;
        }

        fs::rename(&partial, &path)
            .with_context(|| format!("failed to move download into {}", path.display()))?;

        Ok(path)
    }
}
