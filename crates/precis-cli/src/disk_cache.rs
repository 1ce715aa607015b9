use std::path::PathBuf;

use precis::disk_cache::{PrecisDiskCache, PrecisDiskCacheOptions};

/// Disk cache argument group.
#[derive(clap::Args, Debug)]
pub struct DiskCacheArgs {
    /// Cache directory.
    #[arg(long, default_value = None)]
    cache_dir: Option<PathBuf>,

    /// Data directory.
    #[arg(long, default_value = None)]
    data_dir: Option<PathBuf>,

    /// Only use files already on disk.
    #[arg(long)]
    offline: bool,
}

impl DiskCacheArgs {
    /// Initialize the disk cache.
    pub fn init_disk_cache(&self) -> Result<PrecisDiskCache, Box<dyn std::error::Error>> {
        let options = PrecisDiskCacheOptions::default()
            .with_cache_dir(self.cache_dir.as_ref())
            .with_data_dir(self.data_dir.as_ref())
            .with_offline(self.offline);

        Ok(PrecisDiskCache::new(options)?)
    }
}
