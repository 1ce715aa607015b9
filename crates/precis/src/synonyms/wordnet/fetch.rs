//! # WordNet Download
//!
//! The database is published as a zip archive on the NLTK data mirror.
//! It is downloaded into the disk cache and unpacked under the data
//! directory on first use. Unpacking goes to a `.partial` sibling which is
//! renamed into place once every database file is written.

use std::{
    fs::{self, File},
    io,
    path::{Path, PathBuf},
};

use crate::{
    PrecisError,
    PrecisResult,
    disk_cache::{PrecisDiskCache, path_utils},
    support::resources::{KeyedResource, ResourceLoader},
    synonyms::wordnet::{database_files, is_database_dir},
};

/// The WordNet 3.0 archive on the NLTK data mirror.
pub const WORDNET_ZIP_URL: &str =
    "https://raw.githubusercontent.com/nltk/nltk_data/gh-pages/packages/corpora/wordnet.zip";

/// The data sub-directory the database is unpacked into.
pub const WORDNET_DATA_DIR: &str = "wordnet";

/// The cached WordNet archive.
pub fn wordnet_archive() -> KeyedResource {
    KeyedResource {
        key: vec!["corpora".to_string()],
        urls: vec![WORDNET_ZIP_URL.to_string()],
    }
}

/// Unpack the database files of `archive` into `target`, flattening any
/// directory prefix. Other archive entries are skipped.
///
/// Returns the number of files written.
pub fn extract_database(
    archive: &Path,
    target: &Path,
) -> PrecisResult<usize> {
    let wanted = database_files();
    let mut zip = zip::ZipArchive::new(File::open(archive)?).map_err(PrecisError::external)?;
    fs::create_dir_all(target)?;

    let mut written = 0;
    for idx in 0..zip.len() {
        let mut entry = zip.by_index(idx).map_err(PrecisError::external)?;
        if !entry.is_file() {
            continue;
        }
        let Some(name) = entry
            .enclosed_name()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        else {
            continue;
        };
        if !wanted.contains(&name) {
            continue;
        }

        let mut out = File::create(target.join(&name))?;
        io::copy(&mut entry, &mut out)?;
        written += 1;
    }

    log::debug!("extracted {written} wordnet files into {}", target.display());
    Ok(written)
}

/// Unpack the database files of `archive` into `target`.
///
/// The files are written to `{target}.partial` first; `target` only appears
/// once the database is complete. A stale partial directory is discarded.
pub fn unpack_database(
    archive: &Path,
    target: &Path,
) -> PrecisResult<()> {
    let staging = path_utils::partial_path(target);
    if staging.exists() {
        log::warn!("discarding incomplete unpack {}", staging.display());
        fs::remove_dir_all(&staging)?;
    }

    extract_database(archive, &staging)?;
    if !is_database_dir(&staging) {
        fs::remove_dir_all(&staging)?;
        return Err(PrecisError::ResourceNotFound(format!(
            "wordnet database files in {}",
            archive.display()
        )));
    }

    if target.exists() {
        fs::remove_dir_all(target)?;
    }
    fs::rename(&staging, target)?;
    Ok(())
}

/// The unpacked database directory, downloading and unpacking it if needed.
pub fn ensure_wordnet(cache: &mut PrecisDiskCache) -> PrecisResult<PathBuf> {
    let target = cache.data_path::<&str, _>(&[], WORDNET_DATA_DIR);
    if is_database_dir(&target) {
        return Ok(target);
    }

    let archive = cache.load_resource_path(&wordnet_archive())?;
    log::info!("unpacking {} into {}", archive.display(), target.display());
    unpack_database(&archive, &target)?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempdir::TempDir;
    use zip::write::SimpleFileOptions;

    use super::*;
    use crate::{
        disk_cache::PrecisDiskCacheOptions,
        synonyms::{synonyms, wordnet::WordNet},
    };

    fn offline_cache(dir: &Path) -> PrecisDiskCache {
        PrecisDiskCache::new(
            PrecisDiskCacheOptions::default()
                .with_cache_dir(Some(dir.join("cache")))
                .with_data_dir(Some(dir.join("data")))
                .with_offline(true),
        )
        .unwrap()
    }

    /// Zip the fixture database under a `wordnet/` prefix, plus a stray file.
    fn fixture_archive(path: &Path) {
        let src = TempDir::new("precis-wordnet-src").unwrap();
        crate::synonyms::wordnet::testing::write_fixture(src.path()).unwrap();

        let mut zip = zip::ZipWriter::new(File::create(path).unwrap());
        let options = SimpleFileOptions::default();
        zip.add_directory("wordnet/", options).unwrap();
        for name in database_files() {
            zip.start_file(format!("wordnet/{name}"), options).unwrap();
            zip.write_all(&fs::read(src.path().join(&name)).unwrap())
                .unwrap();
        }
        zip.start_file("wordnet/README", options).unwrap();
        zip.write_all(b"readme").unwrap();
        zip.finish().unwrap();
    }

    #[test]
    fn test_extract_database() {
        let dir = TempDir::new("precis-wordnet").unwrap();
        let archive = dir.path().join("wordnet.zip");
        fixture_archive(&archive);

        let target = dir.path().join("out");
        assert_eq!(extract_database(&archive, &target).unwrap(), 12);
        assert!(is_database_dir(&target));
        assert!(!target.join("README").exists());
        assert!(WordNet::open(&target).is_ok());
    }

    #[test]
    fn test_ensure_wordnet_from_cached_archive() {
        let dir = TempDir::new("precis-wordnet").unwrap();
        let mut cache = offline_cache(dir.path());

        assert!(ensure_wordnet(&mut cache).is_err());

        let archive = cache.cache_path(&["corpora"], "wordnet.zip");
        fs::create_dir_all(archive.parent().unwrap()).unwrap();
        fixture_archive(&archive);

        let target = ensure_wordnet(&mut cache).unwrap();
        assert_eq!(target, dir.path().join("data").join("wordnet"));
        assert!(is_database_dir(&target));
    }

    #[test]
    fn test_ensure_wordnet_discards_interrupted_unpack() {
        let dir = TempDir::new("precis-wordnet").unwrap();
        let mut cache = offline_cache(dir.path());

        let archive = cache.cache_path(&["corpora"], "wordnet.zip");
        fs::create_dir_all(archive.parent().unwrap()).unwrap();
        fixture_archive(&archive);

        // An unpack cut off halfway through data.noun.
        let target = dir.path().join("data").join("wordnet");
        let staging = path_utils::partial_path(&target);
        crate::synonyms::wordnet::testing::write_fixture(&staging).unwrap();
        let noun = fs::read(staging.join("data.noun")).unwrap();
        fs::write(staging.join("data.noun"), &noun[..noun.len() / 2]).unwrap();
        assert!(!is_database_dir(&target));

        assert_eq!(ensure_wordnet(&mut cache).unwrap(), target);
        assert!(!staging.exists());
        assert_eq!(fs::read(target.join("data.noun")).unwrap().len(), noun.len());

        let wordnet = WordNet::open(&target).unwrap();
        assert!(
            synonyms(&wordnet, "model", None)
                .unwrap()
                .contains(&"theoretical_account".to_string())
        );
    }

    #[test]
    fn test_unpack_replaces_incomplete_target() {
        let dir = TempDir::new("precis-wordnet").unwrap();
        let archive = dir.path().join("wordnet.zip");
        fixture_archive(&archive);

        let target = dir.path().join("wordnet");
        fs::create_dir_all(&target).unwrap();
        fs::write(target.join("data.noun"), "truncated").unwrap();

        unpack_database(&archive, &target).unwrap();
        assert!(is_database_dir(&target));
        assert!(WordNet::open(&target).is_ok());
        assert!(!path_utils::partial_path(&target).exists());
    }

    #[test]
    fn test_unpack_without_database_leaves_nothing() {
        let dir = TempDir::new("precis-wordnet").unwrap();
        let archive = dir.path().join("other.zip");
        let mut zip = zip::ZipWriter::new(File::create(&archive).unwrap());
        zip.start_file("README", SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"readme").unwrap();
        zip.finish().unwrap();

        let target = dir.path().join("wordnet");
        assert!(matches!(
            unpack_database(&archive, &target),
            Err(PrecisError::ResourceNotFound(_))
        ));
        assert!(!target.exists());
        assert!(!path_utils::partial_path(&target).exists());
    }
}
