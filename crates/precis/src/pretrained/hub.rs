//! # Model Hub Resources

use std::{
    collections::BTreeMap,
    env,
    path::{Path, PathBuf},
};

use crate::{
    PrecisError,
    PrecisResult,
    pretrained::PretrainedModel,
    support::resources::{KeyedResource, ResourceLoader},
};

/// Environment variable key to override the model hub endpoint.
pub const PRECIS_HUB_ENDPOINT: &str = "PRECIS_HUB_ENDPOINT";

/// The default model hub endpoint.
pub const DEFAULT_HUB_ENDPOINT: &str = "https://huggingface.co";

/// The hub endpoint; [`PRECIS_HUB_ENDPOINT`] or [`DEFAULT_HUB_ENDPOINT`].
pub fn hub_endpoint() -> String {
    env::var(PRECIS_HUB_ENDPOINT)
        .ok()
        .filter(|s| !s.is_empty())
        .map(|s| s.trim_end_matches('/').to_string())
        .unwrap_or_else(|| DEFAULT_HUB_ENDPOINT.to_string())
}

impl PretrainedModel {
    /// The download url of `file` in this model's repository.
    pub fn hub_url(
        &self,
        file: &str,
    ) -> String {
        format!("{}/{}/resolve/main/{file}", hub_endpoint(), self.repo)
    }

    /// The cache key for this model's files: `["models", org, name]`.
    pub fn cache_context(&self) -> Vec<String> {
        std::iter::once("models")
            .chain(self.repo.split('/'))
            .map(str::to_string)
            .collect()
    }

    /// The [`KeyedResource`] for one of this model's files.
    pub fn resource(
        &self,
        file: &str,
    ) -> KeyedResource {
        KeyedResource {
            key: self.cache_context(),
            urls: vec![self.hub_url(file)],
        }
    }
}

/// Local paths of a model's fetched files.
#[derive(Debug, Clone)]
pub struct ModelFiles {
    model: &'static PretrainedModel,
    paths: BTreeMap<String, PathBuf>,
}

impl ModelFiles {
    /// Build from explicit paths.
    pub fn new(
        model: &'static PretrainedModel,
        paths: BTreeMap<String, PathBuf>,
    ) -> Self {
        Self { model, paths }
    }

    /// The model these files belong to.
    pub fn model(&self) -> &'static PretrainedModel {
        self.model
    }

    /// The local path of `file`.
    pub fn get(
        &self,
        file: &str,
    ) -> PrecisResult<&Path> {
        self.paths
            .get(file)
            .map(PathBuf::as_path)
            .ok_or_else(|| {
                PrecisError::ResourceNotFound(format!("{} in {}", file, self.model.repo))
            })
    }
}

/// Fetch every file `model` lists through `loader`.
pub fn fetch_model_files(
    model: &'static PretrainedModel,
    loader: &mut dyn ResourceLoader,
) -> PrecisResult<ModelFiles> {
    let mut paths = BTreeMap::new();
    for file in model.files {
        log::debug!("fetching {}/{}", model.repo, file);
        let path = loader.load_resource_path(&model.resource(file))?;
        paths.insert(file.to_string(), path);
    }
    log::info!("loaded {} ({} files)", model.repo, paths.len());
    Ok(ModelFiles::new(model, paths))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serial_test::serial;
    use tempdir::TempDir;

    use super::*;
    use crate::{
        pretrained::{DISTILBART_CNN_12_6, SCIBERT_SCIVOCAB_UNCASED},
        support::resources::LocalDirLoader,
    };

    #[test]
    #[serial]
    fn test_hub_url() {
        unsafe {
            env::remove_var(PRECIS_HUB_ENDPOINT);
        }
        assert_eq!(
            DISTILBART_CNN_12_6.hub_url("rust_model.ot"),
            "https://huggingface.co/sshleifer/distilbart-cnn-12-6/resolve/main/rust_model.ot"
        );

        unsafe {
            env::set_var(PRECIS_HUB_ENDPOINT, "http://mirror.local/");
        }
        assert_eq!(
            SCIBERT_SCIVOCAB_UNCASED.hub_url("vocab.txt"),
            "http://mirror.local/allenai/scibert_scivocab_uncased/resolve/main/vocab.txt"
        );
        unsafe {
            env::remove_var(PRECIS_HUB_ENDPOINT);
        }
    }

    #[test]
    fn test_cache_context() {
        assert_eq!(
            SCIBERT_SCIVOCAB_UNCASED.cache_context(),
            vec!["models", "allenai", "scibert_scivocab_uncased"]
        );
    }

    #[test]
    #[serial]
    fn test_fetch_model_files() {
        let dir = TempDir::new("precis-hub").unwrap();
        for file in SCIBERT_SCIVOCAB_UNCASED.files {
            fs::write(dir.path().join(file), b"x").unwrap();
        }

        let mut loader = LocalDirLoader::new(dir.path());
        let files = fetch_model_files(&SCIBERT_SCIVOCAB_UNCASED, &mut loader).unwrap();
        assert_eq!(files.model().name, "scibert");
        assert_eq!(files.get("vocab.txt").unwrap(), dir.path().join("vocab.txt"));
        assert!(files.get("merges.txt").is_err());
    }

    #[test]
    #[serial]
    fn test_fetch_model_files_missing() {
        let dir = TempDir::new("precis-hub").unwrap();
        let mut loader = LocalDirLoader::new(dir.path());
        assert!(matches!(
            fetch_model_files(&DISTILBART_CNN_12_6, &mut loader),
            Err(PrecisError::ResourceNotFound(_))
        ));
    }
}
