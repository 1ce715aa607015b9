//! # Pretrained Model Registry
//!
//! Each summarizer selects its model from a small static table,
//! keyed by a short name and pointing at a hub repository.
//!
//! ```rust,no_run
//! use precis::{
//!     disk_cache::PrecisDiskCache,
//!     pretrained::{EXTRACTIVE_MODELS, fetch_model_files, resolve_model},
//! };
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let model = resolve_model(EXTRACTIVE_MODELS, Some("scibert"))?;
//!     let mut disk_cache = PrecisDiskCache::new(Default::default())?;
//!     let files = fetch_model_files(model, &mut disk_cache)?;
//!     println!("{}", files.get("vocab.txt")?.display());
//!     Ok(())
//! }
//! ```

mod hub;

#[doc(inline)]
pub use hub::*;

use crate::{PrecisError, PrecisResult};

/// What a pretrained model is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum ModelTask {
    /// Sequence-to-sequence summary generation.
    #[strum(serialize = "abstractive")]
    Abstractive,

    /// Sentence embedding for summary selection.
    #[strum(serialize = "extractive")]
    Extractive,
}

/// A pretrained model table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PretrainedModel {
    /// The short name accepted on the command line.
    pub name: &'static str,

    /// The hub repository id, `{organization}/{model}`.
    pub repo: &'static str,

    /// The task the model serves.
    pub task: ModelTask,

    /// A human readable description.
    pub description: &'static str,

    /// Files fetched from the repository to load the model.
    pub files: &'static [&'static str],
}

/// `sshleifer/distilbart-cnn-12-6`; BART distilled on CNN/DailyMail.
pub const DISTILBART_CNN_12_6: PretrainedModel = PretrainedModel {
    name: "distilbart",
    repo: "sshleifer/distilbart-cnn-12-6",
    task: ModelTask::Abstractive,
    description: "DistilBART (12 encoder / 6 decoder layers) fine-tuned on CNN/DailyMail",
    files: &["config.json", "vocab.json", "merges.txt", "rust_model.ot"],
};

/// `allenai/scibert_scivocab_uncased`; BERT pretrained on scientific text.
pub const SCIBERT_SCIVOCAB_UNCASED: PretrainedModel = PretrainedModel {
    name: "scibert",
    repo: "allenai/scibert_scivocab_uncased",
    task: ModelTask::Extractive,
    description: "SciBERT with its scientific vocabulary, uncased",
    files: &["config.json", "vocab.txt", "pytorch_model.bin"],
};

/// Models available for abstractive summarization; the first is the default.
pub const ABSTRACTIVE_MODELS: &[PretrainedModel] = &[DISTILBART_CNN_12_6];

/// Models available for extractive summarization; the first is the default.
pub const EXTRACTIVE_MODELS: &[PretrainedModel] = &[SCIBERT_SCIVOCAB_UNCASED];

/// The names in a model table, in table order.
pub fn model_names(table: &[PretrainedModel]) -> Vec<String> {
    table.iter().map(|m| m.name.to_string()).collect()
}

/// Select a model from a table.
///
/// ## Returns
/// * `Ok(table[0])` - when `name` is `None`.
/// * `Ok(model)` - when `name` exactly matches an entry.
/// * `Err(PrecisError::UnsupportedModel)` - listing the table's names otherwise.
pub fn resolve_model(
    table: &'static [PretrainedModel],
    name: Option<&str>,
) -> PrecisResult<&'static PretrainedModel> {
    let found = match name {
        None => table.first(),
        Some(name) => table.iter().find(|m| m.name == name),
    };

    found.ok_or_else(|| PrecisError::UnsupportedModel {
        name: name.unwrap_or_default().to_string(),
        available: model_names(table),
    })
}

/// Render a model table listing, one model per entry.
pub fn list_models(table: &[PretrainedModel]) -> Vec<String> {
    table
        .iter()
        .enumerate()
        .map(|(idx, m)| {
            format!(
                "\"{}\"{} - {}\n  * {}",
                m.name,
                if idx == 0 { " (default)" } else { "" },
                m.repo,
                m.description
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(
            resolve_model(ABSTRACTIVE_MODELS, None).unwrap().repo,
            "sshleifer/distilbart-cnn-12-6"
        );
        assert_eq!(
            resolve_model(EXTRACTIVE_MODELS, None).unwrap().repo,
            "allenai/scibert_scivocab_uncased"
        );
    }

    #[test]
    fn test_resolve_by_name() {
        let model = resolve_model(ABSTRACTIVE_MODELS, Some("distilbart")).unwrap();
        assert_eq!(model, &DISTILBART_CNN_12_6);
        assert_eq!(model.task, ModelTask::Abstractive);

        let model = resolve_model(EXTRACTIVE_MODELS, Some("scibert")).unwrap();
        assert_eq!(model.task, ModelTask::Extractive);
    }

    #[test]
    fn test_unknown_name_lists_choices() {
        match resolve_model(EXTRACTIVE_MODELS, Some("distilbart")) {
            Err(PrecisError::UnsupportedModel { name, available }) => {
                assert_eq!(name, "distilbart");
                assert_eq!(available, vec!["scibert".to_string()]);
            }
            other => panic!("unexpected: {other:?}"),
        }

        // Case sensitive.
        assert!(resolve_model(ABSTRACTIVE_MODELS, Some("DistilBART")).is_err());
    }

    #[test]
    fn test_empty_table() {
        const EMPTY: &[PretrainedModel] = &[];
        assert!(resolve_model(EMPTY, None).is_err());
    }

    #[test]
    fn test_list_models() {
        let listing = list_models(ABSTRACTIVE_MODELS);
        assert_eq!(listing.len(), 1);
        assert!(listing[0].starts_with("\"distilbart\" (default) - sshleifer/distilbart-cnn-12-6"));
    }
}
