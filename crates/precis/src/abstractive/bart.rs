//! # BART Summarizer
//!
//! Runs a BART-family generator through `rust-bert`, from model files
//! fetched by [`crate::pretrained::fetch_model_files`].

use rust_bert::{
    pipelines::{
        common::{ModelResource, ModelType},
        summarization::{SummarizationConfig, SummarizationModel},
    },
    resources::LocalResource,
};

use crate::{
    PrecisError,
    PrecisResult,
    abstractive::{
        AbstractiveSummarizer,
        GenerationBounds,
        NUM_BEAMS,
        strip_generation_tags,
        summarize_prompt,
    },
    pretrained::{ModelFiles, ModelTask},
};

fn local_resource(
    files: &ModelFiles,
    name: &str,
) -> PrecisResult<Box<LocalResource>> {
    Ok(Box::new(LocalResource {
        local_path: files.get(name)?.to_path_buf(),
    }))
}

/// Abstractive summarizer over a BART checkpoint (`rust_model.ot`).
///
/// Generation bounds are part of the `rust-bert` pipeline configuration,
/// so the pipeline is built per [`AbstractiveSummarizer::summarize`] call.
pub struct BartSummarizer {
    files: ModelFiles,
}

impl BartSummarizer {
    /// Create a summarizer over fetched model files.
    pub fn new(files: ModelFiles) -> PrecisResult<Self> {
        if files.model().task != ModelTask::Abstractive {
            return Err(PrecisError::UnsupportedModel {
                name: files.model().name.to_string(),
                available: crate::pretrained::model_names(crate::pretrained::ABSTRACTIVE_MODELS),
            });
        }
        Ok(Self { files })
    }

    fn config(
        &self,
        bounds: GenerationBounds,
    ) -> PrecisResult<SummarizationConfig> {
        Ok(SummarizationConfig {
            model_type: ModelType::Bart,
            model_resource: ModelResource::Torch(local_resource(&self.files, "rust_model.ot")?),
            config_resource: local_resource(&self.files, "config.json")?,
            vocab_resource: local_resource(&self.files, "vocab.json")?,
            merges_resource: Some(local_resource(&self.files, "merges.txt")?),
            num_beams: NUM_BEAMS,
            early_stopping: true,
            min_length: bounds.min_length,
            max_length: Some(bounds.max_length),
            ..Default::default()
        })
    }
}

impl AbstractiveSummarizer for BartSummarizer {
    fn summarize(
        &self,
        body: &str,
        ratio: f64,
    ) -> PrecisResult<String> {
        let bounds = GenerationBounds::for_ratio(ratio);
        log::debug!(
            "generating with {} beams, length {}..={}",
            NUM_BEAMS,
            bounds.min_length,
            bounds.max_length
        );

        let model = SummarizationModel::new(self.config(bounds)?).map_err(PrecisError::external)?;

        let prompt = summarize_prompt(body);
        let output = model
            .summarize(&[prompt.as_str()])
            .map_err(PrecisError::external)?
            .pop()
            .unwrap_or_default();

        Ok(strip_generation_tags(&output).to_string())
    }
}
