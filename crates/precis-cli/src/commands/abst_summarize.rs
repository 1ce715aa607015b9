use precis::{
    abstractive::{AbstractiveSummarizer, BartSummarizer},
    params::{LengthPreset, SummaryParams},
    pretrained::{ABSTRACTIVE_MODELS, PretrainedModel, fetch_model_files, resolve_model},
};

use crate::{
    commands::DEFAULT_LOG_LEVEL,
    disk_cache::DiskCacheArgs,
    input_output::{InputArgs, OutputArgs},
    logging::LogArgs,
    model_selector::{ListModelsArgs, abstractive_model, length_preset},
};

/// Generate a summary of a text with a sequence-to-sequence model.
#[derive(clap::Parser, Debug)]
#[command(name = "abst-summarize", version)]
pub struct AbstSummarizeArgs {
    /// Model to summarize with.
    #[arg(short, long, value_parser = abstractive_model)]
    model: Option<&'static PretrainedModel>,

    /// Summary length: short, medium or long.
    #[arg(short, long, value_parser = length_preset)]
    length: Option<LengthPreset>,

    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,

    #[command(flatten)]
    list: ListModelsArgs,

    #[command(flatten)]
    disk_cache: DiskCacheArgs,

    #[clap(flatten)]
    logging: LogArgs,
}

impl AbstSummarizeArgs {
    /// The validated parameters; absent flags take the table default model and `medium`.
    pub fn params(&self) -> Result<SummaryParams, Box<dyn std::error::Error>> {
        let model = match self.model {
            Some(model) => model,
            None => resolve_model(ABSTRACTIVE_MODELS, None)?,
        };
        Ok(SummaryParams::new(
            self.input.read_body()?,
            model,
            self.length.unwrap_or_default(),
        ))
    }

    /// Summarize the input and write the summary.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(DEFAULT_LOG_LEVEL)?;

        if self.list.print_if_requested(ABSTRACTIVE_MODELS) {
            return Ok(());
        }

        let params = self.params()?;
        log::info!("model: {} ratio: {}", params.model.repo, params.ratio);

        let mut disk_cache = self.disk_cache.init_disk_cache()?;
        let files = fetch_model_files(params.model, &mut disk_cache)?;
        let summarizer = BartSummarizer::new(files)?;

        let summary = summarizer.summarize(&params.body, params.ratio)?;
        self.output.write_line(&summary)
    }
}
