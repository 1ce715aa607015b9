use precis::{
    extractive::{BertEmbedder, ExtractiveOptions, ExtractiveSummarizer},
    params::{LengthPreset, SummaryParams},
    pretrained::{EXTRACTIVE_MODELS, PretrainedModel, fetch_model_files, resolve_model},
};

use crate::{
    commands::DEFAULT_LOG_LEVEL,
    disk_cache::DiskCacheArgs,
    input_output::{InputArgs, OutputArgs},
    logging::LogArgs,
    model_selector::{ListModelsArgs, extractive_model, length_preset},
};

/// Summarize a text by selecting its most representative sentences.
#[derive(clap::Parser, Debug)]
#[command(name = "ext-summarize", version)]
pub struct ExtSummarizeArgs {
    /// Model to embed sentences with.
    #[arg(short, long, value_parser = extractive_model)]
    model: Option<&'static PretrainedModel>,

    /// Summary length: short, medium or long.
    #[arg(short, long, value_parser = length_preset)]
    length: Option<LengthPreset>,

    /// Do not force the first sentence into the summary.
    #[arg(long)]
    no_first: bool,

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

impl ExtSummarizeArgs {
    /// The validated parameters; absent flags take the table default model and `medium`.
    pub fn params(&self) -> Result<SummaryParams, Box<dyn std::error::Error>> {
        let model = match self.model {
            Some(model) => model,
            None => resolve_model(EXTRACTIVE_MODELS, None)?,
        };
        Ok(SummaryParams::new(
            self.input.read_body()?,
            model,
            self.length.unwrap_or_default(),
        ))
    }

    /// The summarizer options.
    pub fn options(&self) -> ExtractiveOptions {
        ExtractiveOptions {
            use_first: !self.no_first,
            ..Default::default()
        }
    }

    /// Summarize the input and write the summary.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(DEFAULT_LOG_LEVEL)?;

        if self.list.print_if_requested(EXTRACTIVE_MODELS) {
            return Ok(());
        }

        let params = self.params()?;
        let options = self.options();

        // Nothing to select from; skip loading the encoder.
        if options.candidate_sentences(&params.body).is_empty() {
            log::warn!(
                "no sentences between {} and {} characters",
                options.min_length,
                options.max_length
            );
            return self.output.write_line("");
        }
        log::info!("model: {} ratio: {}", params.model.repo, params.ratio);

        let mut disk_cache = self.disk_cache.init_disk_cache()?;
        let files = fetch_model_files(params.model, &mut disk_cache)?;
        let summarizer =
            ExtractiveSummarizer::new(BertEmbedder::new(&files)?).with_options(options);

        let summary = summarizer.summarize(&params.body, params.ratio)?;
        self.output.write_line(&summary)
    }
}
