use precis::{
    PrecisError,
    params::LengthPreset,
    pretrained::{
        ABSTRACTIVE_MODELS,
        EXTRACTIVE_MODELS,
        PretrainedModel,
        list_models,
        resolve_model,
    },
};

/// Parse `-m` for an abstractive summarizer.
pub fn abstractive_model(name: &str) -> Result<&'static PretrainedModel, PrecisError> {
    resolve_model(ABSTRACTIVE_MODELS, Some(name))
}

/// Parse `-m` for an extractive summarizer.
pub fn extractive_model(name: &str) -> Result<&'static PretrainedModel, PrecisError> {
    resolve_model(EXTRACTIVE_MODELS, Some(name))
}

/// Parse `-l`.
pub fn length_preset(length: &str) -> Result<LengthPreset, PrecisError> {
    length.parse()
}

/// Model listing arg group.
#[derive(clap::Args, Debug)]
pub struct ListModelsArgs {
    /// List the available models and exit.
    #[arg(long)]
    pub list_models: bool,
}

impl ListModelsArgs {
    /// Print `table` if `--list-models` was given; returns whether it was.
    pub fn print_if_requested(
        &self,
        table: &[PretrainedModel],
    ) -> bool {
        if self.list_models {
            for entry in list_models(table) {
                println!("{entry}");
            }
        }
        self.list_models
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsers() {
        assert_eq!(abstractive_model("distilbart").unwrap().name, "distilbart");
        assert_eq!(extractive_model("scibert").unwrap().name, "scibert");
        assert!(abstractive_model("scibert").is_err());
        assert_eq!(length_preset("short").unwrap(), LengthPreset::Short);

        let err = length_preset("tiny").unwrap_err().to_string();
        assert!(err.contains("short, medium, long"));
    }
}
