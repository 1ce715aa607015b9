//! # Summary Parameters
//!
//! The parameter record a summarizer runs with: the text, the selected
//! model, and the length ratio picked from [`LengthPreset`].

use core::{fmt, str::FromStr};

use strum::IntoEnumIterator;

use crate::{
    PrecisError,
    PrecisResult,
    pretrained::{PretrainedModel, resolve_model},
};

/// Named summary lengths.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum LengthPreset {
    /// 20% of the source.
    Short,

    /// 40% of the source.
    #[default]
    Medium,

    /// 60% of the source.
    Long,
}

impl LengthPreset {
    /// The keyword for this preset.
    pub fn name(&self) -> &'static str {
        match self {
            LengthPreset::Short => "short",
            LengthPreset::Medium => "medium",
            LengthPreset::Long => "long",
        }
    }

    /// The ratio of the source kept in the summary.
    pub fn ratio(&self) -> f64 {
        match self {
            LengthPreset::Short => 0.2,
            LengthPreset::Medium => 0.4,
            LengthPreset::Long => 0.6,
        }
    }

    /// Parse an optional keyword; `None` is the default preset.
    pub fn resolve(length: Option<&str>) -> PrecisResult<Self> {
        length.map_or_else(|| Ok(LengthPreset::default()), str::parse)
    }

    /// All preset keywords, in order.
    pub fn names() -> Vec<String> {
        LengthPreset::iter().map(|p| p.name().to_string()).collect()
    }
}

impl fmt::Display for LengthPreset {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LengthPreset {
    type Err = PrecisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LengthPreset::iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| PrecisError::UnsupportedLength {
                length: s.to_string(),
                available: LengthPreset::names(),
            })
    }
}

/// Resolve an optional length keyword to a ratio; `None` is [`LengthPreset::default`].
pub fn resolve_length(length: Option<&str>) -> PrecisResult<f64> {
    Ok(LengthPreset::resolve(length)?.ratio())
}

/// The parameters of one summarization run.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryParams {
    /// The text to summarize.
    pub body: String,

    /// The model to summarize with.
    pub model: &'static PretrainedModel,

    /// The ratio of the source to keep.
    pub ratio: f64,
}

impl SummaryParams {
    /// Build from already validated values.
    pub fn new(
        body: impl Into<String>,
        model: &'static PretrainedModel,
        length: LengthPreset,
    ) -> Self {
        Self {
            body: body.into(),
            model,
            ratio: length.ratio(),
        }
    }

    /// Build from raw flag values, validating them against `table` and the length presets.
    ///
    /// Absent flags take the defaults: the first model in `table`, and `medium`.
    pub fn from_flags(
        body: impl Into<String>,
        model: Option<&str>,
        length: Option<&str>,
        table: &'static [PretrainedModel],
    ) -> PrecisResult<Self> {
        let model = resolve_model(table, model)?;
        let length = LengthPreset::resolve(length)?;
        Ok(Self::new(body, model, length))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pretrained::{ABSTRACTIVE_MODELS, EXTRACTIVE_MODELS};

    #[test]
    fn test_length_table() {
        assert_eq!("short".parse::<LengthPreset>().unwrap().ratio(), 0.2);
        assert_eq!("medium".parse::<LengthPreset>().unwrap().ratio(), 0.4);
        assert_eq!("long".parse::<LengthPreset>().unwrap().ratio(), 0.6);
        assert_eq!(LengthPreset::default(), LengthPreset::Medium);
        assert_eq!(LengthPreset::Long.to_string(), "long");
    }

    #[test]
    fn test_unknown_length_lists_choices() {
        let err = "Short".parse::<LengthPreset>().unwrap_err();
        match &err {
            PrecisError::UnsupportedLength { length, available } => {
                assert_eq!(length, "Short");
                assert_eq!(available, &["short", "medium", "long"]);
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(err.to_string().contains("short, medium, long"));
    }

    #[test]
    fn test_resolve_preset() {
        assert_eq!(LengthPreset::resolve(None).unwrap(), LengthPreset::Medium);
        assert_eq!(LengthPreset::resolve(Some("long")).unwrap(), LengthPreset::Long);
        assert!(matches!(
            LengthPreset::resolve(Some("huge")),
            Err(PrecisError::UnsupportedLength { .. })
        ));
    }

    #[test]
    fn test_resolve_length() {
        assert_eq!(resolve_length(None).unwrap(), 0.4);
        assert_eq!(resolve_length(Some("short")).unwrap(), 0.2);
        assert!(resolve_length(Some("")).is_err());
    }

    #[test]
    fn test_from_flags_defaults() {
        let params = SummaryParams::from_flags("text", None, None, ABSTRACTIVE_MODELS).unwrap();
        assert_eq!(params.body, "text");
        assert_eq!(params.model.name, "distilbart");
        assert_eq!(params.ratio, 0.4);
    }

    #[test]
    fn test_from_flags_explicit() {
        let params =
            SummaryParams::from_flags("text", Some("scibert"), Some("long"), EXTRACTIVE_MODELS)
                .unwrap();
        assert_eq!(params.model.repo, "allenai/scibert_scivocab_uncased");
        assert_eq!(params.ratio, 0.6);

        assert_eq!(
            params,
            SummaryParams::new("text", &EXTRACTIVE_MODELS[0], LengthPreset::Long)
        );
    }

    #[test]
    fn test_from_flags_rejects() {
        assert!(matches!(
            SummaryParams::from_flags("text", Some("scibert"), None, ABSTRACTIVE_MODELS),
            Err(PrecisError::UnsupportedModel { .. })
        ));
        assert!(matches!(
            SummaryParams::from_flags("text", None, Some("huge"), ABSTRACTIVE_MODELS),
            Err(PrecisError::UnsupportedLength { .. })
        ));
    }
}
