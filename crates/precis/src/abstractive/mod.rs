//! # Abstractive Summarization
//!
//! A sequence-to-sequence model generates the summary. The length ratio
//! scales the generation bounds: at most `1000 * ratio` tokens, at least
//! `250 * ratio` tokens; decoded with 4-beam search and early stopping.

#[cfg(feature = "bart")]
mod bart;

#[cfg(feature = "bart")]
#[doc(inline)]
pub use bart::BartSummarizer;

use crate::PrecisResult;

/// Task prefix prepended to the source text.
pub const SUMMARIZE_PREFIX: &str = "summarize: ";

/// The BART encoder's source token limit.
pub const MAX_INPUT_TOKENS: usize = 1024;

/// Beam width for generation.
pub const NUM_BEAMS: i64 = 4;

/// Scale from length ratio to the maximum generated length.
pub const MAX_LENGTH_SCALE: f64 = 1000.0;

/// Scale from length ratio to the minimum generated length.
pub const MIN_LENGTH_SCALE: f64 = 250.0;

/// Special tags a generator may leave around its decoded output.
const GENERATION_TAGS: &[&str] = &["<s>", "</s>", "<pad>"];

/// Token length bounds for generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationBounds {
    /// The minimum number of generated tokens.
    pub min_length: i64,

    /// The maximum number of generated tokens.
    pub max_length: i64,
}

impl GenerationBounds {
    /// Bounds for a length ratio; both truncate toward zero.
    pub fn for_ratio(ratio: f64) -> Self {
        Self {
            min_length: (MIN_LENGTH_SCALE * ratio) as i64,
            max_length: (MAX_LENGTH_SCALE * ratio) as i64,
        }
    }
}

/// The generator input for `body`.
pub fn summarize_prompt(body: &str) -> String {
    format!("{SUMMARIZE_PREFIX}{body}")
}

/// Remove leading and trailing special tags (`<s>`, `</s>`, `<pad>`) and the
/// whitespace around them from decoded generator output.
///
/// Tags inside the text are left alone.
pub fn strip_generation_tags(output: &str) -> &str {
    let mut text = output.trim();
    loop {
        let before = text.len();
        for tag in GENERATION_TAGS {
            text = text.strip_prefix(tag).unwrap_or(text).trim_start();
            text = text.strip_suffix(tag).unwrap_or(text).trim_end();
        }
        if text.len() == before {
            return text;
        }
    }
}

/// A summarizer which generates new text.
pub trait AbstractiveSummarizer {
    /// Summarize `body` to roughly `ratio` of its length.
    fn summarize(
        &self,
        body: &str,
        ratio: f64,
    ) -> PrecisResult<String>;
}
