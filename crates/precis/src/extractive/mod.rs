//! # Extractive Summarization
//!
//! Sentences are embedded, clustered with k-means, and the sentence nearest
//! each centroid is kept. The summary is those sentences in source order,
//! joined by single spaces.
//!
//! ## Pipeline
//! 1. [`split_sentences`], then [`filter_sentences`] by character length.
//! 2. `k = max(floor(n * ratio), 1)` clusters over the sentence embeddings.
//! 3. For each centroid, the closest sentence not already chosen.
//! 4. The first sentence is always included when `use_first` is set.

pub mod kmeans;

#[cfg(feature = "bert")]
mod bert;

#[cfg(feature = "bert")]
#[doc(inline)]
pub use bert::{BertEmbedder, CONVERTED_WEIGHTS_FILE, CheckpointFormat};
#[doc(inline)]
pub use kmeans::{KMeans, KMeansOptions};

use crate::{
    PrecisResult,
    text::{filter_sentences, split_sentences},
};

/// Sentences with fewer characters are dropped.
pub const MIN_SENTENCE_LENGTH: usize = 40;

/// Sentences with more characters are dropped.
pub const MAX_SENTENCE_LENGTH: usize = 600;

/// The default clustering seed.
pub const DEFAULT_SEED: u64 = 12345;

/// Maps a sentence to a fixed-width vector.
pub trait SentenceEmbedder {
    /// Embed one sentence.
    fn embed(
        &self,
        sentence: &str,
    ) -> PrecisResult<Vec<f32>>;

    /// Embed every sentence, in order.
    fn embed_all(
        &self,
        sentences: &[String],
    ) -> PrecisResult<Vec<Vec<f32>>> {
        sentences.iter().map(|s| self.embed(s)).collect()
    }
}

impl<E: SentenceEmbedder + ?Sized> SentenceEmbedder for Box<E> {
    fn embed(
        &self,
        sentence: &str,
    ) -> PrecisResult<Vec<f32>> {
        (**self).embed(sentence)
    }
}

/// Options for [`ExtractiveSummarizer`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractiveOptions {
    /// Minimum sentence length, exclusive.
    pub min_length: usize,

    /// Maximum sentence length, exclusive.
    pub max_length: usize,

    /// Always keep the first sentence.
    pub use_first: bool,

    /// Clustering seed.
    pub seed: u64,
}

impl Default for ExtractiveOptions {
    fn default() -> Self {
        Self {
            min_length: MIN_SENTENCE_LENGTH,
            max_length: MAX_SENTENCE_LENGTH,
            use_first: true,
            seed: DEFAULT_SEED,
        }
    }
}

impl ExtractiveOptions {
    /// The sentences of `body` which survive the length filter.
    pub fn candidate_sentences(
        &self,
        body: &str,
    ) -> Vec<String> {
        filter_sentences(split_sentences(body), self.min_length, self.max_length)
    }
}

/// The number of clusters for `n` sentences at `ratio`; at least 1, at most `n`.
pub fn cluster_count(
    n: usize,
    ratio: f64,
) -> usize {
    ((n as f64 * ratio) as usize).clamp(1, n.max(1))
}

/// Summarizes by selecting representative source sentences.
pub struct ExtractiveSummarizer<E> {
    embedder: E,
    options: ExtractiveOptions,
}

impl<E: SentenceEmbedder> ExtractiveSummarizer<E> {
    /// Create a summarizer with default options.
    pub fn new(embedder: E) -> Self {
        Self {
            embedder,
            options: ExtractiveOptions::default(),
        }
    }

    /// Replace the options.
    pub fn with_options(
        mut self,
        options: ExtractiveOptions,
    ) -> Self {
        self.options = options;
        self
    }

    /// The options.
    pub fn options(&self) -> &ExtractiveOptions {
        &self.options
    }

    /// The sentences of `body` which survive the length filter.
    pub fn candidate_sentences(
        &self,
        body: &str,
    ) -> Vec<String> {
        self.options.candidate_sentences(body)
    }

    /// Indices of the sentences to keep, ascending.
    pub fn select(
        &self,
        sentences: &[String],
        ratio: f64,
    ) -> PrecisResult<Vec<usize>> {
        if sentences.is_empty() {
            return Ok(Vec::new());
        }

        let k = cluster_count(sentences.len(), ratio);
        let embeddings = self.embedder.embed_all(sentences)?;
        let km = KMeans::fit(
            &embeddings,
            &KMeansOptions::new(k).with_seed(self.options.seed),
        )?;

        let mut chosen = km.closest_points(&embeddings);
        chosen.sort_unstable();
        if self.options.use_first && chosen.first() != Some(&0) {
            chosen.insert(0, 0);
        }
        log::debug!(
            "selected {} of {} sentences (k={k})",
            chosen.len(),
            sentences.len()
        );
        Ok(chosen)
    }

    /// Summarize `body`, keeping roughly `ratio` of its sentences.
    ///
    /// Returns the empty string when no sentence passes the length filter.
    pub fn summarize(
        &self,
        body: &str,
        ratio: f64,
    ) -> PrecisResult<String> {
        let sentences = self.candidate_sentences(body);
        let chosen = self.select(&sentences, ratio)?;
        Ok(chosen
            .into_iter()
            .map(|idx| sentences[idx].as_str())
            .collect::<Vec<_>>()
            .join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Embeds by topic keyword, so clusters are known in advance.
    struct TopicEmbedder;

    impl SentenceEmbedder for TopicEmbedder {
        fn embed(
            &self,
            sentence: &str,
        ) -> PrecisResult<Vec<f32>> {
            let len = sentence.len() as f32 / 1000.0;
            Ok(if sentence.contains("protein") {
                vec![10.0 + len, 0.0]
            } else if sentence.contains("galaxy") {
                vec![0.0, 10.0 + len]
            } else {
                vec![len, len]
            })
        }
    }

    fn body() -> String {
        [
            "This introduction sentence is long enough to be kept around.",
            "The protein folds into a stable shape under mild conditions.",
            "Each protein chain was measured twice in the folding assay.",
            "The galaxy rotates faster than its visible mass would predict.",
            "A second galaxy survey confirmed the rotation curve anomaly.",
            "Short one.",
        ]
        .join(" ")
    }

    #[test]
    fn test_cluster_count() {
        assert_eq!(cluster_count(10, 0.4), 4);
        assert_eq!(cluster_count(2, 0.2), 1);
        assert_eq!(cluster_count(1, 0.6), 1);
        assert_eq!(cluster_count(5, 2.0), 5);
    }

    #[test]
    fn test_candidates_filtered() {
        let summarizer = ExtractiveSummarizer::new(TopicEmbedder);
        let candidates = summarizer.candidate_sentences(&body());
        assert_eq!(candidates.len(), 5);
        assert!(candidates.iter().all(|s| s != "Short one."));
    }

    #[test]
    fn test_summarize_picks_one_per_topic() {
        let summarizer = ExtractiveSummarizer::new(TopicEmbedder);
        let sentences = summarizer.candidate_sentences(&body());

        // floor(5 * 0.6) = 3 clusters: intro, protein, galaxy.
        let chosen = summarizer.select(&sentences, 0.6).unwrap();
        assert_eq!(chosen.len(), 3);
        assert_eq!(chosen[0], 0);
        assert!(chosen[1] == 1 || chosen[1] == 2);
        assert!(chosen[2] == 3 || chosen[2] == 4);

        let summary = summarizer.summarize(&body(), 0.6).unwrap();
        assert!(summary.starts_with("This introduction sentence"));
        assert!(summary.contains("protein"));
        assert!(summary.contains("galaxy"));
    }

    #[test]
    fn test_use_first() {
        let summarizer = ExtractiveSummarizer::new(TopicEmbedder);
        let sentences = summarizer.candidate_sentences(&body());
        let chosen = summarizer.select(&sentences, 0.2).unwrap();
        assert_eq!(chosen[0], 0);

        let summarizer = ExtractiveSummarizer::new(TopicEmbedder).with_options(ExtractiveOptions {
            use_first: false,
            ..Default::default()
        });
        let chosen = summarizer.select(&sentences, 0.2).unwrap();
        assert_eq!(chosen.len(), 1);
    }

    #[test]
    fn test_deterministic() {
        let summarizer = ExtractiveSummarizer::new(TopicEmbedder);
        let a = summarizer.summarize(&body(), 0.4).unwrap();
        let b = summarizer.summarize(&body(), 0.4).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_body() {
        let summarizer = ExtractiveSummarizer::new(TopicEmbedder);
        assert_eq!(summarizer.summarize("", 0.4).unwrap(), "");
        assert_eq!(summarizer.summarize("Too short. Also short.", 0.4).unwrap(), "");
    }
}
