//! # `precis` Summarization and Synonym Suite
//!
//! Summarize text with pretrained models, and look up synonyms in WordNet.
//!
//! See:
//! * [`abstractive`] to generate a summary with a sequence-to-sequence model.
//! * [`extractive`] to select representative sentences with a sentence encoder.
//! * [`synonyms`] to look up synonyms of a word, or of every word of a passage.
//! * [`pretrained`] for the model tables, and fetching model files.
//! * [`params`] for length presets and summary parameters.
//!
//! ## Loading a Pretrained Encoder
//!
//! ```rust,no_run
//! use precis::disk_cache::{PrecisDiskCache, PrecisDiskCacheOptions};
//! use precis::extractive::{BertEmbedder, ExtractiveSummarizer};
//! use precis::params::SummaryParams;
//! use precis::pretrained::{EXTRACTIVE_MODELS, fetch_model_files};
//!
//! fn example(body: &str) -> Result<(), Box<dyn std::error::Error>> {
//!     let params = SummaryParams::from_flags(body, None, Some("short"), EXTRACTIVE_MODELS)?;
//!
//!     let mut disk_cache = PrecisDiskCache::new(PrecisDiskCacheOptions::default())?;
//!     let files = fetch_model_files(params.model, &mut disk_cache)?;
//!
//!     let summarizer = ExtractiveSummarizer::new(BertEmbedder::new(&files)?);
//!     println!("{}", summarizer.summarize(&params.body, params.ratio)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Crate Features
#![doc = document_features::document_features!()]
#![warn(missing_docs, unused)]

#[cfg(feature = "download")]
#[doc(inline)]
pub use precis_disk_cache as disk_cache;

pub mod abstractive;
pub mod extractive;
pub mod params;
pub mod pretrained;
pub mod support;
pub mod synonyms;
pub mod text;

pub mod errors;

#[doc(inline)]
pub use errors::{PrecisError, PrecisResult};
