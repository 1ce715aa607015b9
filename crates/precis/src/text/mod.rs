//! # Text Utilities
//!
//! Sentence segmentation and order-preserving token handling shared by
//! the summarizers and the synonym lookup.

pub mod sentences;
pub mod tokens;

#[doc(inline)]
pub use sentences::{filter_sentences, split_sentences};
#[doc(inline)]
pub use tokens::dedup_ordered;
