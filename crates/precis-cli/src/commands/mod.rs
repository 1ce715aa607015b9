//! # Commands
//!
//! One argument struct per binary; each parses its own flags and runs.

#[cfg(feature = "bart")]
pub mod abst_summarize;
#[cfg(feature = "bert")]
pub mod ext_summarize;
pub mod get_synonyms;

/// The default log verbosity; warnings and errors.
pub const DEFAULT_LOG_LEVEL: u8 = 2;
