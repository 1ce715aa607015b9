//! # precis-cli
//!
//! Argument groups and command runners shared by the `abst-summarize`,
//! `ext-summarize` and `get-synonyms` binaries.

pub mod commands;
pub mod disk_cache;
pub mod input_output;
pub mod logging;
pub mod model_selector;
