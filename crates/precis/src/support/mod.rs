//! # Support Utilities

pub mod resources;
