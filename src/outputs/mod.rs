//! Output rendering for command results.
//!
//! # Submodules
//!
//! - [`terminal`]: colored, human-readable output (default)
//! - [`json`]: machine-readable fetch results (`fetch --json`)

pub mod json;
pub mod terminal;
