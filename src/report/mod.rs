//! Report renderers for classification results.
//!
//! - [`terminal`] — colored, tabular output with summary box; respects `--verbose` / `--quiet`.
//! - [`json`] — machine-readable list of findings.

pub mod json;
pub mod terminal;
