//! Classification of free-form license declarations.
//!
//! - [`normalize`] — single-line normalization and the non-string guard.
//! - [`expression`] — recognizes license expressions that pass through verbatim.
//! - [`signatures`] — the ordered signature table and its word-boundary matcher.
//! - [`reference`] — URL and `see license in <file>` detection.
//! - [`classifier`] — entry points wiring the stages together.

pub mod classifier;
pub mod expression;
pub mod normalize;
pub mod reference;
pub mod signatures;
