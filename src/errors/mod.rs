//! Error types for the whole pipeline.
//!
//! One [`errors::Error`] type covers every phase: lexing, parsing,
//! static checking, and evaluation. Each error carries the 1-based line
//! of the offending token, or no line at all when the failure was
//! detected at end of input.

pub mod errors;

#[cfg(test)]
mod tests;
