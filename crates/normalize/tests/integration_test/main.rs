//! Integration tests for salesperf-normalize.
//!
//! Fixtures are trimmed copies of the monthly and per-category datasets the
//! charts are built from.

mod normalize;
mod window;
