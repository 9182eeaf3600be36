//! # quizshuffle
//!
//! A version shuffler for LaTeX exam files.
//!
//! Parses an exam source into header, question blocks, and footer; then
//! generates shuffled versions of the exam (question order and
//! multiple-choice alternative order) under a bound on consecutive repeats
//! of the same correct-answer position.
//!
//! ## Testing
//!
//! Tests should use the verified sources in the [testing module](quiz::testing)
//! instead of writing exam markup inline.

pub mod quiz;
