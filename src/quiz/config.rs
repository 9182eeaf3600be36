//! Run configuration
//!
//! User-supplied parameters for one generation run. The value is immutable
//! for the duration of the run; per-version randomness comes from the RNG,
//! never from mutating the configuration.

use crate::quiz::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Source exam file to parse.
    pub filepath: PathBuf,
    /// How many version files to produce (>= 1).
    pub num_versions: usize,
    /// Suffix character of the first generated version; subsequent versions
    /// increment it.
    pub suffix_char: char,
    /// Whether to reorder questions per version.
    pub shuffle_questions: bool,
    /// Whether to permute multiple-choice alternatives per version.
    pub shuffle_alternatives: bool,
    /// Bound used by the sequence shuffler's consecutive-repeat check.
    pub max_consecutive_same_answer: usize,
}

impl Config {
    /// Check the values that must be rejected before generation begins.
    pub fn validate(&self) -> Result<()> {
        if self.num_versions < 1 {
            return Err(Error::InvalidVersionCount(self.num_versions));
        }
        Ok(())
    }
}

/// Suggest the suffix for the first generated version: the character after
/// the last character of the input stem, uppercased (`P1A` suggests `B`).
pub fn suggested_suffix(filepath: &Path) -> Option<char> {
    let stem = filepath.file_stem()?.to_str()?;
    let last = stem.chars().next_back()?.to_ascii_uppercase();
    char::from_u32(last as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggests_next_letter_from_stem() {
        assert_eq!(suggested_suffix(Path::new("P1A.tex")), Some('B'));
        assert_eq!(suggested_suffix(Path::new("exams/p2c.tex")), Some('D'));
    }

    #[test]
    fn rejects_zero_versions() {
        let config = Config {
            filepath: PathBuf::from("P1A.tex"),
            num_versions: 0,
            suffix_char: 'B',
            shuffle_questions: true,
            shuffle_alternatives: true,
            max_consecutive_same_answer: 3,
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidVersionCount(0))
        ));
    }
}
