//! File processing API for exam version generation
//!
//! Ties the pipeline together: read and parse the source exam, then emit one
//! output file per requested version. Each version starts from an
//! independent copy of the original question list, so the shuffling applied
//! to one version can never leak into another. Writes are per-version with
//! no rollback: a failure aborts the run but already written versions stay
//! on disk.

use crate::quiz::assembly::{assemble, version_path};
use crate::quiz::config::Config;
use crate::quiz::diagnostics::Diagnostic;
use crate::quiz::error::{Error, Result};
use crate::quiz::extraction::{extract_blocks, ExamDocument, ExtractionResult};
use crate::quiz::question::Question;
use crate::quiz::shuffling::{shuffle_alternatives, shuffle_with_constraint};
use rand::Rng;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Read and parse the source exam file.
pub fn load_exam(path: &Path) -> Result<ExtractionResult> {
    let text = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(extract_blocks(&text))
}

/// Output of one generated version.
#[derive(Debug)]
pub struct VersionOutput {
    pub path: PathBuf,
    pub diagnostics: Vec<Diagnostic>,
}

/// Generate a single version and write it next to the input file.
///
/// Applies alternative shuffling and question-order shuffling to an
/// independent copy of the question list, per configuration.
pub fn generate_version<R: Rng>(
    config: &Config,
    document: &ExamDocument,
    index: usize,
    rng: &mut R,
) -> Result<VersionOutput> {
    let mut diagnostics = Vec::new();
    let mut questions: Vec<Question> = document.questions.clone();

    if config.shuffle_alternatives {
        questions = questions
            .iter()
            .map(|question| shuffle_alternatives(question, rng))
            .collect();
    }

    if config.shuffle_questions {
        let outcome =
            shuffle_with_constraint(&questions, config.max_consecutive_same_answer, rng);
        questions = outcome.questions;
        diagnostics.extend(outcome.diagnostics);
    }

    let output = assemble(&document.header, &questions, &document.footer);
    let path = version_path(&config.filepath, config.suffix_char, index);
    fs::write(&path, output).map_err(|source| Error::Io {
        path: path.clone(),
        source,
    })?;

    Ok(VersionOutput { path, diagnostics })
}

/// Generate all configured versions in order.
pub fn generate_versions<R: Rng>(
    config: &Config,
    document: &ExamDocument,
    rng: &mut R,
) -> Result<Vec<VersionOutput>> {
    config.validate()?;
    (0..config.num_versions)
        .map(|index| generate_version(config, document, index, rng))
        .collect()
}

/// Serializable structural summary of a parsed exam, for `inspect` output.
#[derive(Debug, Serialize)]
pub struct ExamSummary {
    pub question_count: usize,
    pub multiple_choice: usize,
    pub true_false: usize,
    pub header_bytes: usize,
    pub footer_bytes: usize,
    pub questions: Vec<QuestionSummary>,
}

/// One question's classification for `inspect` output.
#[derive(Debug, Serialize)]
pub struct QuestionSummary {
    pub index: usize,
    pub kind: &'static str,
    pub correct_answer_position: Option<usize>,
    pub opening_line: String,
}

impl ExamSummary {
    pub fn from_document(document: &ExamDocument) -> Self {
        let questions = document
            .questions
            .iter()
            .enumerate()
            .map(|(index, question)| QuestionSummary {
                index,
                kind: if question.is_true_false() {
                    "true-false"
                } else {
                    "multiple-choice"
                },
                correct_answer_position: question.correct_answer_position(),
                opening_line: question
                    .content()
                    .lines()
                    .next()
                    .unwrap_or("")
                    .trim()
                    .to_string(),
            })
            .collect();

        Self {
            question_count: document.questions.len(),
            multiple_choice: document.multiple_choice_count(),
            true_false: document.true_false_count(),
            header_bytes: document.header.len(),
            footer_bytes: document.footer.len(),
            questions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::extraction::extract_blocks;
    use crate::quiz::testing;

    #[test]
    fn summary_counts_match_document() {
        let result = extract_blocks(testing::SAMPLE_EXAM);
        let summary = ExamSummary::from_document(&result.document);
        assert_eq!(summary.question_count, 3);
        assert_eq!(summary.multiple_choice, 2);
        assert_eq!(summary.true_false, 1);
        assert_eq!(summary.questions[0].kind, "multiple-choice");
        assert!(summary.questions[0].opening_line.starts_with("{%Q0001"));
    }
}
