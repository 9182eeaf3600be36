//! Document assembly and version file naming
//!
//! Rebuilds the final output text for one version: header, the questions'
//! contents stripped of trailing whitespace and joined by three blank lines,
//! then the footer. Header and footer are byte-identical across versions;
//! only the questions between them vary.

use crate::quiz::question::Question;
use std::path::{Path, PathBuf};

/// Separator between question blocks: three blank lines.
pub const QUESTION_SEPARATOR: &str = "\n\n\n\n";

/// Concatenate header, questions, and footer into the final document text.
pub fn assemble(header: &str, questions: &[Question], footer: &str) -> String {
    let joined = questions
        .iter()
        .map(|q| q.content().trim_end())
        .collect::<Vec<_>>()
        .join(QUESTION_SEPARATOR);

    let mut output = String::with_capacity(header.len() + joined.len() + footer.len());
    output.push_str(header);
    output.push_str(&joined);
    output.push_str(footer);
    output
}

/// Path for version `index`: the input stem with its last character replaced
/// by `suffix_char + index`, extension and directory preserved.
///
/// With input `P1A.tex`, suffix `B`, and indexes 0..3, this yields `P1B.tex`,
/// `P1C.tex`, `P1D.tex` alongside the input.
pub fn version_path(input: &Path, suffix_char: char, index: usize) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut prefix = stem.chars();
    prefix.next_back();

    let version_char =
        char::from_u32(suffix_char as u32 + index as u32).expect("suffix character overflow");

    let mut name = String::new();
    name.push_str(prefix.as_str());
    name.push(version_char);

    let mut path = input.with_file_name(name);
    if let Some(extension) = input.extension() {
        path.set_extension(extension);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_questions_with_three_blank_lines() {
        let questions = vec![
            Question::new("{%Q1\n\\rtask a\n}\n"),
            Question::new("{%Q2\n\\rtask b\n}\n"),
        ];
        let output = assemble("HEADER\n", &questions, "FOOTER\n");
        assert_eq!(
            output,
            "HEADER\n{%Q1\n\\rtask a\n}\n\n\n\n{%Q2\n\\rtask b\n}FOOTER\n"
        );
    }

    #[test]
    fn assembles_empty_question_list_as_header_plus_footer() {
        let output = assemble("H", &[], "F");
        assert_eq!(output, "HF");
    }

    #[test]
    fn version_path_replaces_last_stem_character() {
        let input = Path::new("exams/P1A.tex");
        assert_eq!(version_path(input, 'B', 0), Path::new("exams/P1B.tex"));
        assert_eq!(version_path(input, 'B', 1), Path::new("exams/P1C.tex"));
        assert_eq!(version_path(input, 'B', 2), Path::new("exams/P1D.tex"));
    }

    #[test]
    fn version_path_preserves_extension() {
        let input = Path::new("final_Z.latex");
        assert_eq!(version_path(input, 'A', 0), Path::new("final_A.latex"));
    }
}
