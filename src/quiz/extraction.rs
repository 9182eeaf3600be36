//! Block extraction from raw exam source
//!
//! Scans the source line by line with an explicit stack of open-brace frames.
//! A line whose first `{` is followed by `%` and an identifier opens a
//! candidate block; the `\rtask` keyword anywhere inside the outermost braces
//! promotes the candidate to a real question. The block text is collected
//! verbatim from the line that opened the outermost frame through the line
//! with the matching close brace.
//!
//! Malformed nesting is self-healing: a new identifier marker while frames
//! are still open discards all pending state and starts fresh. An
//! unterminated promoted block at end of input is reported as a diagnostic
//! and produces no partial question.

use crate::quiz::diagnostics::Diagnostic;
use crate::quiz::question::Question;
use once_cell::sync::Lazy;
use regex::Regex;

/// Opening marker: `{`, optional whitespace, `%`, the identifier token.
static ID_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\s*%\s*(\S+)").expect("id marker pattern must compile"));

/// Keyword that promotes a candidate block to a real question.
const PROMOTE_KEYWORD: &str = r"\rtask";

/// Header text, ordered questions, and footer text of one parsed exam.
///
/// Header and footer are opaque: they are reproduced byte-identically in
/// every generated version.
#[derive(Debug, Clone)]
pub struct ExamDocument {
    pub header: String,
    pub questions: Vec<Question>,
    pub footer: String,
}

impl ExamDocument {
    pub fn multiple_choice_count(&self) -> usize {
        self.questions
            .iter()
            .filter(|q| q.is_multiple_choice())
            .count()
    }

    pub fn true_false_count(&self) -> usize {
        self.questions.iter().filter(|q| q.is_true_false()).count()
    }
}

/// Extraction output: the document plus any advisory diagnostics.
#[derive(Debug)]
pub struct ExtractionResult {
    pub document: ExamDocument,
    pub diagnostics: Vec<Diagnostic>,
}

/// One open brace level.
#[derive(Debug)]
struct Frame {
    /// 1-based line where this brace opened.
    start_line: usize,
    /// Set once `\rtask` is seen while this frame is the outermost one.
    promoted: bool,
    /// Identifier captured from the opening marker, first brace of the
    /// opening line only.
    id: Option<String>,
}

/// Scan the full source text and extract all promoted question blocks.
pub fn extract_blocks(text: &str) -> ExtractionResult {
    let lines: Vec<&str> = text.split_inclusive('\n').collect();

    // line_offsets[k] is the absolute character offset where line k starts;
    // the final entry is the total length.
    let mut line_offsets = Vec::with_capacity(lines.len() + 1);
    let mut offset = 0;
    for line in &lines {
        line_offsets.push(offset);
        offset += line.len();
    }
    line_offsets.push(offset);

    let mut questions = Vec::new();
    let mut diagnostics = Vec::new();

    let mut stack: Vec<Frame> = Vec::new();
    let mut collected: Vec<&str> = Vec::new();
    let mut inside = false;
    let mut start_line = 0;
    let mut current_id = String::new();
    let mut first_start_char: Option<usize> = None;
    let mut last_end_char = 0;

    for (i, line) in lines.iter().copied().enumerate() {
        let num = i + 1;
        let has_promote = line.contains(PROMOTE_KEYWORD);
        let mut id_capture = ID_MARKER
            .captures(line)
            .map(|captures| captures[1].to_string());
        let opens = line.matches('{').count();
        let closes = line.matches('}').count();

        // A new identifier while frames are still open means the previous
        // block never closed. Drop everything pending and start fresh.
        if opens > 0 && id_capture.is_some() && !stack.is_empty() {
            stack.clear();
            collected.clear();
            inside = false;
        }

        for _ in 0..opens {
            stack.push(Frame {
                start_line: num,
                promoted: false,
                // Only the first brace on a line may claim the identifier.
                id: id_capture.take(),
            });
        }

        // The promote keyword always applies to the outermost open frame.
        if has_promote {
            if let Some(root) = stack.first_mut() {
                root.promoted = true;
            }
        }

        if let Some(root) = stack.first() {
            if root.promoted {
                if !inside {
                    inside = true;
                    start_line = root.start_line;
                    current_id = root.id.clone().unwrap_or_default();
                    collected.extend_from_slice(&lines[start_line - 1..num]);
                } else {
                    collected.push(line);
                }
            }
        }

        for _ in 0..closes {
            let frame = match stack.pop() {
                Some(frame) => frame,
                // Stray close brace outside any block.
                None => continue,
            };
            if frame.promoted && stack.is_empty() {
                let content = collected.concat();
                let block_start = line_offsets[start_line - 1];
                let block_end = line_offsets[num];

                if first_start_char.is_none() {
                    first_start_char = Some(block_start);
                }
                last_end_char = block_end;

                questions.push(Question::new(content));
                inside = false;
                collected.clear();
            }
        }
    }

    if inside && !stack.is_empty() {
        diagnostics.push(
            Diagnostic::warning(format!("unterminated question block '{}'", current_id))
                .with_line(start_line),
        );
    }

    let (header, footer) = match first_start_char {
        Some(start) => (
            text[..start].to_string(),
            text[last_end_char..].to_string(),
        ),
        // No block was ever promoted: the whole text is header.
        None => (text.to_string(), String::new()),
    };

    ExtractionResult {
        document: ExamDocument {
            header,
            questions,
            footer,
        },
        diagnostics,
    }
}
