//! Question model for brace-delimited exam blocks
//!
//! A [`Question`] wraps the verbatim text of one question block, from the line
//! containing its opening `{%ID` marker through the line with the matching
//! closing brace. Classification (true/false vs. multiple choice) and the
//! correct-answer position are derived lazily from the content and cached, so
//! repeated queries on the same immutable value are free and side-effect-free.

use once_cell::sync::{Lazy, OnceCell};
use regex::Regex;
use std::fmt;

/// Fixed literal markers that identify a true/false question: the regular and
/// "done" true/false alternative tags, and the conditional answer-key macro.
static TRUE_FALSE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\ti\[V\.\]|\\ti\[F\.\]|\\doneitem\[V\.\]|\\doneitem\[F\.\]|\\ifnum\\gabarito")
        .expect("true/false pattern must compile")
});

/// First `answerlist` environment: begin line, items region, end line.
///
/// Group 1 is the `\begin{answerlist}` line including its newline, group 2 is
/// the items region, group 3 is the `\end{answerlist}` line.
static ANSWERLIST_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)(\\begin\{answerlist\}[^\n]*\n)(.*?)(\n?[ \t]*\\end\{answerlist\})")
        .expect("answerlist pattern must compile")
});

/// Start of an alternative item: optional indentation, a `\ti` or `\di` tag,
/// an optional bracketed label, then whitespace or end of line/text.
static ITEM_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)[ \t]*\\(?:ti|di)(?:\[[^\]]*\])?(?:\s|$)")
        .expect("item start pattern must compile")
});

/// Leading marker of a single item segment, anchored at the segment start.
static ITEM_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[ \t]*(\\(?:ti|di))(?:\[[^\]]*\])?").expect("item marker pattern must compile")
});

/// Tag distinguishing a regular alternative from the one designated correct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// A regular alternative (`\ti`).
    Regular,
    /// The correct alternative (`\di`).
    Correct,
}

impl Marker {
    fn from_tag(tag: &str) -> Option<Marker> {
        match tag {
            r"\ti" => Some(Marker::Regular),
            r"\di" => Some(Marker::Correct),
            _ => None,
        }
    }

    /// The literal tag as it appears in the source.
    pub fn tag(&self) -> &'static str {
        match self {
            Marker::Regular => r"\ti",
            Marker::Correct => r"\di",
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// One entry of a question's alternative list.
///
/// The body is kept verbatim, including the leading whitespace/newlines that
/// followed the marker (and its optional `[label]`) in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerItem {
    pub marker: Marker,
    pub body: String,
}

/// One exam question block with lazily derived classification.
///
/// Instances are immutable: transformations such as alternative shuffling
/// produce new `Question` values rather than mutating in place.
#[derive(Debug, Clone)]
pub struct Question {
    content: String,
    true_false: OnceCell<bool>,
    correct_position: OnceCell<Option<usize>>,
}

impl Question {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            true_false: OnceCell::new(),
            correct_position: OnceCell::new(),
        }
    }

    /// The verbatim block text, opening line through closing brace line.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Whether this is a true/false question (alternatives are never shuffled).
    pub fn is_true_false(&self) -> bool {
        *self
            .true_false
            .get_or_init(|| TRUE_FALSE_PATTERN.is_match(&self.content))
    }

    pub fn is_multiple_choice(&self) -> bool {
        !self.is_true_false()
    }

    /// Zero-based index of the correct alternative within the answerlist.
    ///
    /// Returns `None` for true/false questions and for blocks without a
    /// detectable answerlist (or without a `\di` item in it).
    pub fn correct_answer_position(&self) -> Option<usize> {
        *self.correct_position.get_or_init(|| {
            if self.is_true_false() {
                return None;
            }
            self.answer_items()
                .iter()
                .position(|item| item.marker == Marker::Correct)
        })
    }

    /// Extract the alternatives of the first answerlist environment.
    ///
    /// The items region is split at each position that starts a new `\ti` or
    /// `\di` marker; segments without a recognized leading marker (such as
    /// whitespace before the first item) are discarded.
    pub fn answer_items(&self) -> Vec<AnswerItem> {
        let captures = match ANSWERLIST_BLOCK.captures(&self.content) {
            Some(captures) => captures,
            None => return Vec::new(),
        };
        let items_region = captures.get(2).map(|m| m.as_str()).unwrap_or("");

        let mut items = Vec::new();
        for segment in split_at_item_starts(items_region) {
            if segment.trim().is_empty() {
                continue;
            }
            let marker_match = match ITEM_MARKER.captures(segment) {
                Some(m) => m,
                // Text before the first item, if any. Ignore it.
                None => continue,
            };
            let marker = match Marker::from_tag(&marker_match[1]) {
                Some(marker) => marker,
                None => continue,
            };
            // The body starts after the full marker, optional label included.
            let body = segment[marker_match.get(0).map(|m| m.end()).unwrap_or(0)..].to_string();
            items.push(AnswerItem { marker, body });
        }
        items
    }

    /// Rewrite the answerlist items region with the given items, in order.
    ///
    /// Each item is re-rendered as `<4-space indent><marker><body>`; the
    /// assembled block is stripped of trailing whitespace and spliced back
    /// into the exact character span the items region occupied. Everything
    /// outside that span is preserved verbatim. Returns an unmodified copy
    /// when no answerlist is present.
    pub fn with_alternatives(&self, items: &[AnswerItem]) -> Question {
        let captures = match ANSWERLIST_BLOCK.captures(&self.content) {
            Some(captures) => captures,
            None => return Question::new(self.content.clone()),
        };
        let region = match captures.get(2) {
            Some(region) => region,
            None => return Question::new(self.content.clone()),
        };

        let mut rendered = String::new();
        for item in items {
            rendered.push_str("    ");
            rendered.push_str(item.marker.tag());
            rendered.push_str(&item.body);
        }
        let rendered = rendered.trim_end();

        let mut content = String::with_capacity(self.content.len());
        content.push_str(&self.content[..region.start()]);
        content.push_str(rendered);
        content.push_str(&self.content[region.end()..]);
        Question::new(content)
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let first_line = self.content.lines().next().unwrap_or("");
        write!(f, "Question({})", first_line.trim())
    }
}

/// Split the items region at every item-marker start.
///
/// The regex crate has no lookahead, so the split is expressed as slicing
/// between the start offsets of consecutive `ITEM_START` matches. The segment
/// before the first match is kept; callers discard it when it carries no
/// marker.
fn split_at_item_starts(region: &str) -> Vec<&str> {
    let starts: Vec<usize> = ITEM_START.find_iter(region).map(|m| m.start()).collect();
    if starts.is_empty() {
        return vec![region];
    }

    let mut segments = Vec::with_capacity(starts.len() + 1);
    segments.push(&region[..starts[0]]);
    for (i, &start) in starts.iter().enumerate() {
        let end = starts.get(i + 1).copied().unwrap_or(region.len());
        segments.push(&region[start..end]);
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::testing;

    #[test]
    fn classifies_true_false_by_literal_markers() {
        let question = Question::new(testing::TRUE_FALSE_BLOCK);
        assert!(question.is_true_false());
        assert!(!question.is_multiple_choice());
        assert_eq!(question.correct_answer_position(), None);
    }

    #[test]
    fn classifies_answer_key_macro_as_true_false() {
        let question = Question::new("{%Q001\n\\rtask\n\\ifnum\\gabarito=1 V \\fi\n}\n");
        assert!(question.is_true_false());
    }

    #[test]
    fn classification_is_idempotent() {
        let question = Question::new(testing::question_block(
            "Q0070",
            &[Marker::Regular, Marker::Regular, Marker::Correct],
        ));
        assert_eq!(question.is_true_false(), question.is_true_false());
        assert_eq!(
            question.correct_answer_position(),
            question.correct_answer_position()
        );
    }

    #[test]
    fn extracts_items_with_markers_and_bodies() {
        let question = Question::new(testing::question_block(
            "Q0010",
            &[Marker::Regular, Marker::Correct, Marker::Regular],
        ));
        let items = question.answer_items();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].marker, Marker::Regular);
        assert_eq!(items[1].marker, Marker::Correct);
        assert_eq!(items[2].marker, Marker::Regular);
        assert!(items[0].body.contains("alternative 0"));
        assert!(items[1].body.contains("alternative 1"));
    }

    #[test]
    fn labeled_markers_keep_trailing_label_text_in_body() {
        let source = "{%Q0042\n\\rtask statement\n\\begin{answerlist}\n    \\ti[a)] first\n    \\di[b)] second\n\\end{answerlist}\n}\n";
        let question = Question::new(source);
        let items = question.answer_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].body, " first\n");
        // The newline before \end{answerlist} belongs to the end line, not
        // to the last item.
        assert_eq!(items[1].body, " second");
        assert_eq!(question.correct_answer_position(), Some(1));
    }

    #[test]
    fn missing_answerlist_yields_no_items_and_no_position() {
        let question = Question::new("{%Q0099\n\\rtask statement only\n}\n");
        assert!(question.answer_items().is_empty());
        assert_eq!(question.correct_answer_position(), None);
    }

    #[test]
    fn rewrite_preserves_surroundings_verbatim() {
        let question = Question::new(testing::question_block(
            "Q0011",
            &[Marker::Regular, Marker::Correct],
        ));
        let mut items = question.answer_items();
        items.reverse();
        let rewritten = question.with_alternatives(&items);

        assert!(rewritten.content().starts_with("{%Q0011"));
        assert!(rewritten.content().contains(r"\begin{answerlist}"));
        assert!(rewritten.content().contains(r"\end{answerlist}"));
        assert_eq!(rewritten.correct_answer_position(), Some(0));
    }
}
