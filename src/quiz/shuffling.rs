//! Alternative and question-order shuffling
//!
//! Alternative shuffling permutes the items of a question's answerlist and is
//! a no-op for true/false questions and for blocks where no list (or fewer
//! than two items) can be extracted. Question-order shuffling is a bounded
//! randomized search: reshuffle until the consecutive-repeat constraint on
//! correct-answer positions holds, give up after a fixed number of attempts
//! and keep the last arrangement.

use crate::quiz::diagnostics::Diagnostic;
use crate::quiz::question::Question;
use rand::seq::SliceRandom;
use rand::Rng;

/// Attempt cap for the constraint search. The search is best-effort by
/// contract: exhausting the cap degrades to the last arrangement.
pub const MAX_SHUFFLE_ATTEMPTS: usize = 2000;

/// Return a copy of the question with its alternatives uniformly permuted.
///
/// True/false questions, questions without a detectable answerlist, and
/// questions with fewer than two items are returned unmodified.
pub fn shuffle_alternatives<R: Rng>(question: &Question, rng: &mut R) -> Question {
    if question.is_true_false() {
        return question.clone();
    }

    let mut items = question.answer_items();
    if items.len() < 2 {
        return question.clone();
    }

    items.shuffle(rng);
    question.with_alternatives(&items)
}

/// Result of the question-order search.
#[derive(Debug)]
pub struct SequenceOutcome {
    pub questions: Vec<Question>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Reorder questions so that no correct-answer position repeats in `limit`
/// or more consecutive multiple-choice questions.
///
/// Shuffles uniformly, checks, and reshuffles up to [`MAX_SHUFFLE_ATTEMPTS`]
/// times. On exhaustion the last (unsatisfying) arrangement is returned with
/// a warning diagnostic; the run is never blocked.
pub fn shuffle_with_constraint<R: Rng>(
    questions: &[Question],
    limit: usize,
    rng: &mut R,
) -> SequenceOutcome {
    let mut shuffled: Vec<Question> = questions.to_vec();
    shuffled.shuffle(rng);

    let mut diagnostics = Vec::new();
    for attempt in 1..=MAX_SHUFFLE_ATTEMPTS {
        if constraint_ok(&shuffled, limit) {
            if attempt > 1 {
                diagnostics.push(Diagnostic::info(format!(
                    "answer-position constraint satisfied on attempt {}",
                    attempt
                )));
            }
            return SequenceOutcome {
                questions: shuffled,
                diagnostics,
            };
        }
        shuffled.shuffle(rng);
    }

    diagnostics.push(Diagnostic::warning(format!(
        "answer-position constraint not satisfied after {} attempts, keeping last arrangement",
        MAX_SHUFFLE_ATTEMPTS
    )));
    SequenceOutcome {
        questions: shuffled,
        diagnostics,
    }
}

/// Check the consecutive-repeat constraint over a question sequence.
///
/// Questions without a position (true/false or unparseable) reset the run
/// tracking entirely: they neither extend nor break a run through themselves.
pub fn constraint_ok(questions: &[Question], limit: usize) -> bool {
    let mut consecutive = 0;
    let mut last_pos: Option<usize> = None;

    for question in questions {
        let pos = match question.correct_answer_position() {
            Some(pos) => pos,
            None => {
                consecutive = 0;
                last_pos = None;
                continue;
            }
        };
        if Some(pos) == last_pos {
            consecutive += 1;
            if consecutive >= limit {
                return false;
            }
        } else {
            consecutive = 1;
        }
        last_pos = Some(pos);
    }

    true
}
