//! Unit tests for isolated question elements
//!
//! Classification, alternative extraction, and the alternative rewrite are
//! exercised one question at a time, using the builders from `quiz::testing`.

use quizshuffle::quiz::question::{Marker, Question};
use quizshuffle::quiz::shuffling::shuffle_alternatives;
use quizshuffle::quiz::testing;
use rstest::rstest;

#[rstest]
#[case(r"\ti[V.]", true)]
#[case(r"\ti[F.]", true)]
#[case(r"\doneitem[V.]", true)]
#[case(r"\doneitem[F.]", true)]
#[case(r"\ifnum\gabarito", true)]
#[case(r"\ti regular alternative", false)]
#[case(r"\di correct alternative", false)]
fn true_false_marker_detection(#[case] marker_line: &str, #[case] expected: bool) {
    let content = format!("{{%Q1\n\\rtask statement\n{}\n}}\n", marker_line);
    assert_eq!(Question::new(content).is_true_false(), expected);
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(2)]
#[case(3)]
fn correct_position_follows_the_di_marker(#[case] correct_index: usize) {
    let markers: Vec<Marker> = (0..4)
        .map(|i| {
            if i == correct_index {
                Marker::Correct
            } else {
                Marker::Regular
            }
        })
        .collect();
    let question = Question::new(testing::question_block("Q1", &markers));
    assert_eq!(question.correct_answer_position(), Some(correct_index));
}

#[test]
fn question_without_di_has_no_position() {
    let question = Question::new(testing::question_block(
        "Q1",
        &[Marker::Regular, Marker::Regular],
    ));
    assert_eq!(question.correct_answer_position(), None);
}

/// The worked extraction example: items tagged regular, regular, correct,
/// regular give position 2, and after a shuffle the recomputed position
/// must match wherever the correct-tagged body landed.
#[test]
fn shuffled_position_tracks_the_correct_body() {
    let question = Question::new(testing::question_block(
        "Q1",
        &[
            Marker::Regular,
            Marker::Regular,
            Marker::Correct,
            Marker::Regular,
        ],
    ));
    assert_eq!(question.correct_answer_position(), Some(2));

    let mut rng = rand::thread_rng();
    for _ in 0..20 {
        let shuffled = shuffle_alternatives(&question, &mut rng);
        let items = shuffled.answer_items();
        let landed = items
            .iter()
            .position(|item| item.body.contains("alternative 2"))
            .expect("the correct body must survive the shuffle");
        assert_eq!(items[landed].marker, Marker::Correct);
        assert_eq!(shuffled.correct_answer_position(), Some(landed));
    }
}

#[test]
fn true_false_question_round_trips_unchanged() {
    let question = Question::new(testing::TRUE_FALSE_BLOCK);
    let mut rng = rand::thread_rng();
    for _ in 0..20 {
        let shuffled = shuffle_alternatives(&question, &mut rng);
        assert_eq!(shuffled.content(), question.content());
    }
}

#[test]
fn single_alternative_question_is_not_shuffled() {
    let question = Question::new(testing::question_block("Q1", &[Marker::Correct]));
    let shuffled = shuffle_alternatives(&question, &mut rand::thread_rng());
    assert_eq!(shuffled.content(), question.content());
}

#[test]
fn question_without_answerlist_is_not_shuffled() {
    let question = Question::new("{%Q1\n\\rtask open answer, no list\n}\n");
    let shuffled = shuffle_alternatives(&question, &mut rand::thread_rng());
    assert_eq!(shuffled.content(), question.content());
}
