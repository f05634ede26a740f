// tests/attempt_tests.rs

use quizverse_client::attempt::Attempt;
use quizverse_client::models::attempt::StartResponse;
use quizverse_client::models::question::{OptionKey, Question, QuestionOptions};
use quizverse_client::utils::format::format_score;

fn paper(question_count: i64) -> StartResponse {
    let questions = (1..=question_count)
        .map(|i| Question {
            id: i,
            text: format!("Question {}", i),
            options: QuestionOptions {
                a: "first".to_string(),
                b: "second".to_string(),
                c: "third".to_string(),
                d: "fourth".to_string(),
            },
        })
        .collect();

    StartResponse {
        attempt_id: 7,
        quiz_title: "Sample Quiz".to_string(),
        duration_minutes: 5,
        questions,
    }
}

#[tokio::test]
async fn last_selection_wins() {
    // Arrange
    let mut attempt = Attempt::new(1, paper(3));

    // Act: answer the same question twice, another one once
    assert!(attempt.select_answer(1, OptionKey::A));
    assert!(attempt.select_answer(1, OptionKey::B));
    assert!(attempt.select_answer(2, OptionKey::D));

    // Assert: one entry per question, most recent selection wins
    assert_eq!(attempt.answers().len(), 2);
    assert_eq!(attempt.answer_for(1), Some(OptionKey::B));
    assert_eq!(attempt.answer_for(2), Some(OptionKey::D));
}

#[tokio::test]
async fn unknown_question_ids_are_dropped() {
    // Arrange
    let mut attempt = Attempt::new(1, paper(3));

    // Act
    let accepted = attempt.select_answer(42, OptionKey::A);

    // Assert
    assert!(!accepted);
    assert!(attempt.answers().is_empty());
}

#[tokio::test]
async fn advance_saturates_at_last_question() {
    // Arrange
    let mut attempt = Attempt::new(1, paper(3));
    assert_eq!(attempt.current_index(), 0);

    // Act: over-advance well past the end
    for _ in 0..10 {
        attempt.advance();
    }

    // Assert: cursor pinned to the last index, further advances refused
    assert_eq!(attempt.current_index(), 2);
    assert_eq!(attempt.question_number(), 3);
    assert!(attempt.is_last_question());
    assert!(!attempt.advance());
    assert_eq!(attempt.current_index(), 2);
}

#[tokio::test]
async fn advance_counts_single_steps() {
    let mut attempt = Attempt::new(1, paper(3));

    assert!(attempt.advance());
    assert_eq!(attempt.current_index(), 1);
    assert_eq!(attempt.current_question().map(|q| q.id), Some(2));
    assert!(!attempt.is_last_question());
}

#[test]
fn option_key_parses_loose_input() {
    assert_eq!(OptionKey::parse(" a "), Some(OptionKey::A));
    assert_eq!(OptionKey::parse("D"), Some(OptionKey::D));
    assert_eq!(OptionKey::parse("E"), None);
    assert_eq!(OptionKey::parse(""), None);
    assert_eq!(OptionKey::parse("AB"), None);
}

#[test]
fn score_formatting_rounds_to_whole_percent() {
    assert_eq!(format_score(2, 3), "2 / 3 (67%)");
    assert_eq!(format_score(1, 3), "1 / 3 (33%)");
    assert_eq!(format_score(3, 3), "3 / 3 (100%)");
    assert_eq!(format_score(0, 5), "0 / 5 (0%)");
    // Degenerate totals render without a percentage
    assert_eq!(format_score(0, 0), "0 / 0");
}
