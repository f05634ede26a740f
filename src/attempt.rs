// src/attempt.rs

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::time::Instant;

use crate::models::{
    attempt::StartResponse,
    question::{OptionKey, Question},
};

/// In-memory state of one quiz attempt.
///
/// Normally created through [`crate::session::QuizSession::start`], mutated by
/// answer and navigation calls, and destroyed exactly once when the attempt
/// is submitted (manually or by the deadline timer) or discarded.
#[derive(Debug, Clone)]
pub struct Attempt {
    attempt_id: i64,
    quiz_id: i64,
    quiz_title: String,

    /// Fixed for the lifetime of the attempt.
    questions: Vec<Question>,

    /// Absent entry means unanswered.
    answers: HashMap<i64, OptionKey>,

    /// Cursor into `questions`. Never moves backwards, never leaves
    /// `[0, len - 1]`.
    current_index: usize,

    /// Monotonic deadline driving the countdown. Never recomputed.
    deadline: Instant,

    /// Wall-clock mirror of the deadline, for display and logging only.
    deadline_utc: DateTime<Utc>,
}

impl Attempt {
    pub fn new(quiz_id: i64, start: StartResponse) -> Self {
        let minutes = start.duration_minutes.max(0);
        Self {
            attempt_id: start.attempt_id,
            quiz_id,
            quiz_title: start.quiz_title,
            questions: start.questions,
            answers: HashMap::new(),
            current_index: 0,
            deadline: Instant::now() + Duration::from_secs(minutes as u64 * 60),
            deadline_utc: Utc::now() + TimeDelta::minutes(minutes),
        }
    }

    /// Records a selection, overwriting any earlier one for the same
    /// question. Ids that do not belong to this attempt are dropped.
    pub fn select_answer(&mut self, question_id: i64, key: OptionKey) -> bool {
        if !self.questions.iter().any(|q| q.id == question_id) {
            tracing::debug!(question_id, "ignoring answer for unknown question");
            return false;
        }
        self.answers.insert(question_id, key);
        true
    }

    /// Moves to the next question, saturating at the last one. There is no
    /// way back.
    pub fn advance(&mut self) -> bool {
        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
            true
        } else {
            false
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    /// 1-based position of the question on screen, as the proctor log
    /// expects it.
    pub fn question_number(&self) -> u32 {
        (self.current_index + 1) as u32
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 >= self.questions.len()
    }

    pub fn attempt_id(&self) -> i64 {
        self.attempt_id
    }

    pub fn quiz_id(&self) -> i64 {
        self.quiz_id
    }

    pub fn quiz_title(&self) -> &str {
        &self.quiz_title
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &HashMap<i64, OptionKey> {
        &self.answers
    }

    pub fn answer_for(&self, question_id: i64) -> Option<OptionKey> {
        self.answers.get(&question_id).copied()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn deadline_utc(&self) -> DateTime<Utc> {
        self.deadline_utc
    }
}
