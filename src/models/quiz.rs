// src/models/quiz.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One row of the student's quiz catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSummary {
    pub id: i64,
    pub title: String,

    /// Opening time as the backend reports it (naive UTC).
    pub start_time: NaiveDateTime,

    pub duration_minutes: i64,
    pub question_count: i64,

    /// Present once the student has an attempt on record for this quiz.
    pub attempt: Option<AttemptSummary>,
}

/// Prior-attempt digest attached to a catalog row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptSummary {
    pub score: Option<i64>,
    pub total_questions: Option<i64>,
    pub finished: bool,
}
