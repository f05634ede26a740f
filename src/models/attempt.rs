// src/models/attempt.rs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::question::{OptionKey, Question};

/// Payload returned when the backend opens a fresh attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartResponse {
    pub attempt_id: i64,
    pub quiz_title: String,

    /// Older backend builds spell this field "duration".
    #[serde(alias = "duration")]
    pub duration_minutes: i64,

    pub questions: Vec<Question>,
}

/// Grade handed back once an attempt is submitted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub score: i64,
    pub total_questions: i64,
}

/// Body of the submit call. Map keys serialize as decimal strings, which is
/// how the backend looks answers up.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest<'a> {
    pub attempt_id: i64,
    pub answers: &'a HashMap<i64, OptionKey>,
}

/// Focus transition kinds the embedder can observe.
/// Serialized into the proctor log's `eventType` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusEvent {
    /// The window lost input focus.
    WindowBlur,
    /// The tab was hidden (switched away or minimized).
    TabHidden,
}

/// Body of the proctor log call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProctorReport {
    pub event_type: FocusEvent,
    pub question_number: u32,
}
