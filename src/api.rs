// src/api.rs

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use serde::Deserialize;
use url::Url;

use crate::{
    config::Config,
    error::ClientError,
    models::{
        attempt::{FocusEvent, ProctorReport, QuizResult, StartResponse, SubmitRequest},
        question::OptionKey,
        quiz::QuizSummary,
    },
};

/// The backend contract the attempt lifecycle runs against.
///
/// `HttpBackend` is the real implementation; tests substitute their own.
/// Session management, quiz authoring and result listing live behind other
/// endpoints and are not part of this client.
#[async_trait]
pub trait QuizBackend: Send + Sync {
    /// Opens a fresh attempt and returns the paper.
    async fn start_attempt(&self, quiz_id: i64) -> Result<StartResponse, ClientError>;

    /// Sends the final answers map and receives the grade.
    async fn submit_attempt(
        &self,
        quiz_id: i64,
        attempt_id: i64,
        answers: &HashMap<i64, OptionKey>,
    ) -> Result<QuizResult, ClientError>;

    /// Logs one focus-loss transition. Best effort.
    async fn report_focus_loss(
        &self,
        quiz_id: i64,
        event: FocusEvent,
        question_number: u32,
    ) -> Result<(), ClientError>;

    /// Lists the quizzes visible to the student, with prior attempts.
    async fn student_quizzes(&self) -> Result<Vec<QuizSummary>, ClientError>;
}

/// Error body the backend sends on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// reqwest-backed implementation of [`QuizBackend`].
pub struct HttpBackend {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ClientError::Config(format!("invalid base url: {}", e)))?;

        let mut headers = HeaderMap::new();
        if let Some(cookie) = &config.session_cookie {
            let value = HeaderValue::from_str(&format!("session={}", cookie))
                .map_err(|e| ClientError::Config(format!("invalid session cookie: {}", e)))?;
            headers.insert(COOKIE, value);
        }

        let http = reqwest::Client::builder()
            .cookie_store(true)
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        Ok(Self { http, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::Config(format!("invalid endpoint {}: {}", path, e)))
    }
}

/// Pulls the backend's `{"error": ...}` message out of a failed response,
/// falling back to the status line.
async fn error_message(response: reqwest::Response) -> String {
    let status = response.status();
    match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => format!("backend returned {}", status),
    }
}

#[async_trait]
impl QuizBackend for HttpBackend {
    async fn start_attempt(&self, quiz_id: i64) -> Result<StartResponse, ClientError> {
        let url = self.endpoint(&format!("/api/student/quiz/{}/start", quiz_id))?;

        let response = self.http.post(url).send().await.map_err(|e| {
            tracing::error!("Start request failed: {}", e);
            ClientError::Start(e.to_string())
        })?;

        if !response.status().is_success() {
            return Err(ClientError::Start(error_message(response).await));
        }

        response
            .json::<StartResponse>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn submit_attempt(
        &self,
        quiz_id: i64,
        attempt_id: i64,
        answers: &HashMap<i64, OptionKey>,
    ) -> Result<QuizResult, ClientError> {
        let url = self.endpoint(&format!("/api/student/quiz/{}/submit", quiz_id))?;
        let body = SubmitRequest {
            attempt_id,
            answers,
        };

        let response = self.http.post(url).json(&body).send().await.map_err(|e| {
            tracing::error!("Submit request failed: {}", e);
            ClientError::Submit(e.to_string())
        })?;

        if !response.status().is_success() {
            return Err(ClientError::Submit(error_message(response).await));
        }

        response
            .json::<QuizResult>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn report_focus_loss(
        &self,
        quiz_id: i64,
        event: FocusEvent,
        question_number: u32,
    ) -> Result<(), ClientError> {
        let url = self.endpoint(&format!("/api/student/quiz/{}/log", quiz_id))?;
        let body = ProctorReport {
            event_type: event,
            question_number,
        };

        let response = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ClientError::Report(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ClientError::Report(error_message(response).await));
        }

        Ok(())
    }

    async fn student_quizzes(&self) -> Result<Vec<QuizSummary>, ClientError> {
        let url = self.endpoint("/api/student/quizzes")?;

        let response = self.http.get(url).send().await.map_err(|e| {
            tracing::error!("Quiz list request failed: {}", e);
            ClientError::Start(e.to_string())
        })?;

        if !response.status().is_success() {
            return Err(ClientError::Start(error_message(response).await));
        }

        response
            .json::<Vec<QuizSummary>>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}
