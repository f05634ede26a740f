// src/error.rs

use std::fmt;

/// Client-side error taxonomy.
/// Each variant maps to one backend-facing operation so callers can apply
/// the right propagation policy.
#[derive(Debug)]
pub enum ClientError {
    /// The attempt could not begin: quiz locked, already attempted, or the
    /// backend was unreachable. No attempt state exists after this.
    Start(String),

    /// The submission was rejected or the backend was unreachable. The local
    /// attempt is terminated anyway; no score is available.
    Submit(String),

    /// A focus-loss notification failed. Logged and dropped, never surfaced
    /// to the student and never retried.
    Report(String),

    /// The backend answered with a body we could not decode.
    Decode(String),

    /// Missing or malformed client configuration.
    Config(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for ClientError {}

impl ClientError {
    /// Text for the dismissable notification shown to the student.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Start(msg) => format!("Could not start the quiz: {}", msg),
            ClientError::Submit(msg) => {
                format!("Your attempt is over, but submission failed: {}", msg)
            }
            ClientError::Report(msg) => format!("Proctor notification failed: {}", msg),
            ClientError::Decode(msg) => format!("Unexpected response from the server: {}", msg),
            ClientError::Config(msg) => format!("Client misconfigured: {}", msg),
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}
