// src/config.rs

use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub session_cookie: Option<String>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let base_url = env::var("QUIZVERSE_BASE_URL").expect("QUIZVERSE_BASE_URL must be set");

        // Value of the backend's session cookie. Session establishment itself
        // happens outside this client.
        let session_cookie = env::var("QUIZVERSE_SESSION").ok();

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            base_url,
            session_cookie,
            rust_log,
        }
    }
}
