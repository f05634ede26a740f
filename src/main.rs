// src/main.rs

use std::io::Write;
use std::sync::Arc;

use dotenvy::dotenv;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use quizverse_client::api::HttpBackend;
use quizverse_client::config::Config;
use quizverse_client::models::question::OptionKey;
use quizverse_client::session::QuizSession;
use quizverse_client::utils::format::format_score;

/// Minimal terminal runner for taking a quiz. All behavior lives in the
/// library; this is wiring plus stdin.
#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "client.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    let backend = HttpBackend::new(&config).expect("Failed to build HTTP backend");
    let mut session = QuizSession::new(Arc::new(backend));

    let quizzes = match session.quizzes().await {
        Ok(quizzes) => quizzes,
        Err(e) => {
            eprintln!("{}", e.user_message());
            std::process::exit(1);
        }
    };

    println!("Available quizzes:");
    for quiz in &quizzes {
        let status = match &quiz.attempt {
            Some(prior) if prior.finished => match (prior.score, prior.total_questions) {
                (Some(score), Some(total)) => format!("done, {}", format_score(score, total)),
                _ => "done".to_string(),
            },
            Some(_) => "in progress".to_string(),
            None => format!("{} questions, {} min", quiz.question_count, quiz.duration_minutes),
        };
        println!("  {:>4}  {}  ({})", quiz.id, quiz.title, status);
    }

    let mut input = BufReader::new(tokio::io::stdin()).lines();

    print!("quiz id> ");
    std::io::stdout().flush().ok();
    let quiz_id: i64 = match input.next_line().await {
        Ok(Some(line)) => match line.trim().parse() {
            Ok(id) => id,
            Err(_) => {
                eprintln!("Not a quiz id: {}", line.trim());
                std::process::exit(1);
            }
        },
        _ => std::process::exit(1),
    };

    if let Err(e) = session.start(quiz_id).await {
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }

    let mut remaining = session.remaining().expect("attempt just started");

    // Answer prompt racing the countdown. Enter A-D to answer, an empty
    // line to skip, "submit" to finish early.
    loop {
        let Some(attempt) = session.attempt().await else {
            break;
        };
        let Some(question) = attempt.current_question().cloned() else {
            break;
        };

        println!(
            "\n[{} {}/{}] {}",
            attempt.quiz_title(),
            attempt.question_number(),
            attempt.questions().len(),
            question.text
        );
        for key in OptionKey::ALL {
            println!("  {}. {}", key, question.options.get(key));
        }
        print!("answer ({} left)> ", *remaining.borrow());
        std::io::stdout().flush().ok();

        tokio::select! {
            line = input.next_line() => {
                let Ok(Some(line)) = line else { break };
                let trimmed = line.trim();

                if trimmed.eq_ignore_ascii_case("submit") {
                    break;
                }
                if let Some(key) = OptionKey::parse(trimmed) {
                    session.select_answer(question.id, key).await;
                } else if !trimmed.is_empty() {
                    println!("Enter A-D, an empty line to skip, or \"submit\".");
                    continue;
                }

                if attempt.is_last_question() {
                    break;
                }
                session.advance().await;
            }
            _ = remaining.wait_for(|left| left.is_expired()) => {
                println!("\nTime is up.");
                break;
            }
        }
    }

    match session.submit().await {
        Ok(Some(result)) => {
            println!("Result: {}", format_score(result.score, result.total_questions));
        }
        Ok(None) => match session.last_result().await {
            Some(result) => {
                println!(
                    "Submitted at the deadline. Result: {}",
                    format_score(result.score, result.total_questions)
                );
            }
            None => println!("Attempt closed without a score."),
        },
        Err(e) => eprintln!("{}", e.user_message()),
    }
}
