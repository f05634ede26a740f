// src/utils/format.rs

/// Renders a grade the way the results screen shows it, e.g. "2 / 3 (67%)".
pub fn format_score(score: i64, total_questions: i64) -> String {
    if total_questions <= 0 {
        return format!("{} / {}", score, total_questions);
    }
    let percent = (score as f64 / total_questions as f64 * 100.0).round() as i64;
    format!("{} / {} ({}%)", score, total_questions, percent)
}
