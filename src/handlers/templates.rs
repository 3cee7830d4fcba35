//! Template and form types for the web layer.

use askama::Template;
use serde::Deserialize;

/// One sidebar row: a genre with at least one attempt.
pub struct StatRow {
  pub genre: String,
  /// Preformatted percentage, two decimals
  pub accuracy: String,
  pub correct: i64,
  pub total: i64,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
  pub stats: Vec<StatRow>,
  pub total_answered: i64,
  pub total_correct: i64,
}

#[derive(Template)]
#[template(path = "quiz.html")]
pub struct QuizTemplate {
  pub stats: Vec<StatRow>,
  pub error: Option<String>,
  pub question: Option<String>,
  pub options: Vec<String>,
  pub genre: String,
  pub answered: bool,
  pub is_correct: bool,
  pub correct_option: String,
  pub user_answer: String,
}

#[derive(Template)]
#[template(path = "written.html")]
pub struct WrittenTemplate {
  pub stats: Vec<StatRow>,
  pub error: Option<String>,
  pub question: Option<String>,
  pub genre: String,
  pub answered: bool,
  pub is_correct: bool,
  pub model_answer: String,
  pub user_answer: String,
}

/// One learning-log row, timestamp preformatted for display.
pub struct HistoryRow {
  pub id: i64,
  pub timestamp: String,
  pub question: String,
  pub user_answer: String,
  pub correct_answer: String,
  pub is_correct: bool,
  pub genre: String,
}

#[derive(Template)]
#[template(path = "history.html")]
pub struct HistoryTemplate {
  pub stats: Vec<StatRow>,
  pub error: Option<String>,
  pub entries: Vec<HistoryRow>,
}

/// Submitted multiple-choice answer: the 1-based option index.
#[derive(Deserialize)]
pub struct ChoiceAnswerForm {
  pub answer: usize,
}

/// Submitted free-response answer.
#[derive(Deserialize)]
pub struct WrittenAnswerForm {
  pub answer: String,
}
