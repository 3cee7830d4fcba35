use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One answered question, as stored in the learning_log table.
/// Immutable once created; deletable individually or in bulk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
  pub id: i64,
  pub timestamp: DateTime<Utc>,
  pub question: String,
  pub user_answer: String,
  pub correct_answer: String,
  pub is_correct: bool,
  pub genre: String,
}

impl LogEntry {
  /// Build an entry for insertion. The id is assigned by the database;
  /// the timestamp defaults to now.
  pub fn new(
    question: String,
    user_answer: String,
    correct_answer: String,
    is_correct: bool,
    genre: String,
  ) -> Self {
    Self {
      id: 0,
      timestamp: Utc::now(),
      question,
      user_answer,
      correct_answer,
      is_correct,
      genre,
    }
  }
}
