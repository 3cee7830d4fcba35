use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuizMode {
  MultipleChoice,
  Written,
}

impl QuizMode {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::MultipleChoice => "multiple_choice",
      Self::Written => "written",
    }
  }
}

/// A four-option multiple-choice question.
///
/// `correct_index` is 1-based, matching the 正解： line of the generated
/// text; `options` always holds exactly four entries once parsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceQuiz {
  pub question: String,
  pub options: Vec<String>,
  pub correct_index: usize,
  pub genre: String,
}

impl ChoiceQuiz {
  /// Text of the correct option.
  pub fn correct_option(&self) -> &str {
    &self.options[self.correct_index - 1]
  }
}

/// A free-response question with a multi-line model answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WrittenQuiz {
  pub question: String,
  pub model_answer: String,
  pub genre: String,
}

/// One generated question, held only for the current session.
/// Created on "generate", consumed on "submit", replaced by the next
/// generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum QuizItem {
  Choice(ChoiceQuiz),
  Written(WrittenQuiz),
}

impl QuizItem {
  pub fn mode(&self) -> QuizMode {
    match self {
      Self::Choice(_) => QuizMode::MultipleChoice,
      Self::Written(_) => QuizMode::Written,
    }
  }

  pub fn question(&self) -> &str {
    match self {
      Self::Choice(q) => &q.question,
      Self::Written(q) => &q.question,
    }
  }

  pub fn genre(&self) -> &str {
    match self {
      Self::Choice(q) => &q.genre,
      Self::Written(q) => &q.genre,
    }
  }

  /// The answer text that goes into the learning log's correct_answer
  /// column: the correct option for multiple choice, the model answer for
  /// written questions.
  pub fn correct_answer_text(&self) -> &str {
    match self {
      Self::Choice(q) => q.correct_option(),
      Self::Written(q) => &q.model_answer,
    }
  }
}
