//! Parser for the fixed prefix-tagged text the model is prompted to emit.
//!
//! The format is newline-separated fields behind Japanese prefixes
//! (質問：, 選択肢1：..選択肢4：, 正解：, ジャンル：, 模範解答：).
//! Parsing is permissive about surrounding whitespace and blank lines but
//! strict about field count and order for multiple choice: downstream code
//! indexes `options[correct_index - 1]` and assumes a dense 1..4 ordering.

const QUESTION_MARKER: &str = "質問：";
const OPTION_MARKER: &str = "選択肢";
const ANSWER_MARKER: &str = "正解：";
const GENRE_MARKER: &str = "ジャンル：";
const MODEL_ANSWER_MARKER: &str = "模範解答：";

/// The generated text could not be parsed into a complete question.
/// The question is discarded; no partial result is ever returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
  MissingQuestion,
  WrongOptionCount(usize),
  MissingAnswer,
  InvalidAnswerIndex(String),
  AnswerOutOfRange(i64),
  MissingModelAnswer,
}

impl std::fmt::Display for ParseError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::MissingQuestion => write!(f, "no question line found"),
      Self::WrongOptionCount(n) => write!(f, "expected 4 options, found {}", n),
      Self::MissingAnswer => write!(f, "no answer line found"),
      Self::InvalidAnswerIndex(s) => write!(f, "answer is not a number: '{}'", s),
      Self::AnswerOutOfRange(n) => write!(f, "answer index {} is outside 1..=4", n),
      Self::MissingModelAnswer => write!(f, "no model answer section found"),
    }
  }
}

impl std::error::Error for ParseError {}

/// A structurally valid multiple-choice question: question text, exactly
/// four options in order, and a 1-based correct index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedChoiceQuiz {
  pub question: String,
  pub options: Vec<String>,
  pub correct_index: usize,
  pub genre: Option<String>,
}

/// A structurally valid free-response question with its model answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedWrittenQuiz {
  pub question: String,
  pub model_answer: String,
  pub genre: Option<String>,
}

/// Trimmed, non-empty lines of the raw text.
fn clean_lines(text: &str) -> Vec<&str> {
  text.lines().map(str::trim).filter(|l| !l.is_empty()).collect()
}

/// Text after the marker on the first line containing it, trimmed.
fn field_after<'a>(lines: &[&'a str], marker: &str) -> Option<&'a str> {
  lines
    .iter()
    .find_map(|l| l.split_once(marker).map(|(_, rest)| rest.trim()))
    .filter(|s| !s.is_empty())
}

pub fn parse_multiple_choice(text: &str) -> Result<ParsedChoiceQuiz, ParseError> {
  let lines = clean_lines(text);

  let question = field_after(&lines, QUESTION_MARKER)
    .ok_or(ParseError::MissingQuestion)?
    .to_string();

  // Option lines in order of appearance; the text after the first full-width
  // colon is the option body, so options may themselves contain colons.
  let options: Vec<String> = lines
    .iter()
    .filter(|l| l.contains(OPTION_MARKER))
    .filter_map(|l| l.split_once('：').map(|(_, rest)| rest.trim().to_string()))
    .collect();

  if options.len() != 4 {
    return Err(ParseError::WrongOptionCount(options.len()));
  }

  let answer_raw = field_after(&lines, ANSWER_MARKER).ok_or(ParseError::MissingAnswer)?;
  let answer: i64 = answer_raw
    .parse()
    .map_err(|_| ParseError::InvalidAnswerIndex(answer_raw.to_string()))?;
  if !(1..=4).contains(&answer) {
    return Err(ParseError::AnswerOutOfRange(answer));
  }

  let genre = field_after(&lines, GENRE_MARKER).map(|s| s.to_string());

  Ok(ParsedChoiceQuiz {
    question,
    options,
    correct_index: answer as usize,
    genre,
  })
}

pub fn parse_written(text: &str) -> Result<ParsedWrittenQuiz, ParseError> {
  let lines = clean_lines(text);

  let question = field_after(&lines, QUESTION_MARKER)
    .ok_or(ParseError::MissingQuestion)?
    .to_string();

  // The model answer is everything after the 模範解答： marker line, up to
  // (but excluding) a trailing genre line.
  let marker_idx = lines
    .iter()
    .position(|l| l.contains(MODEL_ANSWER_MARKER))
    .ok_or(ParseError::MissingModelAnswer)?;

  let answer_lines: Vec<&str> = lines[marker_idx + 1..]
    .iter()
    .take_while(|l| !l.contains(GENRE_MARKER))
    .copied()
    .collect();

  let model_answer = answer_lines.join("\n");
  if model_answer.is_empty() {
    return Err(ParseError::MissingModelAnswer);
  }

  let genre = field_after(&lines, GENRE_MARKER).map(|s| s.to_string());

  Ok(ParsedWrittenQuiz {
    question,
    model_answer,
    genre,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  const CHOICE_TEXT: &str = "質問：鎌倉幕府の成立年は？
選択肢1：1185年
選択肢2：1192年
選択肢3：1203年
選択肢4：1221年
正解：2
ジャンル：鎌倉時代
";

  #[test]
  fn test_parse_multiple_choice() {
    let parsed = parse_multiple_choice(CHOICE_TEXT).unwrap();
    assert_eq!(parsed.question, "鎌倉幕府の成立年は？");
    assert_eq!(parsed.options, vec!["1185年", "1192年", "1203年", "1221年"]);
    assert_eq!(parsed.correct_index, 2);
    assert_eq!(parsed.genre.as_deref(), Some("鎌倉時代"));
  }

  #[test]
  fn test_blank_lines_and_padding_are_tolerated() {
    let padded = "\n\n  質問：鎌倉幕府の成立年は？  \n\n選択肢1：1185年\n 選択肢2：1192年\n\n選択肢3：1203年\n選択肢4：1221年\n\n 正解： 2 \nジャンル：鎌倉時代\n\n";
    let parsed = parse_multiple_choice(padded).unwrap();
    assert_eq!(parsed.question, "鎌倉幕府の成立年は？");
    assert_eq!(parsed.options.len(), 4);
    assert_eq!(parsed.correct_index, 2);
  }

  #[test]
  fn test_option_text_may_contain_colons() {
    let text = "質問：正しい説明は？
選択肢1：注：これは罠
選択肢2：B
選択肢3：C
選択肢4：D
正解：1
";
    let parsed = parse_multiple_choice(text).unwrap();
    assert_eq!(parsed.options[0], "注：これは罠");
    assert_eq!(parsed.genre, None);
  }

  #[test]
  fn test_missing_option_is_malformed() {
    let text = "質問：鎌倉幕府の成立年は？
選択肢1：1185年
選択肢2：1192年
選択肢3：1203年
正解：2
ジャンル：鎌倉時代
";
    assert_eq!(parse_multiple_choice(text), Err(ParseError::WrongOptionCount(3)));
  }

  #[test]
  fn test_missing_question_is_malformed() {
    let text = "選択肢1：A\n選択肢2：B\n選択肢3：C\n選択肢4：D\n正解：1\n";
    assert_eq!(parse_multiple_choice(text), Err(ParseError::MissingQuestion));
  }

  #[test]
  fn test_non_numeric_answer_is_malformed() {
    let text = "質問：Q\n選択肢1：A\n選択肢2：B\n選択肢3：C\n選択肢4：D\n正解：二\n";
    assert_eq!(
      parse_multiple_choice(text),
      Err(ParseError::InvalidAnswerIndex("二".to_string()))
    );
  }

  #[test]
  fn test_missing_answer_is_malformed() {
    let text = "質問：Q\n選択肢1：A\n選択肢2：B\n選択肢3：C\n選択肢4：D\n";
    assert_eq!(parse_multiple_choice(text), Err(ParseError::MissingAnswer));
  }

  #[test]
  fn test_answer_outside_option_range_is_malformed() {
    let base = "質問：Q\n選択肢1：A\n選択肢2：B\n選択肢3：C\n選択肢4：D\n正解：";
    assert_eq!(
      parse_multiple_choice(&format!("{base}0\n")),
      Err(ParseError::AnswerOutOfRange(0))
    );
    assert_eq!(
      parse_multiple_choice(&format!("{base}5\n")),
      Err(ParseError::AnswerOutOfRange(5))
    );
  }

  const WRITTEN_TEXT: &str = "---
質問：鎌倉幕府の成立が武士社会に与えた影響を説明せよ。

模範解答：
・歴史的事実の説明：
1192年に源頼朝が征夷大将軍に任じられ、武家政権が成立した。
・社会的背景：
荘園制の動揺と武士団の台頭が背景にある。
---

ジャンル：鎌倉時代
";

  #[test]
  fn test_parse_written() {
    let parsed = parse_written(WRITTEN_TEXT).unwrap();
    assert_eq!(parsed.question, "鎌倉幕府の成立が武士社会に与えた影響を説明せよ。");
    assert!(parsed.model_answer.starts_with("・歴史的事実の説明："));
    assert!(parsed.model_answer.contains("武家政権が成立した"));
    // Block stops before the genre line
    assert!(!parsed.model_answer.contains("ジャンル"));
    assert_eq!(parsed.genre.as_deref(), Some("鎌倉時代"));
  }

  #[test]
  fn test_written_answer_joins_nonempty_lines() {
    let parsed = parse_written(WRITTEN_TEXT).unwrap();
    // Blank lines inside the section are stripped, remaining lines re-joined
    for line in parsed.model_answer.lines() {
      assert!(!line.trim().is_empty());
    }
  }

  #[test]
  fn test_written_without_model_answer_is_malformed() {
    let text = "質問：影響を説明せよ。\nジャンル：鎌倉時代\n";
    assert_eq!(parse_written(text), Err(ParseError::MissingModelAnswer));
  }

  #[test]
  fn test_written_with_empty_answer_block_is_malformed() {
    let text = "質問：影響を説明せよ。\n模範解答：\nジャンル：鎌倉時代\n";
    assert_eq!(parse_written(text), Err(ParseError::MissingModelAnswer));
  }

  #[test]
  fn test_written_without_question_is_malformed() {
    let text = "模範解答：\n・何かの答え\n";
    assert_eq!(parse_written(text), Err(ParseError::MissingQuestion));
  }

  #[test]
  fn test_written_without_genre_line_takes_rest_of_text() {
    let text = "質問：影響を説明せよ。\n模範解答：\n・答えの一行目\n・答えの二行目\n";
    let parsed = parse_written(text).unwrap();
    assert_eq!(parsed.model_answer, "・答えの一行目\n・答えの二行目");
    assert_eq!(parsed.genre, None);
  }
}
