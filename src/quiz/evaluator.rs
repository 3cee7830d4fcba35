//! Answer scoring.
//!
//! Multiple choice is 1-based index equality. Free response is literal
//! equality after trimming and lowercasing - no fuzzy or semantic grading,
//! so a correct paraphrase still scores as incorrect. That weakness is
//! inherited behavior and is kept as-is.

/// Compare a submitted option index against the expected one (both 1-based).
pub fn evaluate_choice(submitted_index: usize, expected_index: usize) -> bool {
  submitted_index == expected_index
}

/// Compare a free-response answer against the model answer.
pub fn evaluate_written(submitted: &str, expected: &str) -> bool {
  normalize(submitted) == normalize(expected)
}

fn normalize(s: &str) -> String {
  s.trim().to_lowercase()
}
