//! Question generation through the Gemini API.
//!
//! One call = prompt for the selected genre in, free text out. Failures are
//! classified; only transient kinds are retried, a bounded number of times.
//! Callers surface a final failure as an inline message and let the user
//! retry manually.

pub mod gemini;
pub mod prompt;

pub use gemini::{GeminiClient, GenerationError};

use crate::config;
use crate::domain::QuizMode;

/// Generate the raw quiz text for a genre, retrying transient failures.
pub async fn generate_quiz_text(
  client: &GeminiClient,
  genre: &str,
  mode: QuizMode,
) -> Result<String, GenerationError> {
  let prompt = match mode {
    QuizMode::MultipleChoice => prompt::multiple_choice_prompt(genre),
    QuizMode::Written => prompt::written_prompt(genre),
  };

  let mut attempt = 0;
  loop {
    attempt += 1;
    match client.generate(&prompt).await {
      Ok(text) => return Ok(text),
      Err(e) if e.is_transient() && attempt < config::GENERATION_MAX_ATTEMPTS => {
        tracing::warn!(
          "question generation attempt {}/{} failed: {}",
          attempt,
          config::GENERATION_MAX_ATTEMPTS,
          e
        );
      }
      Err(e) => return Err(e),
    }
  }
}
